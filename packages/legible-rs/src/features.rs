//! Feature vectors and distance functions used by the clusterer.
use legible_ocr::{Fragment, Rect};

/// A feature vector. Every observation in one clustering run must produce
/// vectors of the same length.
pub type FeatureVector = Vec<f64>;

/// Measures the distance between two feature vectors.
pub type DistanceFn = fn(&[f64], &[f64]) -> f64;

/// Anything that can be placed in feature space.
pub trait Clusterable {
    fn cluster_features(&self) -> FeatureVector;
}

impl Clusterable for Rect {
    fn cluster_features(&self) -> FeatureVector {
        let top_left = self.top_left();
        vec![top_left.x, top_left.y]
    }
}

/// Fragments cluster by the top-left corner of their box.
impl Clusterable for Fragment {
    fn cluster_features(&self) -> FeatureVector {
        self.bounding_box.cluster_features()
    }
}

impl<T: Clusterable + ?Sized> Clusterable for &T {
    fn cluster_features(&self) -> FeatureVector {
        (**self).cluster_features()
    }
}

/// Euclidean distance. Extra components of the longer vector are ignored.
pub fn euclidean(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter()
        .zip(rhs)
        .map(|(a, b)| (b - a) * (b - a))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_features_are_top_left() {
        let fragment = Fragment::new(Rect::new(0.25, 0.5, 0.1, 0.2), "word", 0.9);
        assert_eq!(fragment.cluster_features(), vec![0.25, 0.5]);
        assert_eq!(fragment.cluster_features(), fragment.cluster_features());
    }

    #[test]
    fn test_euclidean() {
        assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
    }
}
