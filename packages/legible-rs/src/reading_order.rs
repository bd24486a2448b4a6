//! Reading-order sorting for boxes, fragments and clusters.
//!
//! Boxes use the recognizer's coordinate space, where Y grows upward, so a
//! larger Y means earlier in reading order.
use std::cmp::Ordering;

use legible_ocr::{bounding_box, Fragment, Point, Rect};

use crate::cluster::Cluster;

/// Row granularity for [`left_to_right_top_to_bottom`], in unit-square units.
pub const ROW_BUCKET: f64 = 1e-3;

/// Anything with a bounding rectangle.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

impl Bounded for Fragment {
    fn bounds(&self) -> Rect {
        self.bounding_box
    }
}

impl<T: Bounded + ?Sized> Bounded for &T {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

/// Higher Y first; exactly equal Y falls back to smaller X first.
pub fn top_to_bottom_left_to_right(lhs: &Point, rhs: &Point) -> Ordering {
    rhs.y.total_cmp(&lhs.y).then_with(|| lhs.x.total_cmp(&rhs.x))
}

fn row(y: f64) -> i64 {
    (y / ROW_BUCKET).round() as i64
}

/// Like [`top_to_bottom_left_to_right`], but Y values within the same
/// [`ROW_BUCKET`] count as one row.
pub fn left_to_right_top_to_bottom(lhs: &Point, rhs: &Point) -> Ordering {
    row(rhs.y)
        .cmp(&row(lhs.y))
        .then_with(|| lhs.x.total_cmp(&rhs.x))
}

pub fn sort_top_to_bottom_left_to_right<T: Bounded>(items: &mut [T]) {
    items.sort_by(|lhs, rhs| {
        top_to_bottom_left_to_right(&lhs.bounds().top_left(), &rhs.bounds().top_left())
    });
}

/// Returns `items` ordered by the top-left corner of their boxes.
pub fn sorted_top_to_bottom_left_to_right<T, I>(items: I) -> Vec<T>
where
    T: Bounded,
    I: IntoIterator<Item = T>,
{
    let mut items: Vec<T> = items.into_iter().collect();
    sort_top_to_bottom_left_to_right(&mut items);
    items
}

pub fn sorted_left_to_right_top_to_bottom<T, I>(items: I) -> Vec<T>
where
    T: Bounded,
    I: IntoIterator<Item = T>,
{
    let mut items: Vec<T> = items.into_iter().collect();
    items.sort_by(|lhs, rhs| {
        left_to_right_top_to_bottom(&lhs.bounds().top_left(), &rhs.bounds().top_left())
    });
    items
}

impl<O: Bounded> Cluster<'_, O> {
    /// The box covering every member. Zero for an empty cluster.
    pub fn bounding_box(&self) -> Rect {
        let rects: Vec<Rect> = self.observations().iter().map(|o| o.bounds()).collect();
        bounding_box(&rects)
    }
}

/// Orders clusters by the top-left corner of their bounding boxes.
pub fn sorted_clusters<'a, O: Bounded>(clusters: Vec<Cluster<'a, O>>) -> Vec<Cluster<'a, O>> {
    let mut keyed: Vec<(Point, Cluster<'a, O>)> = clusters
        .into_iter()
        .map(|cluster| (cluster.bounding_box().top_left(), cluster))
        .collect();
    keyed.sort_by(|(lhs, _), (rhs, _)| left_to_right_top_to_bottom(lhs, rhs));
    keyed.into_iter().map(|(_, cluster)| cluster).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{Clusterer, KMeans, Method, Seeding};

    fn at(x: f64, y: f64) -> Rect {
        Rect::new(x, y, 0.0, 0.0)
    }

    #[test]
    fn test_rows_then_columns() {
        let rects = vec![at(2.0, 3.0), at(3.0, 2.0), at(1.0, 2.0), at(2.0, 1.0)];
        assert_eq!(
            sorted_top_to_bottom_left_to_right(rects),
            vec![at(2.0, 3.0), at(1.0, 2.0), at(3.0, 2.0), at(2.0, 1.0)]
        );
    }

    #[test]
    fn test_grid() {
        let rects = [
            at(2.0, 1.0),
            at(2.0, 3.0),
            at(3.0, 2.0),
            at(1.0, 2.0),
            at(1.0, 1.0),
            at(4.0, 1.0),
            at(2.0, 2.0),
        ];
        let sorted: Vec<Rect> = sorted_top_to_bottom_left_to_right(rects.iter())
            .into_iter()
            .copied()
            .collect();
        assert_eq!(
            sorted,
            vec![
                at(2.0, 3.0),
                at(1.0, 2.0),
                at(2.0, 2.0),
                at(3.0, 2.0),
                at(1.0, 1.0),
                at(2.0, 1.0),
                at(4.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_repeated_sorts_agree() {
        let rects = vec![at(0.3, 0.9), at(0.1, 0.4), at(0.7, 0.6), at(0.2, 0.1)];
        let first = sorted_top_to_bottom_left_to_right(rects.clone());
        let second = sorted_top_to_bottom_left_to_right(rects);
        assert_eq!(first, second);
    }

    #[test]
    fn test_row_bucket_absorbs_jitter() {
        let rects = vec![at(0.6, 0.5000001), at(0.2, 0.5)];
        assert_eq!(
            sorted_left_to_right_top_to_bottom(rects.clone()),
            vec![at(0.2, 0.5), at(0.6, 0.5000001)]
        );
        // The exact ordering treats the jitter as a separate, higher row.
        assert_eq!(
            sorted_top_to_bottom_left_to_right(rects),
            vec![at(0.6, 0.5000001), at(0.2, 0.5)]
        );
    }

    #[test]
    fn test_composite_key_is_consistent() {
        // Pairs the old `x < x && y > y` predicate could not order.
        let rects = vec![at(0.1, 0.2), at(0.5, 0.8), at(0.9, 0.5)];
        assert_eq!(
            sorted_left_to_right_top_to_bottom(rects),
            vec![at(0.5, 0.8), at(0.9, 0.5), at(0.1, 0.2)]
        );
    }

    #[test]
    fn test_sorted_clusters() {
        let rects = vec![
            Rect::new(0.6, 0.8, 0.2, 0.05),
            Rect::new(0.6, 0.7, 0.2, 0.05),
            Rect::new(0.1, 0.8, 0.2, 0.05),
            Rect::new(0.1, 0.7, 0.2, 0.05),
        ];
        let clusterer = Clusterer::new(&rects).unwrap();
        let method = Method::KMeans(KMeans::new(2).with_seeding(Seeding::FarthestPoint));
        let result = clusterer.cluster(&method).unwrap();

        let ordered = sorted_clusters(result.clusters);
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].bounding_box(), bounding_box(&[rects[2], rects[3]]));
        assert_eq!(ordered[1].bounding_box(), bounding_box(&[rects[0], rects[1]]));
    }

    #[test]
    fn test_empty_cluster_bounds_are_zero() {
        let rects = [at(0.5, 0.5), at(0.5, 0.5)];
        let clusterer = Clusterer::new(&rects).unwrap();
        let method = Method::KMeans(KMeans::new(2).with_seeding(Seeding::FarthestPoint));
        let result = clusterer.cluster(&method).unwrap();
        assert!(result.clusters[1].is_empty());
        assert_eq!(result.clusters[1].bounding_box(), Rect::default());
    }
}
