//! K-means clustering with automatic selection of K.
//!
//! The clusterer is generic over anything [`Clusterable`]. It borrows the
//! observations, so every [`Cluster`] hands back references to the original
//! values rather than copies.
//!
//! Two methods are available:
//!
//! - [`Method::KMeans`] partitions the observations into a fixed number of
//!   groups.
//! - [`Method::KMeansElbow`] runs K-means for K = 1, 2, ... and stops as soon
//!   as an extra group no longer reduces the error by at least `threshold`
//!   (relative), or produces an empty group.
//!
//! The error of a run is the sum, over every cluster and member, of the
//! squared distance between the member and its cluster's centroid.
//!
//! ```
//! use legible_rs::cluster::{Clusterer, KMeans, Method};
//! use legible_rs::features::{Clusterable, FeatureVector};
//!
//! struct Sample(f64, f64);
//!
//! impl Clusterable for Sample {
//!     fn cluster_features(&self) -> FeatureVector {
//!         vec![self.0, self.1]
//!     }
//! }
//!
//! let samples = [Sample(0.0, 0.0), Sample(5.0, 5.0)];
//! let clusterer = Clusterer::new(&samples).unwrap();
//! let result = clusterer.cluster(&Method::KMeans(KMeans::new(1))).unwrap();
//! assert_eq!(result.clusters.len(), 1);
//! assert_eq!(result.clusters[0].len(), 2);
//! ```
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::features::{euclidean, Clusterable, DistanceFn, FeatureVector};

pub const DEFAULT_ITERATIONS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("no observations to cluster")]
    NoObservations,
    #[error("feature dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("cannot split {observations} observations into {requested} groups")]
    InvalidNumberOfGroups { requested: usize, observations: usize },
}

/// How initial centroids are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seeding {
    /// Each centroid component is drawn uniformly between the smallest and
    /// largest value of that feature. Centroids may land far from any
    /// observation, which can leave clusters empty.
    #[default]
    UniformRange,
    /// Deterministic farthest-first seeding from actual observations: the first
    /// observation, then repeatedly the observation farthest from its nearest
    /// chosen centroid.
    FarthestPoint,
}

/// Fixed-K clustering parameters.
#[derive(Clone, Copy)]
pub struct KMeans {
    pub number_of_groups: usize,
    /// Upper bound on refinement rounds.
    pub iterations: usize,
    pub distance: DistanceFn,
    pub seeding: Seeding,
}

impl KMeans {
    pub fn new(number_of_groups: usize) -> Self {
        Self {
            number_of_groups,
            iterations: DEFAULT_ITERATIONS,
            distance: euclidean,
            seeding: Seeding::default(),
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_distance(mut self, distance: DistanceFn) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_seeding(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }
}

impl fmt::Debug for KMeans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KMeans")
            .field("number_of_groups", &self.number_of_groups)
            .field("iterations", &self.iterations)
            .field("seeding", &self.seeding)
            .finish_non_exhaustive()
    }
}

/// Elbow-method parameters.
#[derive(Clone, Copy)]
pub struct KMeansElbow {
    /// Minimum relative error improvement required to accept one more group.
    pub threshold: f64,
    pub maximum_number_of_groups: usize,
    pub iterations: usize,
    pub distance: DistanceFn,
    pub seeding: Seeding,
}

impl KMeansElbow {
    pub fn new(threshold: f64, maximum_number_of_groups: usize) -> Self {
        Self {
            threshold,
            maximum_number_of_groups,
            iterations: DEFAULT_ITERATIONS,
            distance: euclidean,
            seeding: Seeding::default(),
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_distance(mut self, distance: DistanceFn) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_seeding(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }

    fn k_means(&self, number_of_groups: usize) -> KMeans {
        KMeans {
            number_of_groups,
            iterations: self.iterations,
            distance: self.distance,
            seeding: self.seeding,
        }
    }
}

impl fmt::Debug for KMeansElbow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KMeansElbow")
            .field("threshold", &self.threshold)
            .field("maximum_number_of_groups", &self.maximum_number_of_groups)
            .field("iterations", &self.iterations)
            .field("seeding", &self.seeding)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Method {
    KMeans(KMeans),
    KMeansElbow(KMeansElbow),
}

/// A group of observations around a centroid.
#[derive(Debug)]
pub struct Cluster<'a, O> {
    centroid: FeatureVector,
    observations: Vec<&'a O>,
    features: Vec<FeatureVector>,
}

impl<'a, O> Cluster<'a, O> {
    fn with_centroid(centroid: FeatureVector) -> Self {
        Self {
            centroid,
            observations: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn centroid(&self) -> &[f64] {
        &self.centroid
    }

    pub fn observations(&self) -> &[&'a O] {
        &self.observations
    }

    /// Feature vectors of the members, parallel to [`Cluster::observations`].
    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    fn push(&mut self, observation: &'a O, features: FeatureVector) {
        self.observations.push(observation);
        self.features.push(features);
    }

    fn squared_error(&self, distance: DistanceFn) -> f64 {
        self.features
            .iter()
            .map(|features| {
                let d = distance(&self.centroid, features);
                d * d
            })
            .sum()
    }
}

/// Clusters and the total squared error of one clustering attempt.
#[derive(Debug)]
pub struct ClusterResult<'a, O> {
    pub clusters: Vec<Cluster<'a, O>>,
    pub error: f64,
}

impl<O> Default for ClusterResult<'_, O> {
    fn default() -> Self {
        Self {
            clusters: Vec::new(),
            error: 0.0,
        }
    }
}

impl<O> ClusterResult<'_, O> {
    pub fn has_empty_cluster(&self) -> bool {
        self.clusters.iter().any(Cluster::is_empty)
    }
}

/// Validated observations ready to be clustered.
///
/// Features are extracted once, when the clusterer is built, and reused by
/// every run.
pub struct Clusterer<'a, O> {
    observations: &'a [O],
    features: Vec<FeatureVector>,
    dimension: usize,
    /// Per-dimension (min, max) across all observations.
    ranges: Vec<(f64, f64)>,
}

impl<'a, O: Clusterable> Clusterer<'a, O> {
    pub fn new(observations: &'a [O]) -> Result<Self, ClusterError> {
        let features: Vec<FeatureVector> =
            observations.iter().map(O::cluster_features).collect();
        let dimension = features.first().ok_or(ClusterError::NoObservations)?.len();

        if let Some(mismatch) = features.iter().find(|f| f.len() != dimension) {
            return Err(ClusterError::DimensionMismatch {
                expected: dimension,
                found: mismatch.len(),
            });
        }

        let ranges = (0..dimension)
            .map(|d| {
                features.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), f| {
                    (lo.min(f[d]), hi.max(f[d]))
                })
            })
            .collect();

        Ok(Self {
            observations,
            features,
            dimension,
            ranges,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Clusters using an entropy-seeded random source.
    pub fn cluster(&self, method: &Method) -> Result<ClusterResult<'a, O>, ClusterError> {
        let mut rng = StdRng::from_entropy();
        self.cluster_with_rng(method, &mut rng)
    }

    /// Clusters using the given random source, for reproducible runs.
    pub fn cluster_with_rng<R: Rng + ?Sized>(
        &self,
        method: &Method,
        rng: &mut R,
    ) -> Result<ClusterResult<'a, O>, ClusterError> {
        match method {
            Method::KMeans(params) => {
                let k = params.number_of_groups;
                if k == 0 || k > self.len() {
                    return Err(ClusterError::InvalidNumberOfGroups {
                        requested: k,
                        observations: self.len(),
                    });
                }
                Ok(self.k_means(params, rng))
            }
            Method::KMeansElbow(params) => Ok(self.k_means_elbow(params, rng)),
        }
    }

    fn k_means<R: Rng + ?Sized>(&self, params: &KMeans, rng: &mut R) -> ClusterResult<'a, O> {
        let mut centroids = self.initial_centroids(params, rng);
        let mut assignments: Vec<usize> = Vec::with_capacity(self.len());

        for _ in 0..params.iterations {
            assignments.clear();
            assignments.extend(
                self.features
                    .iter()
                    .map(|features| nearest(&centroids, features, params.distance)),
            );

            let next = self.mean_centroids(&assignments, centroids.len());
            let converged = next == centroids;
            centroids = next;
            if converged {
                break;
            }
        }

        let observations: &'a [O] = self.observations;
        let mut clusters: Vec<Cluster<'a, O>> =
            centroids.into_iter().map(Cluster::with_centroid).collect();
        for (index, &group) in assignments.iter().enumerate() {
            clusters[group].push(&observations[index], self.features[index].clone());
        }

        let error = clusters.iter().map(|c| c.squared_error(params.distance)).sum();
        ClusterResult { clusters, error }
    }

    fn k_means_elbow<R: Rng + ?Sized>(
        &self,
        params: &KMeansElbow,
        rng: &mut R,
    ) -> ClusterResult<'a, O> {
        let limit = params.maximum_number_of_groups.min(self.len());
        let mut accepted: Option<ClusterResult<'a, O>> = None;

        for k in 1..=limit {
            let result = self.k_means(&params.k_means(k), rng);

            if result.has_empty_cluster() {
                debug!(k, "empty cluster, keeping previous grouping");
                break;
            }

            if let Some(previous) = &accepted {
                if previous.error == 0.0 {
                    debug!(k = k - 1, "previous grouping is exact");
                    break;
                }
                let improvement = (result.error - previous.error).abs() / previous.error;
                if improvement < params.threshold {
                    debug!(k, improvement, "improvement below threshold");
                    break;
                }
            }

            accepted = Some(result);
        }

        let result = accepted.unwrap_or_default();
        debug!(
            groups = result.clusters.len(),
            error = result.error,
            "elbow search finished"
        );
        result
    }

    fn initial_centroids<R: Rng + ?Sized>(&self, params: &KMeans, rng: &mut R) -> Vec<FeatureVector> {
        match params.seeding {
            Seeding::UniformRange => (0..params.number_of_groups)
                .map(|_| self.random_centroid(rng))
                .collect(),
            Seeding::FarthestPoint => self.farthest_point_centroids(params),
        }
    }

    fn random_centroid<R: Rng + ?Sized>(&self, rng: &mut R) -> FeatureVector {
        self.ranges
            .iter()
            .map(|&(lo, hi)| if lo < hi { rng.gen_range(lo..=hi) } else { lo })
            .collect()
    }

    fn farthest_point_centroids(&self, params: &KMeans) -> Vec<FeatureVector> {
        let mut centroids: Vec<FeatureVector> = Vec::with_capacity(params.number_of_groups);
        centroids.push(self.features[0].clone());

        while centroids.len() < params.number_of_groups {
            let mut farthest = 0;
            let mut farthest_distance = f64::NEG_INFINITY;
            for (index, features) in self.features.iter().enumerate() {
                let closest = centroids
                    .iter()
                    .map(|c| (params.distance)(c, features))
                    .fold(f64::INFINITY, f64::min);
                if closest > farthest_distance {
                    farthest = index;
                    farthest_distance = closest;
                }
            }
            centroids.push(self.features[farthest].clone());
        }

        centroids
    }

    /// Per-dimension means of each group. Empty groups get an all-zero centroid.
    fn mean_centroids(&self, assignments: &[usize], groups: usize) -> Vec<FeatureVector> {
        let mut sums = vec![vec![0.0; self.dimension]; groups];
        let mut counts = vec![0usize; groups];

        for (features, &group) in self.features.iter().zip(assignments) {
            counts[group] += 1;
            for (sum, value) in sums[group].iter_mut().zip(features) {
                *sum += value;
            }
        }

        for (sum, count) in sums.iter_mut().zip(counts) {
            if count > 0 {
                for value in sum.iter_mut() {
                    *value /= count as f64;
                }
            }
        }

        sums
    }
}

/// Index of the centroid closest to `features`. The first of equally close
/// centroids wins.
fn nearest(centroids: &[FeatureVector], features: &[f64], distance: DistanceFn) -> usize {
    let mut closest = 0;
    let mut shortest = f64::MAX;
    for (index, centroid) in centroids.iter().enumerate() {
        let d = distance(centroid, features);
        if d < shortest {
            shortest = d;
            closest = index;
        }
    }
    closest
}

/// Builds a [`Clusterer`] over `observations` and runs `method` once.
pub fn cluster<'a, O: Clusterable>(
    observations: &'a [O],
    method: &Method,
) -> Result<ClusterResult<'a, O>, ClusterError> {
    Clusterer::new(observations)?.cluster(method)
}
