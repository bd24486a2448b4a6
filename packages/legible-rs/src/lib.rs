//! # legible-rs
//!
//! Orders and groups recognized text fragments into human-readable text.
//!
//! ## Features
//!
//! - **Reading Order**: Sort fragments top to bottom, left to right in the recognizer's bottom-left coordinate space
//! - **Confidence Filtering**: Drop fragments at or below a confidence threshold, and fragments without a text candidate
//! - **Clustering**: Group fragments into paragraphs or columns with K-means, picking K by the elbow method
//! - **Text Assembly**: Produce one plain string, or one string per group, with a fallback to plain text
//!
//! ## Quick Start
//!
//! ```ignore
//! use legible_rs::prelude::*;
//!
//! let fragments = vec![
//!     Fragment::new(Rect::new(0.1, 0.8, 0.3, 0.05), "Hello", 0.9),
//!     Fragment::new(Rect::new(0.5, 0.8, 0.3, 0.05), "world", 0.2),
//! ];
//!
//! // Plain text in reading order
//! assert_eq!(plain_text(&fragments, 0.49), "Hello");
//!
//! // One string per spatial group
//! let groups = grouped_text(&fragments, 0.49, 0.2, 3);
//! assert_eq!(groups, vec!["Hello"]);
//! ```

pub mod assembly;
pub mod cluster;
pub mod config;
pub mod features;
pub mod reading_order;

// Re-export commonly used types at the root level
pub use assembly::{grouped_text, grouped_text_with, plain_text, recognized_text, RecognitionMode};
pub use cluster::{cluster, Cluster, ClusterError, ClusterResult, Clusterer, KMeans, KMeansElbow, Method, Seeding};
pub use config::{AssemblyConfig, ConfigError};
pub use features::{euclidean, Clusterable, DistanceFn, FeatureVector};
pub use legible_ocr::{bounding_box, distance, Fragment, Point, Rect};
pub use reading_order::{
    sorted_clusters, sorted_left_to_right_top_to_bottom, sorted_top_to_bottom_left_to_right, Bounded,
};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use legible_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        bounding_box, cluster, grouped_text, grouped_text_with, plain_text, recognized_text, sorted_clusters,
        sorted_left_to_right_top_to_bottom, sorted_top_to_bottom_left_to_right, AssemblyConfig, Bounded,
        Cluster, ClusterError, ClusterResult, Clusterable, Clusterer, Fragment, KMeans, KMeansElbow, Method,
        RecognitionMode, Rect, Seeding,
    };
}
