//! Turns recognized fragments into text in reading order.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use legible_ocr::Fragment;

use crate::cluster::{ClusterError, Clusterer, Method};
use crate::config::AssemblyConfig;
use crate::reading_order::{sorted_clusters, sorted_top_to_bottom_left_to_right};

/// How recognized text is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionMode {
    /// One string in reading order.
    #[default]
    Plain,
    /// One line per spatial group.
    Grouped,
}

/// Fragments above `min_confidence` that carry text.
fn legible(fragments: &[Fragment], min_confidence: f64) -> Vec<&Fragment> {
    fragments
        .iter()
        .filter(|f| f.confidence > min_confidence && f.text.is_some())
        .collect()
}

fn join_in_reading_order<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a Fragment>,
{
    sorted_top_to_bottom_left_to_right(fragments)
        .into_iter()
        .filter_map(Fragment::text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Joins every fragment above `min_confidence` with single spaces, in reading order.
pub fn plain_text(fragments: &[Fragment], min_confidence: f64) -> String {
    join_in_reading_order(legible(fragments, min_confidence))
}

/// Groups fragments spatially and returns one string per group, in reading order.
///
/// Fragments at or below `min_confidence` are dropped before clustering. An
/// empty list means there was nothing to group.
pub fn grouped_text(
    fragments: &[Fragment],
    min_confidence: f64,
    cluster_threshold: f64,
    max_groups: usize,
) -> Vec<String> {
    let config = AssemblyConfig {
        min_confidence,
        cluster_threshold,
        max_groups,
        ..Default::default()
    };
    grouped_text_with(fragments, &config, &mut StdRng::from_entropy())
}

/// [`grouped_text`] with every tunable exposed and a caller-supplied random source.
pub fn grouped_text_with<R: Rng + ?Sized>(
    fragments: &[Fragment],
    config: &AssemblyConfig,
    rng: &mut R,
) -> Vec<String> {
    let kept = legible(fragments, config.min_confidence);

    let result = Clusterer::new(&kept)
        .and_then(|clusterer| clusterer.cluster_with_rng(&Method::KMeansElbow(config.elbow()), rng));
    let result = match result {
        Ok(result) => result,
        Err(ClusterError::NoObservations) => {
            debug!("no fragments above confidence {}", config.min_confidence);
            return Vec::new();
        }
        Err(e) => {
            error!(error = %e, "failed to group fragments");
            return Vec::new();
        }
    };

    sorted_clusters(result.clusters)
        .iter()
        .map(|cluster| join_in_reading_order(cluster.observations().iter().map(|f| **f)))
        .collect()
}

/// Plain text, or grouped text joined by newlines.
///
/// Grouped mode falls back to plain text when grouping yields nothing and
/// `config.fallback_to_plain` is set.
pub fn recognized_text(
    fragments: &[Fragment],
    mode: RecognitionMode,
    config: &AssemblyConfig,
) -> String {
    match mode {
        RecognitionMode::Plain => plain_text(fragments, config.min_confidence),
        RecognitionMode::Grouped => {
            let groups = grouped_text_with(fragments, config, &mut config.rng());
            if !groups.is_empty() || !config.fallback_to_plain {
                return groups.join("\n");
            }
            let plain = plain_text(fragments, config.min_confidence);
            if !plain.is_empty() {
                warn!("grouping produced no groups, falling back to plain text");
            }
            plain
        }
    }
}
