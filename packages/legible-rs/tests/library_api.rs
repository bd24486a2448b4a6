//! Integration tests for the legible-rs library API

use legible_ocr::{JsonEngine, OcrEngine, OcrInput};
use std::path::PathBuf;

#[test]
fn test_prelude_imports() {
    // This test verifies that the prelude module exports everything correctly
    use legible_rs::prelude::*;

    let fragments = vec![
        Fragment::new(Rect::new(0.1, 0.8, 0.3, 0.05), "Hello", 0.9),
        Fragment::new(Rect::new(0.5, 0.8, 0.3, 0.05), "world", 0.2),
    ];

    assert_eq!(plain_text(&fragments, 0.49), "Hello");
    assert_eq!(grouped_text(&fragments, 0.49, 0.2, 3), vec!["Hello"]);

    let config = AssemblyConfig::default();
    assert_eq!(recognized_text(&fragments, RecognitionMode::Grouped, &config), "Hello");
}

#[test]
fn test_reading_order_scenario() {
    use legible_rs::{sorted_top_to_bottom_left_to_right, Fragment, Rect};

    let fragments: Vec<Fragment> = [(2.0, 3.0, "a"), (3.0, 2.0, "c"), (1.0, 2.0, "b"), (2.0, 1.0, "d")]
        .into_iter()
        .map(|(x, y, text)| Fragment::new(Rect::new(x, y, 0.0, 0.0), text, 1.0))
        .collect();

    let order: Vec<&str> = sorted_top_to_bottom_left_to_right(fragments.iter())
        .into_iter()
        .filter_map(Fragment::text)
        .collect();
    assert_eq!(order, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_bounding_box_scenario() {
    use legible_rs::{bounding_box, Rect};

    let rects = [
        Rect::new(10.0, 50.0, 30.0, 40.0),
        Rect::new(60.0, 30.0, 100.0, 10.0),
        Rect::new(40.0, 5.0, 50.0, 50.0),
        Rect::new(80.0, 100.0, 10.0, 70.0),
    ];
    assert_eq!(bounding_box(&rects), Rect::new(10.0, 5.0, 150.0, 165.0));
}

#[test]
fn test_cluster_module() {
    // This test verifies the cluster module is publicly accessible
    use legible_rs::cluster::{Clusterer, KMeansElbow, Method};
    use legible_rs::{Fragment, Rect};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let fragments = vec![Fragment::new(Rect::new(0.2, 0.3, 0.1, 0.1), "only", 0.9)];
    let clusterer = Clusterer::new(&fragments).unwrap();
    assert_eq!(clusterer.dimension(), 2);

    let result = clusterer
        .cluster_with_rng(
            &Method::KMeansElbow(KMeansElbow::new(0.2, 3)),
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();
    assert_eq!(result.clusters.len(), 1);
    assert_eq!(result.clusters[0].observations()[0].text(), Some("only"));
    assert_eq!(result.error, 0.0);
}

#[tokio::test]
async fn test_engine_to_grouped_text() {
    use legible_rs::{recognized_text, AssemblyConfig, RecognitionMode, Seeding};

    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/columns.json");
    let output = JsonEngine::new()
        .recognize(&OcrInput::FilePath(path))
        .await
        .unwrap();
    assert_eq!(output.fragments.len(), 8);

    let config = AssemblyConfig {
        max_groups: 2,
        seeding: Seeding::FarthestPoint,
        ..Default::default()
    };
    assert_eq!(
        recognized_text(&output.fragments, RecognitionMode::Grouped, &config),
        "alpha beta gamma\ndelta epsilon zeta"
    );
}
