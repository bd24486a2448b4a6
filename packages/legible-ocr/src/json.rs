//! Replays fragment dumps captured from an external recognizer.
//!
//! A dump is a JSON array of fragments:
//!
//! ```json
//! [{"box": {"x": 0.1, "y": 0.8, "width": 0.3, "height": 0.05}, "text": "Hello", "confidence": 0.93}]
//! ```
use std::path::Path;

use async_trait::async_trait;

use crate::engine::{OcrEngine, OcrError, OcrInput, OcrOutput};
use crate::fragment::Fragment;

pub struct JsonEngine;

impl JsonEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_fragments(data: &[u8]) -> Result<Vec<Fragment>, OcrError> {
    let fragments: Vec<Fragment> = serde_json::from_slice(data)?;
    for (index, fragment) in fragments.iter().enumerate() {
        fragment
            .validate()
            .map_err(|source| OcrError::InvalidFragment { index, source })?;
    }
    Ok(fragments)
}

fn read_fragments(path: &Path) -> Result<Vec<Fragment>, OcrError> {
    let data = std::fs::read(path).map_err(|source| OcrError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_fragments(&data)
}

#[async_trait]
impl OcrEngine for JsonEngine {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
        let fragments = match input {
            OcrInput::FilePath(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || read_fragments(&path))
                    .await
                    .map_err(|e| OcrError::EngineError(e.to_string()))??
            }
            OcrInput::Bytes(data) => {
                let data = data.clone();
                tokio::task::spawn_blocking(move || parse_fragments(&data))
                    .await
                    .map_err(|e| OcrError::EngineError(e.to_string()))??
            }
        };
        Ok(OcrOutput { fragments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::FragmentError;
    use crate::geometry::Rect;
    use std::path::PathBuf;

    const DUMP: &str = r#"[
        {"box": {"x": 0.1, "y": 0.8, "width": 0.3, "height": 0.05}, "text": "Hello", "confidence": 0.93},
        {"box": {"x": 0.5, "y": 0.8, "width": 0.2, "height": 0.05}, "text": null, "confidence": 0.4}
    ]"#;

    #[tokio::test]
    async fn test_recognize_bytes() {
        let engine = JsonEngine::new();
        let output = engine
            .recognize(&OcrInput::Bytes(DUMP.as_bytes().to_vec()))
            .await
            .unwrap();
        assert_eq!(output.fragments.len(), 2);
        assert_eq!(output.fragments[0].text(), Some("Hello"));
        assert_eq!(output.fragments[0].bounding_box, Rect::new(0.1, 0.8, 0.3, 0.05));
        assert_eq!(output.fragments[1].text(), None);
    }

    #[tokio::test]
    async fn test_rejects_malformed_json() {
        let engine = JsonEngine::new();
        let result = engine.recognize(&OcrInput::Bytes(b"{not json".to_vec())).await;
        assert!(matches!(result, Err(OcrError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_confidence() {
        let dump = r#"[{"box": {"x": 0.1, "y": 0.1, "width": 0.1, "height": 0.1}, "text": "x", "confidence": 3.0}]"#;
        let engine = JsonEngine::new();
        let err = engine
            .recognize(&OcrInput::Bytes(dump.as_bytes().to_vec()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OcrError::InvalidFragment {
                index: 0,
                source: FragmentError::Confidence(_)
            }
        ));
        assert!(err.to_string().contains("fragment 0"), "{err}");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let engine = JsonEngine::new();
        let input = OcrInput::FilePath(PathBuf::from("/nonexistent/fragments.json"));
        let err = engine.recognize(&input).await.unwrap_err();
        assert!(matches!(err, OcrError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/fragments.json"), "{err}");
    }
}
