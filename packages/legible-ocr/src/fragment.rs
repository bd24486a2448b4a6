use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Rect;

/// Why a fragment was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FragmentError {
    #[error("confidence {0} is outside [0, 1]")]
    Confidence(f64),
    #[error("bounding box {0:?} is not normalized")]
    Unnormalized(Rect),
}

/// One span of recognized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(rename = "box")]
    pub bounding_box: Rect,
    /// Best recognition candidate. `None` when the engine produced no candidate.
    #[serde(default)]
    pub text: Option<String>,
    pub confidence: f64,
}

impl Fragment {
    pub fn new(bounding_box: Rect, text: impl Into<String>, confidence: f64) -> Self {
        Self {
            bounding_box,
            text: Some(text.into()),
            confidence,
        }
    }

    pub fn without_text(bounding_box: Rect, confidence: f64) -> Self {
        Self {
            bounding_box,
            text: None,
            confidence,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Checks that the box and confidence lie in the unit range.
    pub fn validate(&self) -> Result<(), FragmentError> {
        let in_unit = |value: f64| (0.0..=1.0).contains(&value);
        if !in_unit(self.confidence) {
            return Err(FragmentError::Confidence(self.confidence));
        }
        let Rect {
            x,
            y,
            width,
            height,
        } = self.bounding_box;
        if ![x, y, width, height].into_iter().all(in_unit) {
            return Err(FragmentError::Unnormalized(self.bounding_box));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_missing_text() {
        let json = r#"{"box": {"x": 0.1, "y": 0.2, "width": 0.3, "height": 0.1}, "confidence": 0.5}"#;
        let fragment: Fragment = serde_json::from_str(json).unwrap();
        assert_eq!(fragment.text(), None);
        assert_eq!(fragment.bounding_box, Rect::new(0.1, 0.2, 0.3, 0.1));
    }

    #[test]
    fn test_validate() {
        let rect = Rect::new(0.1, 0.2, 0.3, 0.1);
        assert!(Fragment::new(rect, "ok", 0.7).validate().is_ok());
        assert_eq!(
            Fragment::new(rect, "bad", 1.5).validate(),
            Err(FragmentError::Confidence(1.5))
        );
        let outside = Rect::new(-0.1, 0.2, 0.3, 0.1);
        assert_eq!(
            Fragment::new(outside, "bad", 0.5).validate(),
            Err(FragmentError::Unnormalized(outside))
        );
    }
}
