pub mod engine;
pub mod fragment;
pub mod geometry;
pub mod json;

pub use engine::{OcrEngine, OcrError, OcrInput, OcrOutput};
pub use fragment::{Fragment, FragmentError};
pub use geometry::{bounding_box, distance, EdgeInsets, Point, Rect, Size};
pub use json::JsonEngine;
