use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::fragment::{Fragment, FragmentError};

/// Where a recognizer reads from.
#[derive(Debug, Clone)]
pub enum OcrInput {
    FilePath(PathBuf),
    Bytes(Vec<u8>),
}

/// The fragments produced by one recognition pass.
#[derive(Debug, Clone, Default)]
pub struct OcrOutput {
    pub fragments: Vec<Fragment>,
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed fragment dump: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("fragment {index}: {source}")]
    InvalidFragment {
        index: usize,
        source: FragmentError,
    },
    #[error("engine error: {0}")]
    EngineError(String),
}

/// A text recognizer that turns an image (or a prior capture of one) into fragments.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError>;
}
