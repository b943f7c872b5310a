//! Error handling
//!
//! Chỉ dùng cho các bề mặt I/O của pipeline. Core (features, labeler)
//! không bao giờ trả lỗi.

use thiserror::Error;

use crate::logic::features::layout::LayoutMismatchError;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatchError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
