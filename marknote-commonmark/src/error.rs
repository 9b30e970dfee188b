//! Error types for the rendering pipeline.

/// Result type for rendering operations.
pub type PipelineResult<T> = Result<T, RenderError>;

/// Errors that can occur while turning Markdown into HTML.
///
/// None of these reach the end user; the processor logs them and substitutes
/// fallback content.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
  #[error("Failed to format HTML: {0}")]
  Format(#[from] std::fmt::Error),
  #[error("Failed to serialize HTML document: {0}")]
  Serialize(#[from] std::io::Error),
  #[error("Serialized HTML is not valid UTF-8: {0}")]
  Utf8(#[from] std::string::FromUtf8Error),
}
