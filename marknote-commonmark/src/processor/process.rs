//! High-level processing functions with error recovery.
use log::error;

use super::types::MarkdownProcessor;
use crate::types::RenderResult;

/// Process markdown content with error recovery.
///
/// [`MarkdownProcessor::render`] already turns pipeline errors into fallback
/// content; this additionally catches panics from the parser or the DOM pass
/// so a single bad document can never take down a build or a server worker.
///
/// # Arguments
///
/// * `processor` - The configured markdown processor
/// * `content` - The raw markdown content to process
/// * `fallback` - HTML used when rendering fails or the content is empty
#[must_use]
pub fn process_with_recovery(
  processor: &MarkdownProcessor,
  content: &str,
  fallback: &str,
) -> RenderResult {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor.render_or(content, fallback)
  })) {
    Ok(result) => result,
    Err(panic_err) => {
      if let Some(msg) = panic_err.downcast_ref::<String>() {
        error!("Panic during markdown processing: {msg}");
      } else if let Some(msg) = panic_err.downcast_ref::<&str>() {
        error!("Panic during markdown processing: {msg}");
      } else {
        error!("Unknown panic during markdown processing");
      }
      RenderResult::fallback(fallback)
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::processor::types::MarkdownOptions;

  fn processor() -> MarkdownProcessor {
    MarkdownProcessor::new(MarkdownOptions::default())
  }

  #[test]
  fn test_recovery_passes_through_success() {
    let result = process_with_recovery(&processor(), "## Intro\n", "x");
    assert!(result.html.contains("<h2"));
    assert_eq!(result.headings.len(), 1);
  }

  #[test]
  fn test_recovery_uses_given_fallback_for_empty() {
    let result = process_with_recovery(&processor(), "", "");
    assert_eq!(result, RenderResult::fallback(""));
  }
}
