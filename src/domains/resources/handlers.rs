//! Read handlers and the payloads they produce.

use std::sync::Arc;

use super::link::ContentFormat;

/// Function invoked when a leaf resource is read.
///
/// Handlers are shared between concurrent requests and hold no per-call state.
pub type ReadHandler = Arc<dyn Fn() -> String + Send + Sync>;

/// The result of reading a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadPayload {
    /// Textual body of the response.
    pub content: String,

    /// Content format of `content`.
    pub content_format: ContentFormat,
}

impl ReadPayload {
    /// Create a plain-text payload.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_format: ContentFormat::TEXT_PLAIN,
        }
    }

    /// MIME type of the payload, falling back to `application/octet-stream`.
    pub fn media_type(&self) -> &'static str {
        self.content_format
            .media_type()
            .unwrap_or("application/octet-stream")
    }
}
