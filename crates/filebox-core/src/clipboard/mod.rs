//! Copying a literal string, or the `link` carried by a swap event, to the clipboard.

mod event;
mod system;

pub use event::{EventDetail, SwapEvent, XhrDetail};
pub use system::SystemClipboard;

use serde_json::Value;

/// Something to copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyInput {
    /// Copied verbatim.
    Literal(String),
    /// The `link` field of the event's JSON response is copied.
    FromEvent(SwapEvent),
}

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[source] arboard::Error),
    #[error("clipboard write failed: {0}")]
    Write(#[source] arboard::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("invalid input to copy: {0}")]
    InvalidInput(String),
    #[error("event response has no usable link: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl CopyInput {
    /// Classifies an untyped value: a JSON string is a literal, an object with
    /// `detail.xhr.response` is an event, anything else is rejected.
    pub fn from_value(value: Value) -> Result<Self, CopyError> {
        match value {
            Value::String(s) => Ok(CopyInput::Literal(s)),
            Value::Object(_) => serde_json::from_value::<SwapEvent>(value)
                .map(CopyInput::FromEvent)
                .map_err(|e| CopyError::InvalidInput(format!("object is not a swap event ({})", e))),
            other => Err(CopyError::InvalidInput(format!(
                "expected a string or an event, got {}",
                kind_of(&other)
            ))),
        }
    }

    /// The text that ends up on the clipboard.
    pub fn resolve(&self) -> Result<String, CopyError> {
        match self {
            CopyInput::Literal(s) => Ok(s.clone()),
            CopyInput::FromEvent(ev) => Ok(ev.link()?),
        }
    }
}

impl From<&str> for CopyInput {
    fn from(s: &str) -> Self {
        CopyInput::Literal(s.to_string())
    }
}

impl From<SwapEvent> for CopyInput {
    fn from(ev: SwapEvent) -> Self {
        CopyInput::FromEvent(ev)
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Platform text clipboard.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Resolves inputs and writes them through a [`ClipboardWriter`].
#[derive(Debug)]
pub struct ClipboardCopier<C> {
    clipboard: C,
}

impl<C: ClipboardWriter> ClipboardCopier<C> {
    pub fn new(clipboard: C) -> Self {
        Self { clipboard }
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Copies the resolved text; returns what was written.
    /// Nothing is written when the input cannot be resolved.
    pub fn copy(&mut self, input: &CopyInput) -> Result<String, CopyError> {
        let text = input.resolve()?;
        self.clipboard.write_text(&text)?;
        tracing::debug!("copied {} chars to clipboard", text.chars().count());
        Ok(text)
    }

    /// [`copy`](Self::copy) for an untyped value.
    pub fn copy_value(&mut self, value: Value) -> Result<String, CopyError> {
        let input = CopyInput::from_value(value)?;
        self.copy(&input)
    }
}
