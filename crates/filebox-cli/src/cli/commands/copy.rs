//! `filebox copy` – put text, or a share event's link, on the clipboard.

use crate::cli::CopySource;
use anyhow::{Context, Result};
use filebox_core::actions;
use filebox_core::clipboard::{ClipboardCopier, SystemClipboard};
use filebox_core::notify::ConsoleNotifier;
use serde_json::Value;
use std::io::Read;

/// Turns the chosen source into the value handed to the copier.
pub(crate) fn source_value(source: CopySource) -> Result<Value> {
    if let Some(text) = source.text {
        return Ok(Value::String(text));
    }
    if let Some(json) = source.json {
        return serde_json::from_str(&json).context("--json is not valid JSON");
    }
    if let Some(path) = source.event {
        let raw = if path == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read event from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&path).with_context(|| format!("read event {}", path))?
        };
        return serde_json::from_str(&raw).context("event is not valid JSON");
    }
    anyhow::bail!("nothing to copy")
}

pub async fn run_copy(source: CopySource, wait: bool) -> Result<bool> {
    let value = source_value(source)?;
    tokio::task::spawn_blocking(move || {
        let mut copier = ClipboardCopier::new(SystemClipboard::new(wait));
        actions::copy_value_to_clipboard(&mut copier, value, &ConsoleNotifier)
    })
    .await
    .context("clipboard task join")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(text: Option<&str>, event: Option<&str>, json: Option<&str>) -> CopySource {
        CopySource {
            text: text.map(String::from),
            event: event.map(String::from),
            json: json.map(String::from),
        }
    }

    #[test]
    fn text_becomes_json_string() {
        let v = source_value(source(Some("hello"), None, None)).unwrap();
        assert_eq!(v, json!("hello"));
    }

    #[test]
    fn json_is_parsed_as_is() {
        assert_eq!(source_value(source(None, None, Some("42"))).unwrap(), json!(42));
        assert!(source_value(source(None, None, Some("{oops"))).is_err());
    }

    #[test]
    fn event_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(
            &path,
            r#"{"detail":{"xhr":{"response":"{\"link\":\"https://x/y\"}"}}}"#,
        )
        .unwrap();
        let v = source_value(source(None, Some(path.to_str().unwrap()), None)).unwrap();
        assert_eq!(v["detail"]["xhr"]["response"], json!(r#"{"link":"https://x/y"}"#));
    }
}
