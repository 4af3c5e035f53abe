//! Shape of the swap event fired after a share-link request completes.
//!
//! Only `detail.xhr.response` is read; it holds the raw JSON response body,
//! whose `link` field is the text to copy.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SwapEvent {
    pub detail: EventDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventDetail {
    pub xhr: XhrDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct XhrDetail {
    /// Raw response body, still JSON-encoded.
    pub response: String,
}

#[derive(Debug, Deserialize)]
struct LinkPayload {
    link: String,
}

impl SwapEvent {
    /// Event whose response body is `response`.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            detail: EventDetail {
                xhr: XhrDetail {
                    response: response.into(),
                },
            },
        }
    }

    /// Parses the response body and returns its `link` field.
    pub fn link(&self) -> serde_json::Result<String> {
        let payload: LinkPayload = serde_json::from_str(&self.detail.xhr.response)?;
        Ok(payload.link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_from_response() {
        let ev = SwapEvent::with_response(r#"{"link":"https://x/y","expires":3600}"#);
        assert_eq!(ev.link().unwrap(), "https://x/y");
    }

    #[test]
    fn response_without_link() {
        assert!(SwapEvent::with_response(r#"{"url":"https://x/y"}"#).link().is_err());
        assert!(SwapEvent::with_response("not json").link().is_err());
        assert!(SwapEvent::with_response(r#"{"link":42}"#).link().is_err());
    }

    #[test]
    fn deserializes_nested_event() {
        let ev: SwapEvent = serde_json::from_str(
            r#"{"type":"htmx:afterRequest","detail":{"elt":null,"xhr":{"status":200,"response":"{\"link\":\"a\"}"}}}"#,
        )
        .unwrap();
        assert_eq!(ev, SwapEvent::with_response(r#"{"link":"a"}"#));
    }
}
