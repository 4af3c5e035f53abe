//! HTTP transport for the storage service.
//!
//! The rest of the crate talks to [`HttpTransport`]; [`CurlTransport`] is the
//! libcurl implementation. Requests are blocking; call from `spawn_blocking`
//! when used from async code.

mod parse;

pub use parse::{parse_status_line, ResponseHead};

use std::path::Path;
use std::time::Duration;
use url::Url;

/// Header carrying the API key on every authenticated request.
pub const ACCESS_TOKEN_HEADER: &str = "access_token";

/// Parses the server URL and makes sure its path ends in `/`, so that
/// relative joins (`download/`, `upload`) append instead of replacing.
pub fn base_url(server_url: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(server_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Failure to obtain any HTTP response at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Curl(#[from] curl::Error),
    #[error("multipart form: {0}")]
    Form(#[from] curl::FormError),
    #[error("no status line in response")]
    NoStatusLine,
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u32,
    /// Reason phrase from the status line (`Not Found`), empty on HTTP/2.
    pub status_text: String,
    /// Header lines of the final response, `Name: value`, without CRLF.
    pub headers: Vec<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True for 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of header `name` (case-insensitive), trimmed.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (n, v) = line.split_once(':')?;
            n.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }

    /// Status text for error messages; falls back to `HTTP <code>` when the server sent none.
    pub fn status_message(&self) -> String {
        if self.status_text.is_empty() {
            format!("HTTP {}", self.status)
        } else {
            self.status_text.clone()
        }
    }
}

/// Capability to perform the two requests the client needs.
pub trait HttpTransport {
    /// GET `url` with extra request headers, buffering the whole body.
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError>;

    /// POST `path` as multipart form field `field` to `url`.
    fn post_file(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        field: &str,
        path: &Path,
    ) -> Result<HttpResponse, TransportError>;
}

/// libcurl-backed transport. Follows redirects; no total timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlTransport {
    pub connect_timeout: Option<Duration>,
}

impl CurlTransport {
    pub fn new(connect_timeout: Option<Duration>) -> Self {
        Self { connect_timeout }
    }

    fn easy(&self, url: &str, headers: &[(&str, &str)]) -> Result<curl::easy::Easy, TransportError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }

        let mut list = curl::easy::List::new();
        for (k, v) in headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !headers.is_empty() {
            easy.http_headers(list)?;
        }
        Ok(easy)
    }

    fn perform(mut easy: curl::easy::Easy) -> Result<HttpResponse, TransportError> {
        let mut head = ResponseHead::default();
        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                head.push_bytes(data);
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        let (status, status_text) = head.status.ok_or(TransportError::NoStatusLine)?;
        if status != code {
            tracing::debug!("status line says {} but curl reports {}", status, code);
        }
        Ok(HttpResponse {
            status: code,
            status_text,
            headers: head.lines,
            body,
        })
    }
}

impl HttpTransport for CurlTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
        tracing::debug!("GET {}", url);
        let easy = self.easy(url, headers)?;
        Self::perform(easy)
    }

    fn post_file(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        field: &str,
        path: &Path,
    ) -> Result<HttpResponse, TransportError> {
        tracing::debug!("POST {} ({})", url, path.display());
        let mut easy = self.easy(url, headers)?;
        let mut form = curl::easy::Form::new();
        form.part(field).file(path).add()?;
        easy.httppost(form)?;
        Self::perform(easy)
    }
}
