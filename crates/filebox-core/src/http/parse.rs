//! Accumulate raw response header lines into the head of the final response.

/// Status and header lines of the last response seen on a transfer.
///
/// libcurl reports every hop of a redirect chain (and `100 Continue`), so a new
/// status line discards what was collected for the previous response.
#[derive(Debug, Default)]
pub struct ResponseHead {
    pub status: Option<(u32, String)>,
    pub lines: Vec<String>,
}

impl ResponseHead {
    /// Raw header bytes from libcurl. UTF-8 when valid, otherwise each byte is
    /// taken as a Latin-1 char, which is how browsers read header values.
    pub fn push_bytes(&mut self, raw: &[u8]) {
        match std::str::from_utf8(raw) {
            Ok(s) => self.push_line(s),
            Err(_) => {
                let latin1: String = raw.iter().map(|&b| char::from(b)).collect();
                self.push_line(&latin1)
            }
        }
    }

    pub fn push_line(&mut self, raw: &str) {
        let line = raw.trim_end();
        if line.is_empty() {
            return;
        }
        if let Some(status) = parse_status_line(line) {
            self.status = Some(status);
            self.lines.clear();
            return;
        }
        if line.contains(':') {
            self.lines.push(line.to_string());
        }
    }
}

/// Parse `HTTP/1.1 404 Not Found` into `(404, "Not Found")`.
/// HTTP/2 status lines carry no reason phrase and yield an empty text.
pub fn parse_status_line(line: &str) -> Option<(u32, String)> {
    let rest = line.strip_prefix("HTTP/")?;
    let mut parts = rest.splitn(3, ' ');
    let _version = parts.next()?;
    let code = parts.next()?.trim().parse::<u32>().ok()?;
    let text = parts.next().unwrap_or("").trim().to_string();
    Some((code, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_http11() {
        assert_eq!(
            parse_status_line("HTTP/1.1 404 Not Found"),
            Some((404, "Not Found".to_string()))
        );
    }

    #[test]
    fn status_line_http2_has_no_text() {
        assert_eq!(parse_status_line("HTTP/2 200"), Some((200, String::new())));
    }

    #[test]
    fn status_line_rejects_headers() {
        assert!(parse_status_line("Content-Length: 3").is_none());
        assert!(parse_status_line("HTTP/1.1 abc").is_none());
    }

    #[test]
    fn redirect_hops_are_discarded() {
        let mut head = ResponseHead::default();
        for line in [
            "HTTP/1.1 302 Found\r\n",
            "Location: /download/2\r\n",
            "\r\n",
            "HTTP/1.1 200 OK\r\n",
            "Content-Disposition: attachment; filename=\"b.txt\"\r\n",
            "\r\n",
        ] {
            head.push_line(line);
        }
        assert_eq!(head.status, Some((200, "OK".to_string())));
        assert_eq!(
            head.lines,
            vec!["Content-Disposition: attachment; filename=\"b.txt\"".to_string()]
        );
    }

    #[test]
    fn non_utf8_header_is_kept_as_latin1() {
        let mut head = ResponseHead::default();
        head.push_bytes(b"HTTP/1.1 200 OK\r\n");
        head.push_bytes(b"Content-Disposition: attachment; filename=\"caf\xe9.txt\"\r\n");
        head.push_bytes("X-Name: caf\u{e9}\r\n".as_bytes());
        assert_eq!(
            head.lines,
            vec![
                "Content-Disposition: attachment; filename=\"caf\u{e9}.txt\"".to_string(),
                "X-Name: caf\u{e9}".to_string(),
            ]
        );
    }
}
