//! Filename extraction from a `Content-Disposition` value.

const NEEDLE: &str = "filename=";

/// Extracts the filename the way the pattern `filename="?([^"]*)"?` does:
/// the first `filename=` occurrence, an optional opening quote, then
/// everything up to the next quote (or the end of the value).
///
/// Matching is case-sensitive and `filename*=` is not recognized. The capture
/// may be empty (`filename=""`). Returns `None` only when there is no match.
///
/// The result is not sanitized; the save host is responsible for that.
pub fn extract_filename(header_value: &str) -> Option<&str> {
    let start = header_value.find(NEEDLE)? + NEEDLE.len();
    let rest = &header_value[start..];
    let rest = rest.strip_prefix('"').unwrap_or(rest);
    let end = rest.find('"').unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted() {
        assert_eq!(
            extract_filename("attachment; filename=\"report.pdf\""),
            Some("report.pdf")
        );
    }

    #[test]
    fn unquoted_runs_to_end() {
        assert_eq!(
            extract_filename("attachment; filename=report.pdf"),
            Some("report.pdf")
        );
        assert_eq!(
            extract_filename("attachment; filename=a.txt; size=3"),
            Some("a.txt; size=3")
        );
    }

    #[test]
    fn spaces_inside_quotes_are_kept() {
        assert_eq!(
            extract_filename("attachment; filename=\"my report (v2).pdf\"; size=10"),
            Some("my report (v2).pdf")
        );
    }

    #[test]
    fn empty_capture() {
        assert_eq!(extract_filename("attachment; filename=\"\""), Some(""));
    }

    #[test]
    fn no_match() {
        assert_eq!(extract_filename("attachment"), None);
        assert_eq!(extract_filename(""), None);
        assert_eq!(extract_filename("attachment; FILENAME=\"a.txt\""), None);
        assert_eq!(extract_filename("attachment; filename*=UTF-8''a.txt"), None);
    }

    #[test]
    fn first_plain_filename_wins_over_extended_form() {
        assert_eq!(
            extract_filename("attachment; filename*=UTF-8''x.txt; filename=\"y.txt\""),
            Some("y.txt")
        );
    }
}
