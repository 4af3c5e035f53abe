//! Turning a server-suggested filename into one safe to create in the download dir.

/// Used when the suggested name is empty or sanitizes to nothing.
pub const DEFAULT_FILENAME: &str = "download.bin";

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Sanitizes a suggested filename for creation inside a single directory.
///
/// - `/`, `\`, NUL and control characters become `_` (runs collapse to one)
/// - leading dots and surrounding whitespace are trimmed, so the result is
///   never hidden, never `.`/`..` and never escapes the directory
/// - length is capped at 255 bytes on a char boundary
/// - an empty result becomes [`DEFAULT_FILENAME`]
///
/// Interior spaces are kept: `my report (v2).pdf` stays as is.
pub fn safe_filename(suggested: &str) -> String {
    let mut out = String::with_capacity(suggested.len());
    for c in suggested.chars() {
        let bad = c == '/' || c == '\\' || c == '\0' || c.is_control();
        if !bad {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }

    let trimmed = out
        .trim_start_matches(|c: char| c == '.' || c.is_whitespace())
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace());
    let name = truncate(trimmed, NAME_MAX);

    if name.is_empty() || name.chars().all(|c| c == '_') {
        DEFAULT_FILENAME.to_string()
    } else {
        name.to_string()
    }
}

/// `report.pdf` → `report (n).pdf`; the extension starts at the first dot after
/// the first character, so `a.tar.gz` → `a (n).tar.gz`.
///
/// The stem is shortened so the result still fits in 255 bytes. An extension
/// too long to keep is treated as part of the stem.
pub fn numbered_variant(name: &str, n: u32) -> String {
    let suffix = format!(" ({})", n);
    let (stem, ext) = match name.char_indices().skip(1).find(|&(_, c)| c == '.') {
        Some((dot, _)) if name.len() - dot + suffix.len() < NAME_MAX => name.split_at(dot),
        _ => (name, ""),
    };
    let budget = NAME_MAX - suffix.len() - ext.len();
    format!("{}{}{}", truncate(stem, budget), suffix, ext)
}

/// Longest prefix of `s` within `max` bytes that ends on a char boundary.
fn truncate(s: &str, max: usize) -> &str {
    let mut take = s.len().min(max);
    while !s.is_char_boundary(take) {
        take -= 1;
    }
    &s[..take]
}
