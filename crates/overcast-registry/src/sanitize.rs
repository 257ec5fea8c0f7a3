//! Input sanitization for user-supplied identifiers

/// Characters kept besides ASCII letters and digits
const ALLOWED_PUNCTUATION: &[char] = &['.', '_', '-', '/', ':', '@', '~'];

/// Normalize a raw user-supplied token
///
/// Surrounding whitespace is trimmed and every character outside
/// `[A-Za-z0-9._\-/:@~]` is dropped. A blank result means the value is
/// missing and yields `None`.
pub fn sanitize(raw: &str) -> Option<String> {
    let clean: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(c))
        .collect();

    if clean.is_empty() { None } else { Some(clean) }
}

/// [`sanitize`] for a value that may not have been supplied at all
pub fn sanitize_opt(raw: Option<&str>) -> Option<String> {
    raw.and_then(sanitize)
}
