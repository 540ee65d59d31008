pub const ELLIPSIS: char = '…';

/// Shortens `text` to at most `max_chars` characters, ending in an ellipsis when cut.
///
/// Surrounding whitespace is trimmed first. A cut label always keeps at least one character of
/// the original text, so `max_chars` of 0 or 1 still yields e.g. `"A…"`.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars.max(1) {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1).max(1);
    let mut out: String = text.chars().take(keep).collect();
    out.truncate(out.trim_end().len());
    out.push(ELLIPSIS);
    out
}

/// `text` unless it is blank, else `fallback`.
pub fn or_fallback<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    if text.trim().is_empty() { fallback } else { text }
}
