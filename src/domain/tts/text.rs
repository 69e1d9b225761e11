use std::borrow::Cow;

/// Cut `text` down to at most `max_chars` characters.
///
/// Over-long input is not an error: it is truncated silently (apart from a
/// warning) so the request still goes through. Counting is done on Unicode
/// scalar values, never bytes, so multi-byte text is never split mid-character.
pub fn truncate_to_max_chars(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            tracing::warn!(
                max_chars = max_chars,
                original_chars = text.chars().count(),
                "Text length exceeds limit, truncating"
            );
            Cow::Owned(text[..byte_index].to_string())
        }
        None => Cow::Borrowed(text),
    }
}

/// Returns the trimmed text, or `None` when nothing is left to synthesize
pub fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
