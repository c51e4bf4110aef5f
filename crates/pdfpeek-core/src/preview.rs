use std::borrow::Cow;

/// Characters printed per document when nothing else is configured.
pub const DEFAULT_PREVIEW_LIMIT: usize = 2000;

/// Marker appended to truncated previews.
pub const ELLIPSIS: &str = "...";

/// Bound `text` to at most `limit` characters.
///
/// Lengths are counted in `char`s, so multi-byte text is never split
/// mid-codepoint. Text at or under the limit is returned as-is; longer text
/// is cut to exactly `limit` characters followed by [`ELLIPSIS`].
pub fn preview(text: &str, limit: usize) -> Cow<'_, str> {
    match text.char_indices().nth(limit) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len());
            out.push_str(&text[..cut]);
            out.push_str(ELLIPSIS);
            Cow::Owned(out)
        }
    }
}
