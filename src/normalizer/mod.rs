//! Turns raw feed markup into the quoted excerpt embedded in a post.

pub mod markdown;

pub use markdown::html_to_markdown;

/// Longest excerpt, in characters, kept before the ellipsis is appended.
pub const MAX_EXCERPT_CHARS: usize = 1500;

/// Appended to an excerpt that was cut at [`MAX_EXCERPT_CHARS`].
pub const ELLIPSIS: &str = "...";

/// Inserted after every line break so the excerpt renders as one quote block.
pub const QUOTE_MARKER: &str = "> ";

/// Normalize raw entry content into a bounded, quote-indented excerpt.
///
/// Steps, in order: drop everything through the first `prefix_to_strip`
/// (a missing prefix is a no-op), convert markup to markdown, cut to
/// [`MAX_EXCERPT_CHARS`], fold double line breaks, then quote every line.
/// Never fails; malformed markup is converted best-effort.
pub fn normalize(raw_content: &str, prefix_to_strip: Option<&str>) -> String {
    let content = strip_prefix(raw_content, prefix_to_strip);
    let markdown = html_to_markdown(content);
    let excerpt = truncate(&markdown, MAX_EXCERPT_CHARS);
    quote(&excerpt)
}

/// Everything after the first occurrence of `prefix`, or the whole input.
pub fn strip_prefix<'a>(raw_content: &'a str, prefix: Option<&str>) -> &'a str {
    let Some(prefix) = prefix.filter(|p| !p.is_empty()) else {
        return raw_content;
    };

    match raw_content.split_once(prefix) {
        Some((_, rest)) => rest,
        None => {
            tracing::debug!("Strip prefix {:?} not found; keeping full content", prefix);
            raw_content
        }
    }
}

/// Cut `text` to `max_chars` characters, marking the cut with [`ELLIPSIS`].
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + ELLIPSIS.len());
            truncated.push_str(&text[..cut]);
            truncated.push_str(ELLIPSIS);
            truncated
        }
        None => text.to_string(),
    }
}

/// Fold `\n\n` into `\n`, then prefix each line break with [`QUOTE_MARKER`].
pub fn quote(text: &str) -> String {
    text.replace("\n\n", "\n")
        .replace('\n', &format!("\n{}", QUOTE_MARKER))
}
