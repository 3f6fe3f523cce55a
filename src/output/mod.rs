// Output formatting — terminal display of keyword results.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Head and tail of a long text, `edge` characters each, for log lines.
pub fn excerpt(text: &str, edge: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= edge * 2 {
        return text.to_string();
    }
    let head: String = text.chars().take(edge).collect();
    let tail: String = text.chars().skip(char_count - edge).collect();
    format!("{head} ...... {tail}")
}
