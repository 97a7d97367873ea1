//! Deterministic partition of a reply into streamed chunks
//!
//! The simulator replays a fixed reply text one chunk at a time. A chunk
//! boundary sits immediately before each space or newline, so every chunk
//! after the first starts with the whitespace that separated it from the
//! previous word. Concatenating the chunks in order always reproduces the
//! input exactly.

/// Split `text` into ordered chunks at word and line boundaries
///
/// # Examples
///
/// ```
/// use banter::session::split_chunks;
///
/// let chunks = split_chunks("hello wide world");
/// assert_eq!(chunks, vec!["hello", " wide", " world"]);
/// assert_eq!(chunks.concat(), "hello wide world");
/// ```
pub fn split_chunks(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if (ch == ' ' || ch == '\n') && idx > start {
            chunks.push(&text[start..idx]);
            start = idx;
        }
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_before_each_space() {
        assert_eq!(split_chunks("a b c"), vec!["a", " b", " c"]);
    }

    #[test]
    fn test_splits_before_each_newline() {
        assert_eq!(split_chunks("line one\nline two"), vec!["line", " one", "\nline", " two"]);
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(split_chunks("").is_empty());
    }

    #[test]
    fn test_single_word_is_one_chunk() {
        assert_eq!(split_chunks("word"), vec!["word"]);
    }

    #[test]
    fn test_leading_space_starts_first_chunk() {
        // No boundary at index zero; the leading space stays attached.
        assert_eq!(split_chunks(" lead"), vec![" lead"]);
    }

    #[test]
    fn test_consecutive_spaces_become_single_char_chunks() {
        assert_eq!(split_chunks("a  b"), vec!["a", " ", " b"]);
    }

    #[test]
    fn test_concat_identity() {
        let text = "This is a simulated reply.\n\nWith a second paragraph.";
        assert_eq!(split_chunks(text).concat(), text);
    }

    #[test]
    fn test_multibyte_content_is_preserved() {
        let text = "héllo wörld\nüber";
        assert_eq!(split_chunks(text).concat(), text);
    }
}
