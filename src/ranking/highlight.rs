//! Substring highlighting for display labels.

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// Byte range of the first case-insensitive occurrence of `needle`.
#[must_use]
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() {
        return None;
    }

    for (start, _) in haystack.char_indices() {
        let mut rest = haystack[start..].char_indices();
        let mut end = start;
        let mut matched = 0;
        for wanted in &needle {
            match rest.next() {
                Some((offset, ch)) if chars_eq_ignore_case(ch, *wanted) => {
                    end = start + offset + ch.len_utf8();
                    matched += 1;
                }
                _ => break,
            }
        }
        if matched == needle.len() {
            return Some((start, end));
        }
    }
    None
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Wrap the first occurrence of `query` in `label` with `open`/`close`.
/// The label is returned untouched when the query is empty or is not a
/// contiguous substring.
#[must_use]
pub fn highlight(label: &str, query: &str, open: &str, close: &str) -> String {
    match find_ignore_case(label, query) {
        Some((start, end)) => {
            let mut out = String::with_capacity(label.len() + open.len() + close.len());
            out.push_str(&label[..start]);
            out.push_str(open);
            out.push_str(&label[start..end]);
            out.push_str(close);
            out.push_str(&label[end..]);
            out
        }
        None => label.to_string(),
    }
}
