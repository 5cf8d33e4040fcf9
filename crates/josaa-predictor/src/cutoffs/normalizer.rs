/// Invisible characters that spreadsheet exports leave around cell text.
fn is_invisible(ch: char) -> bool {
    matches!(ch, '\u{feff}' | '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{2060}')
}

/// Trims a text cell and collapses inner whitespace runs, including
/// non-breaking spaces, to a single space.
pub(crate) fn normalize_text(value: &str) -> String {
    let visible: String = value.chars().filter(|ch| !is_invisible(*ch)).collect();
    let mut words = visible.split_whitespace();
    let mut normalized = String::with_capacity(visible.len());
    if let Some(first) = words.next() {
        normalized.push_str(first);
        for word in words {
            normalized.push(' ');
            normalized.push_str(word);
        }
    }
    normalized
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_text(value)
}
