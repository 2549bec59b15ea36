///! Fixed-width column access
///!
///! Column offsets count characters, not bytes. Ranges past the end of the
///! line are clamped, so a short line yields a short or empty column.

/// Number of characters in `line`
pub fn width(line: &str) -> usize {
    line.chars().count()
}

/// Characters `start..end` of `line`
pub fn column(line: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(line, start);
    let to = byte_offset(line, end.max(start));
    &line[from..to]
}

fn byte_offset(line: &str, chars: usize) -> usize {
    line.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}
