use std::fmt;

/// 1-based line and column; columns count characters, not bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

impl TextPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for TextPosition {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ln {}, Col {}", self.line, self.column)
    }
}

/// Maps a byte offset to its line and column.
///
/// Offsets past the end clamp to the end of `text`, and offsets inside a multi-byte
/// character clamp back to the start of that character.
pub fn offset_to_line_column(text: &str, offset: usize) -> TextPosition {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let prefix = &text[..offset];
    let line = prefix.bytes().filter(|byte| *byte == b'\n').count() + 1;
    let line_start = prefix.rfind('\n').map_or(0, |idx| idx + 1);
    let column = prefix[line_start..].chars().count() + 1;
    TextPosition { line, column }
}

/// Maps a line and column back to a byte offset, clamped to `0..=text.len()`.
///
/// A column beyond the end of its line keeps counting characters into the following
/// lines; a line beyond the last one yields `text.len()`. Zero is treated as one.
pub fn line_column_to_offset(text: &str, line: usize, column: usize) -> usize {
    let mut line_start = 0usize;
    for _ in 1..line.max(1) {
        match text[line_start..].find('\n') {
            Some(idx) => line_start += idx + 1,
            None => return text.len(),
        }
    }
    text[line_start..]
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(text.len(), |(idx, _)| line_start + idx)
}
