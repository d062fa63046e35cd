//! Line table over one side of a comparison.

/// Borrowed file text split into lines, addressed by internal line number.
///
/// Internal numbering is 0-origin relative to the first line after the
/// common prefix the comparison stripped: index `-prefix_lines` is the
/// first physical line of the file and `valid_lines() - 1` the last. The
/// table keeps one sentinel offset past the last line so a line's extent is
/// the span to the next entry; lines keep their terminators.
///
/// ```
/// use contexture::FileLines;
///
/// let file = FileLines::new("one\ntwo\n");
/// assert_eq!(file.valid_lines(), 2);
/// assert_eq!(file.line(1), "two\n");
/// assert_eq!(file.line_text(1), "two");
/// ```
#[derive(Debug, Clone)]
pub struct FileLines<'a> {
    text: &'a str,
    /// Byte offset of each line start, plus a sentinel at `text.len()`.
    starts: Vec<usize>,
    prefix_lines: usize,
}

impl<'a> FileLines<'a> {
    /// Split `text` into lines with no prefix region: internal index 0 is
    /// the first line of the file.
    pub fn new(text: &'a str) -> Self {
        Self::with_prefix(text, 0)
    }

    /// Split `text` into lines, treating the first `prefix_lines` of them
    /// as the common prefix sitting at internal indices
    /// `-prefix_lines..0`.
    ///
    /// # Panics
    ///
    /// If `prefix_lines` exceeds the number of lines in `text`.
    pub fn with_prefix(text: &'a str, prefix_lines: usize) -> Self {
        let starts = line_starts(text);
        assert!(
            prefix_lines < starts.len(),
            "prefix of {prefix_lines} lines exceeds the file's {} lines",
            starts.len() - 1
        );
        FileLines {
            text,
            starts,
            prefix_lines,
        }
    }

    /// Number of lines at internal indices `0..valid_lines()`.
    pub fn valid_lines(&self) -> isize {
        (self.starts.len() - 1 - self.prefix_lines) as isize
    }

    /// Number of prefix lines sitting below internal index 0.
    pub fn prefix_lines(&self) -> isize {
        self.prefix_lines as isize
    }

    /// True if the last line of the file has no trailing terminator.
    pub fn missing_newline(&self) -> bool {
        !self.text.is_empty() && !self.text.ends_with('\n')
    }

    /// The line at `index`, including its terminator if present.
    ///
    /// # Panics
    ///
    /// If `index` is outside `-prefix_lines()..valid_lines()`.
    pub fn line(&self, index: isize) -> &'a str {
        let slot = self.slot(index);
        &self.text[self.starts[slot]..self.starts[slot + 1]]
    }

    /// The line at `index` without its trailing newline; this is what
    /// patterns match against.
    pub fn line_text(&self, index: isize) -> &'a str {
        let line = self.line(index);
        line.strip_suffix('\n').unwrap_or(line)
    }

    /// Display (1-origin, whole-file) number of internal line `index`.
    pub fn translate(&self, index: isize) -> isize {
        index + self.prefix_lines as isize + 1
    }

    fn slot(&self, index: isize) -> usize {
        let slot = index + self.prefix_lines as isize;
        debug_assert!(
            0 <= slot && slot < self.starts.len() as isize - 1,
            "line index {index} out of range"
        );
        slot as usize
    }
}

/// Offsets of every line start in `text`, followed by the sentinel. A final
/// line without a terminator still counts as a line; empty text has none.
fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut position = 0;
    while position < text.len() {
        starts.push(position);
        position = match text[position..].find('\n') {
            Some(newline) => position + newline + 1,
            None => text.len(),
        };
    }
    starts.push(text.len());
    starts
}
