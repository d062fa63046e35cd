//! Backward search for the function header preceding a hunk.

use regex::Regex;

use crate::lines::FileLines;

/// Finds the last line matching a function-header pattern before a given
/// position, remembering where earlier searches stopped.
///
/// Hunks are rendered top to bottom, so queries arrive in non-decreasing
/// order and each line needs to be examined at most once per comparison:
/// a search scans backward only to where the previous search started and
/// falls back to the previous hit for anything before that. One finder
/// serves one comparison with one pattern; start the next comparison with
/// a fresh value.
#[derive(Debug)]
pub struct FunctionFinder {
    /// Position the most recent search started from.
    last_search: isize,
    /// Line index of the most recent hit.
    last_match: Option<isize>,
}

impl FunctionFinder {
    /// A fresh finder for a file whose first physical line sits at internal
    /// index `-prefix_lines`.
    pub fn new(prefix_lines: isize) -> Self {
        FunctionFinder {
            last_search: -prefix_lines,
            last_match: None,
        }
    }

    /// The text of the closest line before `position` matching `pattern`,
    /// or `None` if no line up to here has ever matched.
    pub fn find<'a>(
        &mut self,
        file: &FileLines<'a>,
        pattern: &Regex,
        position: isize,
    ) -> Option<&'a str> {
        let stop = self.last_search;
        self.last_search = position;

        for index in (stop..position).rev() {
            if pattern.is_match(file.line_text(index)) {
                self.last_match = Some(index);
                return Some(file.line_text(index));
            }
        }
        self.last_match.map(|index| file.line_text(index))
    }
}
