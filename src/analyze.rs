//! Classification of a hunk's changed lines before rendering.

use crate::lines::FileLines;
use crate::options::RenderOptions;
use crate::script::Change;

/// Which sides of a hunk carry changed lines worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunkKind {
    /// No reportable change; every changed line was ignorable.
    Unchanged,
    /// Deletions only.
    Old,
    /// Insertions only.
    New,
    /// Deletions and insertions.
    Changed,
}

impl HunkKind {
    /// True if the old side has lines to report.
    pub fn has_old(self) -> bool {
        matches!(self, HunkKind::Old | HunkKind::Changed)
    }

    /// True if the new side has lines to report.
    pub fn has_new(self) -> bool {
        matches!(self, HunkKind::New | HunkKind::Changed)
    }

    /// True unless the hunk should be suppressed entirely.
    pub fn reportable(self) -> bool {
        self != HunkKind::Unchanged
    }

    fn from_counts(deleted: usize, inserted: usize) -> Self {
        match (deleted > 0, inserted > 0) {
            (false, false) => HunkKind::Unchanged,
            (true, false) => HunkKind::Old,
            (false, true) => HunkKind::New,
            (true, true) => HunkKind::Changed,
        }
    }
}

/// Result of [`analyze`]: the hunk's kind and the internal line spans it
/// touches on each side. An empty span is encoded as `last == first - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analysis {
    pub kind: HunkKind,
    pub first_old: isize,
    pub last_old: isize,
    pub first_new: isize,
    pub last_new: isize,
}

/// Examine a coalesced hunk and report what it changes.
///
/// The spans run from the first change's start to the last change's end on
/// each side, covering any unchanged lines sandwiched between changes. The
/// hunk is [`HunkKind::Unchanged`] when options classify lines as ignorable
/// and every changed line on both sides is ignorable.
pub fn analyze(
    hunk: &[Change],
    old: &FileLines<'_>,
    new: &FileLines<'_>,
    options: &RenderOptions,
) -> Analysis {
    let first = hunk[0];
    let mut trivial = options.classifies_ignorable();
    let mut deleted_total = 0;
    let mut inserted_total = 0;
    let mut last_old = first.old_start - 1;
    let mut last_new = first.new_start - 1;

    for change in hunk {
        last_old = change.old_end() - 1;
        last_new = change.new_end() - 1;
        deleted_total += change.deleted;
        inserted_total += change.inserted;

        if trivial
            && ((change.old_start..change.old_end())
                .any(|i| !line_is_ignorable(old.line_text(i), options))
                || (change.new_start..change.new_end())
                    .any(|i| !line_is_ignorable(new.line_text(i), options)))
        {
            trivial = false;
        }
    }

    let kind = if trivial {
        HunkKind::Unchanged
    } else {
        HunkKind::from_counts(deleted_total, inserted_total)
    };
    Analysis {
        kind,
        first_old: first.old_start,
        last_old,
        first_new: first.new_start,
        last_new,
    }
}

/// A changed line drops out of consideration if blank lines are ignored and
/// it is empty, or if it matches the ignore pattern. `line` carries no
/// terminator.
fn line_is_ignorable(line: &str, options: &RenderOptions) -> bool {
    (options.ignore_blank_lines && line.is_empty())
        || options
            .ignore_pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn plain() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn kinds_follow_the_line_counts() {
        let old = FileLines::new("a\nb\n");
        let new = FileLines::new("a\n");
        let delete = [Change::new(1, 1, 1, 0)];
        assert_eq!(analyze(&delete, &old, &new, &plain()).kind, HunkKind::Old);

        let insert = [Change::new(1, 0, 1, 1)];
        assert_eq!(analyze(&insert, &new, &old, &plain()).kind, HunkKind::New);

        let replace = [Change::new(1, 1, 1, 1)];
        assert_eq!(
            analyze(&replace, &old, &old, &plain()).kind,
            HunkKind::Changed
        );
    }

    #[test]
    fn spans_cover_the_whole_coalesced_hunk() {
        let old = FileLines::new("a\nb\nc\nd\ne\nf\n");
        let new = FileLines::new("a\nB\nc\nd\nx\ny\ne\nf\n");
        // Replacement at line 1, then a pure insertion after line 3.
        let hunk = [Change::new(1, 1, 1, 1), Change::new(4, 0, 4, 2)];
        let analysis = analyze(&hunk, &old, &new, &plain());
        assert_eq!(analysis.kind, HunkKind::Changed);
        assert_eq!((analysis.first_old, analysis.last_old), (1, 3));
        assert_eq!((analysis.first_new, analysis.last_new), (1, 5));
    }

    #[test]
    fn pure_insertion_span_is_empty_on_the_old_side() {
        let old = FileLines::new("a\n");
        let new = FileLines::new("a\nb\n");
        let analysis = analyze(&[Change::new(1, 0, 1, 1)], &old, &new, &plain());
        assert_eq!(analysis.first_old, 1);
        assert_eq!(analysis.last_old, 0);
    }

    #[test]
    fn blank_only_changes_are_unchanged_when_ignoring_blanks() {
        let old = FileLines::new("a\nb\n");
        let new = FileLines::new("a\n\n\nb\n");
        let mut options = plain();
        options.ignore_blank_lines = true;
        let analysis = analyze(&[Change::new(1, 0, 1, 2)], &old, &new, &options);
        assert_eq!(analysis.kind, HunkKind::Unchanged);
    }

    #[test]
    fn pattern_matching_changes_are_unchanged() {
        let old = FileLines::new("# old note\nkeep\n");
        let new = FileLines::new("# new note\nkeep\n");
        let mut options = plain();
        options.ignore_pattern = Some(Regex::new("^#").unwrap());
        let analysis = analyze(&[Change::new(0, 1, 0, 1)], &old, &new, &options);
        assert_eq!(analysis.kind, HunkKind::Unchanged);
    }

    #[test]
    fn one_surviving_line_keeps_the_hunk() {
        let old = FileLines::new("# old note\nkeep\n");
        let new = FileLines::new("# new note\nchanged\n");
        let mut options = plain();
        options.ignore_pattern = Some(Regex::new("^#").unwrap());
        let hunk = [Change::new(0, 2, 0, 2)];
        let analysis = analyze(&hunk, &old, &new, &options);
        assert_eq!(analysis.kind, HunkKind::Changed);
    }

    #[test]
    fn without_ignore_options_nothing_is_trivial() {
        let old = FileLines::new("\n");
        let new = FileLines::new("\n\n");
        let analysis = analyze(&[Change::new(1, 0, 1, 1)], &old, &new, &plain());
        assert_eq!(analysis.kind, HunkKind::New);
    }
}
