//! Grouping nearby changes into hunks and clipping their context windows.

use crate::analyze::{analyze, Analysis};
use crate::lines::FileLines;
use crate::options::RenderOptions;
use crate::script::Change;

/// Index of the last change belonging to the first hunk of `script`.
///
/// Starting from the first change, following changes are absorbed while
/// fewer than a threshold number of unchanged lines separate them: the
/// threshold is `context` when the following change is ignorable and
/// `2 * context + 1` otherwise, so two stretches of context that would
/// touch or overlap end up in one hunk.
///
/// # Panics
///
/// If two neighboring changes are separated by a different number of
/// unchanged lines in the old file than in the new one. That means the
/// edit script itself is malformed, which no input can cause.
pub fn hunk_end(script: &[Change], context: usize) -> usize {
    let ignorable_threshold = context as isize;
    let non_ignorable_threshold = 2 * context as isize + 1;

    let mut index = 0;
    loop {
        let top_old = script[index].old_end();
        let top_new = script[index].new_end();
        let Some(next) = script.get(index + 1) else {
            return index;
        };
        assert_eq!(
            next.old_start - top_old,
            next.new_start - top_new,
            "edit script is inconsistent: old/new offsets diverge between changes"
        );
        let threshold = if next.ignore {
            ignorable_threshold
        } else {
            non_ignorable_threshold
        };
        if next.old_start - top_old < threshold {
            index += 1;
        } else {
            return index;
        }
    }
}

/// Flag every change whose inserted and deleted lines are all ignorable
/// under `options`, by analyzing each change as a hunk of its own.
pub fn mark_ignorable(
    script: &mut [Change],
    old: &FileLines<'_>,
    new: &FileLines<'_>,
    options: &RenderOptions,
) {
    for change in script.iter_mut() {
        let alone = [*change];
        change.ignore = !analyze(&alone, old, new, options).kind.reportable();
    }
}

/// A hunk's line spans widened by the surrounding context, clipped to what
/// each file actually has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub first_old: isize,
    pub last_old: isize,
    pub first_new: isize,
    pub last_new: isize,
}

impl Window {
    /// Widen the analyzed spans by `context` lines on each end, stopping at
    /// the start of each file's prefix region and at its last valid line.
    pub fn clip(
        analysis: &Analysis,
        old: &FileLines<'_>,
        new: &FileLines<'_>,
        context: usize,
    ) -> Window {
        let context = context as isize;

        let first_old = (analysis.first_old - context).max(-old.prefix_lines());
        let first_new = (analysis.first_new - context).max(-new.prefix_lines());
        let last_old = if analysis.last_old < old.valid_lines() - context {
            analysis.last_old + context
        } else {
            old.valid_lines() - 1
        };
        let last_new = if analysis.last_new < new.valid_lines() - context {
            analysis.last_new + context
        } else {
            new.valid_lines() - 1
        };

        Window {
            first_old,
            last_old,
            first_new,
            last_new,
        }
    }
}
