//! The edit-script substrate: a comparison is described by a sequence of
//! [`Change`] records in ascending position order.

/// One atomic edit: `deleted` lines removed from the old file starting at
/// `old_start`, `inserted` lines added to the new file starting at
/// `new_start`.
///
/// Positions are internal: 0-origin, counted from the first line after any
/// common prefix the comparison stripped (see
/// [`FileLines`](crate::FileLines)). A change with `deleted == 0` is a pure
/// insertion before old line `old_start`; one with `inserted == 0` is a
/// pure deletion before new line `new_start`.
///
/// A script is a `[Change]` slice sorted by position. Consecutive changes
/// must agree on the line offset between the two files:
/// `next.old_start - c.old_end() == next.new_start - c.new_end()`. The gap
/// is the count of unchanged lines between the edits, so a mismatch means
/// the script itself is corrupt; the hunk coalescer asserts on it rather
/// than reporting an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    /// First old-file line this change deletes (or, for a pure insertion,
    /// the line before which the insertion happens).
    pub old_start: isize,
    /// Number of old-file lines deleted here.
    pub deleted: usize,
    /// First new-file line this change inserts (or, for a pure deletion,
    /// the line before which the deletion happens).
    pub new_start: isize,
    /// Number of new-file lines inserted here.
    pub inserted: usize,
    /// Set by the classification pass when every line of this change
    /// matches the active ignore policy.
    pub ignore: bool,
}

impl Change {
    /// A change deleting `deleted` lines at `old_start` and inserting
    /// `inserted` lines at `new_start`, ignore flag cleared.
    pub fn new(old_start: isize, deleted: usize, new_start: isize, inserted: usize) -> Self {
        Change {
            old_start,
            deleted,
            new_start,
            inserted,
            ignore: false,
        }
    }

    /// First old-file line past this change's deleted range.
    pub fn old_end(&self) -> isize {
        self.old_start + self.deleted as isize
    }

    /// First new-file line past this change's inserted range.
    pub fn new_end(&self) -> isize {
        self.new_start + self.inserted as isize
    }
}

/// Dump the script at trace level, one change per line.
pub(crate) fn trace_script(script: &[Change]) {
    if log::log_enabled!(log::Level::Trace) {
        for change in script {
            log::trace!(
                "{:3} {:3} {:3} {:3}{}",
                change.old_start,
                change.new_start,
                change.deleted,
                change.inserted,
                if change.ignore { " (ignorable)" } else { "" }
            );
        }
    }
}
