//! The unified output style: one `@@` header per hunk and a single merged
//! stream of context, deleted and inserted lines.

use std::io::{self, Write};

use crate::analyze::analyze;
use crate::function::FunctionFinder;
use crate::hunks::Window;
use crate::lines::FileLines;
use crate::options::RenderOptions;
use crate::output::Sink;
use crate::script::Change;

use super::excerpt;

pub(super) fn print_hunk<W: Write>(
    hunk: &[Change],
    old: &FileLines<'_>,
    new: &FileLines<'_>,
    options: &RenderOptions,
    finder: &mut FunctionFinder,
    sink: &mut Sink<'_, W>,
) -> io::Result<()> {
    let analysis = analyze(hunk, old, new, options);
    if !analysis.kind.reportable() {
        return Ok(());
    }
    let window = Window::clip(&analysis, old, new, options.context);
    log::debug!(
        "unified hunk of {} changes over old {}..={}, new {}..={}",
        hunk.len(),
        window.first_old,
        window.last_old,
        window.first_new,
        window.last_new
    );

    let function = options
        .function_pattern
        .as_ref()
        .and_then(|pattern| finder.find(old, pattern, window.first_old));

    sink.begin()?;
    write!(sink, "@@ -")?;
    write_range(sink, old, window.first_old, window.last_old)?;
    write!(sink, " +")?;
    write_range(sink, new, window.first_new, window.last_new)?;
    write!(sink, " @@")?;
    if let Some(function) = function {
        write!(sink, " {}", excerpt(function))?;
    }
    writeln!(sink)?;

    let mut next = 0;
    let mut i = window.first_old;
    let mut j = window.first_new;
    while i <= window.last_old || j <= window.last_new {
        match hunk.get(next) {
            // A change starts here: all its deletions, then its insertions.
            Some(change) if i >= change.old_start => {
                for index in change.old_start..change.old_end() {
                    sink.unified_edit('-', old.line(index))?;
                }
                i = change.old_end();
                for index in change.new_start..change.new_end() {
                    sink.unified_edit('+', new.line(index))?;
                }
                j = change.new_end();
                next += 1;
            }
            _ => {
                sink.unified_context(old.line(i))?;
                i += 1;
                j += 1;
            }
        }
    }
    Ok(())
}

/// The unified range convention: `start,count` in display numbers, just
/// `start` for a single line, and the line before the range with an
/// explicit zero count when the range is empty.
fn write_range<W: Write>(
    sink: &mut Sink<'_, W>,
    file: &FileLines<'_>,
    first: isize,
    last: isize,
) -> io::Result<()> {
    let display_first = file.translate(first);
    let display_last = file.translate(last);
    if display_last < display_first {
        write!(sink, "{display_last},0")
    } else if display_last == display_first {
        write!(sink, "{display_last}")
    } else {
        write!(sink, "{display_first},{}", display_last - display_first + 1)
    }
}
