//! The context output style: a starred banner per hunk, then the old and
//! new line ranges as separate sections.

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
        "context hunk of {} changes over old {}..={}, new {}..={}",
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
    write!(sink, "***************")?;
    if let Some(function) = function {
        write!(sink, " {}", excerpt(function))?;
    }
    write!(sink, "\n*** ")?;
    write_range(sink, old, window.first_old, window.last_old)?;
    writeln!(sink, " ****")?;

    if analysis.kind.has_old() {
        let mut next = 0;
        for index in window.first_old..=window.last_old {
            // Skip changes that lie entirely above this line.
            while next < hunk.len() && hunk[next].old_end() <= index {
                next += 1;
            }
            let flag = match hunk.get(next) {
                Some(change) if change.old_start <= index => {
                    if change.inserted > 0 {
                        "!"
                    } else {
                        "-"
                    }
                }
                _ => " ",
            };
            sink.print_line(flag, old.line(index))?;
        }
    }

    write!(sink, "--- ")?;
    write_range(sink, new, window.first_new, window.last_new)?;
    writeln!(sink, " ----")?;

    if analysis.kind.has_new() {
        let mut next = 0;
        for index in window.first_new..=window.last_new {
            while next < hunk.len() && hunk[next].new_end() <= index {
                next += 1;
            }
            let flag = match hunk.get(next) {
                Some(change) if change.new_start <= index => {
                    if change.deleted > 0 {
                        "!"
                    } else {
                        "+"
                    }
                }
                _ => " ",
            };
            sink.print_line(flag, new.line(index))?;
        }
    }
    Ok(())
}

/// The context range convention: `first,last` in display numbers, collapsed
/// to one number for a single line, and to the line before the range when
/// the range is empty.
fn write_range<W: Write>(
    sink: &mut Sink<'_, W>,
    file: &FileLines<'_>,
    first: isize,
    last: isize,
) -> io::Result<()> {
    let display_first = file.translate(first);
    let display_last = file.translate(last);
    if display_last <= display_first {
        write!(sink, "{display_last}")
    } else {
        write!(sink, "{display_first},{display_last}")
    }
}
