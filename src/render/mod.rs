//! Driving loop and shared pieces for the two hunk output styles.

mod context;
mod unified;

use std::io::{self, Write};

use thiserror::Error;

use crate::function::FunctionFinder;
use crate::hunks::{hunk_end, mark_ignorable};
use crate::lines::FileLines;
use crate::options::{Format, RenderOptions};
use crate::output::Sink;
use crate::script::{trace_script, Change};

/// Failures while preparing options for or writing rendered hunks.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("output failed: {0}")]
    Output(#[from] io::Error),
}

/// Render an edit script against its two files as context or unified hunks.
///
/// Changes are first classified as ignorable or not when the options call
/// for it, then grouped into hunks and printed in the configured format.
/// Nothing is written, banner included, when every hunk turns out to be
/// ignorable.
///
/// The script must list changes in file order; the ignore flags are
/// rewritten by this call.
///
/// # Panics
///
/// If consecutive changes disagree about the number of unchanged lines
/// between them. Such a script is malformed and cannot be produced by
/// comparing real files.
pub fn render_script(
    script: &mut [Change],
    old: &FileLines<'_>,
    new: &FileLines<'_>,
    options: &RenderOptions,
    out: &mut impl Write,
) -> Result<(), RenderError> {
    if options.classifies_ignorable() {
        mark_ignorable(script, old, new, options);
    } else {
        for change in script.iter_mut() {
            change.ignore = false;
        }
    }
    log::debug!(
        "rendering {} changes as {:?} hunks with {} lines of context",
        script.len(),
        options.format,
        options.context
    );
    trace_script(script);

    let mut finder = FunctionFinder::new(old.prefix_lines());
    let mut sink = Sink::new(out, options);
    let mut rest: &[Change] = script;
    while !rest.is_empty() {
        let end = hunk_end(rest, options.context);
        let (hunk, tail) = rest.split_at(end + 1);
        match options.format {
            Format::Context => {
                context::print_hunk(hunk, old, new, options, &mut finder, &mut sink)?
            }
            Format::Unified => {
                unified::print_hunk(hunk, old, new, options, &mut finder, &mut sink)?
            }
        }
        rest = tail;
    }
    Ok(())
}

/// Shorten a function-header line for a hunk header: leading whitespace
/// dropped, at most 40 characters kept, trailing whitespace removed.
pub(crate) fn excerpt(line: &str) -> &str {
    let trimmed = line.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let capped = match trimmed.char_indices().nth(40) {
        Some((cut, _)) => &trimmed[..cut],
        None => trimmed,
    };
    capped.trim_end_matches(|c: char| c.is_ascii_whitespace())
}
