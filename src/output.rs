//! Output plumbing shared by both hunk renderers: the banner emitted
//! before the first hunk and the per-line marker and body rules.

use std::io::{self, Write};
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::options::{FileMeta, Format, RenderOptions};

/// Strftime layout for banner modification times, nanosecond precision.
const BANNER_TIME_FORMAT: &str = "%F %T%.9f %z";

/// Destination for one rendering pass. Holds the pre-rendered banner until
/// the first hunk proves there is something to say.
pub(crate) struct Sink<'a, W: Write> {
    out: &'a mut W,
    banner: Option<String>,
    initial_tab: bool,
    suppress_blank_empty: bool,
    expand_tabs: bool,
    tab_size: usize,
}

impl<'a, W: Write> Sink<'a, W> {
    pub(crate) fn new(out: &'a mut W, options: &RenderOptions) -> Self {
        let banner = options.banner.as_ref().map(|banner| {
            let (old_mark, new_mark) = match options.format {
                Format::Unified => ("---", "+++"),
                Format::Context => ("***", "---"),
            };
            format!(
                "{}{}",
                banner_line(old_mark, &banner.old),
                banner_line(new_mark, &banner.new)
            )
        });
        Sink {
            out,
            banner,
            initial_tab: options.initial_tab,
            suppress_blank_empty: options.suppress_blank_empty,
            expand_tabs: options.expand_tabs,
            tab_size: options.tab_size.max(1),
        }
    }

    /// Emit the banner if this is the first hunk to render.
    pub(crate) fn begin(&mut self) -> io::Result<()> {
        if let Some(banner) = self.banner.take() {
            self.out.write_all(banner.as_bytes())?;
        }
        Ok(())
    }

    /// One line of a context-format hunk body behind its flag.
    ///
    /// The flag is separated from the text by a space, or a tab under
    /// `initial_tab`. Under `suppress_blank_empty` an empty line loses the
    /// separator, and a plain space flag disappears with it.
    pub(crate) fn print_line(&mut self, flag: &str, line: &str) -> io::Result<()> {
        let separator = if self.initial_tab { "\t" } else { " " };
        if self.suppress_blank_empty && line.starts_with('\n') {
            if flag != " " {
                self.out.write_all(flag.as_bytes())?;
            }
        } else {
            write!(self.out, "{flag}{separator}")?;
        }
        self.body(line, Some((flag, separator)))
    }

    /// One unmarked context line of a unified hunk.
    pub(crate) fn unified_context(&mut self, line: &str) -> io::Result<()> {
        if !(self.suppress_blank_empty && line.starts_with('\n')) {
            let marker = if self.initial_tab { b'\t' } else { b' ' };
            self.out.write_all(&[marker])?;
        }
        self.body(line, None)
    }

    /// One deleted or inserted line of a unified hunk behind `marker`.
    pub(crate) fn unified_edit(&mut self, marker: char, line: &str) -> io::Result<()> {
        write!(self.out, "{marker}")?;
        if self.initial_tab && !(self.suppress_blank_empty && line.starts_with('\n')) {
            self.out.write_all(b"\t")?;
        }
        self.body(line, None)
    }

    /// Line text after the marker, plus the missing-newline notice patch
    /// looks for when the file's last line has no terminator.
    fn body(&mut self, line: &str, reflag: Option<(&str, &str)>) -> io::Result<()> {
        if self.expand_tabs {
            self.write_expanded(line, reflag)?;
        } else {
            self.out.write_all(line.as_bytes())?;
        }
        if !line.ends_with('\n') {
            self.out.write_all(b"\n\\ No newline at end of file\n")?;
        }
        Ok(())
    }

    /// Copy `line` with tabs turned into spaces up to the next tab stop.
    /// Carriage returns restart the column count and repeat the flag so the
    /// overwritten text still shows its marker; a backspace at the left
    /// margin is dropped.
    fn write_expanded(&mut self, line: &str, reflag: Option<(&str, &str)>) -> io::Result<()> {
        let bytes = line.as_bytes();
        let mut expanded = Vec::with_capacity(bytes.len());
        let mut column = 0;
        for (position, &byte) in bytes.iter().enumerate() {
            match byte {
                b'\t' => {
                    let spaces = self.tab_size - column % self.tab_size;
                    column += spaces;
                    expanded.extend(std::iter::repeat(b' ').take(spaces));
                }
                b'\r' => {
                    expanded.push(byte);
                    column = 0;
                    if let Some((flag, separator)) = reflag {
                        if bytes.get(position + 1).is_some_and(|&next| next != b'\n') {
                            expanded.extend_from_slice(flag.as_bytes());
                            expanded.extend_from_slice(separator.as_bytes());
                        }
                    }
                }
                0x08 => {
                    if column > 0 {
                        column -= 1;
                        expanded.push(byte);
                    }
                }
                _ => {
                    column += usize::from(!byte.is_ascii_control());
                    expanded.push(byte);
                }
            }
        }
        self.out.write_all(&expanded)
    }
}

impl<W: Write> Write for Sink<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

fn banner_line(mark: &str, meta: &FileMeta) -> String {
    match (&meta.label, meta.mtime) {
        (Some(label), _) => format!("{mark} {label}\n"),
        (None, Some(mtime)) => format!("{mark} {}\t{}\n", meta.name, format_mtime(mtime)),
        (None, None) => format!("{mark} {}\n", meta.name),
    }
}

fn format_mtime(mtime: SystemTime) -> String {
    DateTime::<Local>::from(mtime)
        .format(BANNER_TIME_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Banner;
    use regex::Regex;

    fn collect(
        options: &RenderOptions,
        emit: impl FnOnce(&mut Sink<'_, Vec<u8>>) -> io::Result<()>,
    ) -> String {
        let mut out = Vec::new();
        let mut sink = Sink::new(&mut out, options);
        emit(&mut sink).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn labeled(old: &str, new: &str) -> Banner {
        let mut old_meta = FileMeta::named("a");
        old_meta.label = Some(old.to_string());
        let mut new_meta = FileMeta::named("b");
        new_meta.label = Some(new.to_string());
        Banner {
            old: old_meta,
            new: new_meta,
        }
    }

    #[test]
    fn unified_banner_uses_minus_and_plus_marks() {
        let mut options = RenderOptions::default();
        options.banner = Some(labeled("old/x", "new/x"));
        let text = collect(&options, |sink| sink.begin());
        assert_eq!(text, "--- old/x\n+++ new/x\n");
    }

    #[test]
    fn context_banner_uses_star_and_minus_marks() {
        let mut options = RenderOptions::default();
        options.format = Format::Context;
        options.banner = Some(labeled("old/x", "new/x"));
        let text = collect(&options, |sink| sink.begin());
        assert_eq!(text, "*** old/x\n--- new/x\n");
    }

    #[test]
    fn banner_is_emitted_once_and_absent_without_metadata() {
        let mut options = RenderOptions::default();
        options.banner = Some(labeled("a", "b"));
        let text = collect(&options, |sink| {
            sink.begin()?;
            sink.begin()
        });
        assert_eq!(text, "--- a\n+++ b\n");

        let silent = collect(&RenderOptions::default(), |sink| sink.begin());
        assert_eq!(silent, "");
    }

    #[test]
    fn named_banner_lines_carry_a_tabbed_timestamp() {
        let mut old = FileMeta::named("left.txt");
        old.mtime = Some(SystemTime::UNIX_EPOCH);
        let mut new = FileMeta::named("right.txt");
        new.mtime = Some(SystemTime::UNIX_EPOCH);
        let mut options = RenderOptions::default();
        options.banner = Some(Banner { old, new });

        let text = collect(&options, |sink| sink.begin());
        let shape = Regex::new(
            "^--- left\\.txt\\t\\d{4}-\\d{2}-\\d{2} \\d{2}:\\d{2}:\\d{2}\\.\\d{9} [+-]\\d{4}\n\
             \\+\\+\\+ right\\.txt\\t\\d{4}-\\d{2}-\\d{2} \\d{2}:\\d{2}:\\d{2}\\.\\d{9} [+-]\\d{4}\n$",
        )
        .unwrap();
        assert!(shape.is_match(&text), "unexpected banner: {text:?}");
    }

    #[test]
    fn flags_are_separated_by_a_space_or_tab() {
        let options = RenderOptions::default();
        let text = collect(&options, |sink| {
            sink.print_line(" ", "ctx\n")?;
            sink.print_line("-", "gone\n")
        });
        assert_eq!(text, "  ctx\n- gone\n");

        let mut tabbed = RenderOptions::default();
        tabbed.initial_tab = true;
        let text = collect(&tabbed, |sink| sink.print_line("!", "x\n"));
        assert_eq!(text, "!\tx\n");
    }

    #[test]
    fn blank_lines_lose_their_padding() {
        let options = RenderOptions::default();
        let text = collect(&options, |sink| {
            sink.print_line(" ", "\n")?;
            sink.print_line("-", "\n")
        });
        assert_eq!(text, "\n-\n");

        let mut keep = RenderOptions::default();
        keep.suppress_blank_empty = false;
        let text = collect(&keep, |sink| sink.print_line(" ", "\n"));
        assert_eq!(text, "  \n");
    }

    #[test]
    fn unified_context_marker_is_a_single_character() {
        let options = RenderOptions::default();
        let text = collect(&options, |sink| {
            sink.unified_context("x\n")?;
            sink.unified_context("\n")
        });
        assert_eq!(text, " x\n\n");

        let mut tabbed = RenderOptions::default();
        tabbed.initial_tab = true;
        let text = collect(&tabbed, |sink| sink.unified_context("x\n"));
        assert_eq!(text, "\tx\n");
    }

    #[test]
    fn unified_edit_tabs_only_under_initial_tab() {
        let options = RenderOptions::default();
        let text = collect(&options, |sink| sink.unified_edit('-', "x\n"));
        assert_eq!(text, "-x\n");

        let mut tabbed = RenderOptions::default();
        tabbed.initial_tab = true;
        let text = collect(&tabbed, |sink| {
            sink.unified_edit('+', "x\n")?;
            sink.unified_edit('+', "\n")
        });
        assert_eq!(text, "+\tx\n+\n");
    }

    #[test]
    fn missing_final_newline_is_called_out() {
        let options = RenderOptions::default();
        let text = collect(&options, |sink| sink.unified_edit('-', "last"));
        assert_eq!(text, "-last\n\\ No newline at end of file\n");
    }

    #[test]
    fn tabs_expand_to_the_next_stop() {
        let mut options = RenderOptions::default();
        options.expand_tabs = true;
        let text = collect(&options, |sink| sink.unified_context("a\tb\tc\n"));
        assert_eq!(text, " a       b       c\n");

        options.tab_size = 4;
        let text = collect(&options, |sink| sink.unified_context("a\tb\n"));
        assert_eq!(text, " a   b\n");
    }

    #[test]
    fn carriage_return_repeats_the_flag_when_expanding() {
        let mut options = RenderOptions::default();
        options.expand_tabs = true;
        let text = collect(&options, |sink| sink.print_line("!", "ab\rcd\n"));
        assert_eq!(text, "! ab\r! cd\n");

        // No repeat when the carriage return ends the visible line.
        let text = collect(&options, |sink| sink.print_line("!", "ab\r\n"));
        assert_eq!(text, "! ab\r\n");
    }

    #[test]
    fn backspace_at_the_margin_is_dropped_when_expanding() {
        let mut options = RenderOptions::default();
        options.expand_tabs = true;
        let text = collect(&options, |sink| sink.unified_context("\x08ab\x08c\n"));
        assert_eq!(text, " ab\x08c\n");
    }
}
