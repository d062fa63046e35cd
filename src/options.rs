//! Options controlling hunk assembly and output.

use std::time::SystemTime;

use regex::Regex;

/// Output style for rendered hunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `***************` hunks with separate old and new sections.
    Context,
    /// `@@` hunks with one merged line stream.
    Unified,
}

/// Everything the renderer needs to know besides the files and the script.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: Format,
    /// Unchanged lines shown before and after each hunk's changes.
    pub context: usize,
    /// Pattern for the function-header annotation on hunk headers.
    pub function_pattern: Option<Regex>,
    /// Changed lines matching this pattern do not count as differences.
    pub ignore_pattern: Option<Regex>,
    /// Changed blank lines do not count as differences.
    pub ignore_blank_lines: bool,
    /// Separate line markers from text with a tab instead of a space.
    pub initial_tab: bool,
    /// Drop the marker's trailing separator on empty lines.
    pub suppress_blank_empty: bool,
    /// Expand tabs in line bodies to spaces on output.
    pub expand_tabs: bool,
    /// Column distance between tab stops when expanding.
    pub tab_size: usize,
    /// File names and times for the header before the first hunk.
    pub banner: Option<Banner>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            format: Format::Unified,
            context: 3,
            function_pattern: None,
            ignore_pattern: None,
            ignore_blank_lines: false,
            initial_tab: false,
            suppress_blank_empty: true,
            expand_tabs: false,
            tab_size: 8,
            banner: None,
        }
    }
}

impl RenderOptions {
    /// True if some changes may be ignorable and the script needs marking.
    pub(crate) fn classifies_ignorable(&self) -> bool {
        self.ignore_blank_lines || self.ignore_pattern.is_some()
    }
}

/// One side of the banner: a file name with an optional modification time,
/// or a verbatim label overriding both.
#[derive(Debug, Clone)]
pub struct FileMeta {
    pub name: String,
    pub mtime: Option<SystemTime>,
    pub label: Option<String>,
}

impl FileMeta {
    /// Metadata carrying just a name.
    pub fn named(name: impl Into<String>) -> Self {
        FileMeta {
            name: name.into(),
            mtime: None,
            label: None,
        }
    }
}

/// Old and new file metadata for the banner.
#[derive(Debug, Clone)]
pub struct Banner {
    pub old: FileMeta,
    pub new: FileMeta,
}

/// Accumulates patterns given one at a time and compiles them into a
/// single alternation, so several ignore or function-header patterns act
/// as "any of these".
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    sources: Vec<String>,
}

impl PatternList {
    pub fn add(&mut self, pattern: impl Into<String>) {
        self.sources.push(pattern.into());
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Compile the accumulated patterns, `None` if there are none.
    pub fn compile(&self) -> Result<Option<Regex>, regex::Error> {
        if self.sources.is_empty() {
            return Ok(None);
        }
        let joined = self
            .sources
            .iter()
            .map(|source| format!("(?:{source})"))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&joined).map(Some)
    }
}
