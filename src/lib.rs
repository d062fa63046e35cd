//! Assembling line edit scripts into hunks and rendering them as context
//! or unified diffs.
//!
//! The input is an edit script: the ordered list of [`Change`]s some
//! comparison algorithm found between an old and a new file, with the file
//! texts behind [`FileLines`] views. [`render_script`] groups neighboring
//! changes into hunks, widens each hunk with unchanged context lines, and
//! writes the classic context or unified format, including the file banner,
//! function-header annotations and ignore rules.
//!
//! ```
//! use contexture::{render_script, Change, FileLines, RenderOptions};
//!
//! let old = FileLines::new("fn main() {\n    println!(\"hi\");\n}\n");
//! let new = FileLines::new("fn main() {\n    println!(\"hello\");\n}\n");
//! let mut script = [Change::new(1, 1, 1, 1)];
//!
//! let mut options = RenderOptions::default();
//! options.context = 1;
//!
//! let mut out = Vec::new();
//! render_script(&mut script, &old, &new, &options, &mut out)?;
//! assert_eq!(
//!     String::from_utf8(out)?,
//!     "@@ -1,3 +1,3 @@\n\
//!      \x20fn main() {\n\
//!      -    println!(\"hi\");\n\
//!      +    println!(\"hello\");\n\
//!      \x20}\n",
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analyze;
pub mod function;
pub mod hunks;
pub mod lines;
pub mod options;
mod output;
pub mod render;
pub mod script;

pub use analyze::{analyze, Analysis, HunkKind};
pub use function::FunctionFinder;
pub use hunks::{hunk_end, mark_ignorable, Window};
pub use lines::FileLines;
pub use options::{Banner, FileMeta, Format, PatternList, RenderOptions};
pub use render::{render_script, RenderError};
pub use script::Change;
