//! # md2html
//!
//! Convert Markdown to HTML, one line at a time.
//!
//! ## Design
//!
//! The [`Builder`] is a line-oriented state machine: each call to
//! [`Builder::build`] classifies one input line and grows an element tree
//! from `md2html-core` in place. Inline markup is translated per line by the
//! functions in [`inline`]. When the input ends, the tree is serialized to
//! HTML.
//!
//! - **Single pass**: a line is never revisited, apart from the one-line
//!   lookback for setext headings and table headers
//! - **Best effort**: a line that fails is reported and the next line starts
//!   again from the document root
//!
//! ## Example (line by line)
//!
//! ```rust
//! use md2html::Builder;
//!
//! let mut builder = Builder::new("body");
//! for line in ["Title", "=====", "", "Some *text*."] {
//!     builder.build(line).unwrap();
//! }
//! let tree = builder.finish();
//! assert_eq!(
//!     tree.to_bracket_string(tree.root()),
//!     r#"body{h1(id="title"){"Title"} p{"Some <em>text</em>."}}"#
//! );
//! ```
//!
//! ## Example (whole text)
//!
//! ```rust
//! use md2html::Converter;
//!
//! let html = Converter::new().convert("# Hello World");
//! assert!(html.contains("<h1 id=\"hello-world\">Hello World</h1>"));
//! ```

mod builder;
pub mod inline;
mod service;
pub mod utilities;

pub use builder::{parse_separator, split_row, Align, BuildOptions, Builder, ListLevel, Mode};
pub use service::{ConvertOptions, Converter};

use md2html_core::TreeError;

/// Error raised while building the document tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The cursor could not be moved, e.g. above the document root
    #[error("{op} failed at line {line}: {source}")]
    Navigation {
        op: &'static str,
        line: usize,
        #[source]
        source: TreeError,
    },
}

/// Error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Page assembly error: {0}")]
    Page(#[from] TreeError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
