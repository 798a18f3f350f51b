//! md2html-core - HTML element tree and serialization
//!
//! This crate provides the ordered element tree that `md2html` builds while
//! reading Markdown line by line, and the serializer that turns it into
//! indented HTML.
//!
//! # Architecture
//!
//! ```text
//! Markdown lines ──builder──▶ ┌──────────────┐
//!                             │              │
//!                             │ Element tree │ ──▶ HTML String
//!                             │              │
//!                             └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use md2html_core::{serialize, Options, Tag, Tree};
//!
//! let mut tree = Tree::new(Tag::Body);
//! let root = tree.root();
//! let heading = tree.append_node(root, Tag::heading(1));
//! tree.push_text(heading, "Hello World");
//! let p = tree.append_node(root, Tag::Paragraph);
//! tree.push_text(p, "This is <strong>bold</strong> text.");
//!
//! let html = serialize(&tree, root, &Options::default());
//! assert_eq!(
//!     html,
//!     "<body>\n <h1>Hello World</h1>\n <p>This is <strong>bold</strong> text.</p>\n</body>\n"
//! );
//! ```

mod options;
mod page;
mod serialize;
mod tag;
mod tree;

pub use options::{LineEnding, Options};
pub use page::Page;
pub use serialize::serialize;
pub use tag::Tag;
pub use tree::{Child, NodeId, Position, Result, Tree, TreeError};
