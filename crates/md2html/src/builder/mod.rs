//! Line-by-line document builder
//!
//! [`Builder`] consumes Markdown one line at a time and grows an element tree
//! in place. A cursor marks the node receiving new content; the current
//! [`Mode`] decides how the next line is classified.
//!
//! Lines are classified in this order:
//!
//! 1. blank lines close or extend the open block
//! 2. lines inside fenced or indented code are taken literally
//! 3. code fences (not inside a blockquote)
//! 4. indented code, when no paragraph is open
//! 5. ATX headings
//! 6. blockquote lines and their lazy continuation
//! 7. setext underlines directly after a one-line paragraph
//! 8. thematic breaks
//! 9. list items
//! 10. table rows, and table headers promoted from the previous line
//! 11. list continuation lines
//! 12. paragraph text

mod lists;
mod state;
mod tables;

use md2html_core::{Child, NodeId, Tag, Tree, TreeError};

use crate::inline;
use crate::utilities::{self, CODE_INDENT};
use crate::BuildError;

pub use state::{Align, ListLevel, Mode};
pub use tables::{parse_separator, split_row};

/// Options for the document builder
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Give headings an `id` derived from their text
    pub heading_ids: bool,

    /// Minimum length of a `-` underline turning the previous line into `h2`
    pub setext_dash_min: usize,

    /// Style attribute of generated tables
    pub table_style: Option<String>,

    /// Add `<br/>` after paragraph lines ending in two spaces
    pub hard_breaks: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            heading_ids: true,
            setext_dash_min: 1,
            table_style: Some("width: 100%".to_string()),
            hard_breaks: true,
        }
    }
}

/// Incremental Markdown to element-tree builder
#[derive(Debug)]
pub struct Builder {
    tree: Tree,
    cursor: NodeId,
    mode: Mode,
    /// 1-based number of the line being built
    line: usize,
    /// Trimmed text of the previous line when it was plain paragraph text
    previous_plain: Option<String>,
    options: BuildOptions,
}

impl Builder {
    /// Start a document whose root element is `root`
    pub fn new(root: impl Into<Tag>) -> Self {
        Self::with_options(root, BuildOptions::default())
    }

    pub fn with_options(root: impl Into<Tag>, options: BuildOptions) -> Self {
        let tree = Tree::new(root);
        let cursor = tree.root();
        Self {
            tree,
            cursor,
            mode: Mode::Normal,
            line: 0,
            previous_plain: None,
            options,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Number of lines fed so far
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Add one input line to the document
    ///
    /// Trailing line terminators are ignored. On a navigation error the
    /// builder falls back to Root in normal mode, so following lines are
    /// still processed.
    pub fn build(&mut self, line: &str) -> Result<(), BuildError> {
        self.line += 1;
        let raw = line.trim_end_matches(&['\n', '\r'][..]);

        match self.dispatch(raw) {
            Ok(()) => Ok(()),
            Err(err) => {
                log::warn!("{err}; continuing at document root");
                self.cursor = self.tree.root();
                self.mode = Mode::Normal;
                self.previous_plain = None;
                Err(err)
            }
        }
    }

    /// Close everything still open and hand out the tree
    pub fn finish(mut self) -> Tree {
        if let Err(err) = self.reset_to_root("finish") {
            log::warn!("{err}");
        }
        self.tree
    }

    fn dispatch(&mut self, raw: &str) -> Result<(), BuildError> {
        let previous = self.previous_plain.take();
        let text = raw.trim();
        let indent = utilities::indent_of(raw);

        if text.is_empty() {
            return self.blank_line(raw);
        }

        if self.mode == Mode::Fenced {
            return self.fenced_line(raw, text);
        }
        if self.mode == Mode::Indented {
            if indent >= CODE_INDENT {
                return self.indented_line(raw);
            }
            self.close_block("indented code")?;
        }

        let in_quote = matches!(self.mode, Mode::Quote { .. });

        if let Some(info) = utilities::fence_info(text) {
            if !in_quote {
                return self.open_fence(info);
            }
        }

        if self.mode == Mode::Normal && indent >= CODE_INDENT && self.cursor == self.tree.root() {
            return self.open_indented(raw);
        }

        if let Some((level, content)) = utilities::atx_heading(text) {
            return self.atx_heading(level, content);
        }

        if text.starts_with('>') {
            return self.block_quote(text);
        }

        if in_quote {
            self.trace("blockquote continuation");
            self.tree.push_text(self.cursor, inline::translate(text));
            return Ok(());
        }

        if previous.is_some() {
            if let Some(level) = self.setext_level(text) {
                if self.promote_to_heading(level)? {
                    return Ok(());
                }
            }
        }

        if utilities::is_thematic_break(text) {
            return self.thematic_break();
        }

        if let Some(marker) = utilities::list_marker(raw) {
            return self.list_item(marker);
        }

        if matches!(self.mode, Mode::Table(_)) && self.table_row(text)? {
            return Ok(());
        }

        if let Some(previous) = previous.as_deref() {
            if self.mode == Mode::Normal && self.promote_to_table(previous, text)? {
                return Ok(());
            }
        }

        if matches!(self.mode, Mode::List(_)) && self.list_continuation(text, indent)? {
            return Ok(());
        }

        self.paragraph_text(raw, text)
    }

    fn blank_line(&mut self, raw: &str) -> Result<(), BuildError> {
        match self.mode {
            Mode::Fenced => {
                self.tree
                    .push_text(self.cursor, html_escape::encode_text(raw).into_owned());
                Ok(())
            }
            Mode::List(_) => {
                self.trace("break in list item");
                self.tree.append_node(self.cursor, Tag::LineBreak);
                Ok(())
            }
            Mode::Normal => self.reset_to_root("paragraph end"),
            Mode::Indented | Mode::Quote { .. } | Mode::Table(_) => self.close_block("blank line"),
        }
    }

    fn paragraph_text(&mut self, raw: &str, text: &str) -> Result<(), BuildError> {
        if *self.tree.tag(self.cursor) != Tag::Paragraph {
            self.reset_to_root("paragraph")?;
            self.cursor = self.tree.append_node(self.cursor, Tag::Paragraph);
        }

        let paragraph = self.cursor;
        self.tree.push_text(paragraph, inline::translate(text));
        if self.options.hard_breaks && utilities::ends_with_hard_break(raw) {
            self.tree.append_node(paragraph, Tag::LineBreak);
        }
        self.previous_plain = Some(text.to_string());
        Ok(())
    }

    fn atx_heading(&mut self, level: u8, content: &str) -> Result<(), BuildError> {
        self.trace("heading");
        self.close_block("heading")?;
        self.append_heading(level, inline::translate(content));
        Ok(())
    }

    fn setext_level(&self, text: &str) -> Option<u8> {
        if utilities::only_runes(text, '=') {
            Some(1)
        } else if utilities::only_runes(text, '-') && text.len() >= self.options.setext_dash_min {
            Some(2)
        } else {
            None
        }
    }

    /// Turn a paragraph holding only the previous line into a heading
    fn promote_to_heading(&mut self, level: u8) -> Result<bool, BuildError> {
        const OP: &str = "setext heading";

        let paragraph = self.cursor;
        if *self.tree.tag(paragraph) != Tag::Paragraph || self.tree.len(paragraph) != 1 {
            return Ok(false);
        }
        let content = match self.tree.last_child(paragraph) {
            Ok(Child::Text(text)) => text.clone(),
            _ => return Ok(false),
        };

        self.trace(OP);
        self.tree
            .remove_last(paragraph)
            .map_err(|source| self.navigation_error(OP, source))?;
        self.reset_to_root(OP)?;
        self.append_heading(level, content);
        Ok(true)
    }

    fn append_heading(&mut self, level: u8, html: String) {
        let root = self.tree.root();
        let heading = self.tree.append_node(root, Tag::heading(level));
        if self.options.heading_ids {
            self.tree
                .set_info(heading, format!("id=\"{}\"", inline::slug(&html)));
        }
        self.tree.push_text(heading, html);
    }

    fn thematic_break(&mut self) -> Result<(), BuildError> {
        self.trace("thematic break");
        self.close_block("thematic break")?;
        let root = self.tree.root();
        self.tree.append_node(root, Tag::HorizontalRule);
        Ok(())
    }

    fn block_quote(&mut self, text: &str) -> Result<(), BuildError> {
        const OP: &str = "blockquote";

        let (depth, content) = utilities::quote_depth(text);
        let open = match self.mode {
            Mode::Quote { depth } => depth,
            _ => {
                self.close_block(OP)?;
                0
            }
        };
        self.trace(OP);

        for _ in open..depth {
            self.cursor = self.tree.append_node(self.cursor, Tag::BlockQuote);
        }
        for _ in depth..open {
            self.ascend(OP)?;
        }
        self.mode = Mode::Quote { depth };

        if !content.is_empty() {
            self.tree.push_text(self.cursor, inline::translate(content));
        }
        Ok(())
    }

    fn open_fence(&mut self, info: &str) -> Result<(), BuildError> {
        self.trace("fence");
        self.close_block("fence")?;
        let code = self.open_code_block();
        if let Some(language) = info.split_whitespace().next() {
            self.tree.set_info(
                code,
                format!(
                    "class=\"language-{}\"",
                    html_escape::encode_double_quoted_attribute(language)
                ),
            );
        }
        self.mode = Mode::Fenced;
        Ok(())
    }

    fn fenced_line(&mut self, raw: &str, text: &str) -> Result<(), BuildError> {
        if utilities::is_closing_fence(text) {
            self.trace("fence end");
            return self.close_block("fence");
        }
        self.tree
            .push_text(self.cursor, html_escape::encode_text(raw).into_owned());
        Ok(())
    }

    fn open_indented(&mut self, raw: &str) -> Result<(), BuildError> {
        self.trace("indented code");
        self.open_code_block();
        self.mode = Mode::Indented;
        self.indented_line(raw)
    }

    fn indented_line(&mut self, raw: &str) -> Result<(), BuildError> {
        let line = raw.get(CODE_INDENT..).unwrap_or_default();
        self.tree
            .push_text(self.cursor, html_escape::encode_text(line).into_owned());
        Ok(())
    }

    /// `pre{code{}}` at Root, with the cursor on `code`
    fn open_code_block(&mut self) -> NodeId {
        let root = self.tree.root();
        let pre = self.tree.append_node(root, Tag::Pre);
        self.cursor = self.tree.append_node(pre, Tag::Code);
        self.cursor
    }

    /// Leave whatever block is open and go back to Root in normal mode
    fn close_block(&mut self, op: &'static str) -> Result<(), BuildError> {
        self.mode = Mode::Normal;
        self.reset_to_root(op)
    }

    /// Move the cursor to its parent, removing the node left behind if empty
    fn ascend(&mut self, op: &'static str) -> Result<(), BuildError> {
        let left = self.cursor;
        let parent = self
            .tree
            .parent(left)
            .ok_or_else(|| self.navigation_error(op, TreeError::MissingParent))?;
        self.cursor = parent;
        self.remove_if_empty(left, op)
    }

    /// Ascend until the cursor is `target`
    fn ascend_to(&mut self, target: NodeId, op: &'static str) -> Result<(), BuildError> {
        while self.cursor != target {
            self.ascend(op)?;
        }
        Ok(())
    }

    fn reset_to_root(&mut self, op: &'static str) -> Result<(), BuildError> {
        self.ascend_to(self.tree.root(), op)
    }

    fn remove_if_empty(&mut self, node: NodeId, op: &'static str) -> Result<(), BuildError> {
        if node == self.tree.root() || !self.tree.is_empty(node) || self.tree.tag(node).is_void() {
            return Ok(());
        }
        let Some(parent) = self.tree.parent(node) else {
            return Ok(());
        };

        let index = self
            .tree
            .index_of(parent, node)
            .map_err(|source| self.navigation_error(op, source))?;
        self.tree
            .remove_at(parent, index)
            .map_err(|source| self.navigation_error(op, source))?;
        Ok(())
    }

    fn navigation_error(&self, op: &'static str, source: TreeError) -> BuildError {
        BuildError::Navigation {
            op,
            line: self.line,
            source,
        }
    }

    /// Point the cursor at a node outside the document
    #[cfg(test)]
    pub(crate) fn detach_cursor(&mut self) {
        self.cursor = self.tree.create(Tag::Pre);
        self.mode = Mode::Normal;
    }

    fn trace(&self, what: &str) {
        log::debug!("line {}: {what} ({} mode)", self.line, self.mode.name());
    }
}
