//! Builder states and the data each one carries.

use md2html_core::{NodeId, Tag};

use crate::utilities::MarkerKind;

/// What the builder is in the middle of
///
/// The cursor's meaning depends on the mode: Root or an open paragraph in
/// `Normal`, the `code` node in `Fenced` and `Indented`, the innermost
/// blockquote in `Quote`, the current item in `List` and the table in `Table`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Inside a ```` ``` ```` block
    Fenced,
    /// Inside a block of lines indented by four or more spaces
    Indented,
    Quote { depth: usize },
    /// Open list levels, outermost first
    List(Vec<ListLevel>),
    /// Column alignments of the open table
    Table(Vec<Align>),
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Fenced => "fenced code",
            Mode::Indented => "indented code",
            Mode::Quote { .. } => "blockquote",
            Mode::List(_) => "list",
            Mode::Table(_) => "table",
        }
    }
}

/// One open level of a (possibly nested) list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLevel {
    /// Column of the markers at this level
    pub marker_col: usize,
    /// Column where item text starts; a marker at or beyond it nests
    pub content_col: usize,
    pub kind: MarkerKind,
    /// The `ul`/`ol` node
    pub list: NodeId,
    /// The most recent `li` of `list`
    pub item: NodeId,
}

impl ListLevel {
    /// Whether a marker of `kind` continues this list rather than starting a new one
    pub fn accepts(&self, kind: MarkerKind) -> bool {
        list_tag(self.kind) == list_tag(kind)
    }
}

pub fn list_tag(kind: MarkerKind) -> Tag {
    match kind {
        MarkerKind::Bullet => Tag::UnorderedList,
        MarkerKind::Ordered(_) => Tag::OrderedList,
    }
}

/// Table column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    None,
    Left,
    Right,
    Center,
}

impl Align {
    /// Alignment from the colons around a separator cell's dashes
    pub fn from_colons(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, true) => Align::Center,
            (true, false) => Align::Left,
            (false, true) => Align::Right,
            (false, false) => Align::None,
        }
    }

    /// Attribute string for a cell, if any
    pub fn style(&self) -> Option<&'static str> {
        match self {
            Align::None => None,
            Align::Left => Some("style=\"text-align: left\""),
            Align::Right => Some("style=\"text-align: right\""),
            Align::Center => Some("style=\"text-align: center\""),
        }
    }
}
