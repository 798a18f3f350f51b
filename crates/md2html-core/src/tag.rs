//! HTML element identifiers
//!
//! The set of element tags the builder creates and the serializer knows how
//! to lay out. Anything else (for example a caller-chosen root id) is kept as
//! [`Tag::Custom`].

use std::fmt;

/// An element identifier in the HTML tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Html,
    Head,
    Body,
    Title,
    Meta,
    Link,
    Paragraph,
    /// Heading with level 1-6
    Heading(u8),
    BlockQuote,
    UnorderedList,
    OrderedList,
    ListItem,
    Pre,
    Code,
    Table,
    TableRow,
    TableHeader,
    TableData,
    HorizontalRule,
    LineBreak,
    /// Any other identifier, stored as given
    Custom(String),
}

impl Tag {
    /// Heading tag for `level`, clamped to 1-6
    pub fn heading(level: u8) -> Self {
        Tag::Heading(level.clamp(1, 6))
    }

    /// Parse an element name; unknown names become [`Tag::Custom`]
    pub fn from_name(name: &str) -> Self {
        match name {
            "html" => Tag::Html,
            "head" => Tag::Head,
            "body" => Tag::Body,
            "title" => Tag::Title,
            "meta" => Tag::Meta,
            "link" => Tag::Link,
            "p" => Tag::Paragraph,
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "h5" => Tag::Heading(5),
            "h6" => Tag::Heading(6),
            "blockquote" => Tag::BlockQuote,
            "ul" => Tag::UnorderedList,
            "ol" => Tag::OrderedList,
            "li" => Tag::ListItem,
            "pre" => Tag::Pre,
            "code" => Tag::Code,
            "table" => Tag::Table,
            "tr" => Tag::TableRow,
            "th" => Tag::TableHeader,
            "td" => Tag::TableData,
            "hr" => Tag::HorizontalRule,
            "br" => Tag::LineBreak,
            other => Tag::Custom(other.to_string()),
        }
    }

    /// Element name as written in HTML
    pub fn as_str(&self) -> &str {
        match self {
            Tag::Html => "html",
            Tag::Head => "head",
            Tag::Body => "body",
            Tag::Title => "title",
            Tag::Meta => "meta",
            Tag::Link => "link",
            Tag::Paragraph => "p",
            Tag::Heading(1) => "h1",
            Tag::Heading(2) => "h2",
            Tag::Heading(3) => "h3",
            Tag::Heading(4) => "h4",
            Tag::Heading(5) => "h5",
            Tag::Heading(_) => "h6",
            Tag::BlockQuote => "blockquote",
            Tag::UnorderedList => "ul",
            Tag::OrderedList => "ol",
            Tag::ListItem => "li",
            Tag::Pre => "pre",
            Tag::Code => "code",
            Tag::Table => "table",
            Tag::TableRow => "tr",
            Tag::TableHeader => "th",
            Tag::TableData => "td",
            Tag::HorizontalRule => "hr",
            Tag::LineBreak => "br",
            Tag::Custom(name) => name,
        }
    }

    /// Elements written as `<tag/>` that never hold children
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            Tag::Meta | Tag::Link | Tag::HorizontalRule | Tag::LineBreak
        )
    }

    /// Block containers: line break after the opening tag, indented closing tag
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Tag::Html
                | Tag::Head
                | Tag::Body
                | Tag::BlockQuote
                | Tag::UnorderedList
                | Tag::OrderedList
                | Tag::Table
                | Tag::TableRow
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Tag::UnorderedList | Tag::OrderedList)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::from_name(name)
    }
}
