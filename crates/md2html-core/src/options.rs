//! Configuration options for HTML serialization

/// Line terminator written between block elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Options for HTML serialization
#[derive(Debug, Clone)]
pub struct Options {
    /// Line terminator
    pub line_ending: LineEnding,

    /// Indentation added per nesting level
    pub indent: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Lf,
            indent: " ".to_string(),
        }
    }
}
