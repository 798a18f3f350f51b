//! Line classification helpers for the document builder.

use once_cell::sync::Lazy;
use regex::Regex;

static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^( *)([*+-])(?: +|$)").unwrap());

static ORDERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( *)([0-9]{1,9})\.(?: +|$)").unwrap());

/// Maximum heading level
pub const MAX_HEADING_LEVEL: usize = 6;

/// Indentation from which a line outside a paragraph is literal code
pub const CODE_INDENT: usize = 4;

/// Number of leading `c` characters in `s`.
///
/// Returns 0 when the run is longer than `max`.
pub fn count_leading(s: &str, c: char, max: Option<usize>) -> usize {
    let n = s.chars().take_while(|&ch| ch == c).count();
    match max {
        Some(max) if n > max => 0,
        _ => n,
    }
}

/// Number of leading spaces, i.e. the indent column of the line
pub fn indent_of(line: &str) -> usize {
    count_leading(line, ' ', None)
}

/// True when `s` is non-empty and made of `c` only
pub fn only_runes(s: &str, c: char) -> bool {
    !s.is_empty() && s.chars().all(|ch| ch == c)
}

/// Level and content of an ATX heading (`# Title`, `## Title ##`)
pub fn atx_heading(text: &str) -> Option<(u8, &str)> {
    let level = count_leading(text, '#', Some(MAX_HEADING_LEVEL));
    if level == 0 {
        return None;
    }

    let content = text[level..].trim();
    // optional closing sequence, only when separated by a space
    let stripped = content.trim_end_matches('#');
    let closed = stripped.len() < content.len() && (stripped.is_empty() || stripped.ends_with(' '));
    let content = if closed {
        stripped.trim_end()
    } else {
        content
    };

    if content.is_empty() {
        None
    } else {
        Some((level as u8, content))
    }
}

/// Three or more `-`, `*` or `_` of one kind, spaces allowed in between
pub fn is_thematic_break(text: &str) -> bool {
    let mut marks = text.chars().filter(|c| *c != ' ');
    let Some(first) = marks.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }

    let mut count = 1;
    for c in marks {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

/// Info string of a code fence line, `None` if the line is not a fence
pub fn fence_info(text: &str) -> Option<&str> {
    text.strip_prefix("```")
        .map(|rest| rest.trim_start_matches('`').trim())
}

/// A fence line without an info string closes an open code block
pub fn is_closing_fence(text: &str) -> bool {
    text.len() >= 3 && only_runes(text, '`')
}

/// Depth of a blockquote line and the text after its markers
///
/// `> > text` and `>> text` both have depth 2.
pub fn quote_depth(text: &str) -> (usize, &str) {
    let mut depth = 0;
    let mut rest = text;
    loop {
        let trimmed = rest.trim_start();
        match trimmed.strip_prefix('>') {
            Some(after) => {
                depth += 1;
                rest = after;
            }
            None => return (depth, trimmed),
        }
    }
}

/// A paragraph line ending in two or more spaces
pub fn ends_with_hard_break(raw: &str) -> bool {
    raw.ends_with("  ") && !raw.trim().is_empty()
}

/// The kind of list a marker opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// `*`, `-` or `+`
    Bullet,
    /// `1.` with its number
    Ordered(u32),
}

/// A recognised list item marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker<'a> {
    pub kind: MarkerKind,
    /// Column of the marker character
    pub marker_col: usize,
    /// Column at which the item text starts
    pub content_col: usize,
    /// Item text, trimmed
    pub text: &'a str,
}

/// Parse a list item marker at the start of `line` (leading spaces allowed)
pub fn list_marker(line: &str) -> Option<ListMarker<'_>> {
    let line = line.trim_end();

    if let Some(caps) = ORDERED_MARKER.captures(line) {
        let number = caps[2].parse().ok()?;
        let matched = caps.get(0)?;
        return Some(ListMarker {
            kind: MarkerKind::Ordered(number),
            marker_col: caps[1].len(),
            content_col: content_column(line, matched.end()),
            text: line[matched.end()..].trim(),
        });
    }

    // a line of dashes is a heading underline or a rule, never an item
    if only_runes(line.trim(), '-') {
        return None;
    }

    let caps = BULLET_MARKER.captures(line)?;
    let matched = caps.get(0)?;
    Some(ListMarker {
        kind: MarkerKind::Bullet,
        marker_col: caps[1].len(),
        content_col: content_column(line, matched.end()),
        text: line[matched.end()..].trim(),
    })
}

// An empty item still reserves one column after the marker
fn content_column(line: &str, end: usize) -> usize {
    if end >= line.len() {
        end + 1
    } else {
        end
    }
}
