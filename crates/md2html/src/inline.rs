//! Inline span translation
//!
//! Pure string-to-string functions turning inline Markdown (code spans,
//! images, links, emphasis) into HTML fragments. [`translate`] applies them in
//! the order that keeps their markup from interfering: code spans first, then
//! images, then links, then emphasis.
//!
//! Characters that must not be read as emphasis delimiters (inside code spans
//! and URLs, or escaped with a backslash) are swapped for private-use
//! placeholders while emphasis is matched, and restored afterwards.

use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Characters that delimit emphasis
pub const EMPHASIS_MARKERS: [char; 3] = ['*', '_', '~'];

const PLACEHOLDER_BASE: u32 = 0xE000;

/// Tags and their delimiters, matched in this order
const EMPHASIS: [(&str, [&str; 2]); 3] = [
    ("strong", ["**", "__"]),
    ("em", ["_", "*"]),
    ("del", ["~~", "~~"]),
];

static CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

static IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"!\[([^\]]*)\]\(\s*([^)\s]+)(?:\s+"([^"]*)")?\s*\)"#).unwrap()
});

static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[([^\]]+)\]\(\s*([^)\s]*)(?:\s+"([^"]*)")?\s*\)"#).unwrap()
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Translate all inline Markdown in `s` to HTML
pub fn translate(s: &str) -> String {
    let s = code_spans(s);
    let s = images(&s);
    let s = links(&s);
    strong_em_del(&s)
}

/// `` `x` `` to `<code>x</code>`, with the content HTML-escaped
pub fn code_spans(s: &str) -> String {
    CODE_SPAN
        .replace_all(s, |caps: &Captures| {
            let code = encode_markers(&caps[1], &EMPHASIS_MARKERS, false);
            format!("<code>{}</code>", html_escape::encode_text(&code))
        })
        .into_owned()
}

/// `![alt](src "title")` to an `<img/>` element
pub fn images(s: &str) -> String {
    IMAGE
        .replace_all(s, |caps: &Captures| {
            let mut img = format!(
                "<img src=\"{}\" alt=\"{}\"",
                protect(&caps[2]),
                protect(&caps[1])
            );
            if let Some(title) = caps.get(3) {
                let _ = write!(img, " title=\"{}\"", protect(title.as_str()));
            }
            img.push_str("/>");
            img
        })
        .into_owned()
}

/// `[text](href "title")` to an `<a>` element
pub fn links(s: &str) -> String {
    LINK.replace_all(s, |caps: &Captures| {
        let mut link = format!("<a href=\"{}\"", protect(&caps[2]));
        if let Some(title) = caps.get(3) {
            let _ = write!(link, " title=\"{}\"", protect(title.as_str()));
        }
        let _ = write!(link, ">{}</a>", &caps[1]);
        link
    })
    .into_owned()
}

// Attribute values: escaped, and never part of an emphasis pair
fn protect(value: &str) -> String {
    let escaped = html_escape::encode_double_quoted_attribute(value);
    encode_markers(&escaped, &EMPHASIS_MARKERS, false)
}

/// Strong (`**`, `__`), emphasis (`_`, `*`) and deleted (`~~`) text
///
/// Delimiters are paired left to right; an unpaired trailing delimiter is kept
/// as text. A `*` at the very start of the text is never an emphasis opener.
/// Backslash-escaped markers come out as the literal character.
pub fn strong_em_del(s: &str) -> String {
    let mut s = encode_markers(s, &EMPHASIS_MARKERS, true);
    for (tag, delimiters) in EMPHASIS {
        for delimiter in delimiters {
            s = pair_delimiters(&s, tag, delimiter);
        }
    }
    decode_markers(&s, &EMPHASIS_MARKERS, false)
}

fn pair_delimiters(s: &str, tag: &str, delimiter: &str) -> String {
    let (mut out, body) = match s.strip_prefix('*') {
        Some(rest) if delimiter == "*" => (String::from("*"), rest),
        _ => (String::new(), s),
    };

    let parts: Vec<&str> = body.split(delimiter).collect();
    out.push_str(parts[0]);

    let mut i = 1;
    while i < parts.len() {
        match parts.get(i + 1) {
            Some(after) => {
                let _ = write!(out, "<{tag}>{}</{tag}>{after}", parts[i]);
            }
            None => {
                out.push_str(delimiter);
                out.push_str(parts[i]);
            }
        }
        i += 2;
    }
    out
}

fn placeholder(marker: char) -> char {
    char::from_u32(PLACEHOLDER_BASE + marker as u32).unwrap_or(marker)
}

/// Replace `markers` by private-use placeholders
///
/// With `escaped_only`, only backslash-escaped markers are replaced and the
/// backslash is dropped.
pub fn encode_markers(s: &str, markers: &[char], escaped_only: bool) -> String {
    let mut out = s.to_string();
    for &marker in markers {
        let from = if escaped_only {
            format!("\\{marker}")
        } else {
            marker.to_string()
        };
        out = out.replace(&from, &placeholder(marker).to_string());
    }
    out
}

/// Restore placeholders written by [`encode_markers`]
///
/// With `escaped`, each marker is written back with a leading backslash.
pub fn decode_markers(s: &str, markers: &[char], escaped: bool) -> String {
    let mut out = s.to_string();
    for &marker in markers {
        let to = if escaped {
            format!("\\{marker}")
        } else {
            marker.to_string()
        };
        out = out.replace(placeholder(marker), &to);
    }
    out
}

/// Heading id: tags stripped, lowercase, spaces to `-`, quotes dropped
pub fn slug(html: &str) -> String {
    TAG.replace_all(html, "")
        .to_lowercase()
        .replace(' ', "-")
        .replace('"', "")
}
