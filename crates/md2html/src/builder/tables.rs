//! Pipe tables.

use std::mem;

use md2html_core::{Child, NodeId, Tag, Tree};
use once_cell::sync::Lazy;
use regex::Regex;

use super::state::{Align, Mode};
use super::Builder;
use crate::inline;
use crate::BuildError;

static SEPARATOR_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(:?)-+(:?)$").unwrap());

const PIPE: [char; 1] = ['|'];

/// Cells of a `| a | b |` row, trimmed; escaped pipes `\|` stay in the cell
///
/// Returns `None` unless the line starts and ends with a pipe.
pub fn split_row(line: &str) -> Option<Vec<String>> {
    let protected = inline::encode_markers(line.trim(), &PIPE, true);
    let inner = protected.strip_prefix('|')?.strip_suffix('|')?;
    Some(
        inner
            .split('|')
            .map(|cell| inline::decode_markers(cell.trim(), &PIPE, false))
            .collect(),
    )
}

/// Column alignments of a separator row such as `| --- | :---: |`
///
/// Empty cells count as unaligned columns, but at least one cell must hold
/// dashes.
pub fn parse_separator(line: &str) -> Option<Vec<Align>> {
    let cells = split_row(line)?;
    if cells.iter().all(String::is_empty) {
        return None;
    }

    cells
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                return Some(Align::None);
            }
            let caps = SEPARATOR_CELL.captures(cell)?;
            Some(Align::from_colons(!caps[1].is_empty(), !caps[2].is_empty()))
        })
        .collect()
}

impl Builder {
    /// Reinterpret the previous paragraph line as a table header when `text`
    /// is a separator row
    pub(super) fn promote_to_table(&mut self, previous: &str, text: &str) -> Result<bool, BuildError> {
        const OP: &str = "table header";

        let Some(aligns) = parse_separator(text) else {
            return Ok(false);
        };
        let Some(header) = split_row(previous) else {
            return Ok(false);
        };

        let paragraph = self.cursor;
        if *self.tree.tag(paragraph) != Tag::Paragraph
            || !matches!(self.tree.last_child(paragraph), Ok(Child::Text(_)))
        {
            return Ok(false);
        }

        self.trace(OP);
        self.tree
            .remove_last(paragraph)
            .map_err(|source| self.navigation_error(OP, source))?;
        self.reset_to_root(OP)?;

        let root = self.tree.root();
        let table = self.tree.append_node(root, Tag::Table);
        if let Some(style) = &self.options.table_style {
            self.tree.set_info(table, format!("style=\"{style}\""));
        }
        append_row(&mut self.tree, table, &header, &aligns, Tag::TableHeader);

        self.cursor = table;
        self.mode = Mode::Table(aligns);
        Ok(true)
    }

    /// Add a data row to the open table
    ///
    /// A line that is not a row closes the table and returns `false`.
    pub(super) fn table_row(&mut self, text: &str) -> Result<bool, BuildError> {
        let Some(cells) = split_row(text) else {
            self.trace("table end");
            self.close_block("table")?;
            return Ok(false);
        };

        let aligns = match mem::take(&mut self.mode) {
            Mode::Table(aligns) => aligns,
            other => {
                self.mode = other;
                return Ok(false);
            }
        };

        self.trace("table row");
        append_row(&mut self.tree, self.cursor, &cells, &aligns, Tag::TableData);
        self.mode = Mode::Table(aligns);
        Ok(true)
    }
}

/// One `tr`, cut to the number of declared columns
fn append_row(tree: &mut Tree, table: NodeId, cells: &[String], aligns: &[Align], tag: Tag) {
    let row = tree.append_node(table, Tag::TableRow);
    for (cell, align) in cells.iter().zip(aligns) {
        let node = tree.append_node(row, tag.clone());
        if let Some(style) = align.style() {
            tree.set_info(node, style);
        }
        // empty cells keep an empty text so they are still written out
        tree.push_text(node, inline::translate(cell));
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::build;
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("| a | b |", Some(vec!["a", "b"]))]
    #[case("|a|", Some(vec!["a"]))]
    #[case(r"| a \| b | c |", Some(vec!["a | b", "c"]))]
    #[case("| a | b", None)]
    #[case("a | b |", None)]
    #[case("|", None)]
    fn test_split_row(#[case] line: &str, #[case] want: Option<Vec<&str>>) {
        let want = want.map(|cells| cells.into_iter().map(String::from).collect::<Vec<_>>());
        assert_eq!(split_row(line), want);
    }

    #[rstest]
    #[case("| --- | --- |", Some(vec![Align::None, Align::None]))]
    #[case(
        "| --- | :--- | ---: | :---: |",
        Some(vec![Align::None, Align::Left, Align::Right, Align::Center])
    )]
    #[case(
        "|| --- |  | --- ||",
        Some(vec![Align::None, Align::None, Align::None, Align::None, Align::None])
    )]
    #[case("| a | --- |", None)]
    #[case("|  |  |", None)]
    #[case("--- | ---", None)]
    fn test_parse_separator(#[case] line: &str, #[case] want: Option<Vec<Align>>) {
        assert_eq!(parse_separator(line), want);
    }

    #[rstest]
    #[case::simple(
        &["s", "| A | B |", "| --- | --- |", "| a | b |", "", "e"],
        r#"r{p{"s"} table(style="width: 100%"){tr{th{"A"} th{"B"}} tr{td{"a"} td{"b"}}} p{"e"}}"#
    )]
    #[case::empty_separator_cells(
        &["s", "| A | B |", "|| --- |  | --- ||", "| a | b |", "", "e"],
        r#"r{p{"s"} table(style="width: 100%"){tr{th{"A"} th{"B"}} tr{td{"a"} td{"b"}}} p{"e"}}"#
    )]
    #[case::aligned(
        &["s", "| A | B | C | D |", "| --- | :--- | ---: | :---: |", "| a | b | c | d |", "e"],
        concat!(
            r#"r{p{"s"} table(style="width: 100%"){"#,
            r#"tr{th{"A"} th(style="text-align: left"){"B"} th(style="text-align: right"){"C"} th(style="text-align: center"){"D"}} "#,
            r#"tr{td{"a"} td(style="text-align: left"){"b"} td(style="text-align: right"){"c"} td(style="text-align: center"){"d"}}} "#,
            r#"p{"e"}}"#
        )
    )]
    #[case::header_only_line(
        &["| A |", "| - |", "| x |"],
        r#"r{table(style="width: 100%"){tr{th{"A"}} tr{td{"x"}}}}"#
    )]
    #[case::extra_cells_dropped(
        &["| A |", "| --- |", "| a | b | c |"],
        r#"r{table(style="width: 100%"){tr{th{"A"}} tr{td{"a"}}}}"#
    )]
    #[case::short_row(
        &["| A | B |", "| --- | --- |", "| a |"],
        r#"r{table(style="width: 100%"){tr{th{"A"} th{"B"}} tr{td{"a"}}}}"#
    )]
    #[case::empty_cell(
        &["| A | B |", "|---|---|", "|  | b |"],
        r#"r{table(style="width: 100%"){tr{th{"A"} th{"B"}} tr{td{""} td{"b"}}}}"#
    )]
    #[case::inline_in_cells(
        &["| `a|b` |", "| --- |", r"| **x** \| y |"],
        r#"r{table(style="width: 100%"){tr{th{"`a"}} tr{td{"<strong>x</strong> | y"}}}}"#
    )]
    #[case::no_header_row(&["plain", "| --- |"], r#"r{p{"plain" "| --- |"}}"#)]
    #[case::separator_without_previous(&["", "| --- |"], r#"r{p{"| --- |"}}"#)]
    fn test_tables(#[case] lines: &[&str], #[case] want: &str) {
        assert_eq!(build(lines), want);
    }

    #[test]
    fn test_table_without_style() {
        let options = crate::BuildOptions {
            table_style: None,
            ..Default::default()
        };
        let mut builder = Builder::with_options("r", options);
        for line in ["| A |", "| --- |"] {
            builder.build(line).unwrap();
        }
        let tree = builder.finish();
        assert_eq!(tree.to_bracket_string(tree.root()), r#"r{table{tr{th{"A"}}}}"#);
    }
}
