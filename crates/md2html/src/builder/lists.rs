//! Ordered and unordered lists.

use std::mem;

use md2html_core::{NodeId, Tag};

use super::state::{list_tag, ListLevel, Mode};
use super::Builder;
use crate::inline;
use crate::utilities::{ListMarker, MarkerKind};
use crate::BuildError;

impl Builder {
    /// Add a list item, opening, nesting or leaving list levels as its marker
    /// column requires
    pub(super) fn list_item(&mut self, marker: ListMarker<'_>) -> Result<(), BuildError> {
        const OP: &str = "list item";
        self.trace(OP);

        let mut levels = match mem::take(&mut self.mode) {
            Mode::List(levels) => levels,
            _ => {
                self.reset_to_root(OP)?;
                Vec::new()
            }
        };

        match levels.last() {
            None => {
                let root = self.tree.root();
                let level = self.open_level(root, &marker);
                levels.push(level);
            }
            Some(top) if marker.marker_col >= top.content_col => {
                let parent = top.item;
                self.ascend_to(parent, OP)?;
                let level = self.open_level(parent, &marker);
                levels.push(level);
            }
            Some(_) => {
                let depth = levels
                    .iter()
                    .rposition(|level| level.marker_col <= marker.marker_col)
                    .unwrap_or(0);
                levels.truncate(depth + 1);

                let list = levels[depth].list;
                self.ascend_to(list, OP)?;

                if levels[depth].accepts(marker.kind) {
                    let item = self.add_item(list, marker.text);
                    let level = &mut levels[depth];
                    level.item = item;
                    level.marker_col = level.marker_col.min(marker.marker_col);
                    level.content_col = marker.content_col;
                } else {
                    // a marker of the other kind starts a sibling list
                    self.ascend(OP)?;
                    let parent = self.cursor;
                    levels[depth] = self.open_level(parent, &marker);
                }
            }
        }

        self.mode = Mode::List(levels);
        Ok(())
    }

    /// Add a non-marker line to the open list
    ///
    /// Returns `false` after closing the list when the line is not indented
    /// past the outermost markers; the caller then treats it as paragraph text.
    pub(super) fn list_continuation(&mut self, text: &str, indent: usize) -> Result<bool, BuildError> {
        const OP: &str = "list continuation";

        let mut levels = match mem::take(&mut self.mode) {
            Mode::List(levels) => levels,
            other => {
                self.mode = other;
                return Ok(false);
            }
        };

        let depth = match levels.first() {
            Some(outer) if indent > outer.marker_col => levels
                .iter()
                .rposition(|level| level.marker_col <= indent)
                .unwrap_or(0),
            _ => {
                self.trace("list end");
                self.reset_to_root(OP)?;
                return Ok(false);
            }
        };

        self.trace(OP);
        levels.truncate(depth + 1);
        let item = levels[depth].item;
        self.ascend_to(item, OP)?;
        self.tree.push_text(item, inline::translate(text));
        self.mode = Mode::List(levels);
        Ok(true)
    }

    fn open_level(&mut self, parent: NodeId, marker: &ListMarker<'_>) -> ListLevel {
        let list = self.tree.append_node(parent, list_tag(marker.kind));
        if let MarkerKind::Ordered(start) = marker.kind {
            if start != 1 {
                self.tree.set_info(list, format!("start=\"{start}\""));
            }
        }

        let item = self.add_item(list, marker.text);
        ListLevel {
            marker_col: marker.marker_col,
            content_col: marker.content_col,
            kind: marker.kind,
            list,
            item,
        }
    }

    fn add_item(&mut self, list: NodeId, text: &str) -> NodeId {
        let item = self.tree.append_node(list, Tag::ListItem);
        if !text.is_empty() {
            self.tree.push_text(item, inline::translate(text));
        }
        self.cursor = item;
        item
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::build;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::flat(&["* 1", "* 2"], r#"r{ul{li{"1"} li{"2"}}}"#)]
    #[case::nested(
        &["a", "* 1", "* 2", "  + 2.1", "  + 2.2", "    - 2.2.1", "  + 2.3", "* 3", "c"],
        r#"r{p{"a"} ul{li{"1"} li{"2" ul{li{"2.1"} li{"2.2" ul{li{"2.2.1"}}} li{"2.3"}}} li{"3"}} p{"c"}}"#
    )]
    #[case::continuation(
        &["a", "  * 1", "   l1", "  * 2", "   l2", "c"],
        r#"r{p{"a"} ul{li{"1" "l1"} li{"2" "l2"}} p{"c"}}"#
    )]
    #[case::continuation_of_nested(
        &["a", "", "- b", "  * c", "  d", "- e", "f"],
        r#"r{p{"a"} ul{li{"b" ul{li{"c" "d"}}} li{"e"}} p{"f"}}"#
    )]
    #[case::blank_lines_break(
        &["a", "", "- b", "", "  * c", "", "  d", "", "- e", "", "f"],
        r#"r{p{"a"} ul{li{"b" br{} ul{li{"c" br{} "d" br{}}}} li{"e" br{}}} p{"f"}}"#
    )]
    #[case::paragraph_between_lists(
        &["* 1", "* 2", "a", "* p", "* q"],
        r#"r{ul{li{"1"} li{"2"}} p{"a"} ul{li{"p"} li{"q"}}}"#
    )]
    #[case::ordered(
        &["a", "1. 1", "2. 2", "   1. 2.1", "   2. 2.2", "c"],
        r#"r{p{"a"} ol{li{"1"} li{"2" ol{li{"2.1"} li{"2.2"}}}} p{"c"}}"#
    )]
    #[case::unordered_in_ordered(
        &["a", "1. 1", "2. 2", "   - 2.1", "   - 2.2", "c"],
        r#"r{p{"a"} ol{li{"1"} li{"2" ul{li{"2.1"} li{"2.2"}}}} p{"c"}}"#
    )]
    #[case::start_number(&["3. c", "4. d"], r#"r{ol(start="3"){li{"c"} li{"d"}}}"#)]
    #[case::kind_change(&["- a", "1. b"], r#"r{ul{li{"a"}} ol{li{"b"}}}"#)]
    #[case::shallower_marker_joins_level(
        &["   - a", "- b", "  c"],
        r#"r{ul{li{"a"} li{"b" "c"}}}"#
    )]
    #[case::inline_markup(&["* **x**"], r#"r{ul{li{"<strong>x</strong>"}}}"#)]
    #[case::wide_ordered_marker(
        &["9. nine", "10. ten", "    deeper"],
        r#"r{ol(start="9"){li{"nine"} li{"ten" "deeper"}}}"#
    )]
    fn test_lists(#[case] lines: &[&str], #[case] want: &str) {
        assert_eq!(build(lines), want);
    }

    #[test]
    fn test_returning_to_shallower_level_keeps_siblings() {
        let result = build(&["- a", "  - b", "  - c", "    - d", "- e"]);
        assert_eq!(
            result,
            r#"r{ul{li{"a" ul{li{"b"} li{"c" ul{li{"d"}}}}} li{"e"}}}"#
        );
    }

    #[test]
    fn test_empty_item_is_dropped() {
        assert_eq!(build(&["*", "* a"]), r#"r{ul{li{"a"}}}"#);
    }
}
