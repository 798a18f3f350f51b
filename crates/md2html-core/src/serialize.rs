//! HTML tree serialization
//!
//! Walks an element tree and writes indented HTML. Text leaves are written
//! as-is: they already hold HTML fragments.

use crate::options::Options;
use crate::tag::Tag;
use crate::tree::{Child, NodeId, Tree};

/// How a node is placed in the output
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// On its own line, indented by depth
    Block(usize),
    /// Run into the surrounding text
    Inline,
}

/// Serialize `node` and its descendants to HTML
pub fn serialize(tree: &Tree, node: NodeId, options: &Options) -> String {
    let mut output = String::with_capacity(4096);
    serialize_node(tree, node, Layout::Block(0), options, &mut output);
    output
}

fn serialize_node(tree: &Tree, id: NodeId, layout: Layout, options: &Options, out: &mut String) {
    let tag = tree.tag(id);

    if tag.is_void() {
        serialize_void(tree, id, layout, options, out);
        return;
    }

    // Empty elements are dropped entirely
    if tree.is_empty(id) {
        return;
    }

    if *tag == Tag::Pre {
        serialize_pre(tree, id, layout, options, out);
        return;
    }

    let newline = options.line_ending.as_str();
    let indent = indent_for(layout, options);
    let is_block_container = tag.is_container() && matches!(layout, Layout::Block(_));

    out.push_str(&indent);
    open_tag(tree, id, out);
    if is_block_container {
        out.push_str(newline);
    }

    let child_layout = match layout {
        Layout::Block(depth) if is_block_container => Layout::Block(depth + 1),
        _ => Layout::Inline,
    };

    let mut separator = "";
    let mut after_text = false;
    for child in tree.children(id) {
        match child {
            Child::Node(child) => {
                if is_block_container && after_text {
                    out.push_str(newline);
                }
                serialize_node(tree, *child, child_layout, options, out);
                separator = "";
                after_text = false;
            }
            Child::Text(text) => {
                out.push_str(separator);
                out.push_str(text);
                separator = " ";
                after_text = true;
            }
        }
    }

    if is_block_container {
        if after_text {
            out.push_str(newline);
        }
        out.push_str(&indent);
    }
    close_tag(tag, out);

    if matches!(layout, Layout::Block(_)) {
        out.push_str(newline);
    }
}

fn serialize_void(tree: &Tree, id: NodeId, layout: Layout, options: &Options, out: &mut String) {
    out.push_str(&indent_for(layout, options));
    out.push('<');
    out.push_str(tree.tag(id).as_str());
    push_info(tree, id, out);
    out.push_str("/>");
    if matches!(layout, Layout::Block(_)) {
        out.push_str(options.line_ending.as_str());
    }
}

/// Preformatted blocks keep every text line on its own line, unindented
fn serialize_pre(tree: &Tree, id: NodeId, layout: Layout, options: &Options, out: &mut String) {
    let newline = options.line_ending.as_str();

    out.push_str(&indent_for(layout, options));
    open_tag(tree, id, out);
    for child in tree.children(id) {
        match child {
            Child::Node(code) => {
                open_tag(tree, *code, out);
                for line in tree.children(*code).iter().filter_map(Child::as_text) {
                    out.push_str(line);
                    out.push_str(newline);
                }
                close_tag(tree.tag(*code), out);
            }
            Child::Text(line) => {
                out.push_str(line);
                out.push_str(newline);
            }
        }
    }
    close_tag(tree.tag(id), out);

    if matches!(layout, Layout::Block(_)) {
        out.push_str(newline);
    }
}

fn indent_for(layout: Layout, options: &Options) -> String {
    match layout {
        Layout::Block(depth) => options.indent.repeat(depth),
        Layout::Inline => String::new(),
    }
}

fn open_tag(tree: &Tree, id: NodeId, out: &mut String) {
    out.push('<');
    out.push_str(tree.tag(id).as_str());
    push_info(tree, id, out);
    out.push('>');
}

fn push_info(tree: &Tree, id: NodeId, out: &mut String) {
    if let Some(info) = tree.info(id).map(str::trim) {
        if !info.is_empty() {
            out.push(' ');
            out.push_str(info);
        }
    }
}

fn close_tag(tag: &Tag, out: &mut String) {
    out.push_str("</");
    out.push_str(tag.as_str());
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LineEnding;
    use pretty_assertions::assert_eq;

    fn body() -> Tree {
        Tree::new(Tag::Body)
    }

    #[test]
    fn test_paragraph_and_heading() {
        let mut tree = body();
        let root = tree.root();
        let p = tree.append_node(root, Tag::Paragraph);
        tree.push_text(p, "a");
        tree.push_text(p, "b");
        let h1 = tree.append_node(root, Tag::heading(1));
        tree.set_info(h1, "id=\"t\"");
        tree.push_text(h1, "T");

        let result = serialize(&tree, root, &Options::default());
        assert_eq!(result, "<body>\n <p>a b</p>\n <h1 id=\"t\">T</h1>\n</body>\n");
    }

    #[test]
    fn test_empty_nodes_are_dropped() {
        let mut tree = body();
        let root = tree.root();
        tree.append_node(root, Tag::Paragraph);
        let p = tree.append_node(root, Tag::Paragraph);
        tree.push_text(p, "x");

        let result = serialize(&tree, root, &Options::default());
        assert_eq!(result, "<body>\n <p>x</p>\n</body>\n");
        assert_eq!(serialize(&body(), body().root(), &Options::default()), "");
    }

    #[test]
    fn test_nested_list_is_inline_inside_item() {
        let mut tree = body();
        let root = tree.root();
        let ul = tree.append_node(root, Tag::UnorderedList);
        let li = tree.append_node(ul, Tag::ListItem);
        tree.push_text(li, "1");
        let li = tree.append_node(ul, Tag::ListItem);
        tree.push_text(li, "2");
        let inner = tree.append_node(li, Tag::UnorderedList);
        let li = tree.append_node(inner, Tag::ListItem);
        tree.push_text(li, "2.1");

        let result = serialize(&tree, ul, &Options::default());
        assert_eq!(
            result,
            "<ul>\n <li>1</li>\n <li>2<ul><li>2.1</li></ul></li>\n</ul>\n"
        );
    }

    #[test]
    fn test_blockquote_text_and_nesting() {
        let mut tree = body();
        let root = tree.root();
        let outer = tree.append_node(root, Tag::BlockQuote);
        tree.push_text(outer, "a");
        let inner = tree.append_node(outer, Tag::BlockQuote);
        tree.push_text(inner, "b");
        tree.push_text(outer, "c");

        let result = serialize(&tree, outer, &Options::default());
        assert_eq!(
            result,
            "<blockquote>\na\n <blockquote>\nb\n </blockquote>\nc\n</blockquote>\n"
        );
    }

    #[test]
    fn test_pre_keeps_lines() {
        let mut tree = body();
        let root = tree.root();
        let pre = tree.append_node(root, Tag::Pre);
        let code = tree.append_node(pre, Tag::Code);
        tree.set_info(code, "class=\"language-rust\"");
        tree.push_text(code, "fn main() {");
        tree.push_text(code, "}");

        let result = serialize(&tree, root, &Options::default());
        assert_eq!(
            result,
            "<body>\n <pre><code class=\"language-rust\">fn main() {\n}\n</code></pre>\n</body>\n"
        );
    }

    #[test]
    fn test_table() {
        let mut tree = body();
        let root = tree.root();
        let table = tree.append_node(root, Tag::Table);
        let tr = tree.append_node(table, Tag::TableRow);
        let th = tree.append_node(tr, Tag::TableHeader);
        tree.set_info(th, "style=\"text-align: left\"");
        tree.push_text(th, "A");

        let result = serialize(&tree, table, &Options::default());
        assert_eq!(
            result,
            "<table>\n <tr>\n  <th style=\"text-align: left\">A</th>\n </tr>\n</table>\n"
        );
    }

    #[test]
    fn test_void_elements() {
        let mut tree = body();
        let root = tree.root();
        tree.append_node(root, Tag::HorizontalRule);
        let p = tree.append_node(root, Tag::Paragraph);
        tree.push_text(p, "line");
        tree.append_node(p, Tag::LineBreak);
        tree.push_text(p, "next");

        let result = serialize(&tree, root, &Options::default());
        assert_eq!(result, "<body>\n <hr/>\n <p>line<br/>next</p>\n</body>\n");
    }

    #[test]
    fn test_crlf_and_custom_indent() {
        let mut tree = body();
        let root = tree.root();
        let p = tree.append_node(root, Tag::Paragraph);
        tree.push_text(p, "x");

        let options = Options {
            line_ending: LineEnding::CrLf,
            indent: "  ".to_string(),
        };
        let result = serialize(&tree, root, &options);
        assert_eq!(result, "<body>\r\n  <p>x</p>\r\n</body>\r\n");
    }
}
