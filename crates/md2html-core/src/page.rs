//! Standalone HTML document wrapper

use crate::options::Options;
use crate::serialize::serialize;
use crate::tag::Tag;
use crate::tree::{NodeId, Position, Result, Tree};

/// Document-level settings for a full HTML page
#[derive(Debug, Clone)]
pub struct Page {
    /// Text of the `<title>` element
    pub title: Option<String>,

    /// Stylesheet URL linked from the head
    pub stylesheet: Option<String>,

    /// Value of the generator meta tag
    pub generator: String,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            title: None,
            stylesheet: None,
            generator: "md2html".to_string(),
        }
    }
}

impl Page {
    /// Build a detached `<head>` node in `tree`
    pub fn head(&self, tree: &mut Tree) -> NodeId {
        let head = tree.create(Tag::Head);

        if let Some(title) = &self.title {
            let node = tree.append_node(head, Tag::Title);
            tree.push_text(node, html_escape::encode_text(title).into_owned());
        }

        let charset = tree.append_node(head, Tag::Meta);
        tree.set_info(charset, "charset=\"utf-8\"");

        let generator = tree.append_node(head, Tag::Meta);
        tree.set_info(
            generator,
            format!(
                "name=\"generator\" content=\"{}\"",
                html_escape::encode_double_quoted_attribute(&self.generator)
            ),
        );

        let style_type = tree.append_node(head, Tag::Meta);
        tree.set_info(
            style_type,
            "http-equiv=\"Content-Style-Type\" content=\"text/css\"",
        );

        if let Some(href) = &self.stylesheet {
            let link = tree.append_node(head, Tag::Link);
            tree.set_info(
                link,
                format!(
                    "rel=\"stylesheet\" href=\"{}\" type=\"text/css\"",
                    html_escape::encode_double_quoted_attribute(href)
                ),
            );
        }

        head
    }

    /// Put the tree's root under a new `<html>` node next to a generated head
    ///
    /// Fails with [`TreeError::AlreadyAttached`](crate::TreeError::AlreadyAttached)
    /// when the root has been wrapped before.
    pub fn wrap(&self, tree: &mut Tree) -> Result<NodeId> {
        let body = tree.root();
        let html = tree.create(Tag::Html);
        let head = self.head(tree);
        tree.insert(html, Position::End, [head.into(), body.into()])?;
        Ok(html)
    }

    /// Wrap and serialize the whole page, doctype included
    pub fn render(&self, tree: &mut Tree, options: &Options) -> Result<String> {
        let html = self.wrap(tree)?;
        let mut output = String::from("<!DOCTYPE html>");
        output.push_str(options.line_ending.as_str());
        output.push_str(&serialize(tree, html, options));
        Ok(output)
    }
}
