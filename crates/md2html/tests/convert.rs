use md2html::{Builder, Converter};
use md2html_core::{serialize, Options, Page, Tag};
use pretty_assertions::assert_eq;

fn tree_string(markdown: &str) -> String {
    let (tree, errors) = Converter::new().build_tree(markdown);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    tree.to_bracket_string(tree.root())
}

#[test]
fn test_mixed_document_tree() {
    let markdown = "\
# Notes
Intro with **bold** and `code`.

- one
- two
  - nested
> quoted

---
";
    assert_eq!(
        tree_string(markdown),
        concat!(
            r#"body{h1(id="notes"){"Notes"} "#,
            r#"p{"Intro with <strong>bold</strong> and <code>code</code>."} "#,
            r#"ul{li{"one"} li{"two" ul{li{"nested"}}}} "#,
            r#"blockquote{"quoted"} "#,
            r#"hr{}}"#
        )
    );
}

#[test]
fn test_mixed_document_html() {
    let markdown = "\
# Notes
Intro with **bold** and `code`.

- one
- two
  - nested
> quoted

---
";
    let html = Converter::new().convert(markdown);
    assert_eq!(
        html,
        "<body>\n \
         <h1 id=\"notes\">Notes</h1>\n \
         <p>Intro with <strong>bold</strong> and <code>code</code>.</p>\n \
         <ul>\n  \
         <li>one</li>\n  \
         <li>two<ul><li>nested</li></ul></li>\n \
         </ul>\n \
         <blockquote>\n\
         quoted\n \
         </blockquote>\n \
         <hr/>\n\
         </body>\n"
    );
}

#[test]
fn test_table_with_alignment() {
    let html = Converter::new().convert("| A | B |\n| --- | :--- |\n| a | b |\n");
    assert_eq!(
        html,
        "<body>\n \
         <table style=\"width: 100%\">\n  \
         <tr>\n   \
         <th>A</th>\n   \
         <th style=\"text-align: left\">B</th>\n  \
         </tr>\n  \
         <tr>\n   \
         <td>a</td>\n   \
         <td style=\"text-align: left\">b</td>\n  \
         </tr>\n \
         </table>\n\
         </body>\n"
    );
}

#[test]
fn test_fenced_code_is_escaped_verbatim() {
    let html = Converter::new().convert("```html\n<b>&</b>\n  **x**\n```\n");
    assert_eq!(
        html,
        "<body>\n \
         <pre><code class=\"language-html\">&lt;b&gt;&amp;&lt;/b&gt;\n  **x**\n</code></pre>\n\
         </body>\n"
    );
}

#[test]
fn test_links_images_and_escapes() {
    assert_eq!(
        tree_string(r#"See [docs](http://x.org/a_b "The docs") and ![logo](logo.png), a \*b\* c"#),
        concat!(
            r#"body{p{"See <a href=\"http://x.org/a_b\" title=\"The docs\">docs</a> "#,
            r#"and <img src=\"logo.png\" alt=\"logo\"/>, a *b* c"}}"#
        )
    );
}

#[test]
fn test_ordered_list_start() {
    let html = Converter::new().convert("3. c\n4. d\n");
    assert_eq!(
        html,
        "<body>\n <ol start=\"3\">\n  <li>c</li>\n  <li>d</li>\n </ol>\n</body>\n"
    );
}

#[test]
fn test_line_by_line_matches_whole_text() {
    let markdown = "Title\n=====\n\nSome *text*  \nnext\n\n    code\n";

    let mut builder = Builder::new(Tag::Body);
    for line in markdown.lines() {
        builder.build(line).unwrap();
    }
    let tree = builder.finish();
    let streamed = serialize(&tree, tree.root(), &Options::default());

    assert_eq!(streamed, Converter::new().convert(markdown));
    assert_eq!(
        streamed,
        "<body>\n \
         <h1 id=\"title\">Title</h1>\n \
         <p>Some <em>text</em><br/>next</p>\n \
         <pre><code>code\n</code></pre>\n\
         </body>\n"
    );
}

#[test]
fn test_full_page() {
    let page = Page {
        title: Some("Notes".to_string()),
        stylesheet: Some("site.css".to_string()),
        ..Default::default()
    };
    let html = Converter::new().convert_page("# Hi", &page).unwrap();
    assert_eq!(
        html,
        "<!DOCTYPE html>\n\
         <html>\n \
         <head>\n  \
         <title>Notes</title>\n  \
         <meta charset=\"utf-8\"/>\n  \
         <meta name=\"generator\" content=\"md2html\"/>\n  \
         <meta http-equiv=\"Content-Style-Type\" content=\"text/css\"/>\n  \
         <link rel=\"stylesheet\" href=\"site.css\" type=\"text/css\"/>\n \
         </head>\n \
         <body>\n  \
         <h1 id=\"hi\">Hi</h1>\n \
         </body>\n\
         </html>\n"
    );
}
