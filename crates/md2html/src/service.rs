//! Converter - the main entry point for whole-text Markdown to HTML conversion.

use md2html_core::{serialize, Options, Page, Tag, Tree};

use crate::builder::{BuildOptions, Builder};
use crate::{BuildError, Result};

/// Options for [`Converter`]
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Line classification and element attributes
    pub build: BuildOptions,

    /// HTML layout
    pub render: Options,
}

/// The main service for converting Markdown to HTML
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a new Converter with default options
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
        }
    }

    /// Create a Converter with custom options
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Get the current options
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ConvertOptions {
        &mut self.options
    }

    /// Build the `body` tree for `markdown`, with the errors of failed lines
    ///
    /// A failed line does not stop the conversion.
    pub fn build_tree(&self, markdown: &str) -> (Tree, Vec<BuildError>) {
        let builder = Builder::with_options(Tag::Body, self.options.build.clone());
        feed(builder, markdown)
    }

    /// Convert Markdown to an HTML `body` element
    pub fn convert(&self, markdown: &str) -> String {
        let (tree, _) = self.build_tree(markdown);
        serialize(&tree, tree.root(), &self.options.render)
    }

    /// Convert Markdown to a complete HTML document
    pub fn convert_page(&self, markdown: &str, page: &Page) -> Result<String> {
        let (mut tree, _) = self.build_tree(markdown);
        Ok(page.render(&mut tree, &self.options.render)?)
    }
}

fn feed(mut builder: Builder, markdown: &str) -> (Tree, Vec<BuildError>) {
    let mut errors = Vec::new();
    for line in markdown.lines() {
        if let Err(err) = builder.build(line) {
            errors.push(err);
        }
    }

    let lines = builder.line_number();
    if errors.is_empty() {
        log::debug!("built {lines} lines");
    } else {
        log::warn!("{} of {lines} lines failed to build", errors.len());
    }
    (builder.finish(), errors)
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
