//! Ordered element tree
//!
//! An arena of element nodes addressed by [`NodeId`]. Each node has a tag, an
//! optional attribute string and an ordered list of children, where a child is
//! either another node or a text leaf. Parents are stored as ids, so the arena
//! owns every node and no reference cycles exist.

use thiserror::Error;

use crate::tag::Tag;

/// Errors raised by tree operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A last-child or indexed operation on a node without children
    #[error("no siblings")]
    NoSiblings,

    #[error("child index ({index}) out of range (0-{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("missing parent")]
    MissingParent,

    #[error("node is not a child of the given parent")]
    NotAChild,

    /// The node already has a parent, or inserting it would create a cycle
    #[error("node is already attached to the tree")]
    AlreadyAttached,

    #[error("no ancestor with tag `{0}`")]
    NoSuchAncestor(String),
}

pub type Result<T> = std::result::Result<T, TreeError>;

/// Stable handle of a node inside a [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A child slot: a nested node or a text leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Node(NodeId),
    Text(String),
}

impl Child {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(text),
            Child::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Child::Node(id) => Some(*id),
            Child::Text(_) => None,
        }
    }
}

impl From<NodeId> for Child {
    fn from(id: NodeId) -> Self {
        Child::Node(id)
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

/// Where to insert new children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// After the last child
    End,
    /// Just before the child at this index
    Before(usize),
}

#[derive(Debug, Clone)]
struct NodeData {
    tag: Tag,
    info: Option<String>,
    parent: Option<NodeId>,
    children: Vec<Child>,
}

impl NodeData {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            info: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An ordered tree of HTML elements
///
/// Nodes live in an append-only arena. Removing a node only detaches it: its
/// slot is never reused, so a `NodeId` stays valid and the node can be
/// inserted again, but the arena does not shrink while the tree lives.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Tree {
    /// Create a tree holding a single root node
    pub fn new(root: impl Into<Tag>) -> Self {
        Self {
            nodes: vec![NodeData::new(root.into())],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached node; attach it later with [`Tree::insert`]
    pub fn create(&mut self, tag: impl Into<Tag>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(tag.into()));
        id
    }

    /// Create a node and attach it as the last child of `parent`
    pub fn append_node(&mut self, parent: NodeId, tag: impl Into<Tag>) -> NodeId {
        let id = self.create(tag);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(Child::Node(id));
        id
    }

    /// Append a text leaf to `parent`
    pub fn push_text(&mut self, parent: NodeId, text: impl Into<String>) {
        self.nodes[parent.0].children.push(Child::Text(text.into()));
    }

    /// Insert `children` at `position`. Nodes must be detached.
    pub fn insert<I>(&mut self, parent: NodeId, position: Position, children: I) -> Result<()>
    where
        I: IntoIterator<Item = Child>,
    {
        let len = self.len(parent);
        let index = match position {
            Position::End => len,
            Position::Before(index) if index < len => index,
            Position::Before(index) => return Err(TreeError::IndexOutOfRange { index, len }),
        };

        let children: Vec<Child> = children.into_iter().collect();
        for child in &children {
            if let Child::Node(id) = child {
                if self.nodes[id.0].parent.is_some() || self.is_ancestor_or_self(*id, parent) {
                    return Err(TreeError::AlreadyAttached);
                }
            }
        }

        for child in &children {
            if let Child::Node(id) = child {
                self.nodes[id.0].parent = Some(parent);
            }
        }
        self.nodes[parent.0]
            .children
            .splice(index..index, children);
        Ok(())
    }

    /// Remove the child at `index`; a removed node is detached
    pub fn remove_at(&mut self, parent: NodeId, index: usize) -> Result<Child> {
        let len = self.len(parent);
        if len == 0 {
            return Err(TreeError::NoSiblings);
        }
        if index >= len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }

        let child = self.nodes[parent.0].children.remove(index);
        if let Child::Node(id) = child {
            self.nodes[id.0].parent = None;
        }
        Ok(child)
    }

    /// Remove the last child of `parent`
    pub fn remove_last(&mut self, parent: NodeId) -> Result<Child> {
        match self.len(parent) {
            0 => Err(TreeError::NoSiblings),
            len => self.remove_at(parent, len - 1),
        }
    }

    pub fn children(&self, id: NodeId) -> &[Child] {
        &self.nodes[id.0].children
    }

    pub fn len(&self, id: NodeId) -> usize {
        self.nodes[id.0].children.len()
    }

    pub fn is_empty(&self, id: NodeId) -> bool {
        self.nodes[id.0].children.is_empty()
    }

    pub fn child(&self, id: NodeId, index: usize) -> Result<&Child> {
        let children = self.children(id);
        if children.is_empty() {
            return Err(TreeError::NoSiblings);
        }
        children.get(index).ok_or(TreeError::IndexOutOfRange {
            index,
            len: children.len(),
        })
    }

    pub fn last_child(&self, id: NodeId) -> Result<&Child> {
        self.children(id).last().ok_or(TreeError::NoSiblings)
    }

    /// Position of `child` among the children of `parent`
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Result<usize> {
        self.children(parent)
            .iter()
            .position(|c| *c == Child::Node(child))
            .ok_or(TreeError::NotAChild)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The `n`-th ancestor of `id`; `n == 0` is the node itself
    pub fn ancestor(&self, id: NodeId, n: usize) -> Result<NodeId> {
        let mut current = id;
        for _ in 0..n {
            current = self.parent(current).ok_or(TreeError::MissingParent)?;
        }
        Ok(current)
    }

    /// The nearest node with `tag`, starting at `id` itself
    pub fn ancestor_with_tag(&self, id: NodeId, tag: &Tag) -> Result<NodeId> {
        let mut current = id;
        loop {
            if self.tag(current) == tag {
                return Ok(current);
            }
            current = self
                .parent(current)
                .ok_or_else(|| TreeError::NoSuchAncestor(tag.to_string()))?;
        }
    }

    pub fn tag(&self, id: NodeId) -> &Tag {
        &self.nodes[id.0].tag
    }

    pub fn info(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].info.as_deref()
    }

    /// Set the attribute string written inside the opening tag
    pub fn set_info(&mut self, id: NodeId, info: impl Into<String>) {
        self.nodes[id.0].info = Some(info.into());
    }

    /// Tag path from the outermost ancestor, e.g. `/body/ul/li/`
    pub fn path(&self, id: NodeId) -> String {
        let mut tags = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            tags.push(self.tag(node).as_str());
            current = self.parent(node);
        }

        let mut path = String::from("/");
        for tag in tags.iter().rev() {
            path.push_str(tag);
            path.push('/');
        }
        path
    }

    /// Compact form `tag(info){child child}` with quoted text leaves
    pub fn to_bracket_string(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_bracketed(id, &mut out);
        out
    }

    fn write_bracketed(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        out.push_str(&escape_brackets(node.tag.as_str()));
        if let Some(info) = node.info.as_deref().map(str::trim) {
            if !info.is_empty() {
                out.push('(');
                out.push_str(info);
                out.push(')');
            }
        }

        out.push('{');
        for (i, child) in node.children.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match child {
                Child::Node(child) => self.write_bracketed(*child, out),
                Child::Text(text) => {
                    out.push('"');
                    out.push_str(&escape_brackets(text));
                    out.push('"');
                }
            }
        }
        out.push('}');
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == candidate {
                return true;
            }
            current = self.parent(node);
        }
        false
    }
}

fn escape_brackets(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '{' | '}' | '"' | '(' | ')') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}
