//! Generic labeled trees read from flang parse-tree dumps
//!
//! The tree layer knows nothing about Fortran; it only turns the indented
//! dump text into ordered trees of [`TreeNode`]s.

mod reader;
mod tag;

pub use reader::{starts_with_banner, TreeReader};
pub use tag::Tag;

/// One node of a dump tree: label, optional leaf value, ordered children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub tag: Tag,
    pub value: Option<String>,
    /// 1-based line in the dump file
    pub line: usize,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(tag: Tag, value: Option<String>, line: usize) -> Self {
        Self {
            tag,
            value,
            line,
            children: Vec::new(),
        }
    }

    /// First direct child with the given tag
    pub fn child(&self, tag: &Tag) -> Option<&TreeNode> {
        self.children.iter().find(|c| &c.tag == tag)
    }

    /// Direct children with the given tag
    pub fn children_tagged<'a>(&'a self, tag: &'a Tag) -> impl Iterator<Item = &'a TreeNode> + 'a {
        self.children.iter().filter(move |c| &c.tag == tag)
    }

    /// Follow a path of direct-child tags
    pub fn path(&self, tags: &[Tag]) -> Option<&TreeNode> {
        let mut node = self;
        for tag in tags {
            node = node.child(tag)?;
        }
        Some(node)
    }

    /// First node with the given tag in pre-order, including `self`
    pub fn find(&self, tag: &Tag) -> Option<&TreeNode> {
        if &self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(tag))
    }

    /// Every node with the given tag, without descending into matches
    pub fn find_all<'a>(&'a self, tag: &Tag) -> Vec<&'a TreeNode> {
        let mut out = Vec::new();
        self.collect_tagged(tag, &mut out);
        out
    }

    fn collect_tagged<'a>(&'a self, tag: &Tag, out: &mut Vec<&'a TreeNode>) {
        if &self.tag == tag {
            out.push(self);
            return;
        }
        for child in &self.children {
            child.collect_tagged(tag, out);
        }
    }

    /// Value of the first direct `Name` child, lowercased
    pub fn name(&self) -> Option<String> {
        self.child(&Tag::Name).and_then(TreeNode::lowered_value)
    }

    /// Values of all direct `Name` children, lowercased
    pub fn names(&self) -> Vec<String> {
        self.children_tagged(&Tag::Name)
            .filter_map(TreeNode::lowered_value)
            .collect()
    }

    pub fn lowered_value(&self) -> Option<String> {
        self.value.as_deref().map(str::to_ascii_lowercase)
    }
}
