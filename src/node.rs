use crate::{CstNode, Item, Rule, SourceRef};
use ptree::TreeItem;
use std::borrow::Cow;
use std::fmt::{Debug, Formatter};

impl Item {
    pub fn tree(node: CstNode) -> Self {
        Item::Tree(node)
    }

    pub fn word(text: impl Into<String>) -> Self {
        Item::Word(text.into())
    }

    pub fn as_tree(&self) -> Option<&CstNode> {
        match self {
            Item::Tree(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Item::Word(word) => Some(word),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Item::Absent)
    }
}

impl CstNode {
    /// Create a new CST node for `rule` with the given items tuple.
    pub fn new(rule: Rule, items: Vec<Item>) -> Self {
        Self {
            rule,
            items,
            src: None,
        }
    }

    /// Create a leaf node holding a single string item.
    pub fn leaf(rule: Rule, word: impl Into<String>) -> Self {
        CstNode::new(rule, vec![Item::word(word)])
    }

    pub(crate) fn with_src(mut self, src: SourceRef) -> Self {
        self.src = Some(src);
        self
    }

    /// Child sub-trees, skipping leaf strings and absent slots.
    pub fn children(&self) -> impl Iterator<Item = &CstNode> {
        self.items.iter().filter_map(Item::as_tree)
    }

    /// Find the first node with the given rule tag, searching this node and
    /// all nested children in pre-order.
    pub fn find_rule(&self, rule: Rule) -> Option<&CstNode> {
        if self.rule == rule {
            return Some(self);
        }
        self.children().find_map(|child| child.find_rule(rule))
    }

    /// Search through all nested children and return the first node for
    /// which the predicate holds.
    pub fn find_tree<F: Fn(&CstNode) -> bool>(&self, predicate: &F) -> Option<&CstNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children()
            .find_map(|child| child.find_tree(predicate))
    }

    /// Return every node with the given rule tag in pre-order.
    pub fn list_rule(&self, rule: Rule) -> Vec<&CstNode> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if node.rule == rule {
                out.push(node);
            }
        });
        out
    }

    pub fn contains(&self, rule: Rule) -> bool {
        self.find_rule(rule).is_some()
    }

    fn walk<'a, F: FnMut(&'a CstNode)>(&'a self, visit: &mut F) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Print the tree structure to stdout for inspection.
    pub fn print(&self) -> Result<(), std::io::Error> {
        ptree::print_tree(self)
    }
}

impl PartialEq for CstNode {
    fn eq(&self, other: &Self) -> bool {
        self.rule == other.rule && self.items == other.items
    }
}

impl Eq for CstNode {}

impl Debug for CstNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut debug_struct = f.debug_struct("CstNode");
        debug_struct.field("rule", &self.rule);
        if !self.items.is_empty() {
            debug_struct.field("items", &self.items);
        }
        debug_struct.finish()
    }
}

impl TreeItem for CstNode {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        let mut words = self
            .items
            .iter()
            .filter_map(Item::as_word)
            .collect::<Vec<_>>()
            .join(", ");
        if words.len() > 40 {
            words.truncate(40);
            words.push_str("...");
        }
        if words.is_empty() {
            write!(f, "{}", self.rule)
        } else {
            write!(f, "{} # {}", self.rule, words)
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        Cow::from(
            self.items
                .iter()
                .filter_map(Item::as_tree)
                .cloned()
                .collect::<Vec<_>>(),
        )
    }
}
