//! Attribute matching and whitespace-resilient tree navigation.
//!
//! The running-order markup is indented for humans, so meaningful children are
//! separated by whitespace-only text nodes. [`Cursor`] wraps a node and walks
//! the child/sibling axes skipping those, insulating the extraction passes
//! from incidental formatting changes in the source.

use crate::dom::{DocumentTree, NodeId};

/// True iff the space-separated token list of attribute `key` contains an
/// exact match for `value`. An absent attribute never matches.
pub fn has_attribute_value(attrs: &[(String, String)], key: &str, value: &str) -> bool {
    let joined = attribute_value(attrs, key);
    if joined.is_empty() {
        return false;
    }

    joined.split(' ').any(|token| token == value)
}

/// Raw value of attribute `key`, or "" when absent. Does not distinguish
/// "absent" from "present but empty".
pub fn attribute_value<'a>(attrs: &'a [(String, String)], key: &str) -> &'a str {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or("")
}

/// A possibly-null position in a [`DocumentTree`].
///
/// Traversal steps on a null cursor yield a null cursor, so hop chains
/// short-circuit instead of failing; the final [`Cursor::get`] reports whether
/// the chain survived.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    tree: &'a DocumentTree,
    node: Option<NodeId>,
}

impl<'a> Cursor<'a> {
    pub fn new(tree: &'a DocumentTree, node: NodeId) -> Self {
        Cursor {
            tree,
            node: Some(node),
        }
    }

    /// First child that is not a whitespace-only text node. Elements always
    /// qualify: their data is the tag name, not their text content.
    pub fn first_non_empty_child(self) -> Self {
        let node = self.node.and_then(|id| {
            let mut child = self.tree.first_child(id);
            while let Some(c) = child {
                if substantial(self.tree, c) {
                    return Some(c);
                }
                child = self.tree.next_sibling(c);
            }
            None
        });

        Cursor { node, ..self }
    }

    /// Next sibling that is not a whitespace-only text node.
    pub fn next_non_empty_sibling(self) -> Self {
        let node = self.node.and_then(|id| {
            let mut sibling = self.tree.next_sibling(id);
            while let Some(s) = sibling {
                if substantial(self.tree, s) {
                    return Some(s);
                }
                sibling = self.tree.next_sibling(s);
            }
            None
        });

        Cursor { node, ..self }
    }

    pub fn get(self) -> Option<NodeId> {
        self.node
    }
}

fn substantial(tree: &DocumentTree, id: NodeId) -> bool {
    !tree.data(id).trim().is_empty()
}
