//! Read-only document tree shared by the extraction passes.
//!
//! HTML parsing itself is delegated to the `scraper` crate; the parsed page is
//! copied into a flat arena of owned nodes so the traversal tasks can share it
//! behind an `Arc` and address nodes by plain copyable ids. The arena is never
//! mutated after construction.

use ego_tree::NodeRef;
use scraper::node::Node as RawNode;
use scraper::Html;

use crate::error::ExtractError;

/// Index of a node inside a [`DocumentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Synthetic root.
    Document,
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

/// Arena-backed HTML document tree.
#[derive(Debug)]
pub struct DocumentTree {
    nodes: Vec<NodeData>,
}

impl DocumentTree {
    fn new() -> Self {
        DocumentTree {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                first_child: None,
                last_child: None,
                next_sibling: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].first_child
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next_sibling
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element { .. })
    }

    /// Tag name for elements, raw content for text and comment nodes.
    pub fn data(&self, id: NodeId) -> &str {
        match &self.nodes[id.0].kind {
            NodeKind::Document => "",
            NodeKind::Element { name, .. } => name,
            NodeKind::Text(text) => text,
            NodeKind::Comment(text) => text,
        }
    }

    /// Attributes of an element in source order; empty for other node kinds.
    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attrs, .. } => attrs,
            _ => &[],
        }
    }

    fn append_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            first_child: None,
            last_child: None,
            next_sibling: None,
        });

        match self.nodes[parent.0].last_child {
            None => self.nodes[parent.0].first_child = Some(id),
            Some(last) => self.nodes[last.0].next_sibling = Some(id),
        }
        self.nodes[parent.0].last_child = Some(id);

        id
    }
}

/// Parse an HTML document into a [`DocumentTree`].
///
/// html5ever recovers from arbitrary tag soup, so the only failure surfaced
/// here is a document without any element root.
pub fn parse_document(html: &str) -> Result<DocumentTree, ExtractError> {
    let parsed = Html::parse_document(html);

    let mut tree = DocumentTree::new();
    let root = tree.root();
    for child in parsed.tree.root().children() {
        convert_into(&mut tree, root, child);
    }

    let mut child = tree.first_child(root);
    while let Some(c) = child {
        if tree.is_element(c) {
            return Ok(tree);
        }
        child = tree.next_sibling(c);
    }
    Err(ExtractError::DocumentParse(
        "document has no element root".to_string(),
    ))
}

fn convert_into(tree: &mut DocumentTree, parent: NodeId, src: NodeRef<'_, RawNode>) {
    let kind = match src.value() {
        RawNode::Element(el) => NodeKind::Element {
            name: el.name().to_string(),
            attrs: el
                .attrs()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        },
        RawNode::Text(text) => NodeKind::Text(text.text.to_string()),
        RawNode::Comment(comment) => NodeKind::Comment(comment.comment.to_string()),
        // Doctype and processing instructions carry nothing the extraction
        // passes can address.
        _ => return,
    };

    let id = tree.append_child(parent, kind);
    for child in src.children() {
        convert_into(tree, id, child);
    }
}
