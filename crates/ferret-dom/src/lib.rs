//! Arena DOM tree for the Ferret locator toolkit.
//!
//! This crate provides the read side of a rendered page: an arena-based DOM
//! tree loosely following the [DOM Living Standard](https://dom.spec.whatwg.org/),
//! plus the traversals element location needs: document-order descendant
//! iteration, forward sibling walking (repeater segments are delimited by
//! sibling comment markers), and text-content collection.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Locator routines only ever read the tree; the sole mutation
//! surface is [`DomTree::alloc`] + [`DomTree::append_child`], used by tree
//! builders.

use std::collections::{HashMap, HashSet};

pub mod select;

pub use select::{parse_selector_list, query_all, Selector, SelectorError, SelectorList};

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// Locator routines hand these out as element handles; they stay valid for
/// the lifetime of the tree because nodes are never deallocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// Stores indices for parent/child/sibling relationships, enabling O(1)
/// traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub kind: NodeKind,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    /// "An object A's next sibling is the object immediately following A
    /// in the children of A's parent."
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    /// "An object A's previous sibling is the object immediately preceding A
    /// in the children of A's parent."
    pub prev_sibling: Option<NodeId>,
}

/// The node kinds element location cares about.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node type". Comment nodes are first-class
/// here because repeater segments terminate at comment markers.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// Element-specific data: local name and attribute list.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "Elements have an associated namespace, namespace prefix, local name...";
/// only the local name and attributes are kept. Attribute names are stored
/// verbatim, so framework spellings such as `ng:model` or `data-ng-repeat`
/// survive as written.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data for the given tag with no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attrs: AttributesMap::new(),
        }
    }

    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// Returns an attribute value by exact name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns the set of class names from the class attribute.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens."
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        match self.attrs.get("class") {
            Some(classlist) => classlist.split_ascii_whitespace().collect(),
            None => HashSet::new(),
        }
    }

    /// Whether the class attribute contains the given token.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == name))
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
/// "The DOM represents a document as a tree."
///
/// All nodes live in one contiguous vector, using indices for every
/// relationship. Nodes are allocated while building and never freed, so a
/// [`NodeId`] returned from a query remains a stable element handle.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        DomTree {
            nodes: vec![document],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (it never is: the Document node is always
    /// present).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`, updating parent,
    /// children, and sibling links.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text data if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get comment data if this node is a comment node.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Comment(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "The descendant text content of a node node is the concatenation of
    /// the data of all the Text node descendants of node, in tree order."
    ///
    /// For a Text node this is its own data.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.as_text(id) {
            return text.to_string();
        }
        let mut out = String::new();
        for desc in self.descendants(id) {
            if let Some(text) = self.as_text(desc) {
                out.push_str(text);
            }
        }
        out
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// The first element child of the Document node, if any.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over the strict descendants of a node in tree order
    /// (pre-order, the document order `querySelectorAll` reports matches in).
    ///
    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    ///
    /// The starting node itself is not yielded. All node kinds are yielded;
    /// callers filter to elements where needed.
    #[must_use]
    pub fn descendants(&self, of: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        stack.extend(self.children(of).iter().rev().copied());
        Descendants { tree: self, stack }
    }

    /// Iterate over the siblings strictly after a node, in document order,
    /// following `next_sibling` links. All node kinds are yielded; segment
    /// walks must see comment nodes to find their end marker.
    #[must_use]
    pub fn following_siblings(&self, id: NodeId) -> FollowingSiblings<'_> {
        FollowingSiblings {
            tree: self,
            current: self.next_sibling(id),
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over the strict descendants of a node in tree order.
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Iterator over the siblings following a node.
pub struct FollowingSiblings<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for FollowingSiblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.next_sibling(id);
        Some(id)
    }
}
