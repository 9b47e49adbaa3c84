//! DOM Tree (arena-based allocation)

use crate::{ElementData, Node, NodeId};

/// Arena-based DOM tree. Detached nodes stay in the arena so stale ids never
/// alias a newer node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data for `id`, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Mutable element data for `id`, if it is an element
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    /// Allocate a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Allocate a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`, moving it if already attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return false;
        }
        if self.is_inclusive_ancestor(child, parent) {
            tracing::warn!("Refusing to append {:?} under its own descendant {:?}", child, parent);
            return false;
        }
        self.remove_child(child);
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        true
    }

    /// Detach `child` from its parent. Returns false if it had none.
    pub fn remove_child(&mut self, child: NodeId) -> bool {
        let Some(parent) = self.parent(child) else {
            return false;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = NodeId::NONE;
        }
        true
    }

    /// Parent of `id`, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate over children of `id` in document order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node)> {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&child| self.get(child).map(|node| (child, node)))
    }

    /// `id` followed by each of its ancestors up to the root
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id).filter(|&id| self.get(id).is_some());
        while let Some(node) = current {
            path.push(node);
            current = self.parent(node);
        }
        path
    }

    /// True if `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).contains(&ancestor)
    }

    /// True if the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.ancestors(id).last() == Some(&NodeId::ROOT)
    }

    /// Concatenated text of the subtree
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            out.push_str(text);
        }
        for (child, _) in self.children(id) {
            self.collect_text(child, out);
        }
    }

    /// Depth-first search for an element with the given id attribute
    pub fn find_by_id(&self, start: NodeId, id: &str) -> Option<NodeId> {
        for (node_id, node) in self.children(start) {
            if node.as_element().and_then(|e| e.id.as_deref()) == Some(id) {
                return Some(node_id);
            }
            if let Some(found) = self.find_by_id(node_id, id) {
                return Some(found);
            }
        }
        None
    }

    /// Elements under `start` carrying `class`
    pub fn elements_with_class(&self, start: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_class(start, class, &mut found);
        found
    }

    fn collect_class(&self, start: NodeId, class: &str, found: &mut Vec<NodeId>) {
        for (node_id, node) in self.children(start) {
            if node.as_element().is_some_and(|e| e.class_list.contains(class)) {
                found.push(node_id);
            }
            self.collect_class(node_id, class, found);
        }
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node is allocated up front
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
