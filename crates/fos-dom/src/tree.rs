//! DOM Tree (arena-based allocation)

use crate::{DomError, DomResult, Node, NodeId};

/// Arena-based DOM tree
///
/// Node 0 is always the document node. Removed nodes keep their slot so
/// ids held by mutation records stay readable.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Root (document) node
    #[inline]
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

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.valid()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.first_child.valid()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.next_sibling.valid()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.prev_sibling.valid()
    }

    /// Iterate direct children
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        let mut next = self.first_child(id);
        std::iter::from_fn(move || {
            let current = next?;
            let node = self.get(current)?;
            next = node.next_sibling.valid();
            Some((current, node))
        })
    }

    /// Pre-order iterator over the subtree below `id` (excluding `id`)
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.first_child(id),
        }
    }

    /// Check whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound)?;
        let child_node = self.get(child).ok_or(DomError::NotFound)?;
        if parent_node.is_text() || matches!(child_node.data, crate::NodeData::Document) {
            return Err(DomError::HierarchyRequest);
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }

    /// Unlink a node from its current parent, if any
    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };
        if !parent.is_valid() {
            return;
        }
        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = next;
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }
        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = prev;
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;
        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        if let Some(last_node) = self.get_mut(last) {
            last_node.next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;

        let node = &mut self.nodes[child.index()];
        node.parent = parent;
        node.prev_sibling = last;
        node.next_sibling = NodeId::NONE;
        Ok(child)
    }

    /// Insert `child` before `reference`, or append when `reference` is None
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        let Some(reference) = reference else {
            return self.append_child(parent, child);
        };
        if reference == child {
            return Ok(child);
        }
        self.check_insert(parent, child)?;
        if self.parent(reference) != Some(parent) {
            return Err(DomError::NotAChild);
        }
        self.detach(child);

        let prev = self.nodes[reference.index()].prev_sibling;
        if let Some(prev_node) = self.get_mut(prev) {
            prev_node.next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[reference.index()].prev_sibling = child;

        let node = &mut self.nodes[child.index()];
        node.parent = parent;
        node.prev_sibling = prev;
        node.next_sibling = reference;
        Ok(child)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.get(child).is_none() {
            return Err(DomError::NotFound);
        }
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild);
        }
        self.detach(child);
        Ok(child)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        let mut out = String::new();
        for child in self.descendants(id) {
            if let Some(text) = self.get(child).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order subtree walk
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = if let Some(child) = self.tree.first_child(current) {
            Some(child)
        } else {
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break None;
                }
                if let Some(sibling) = self.tree.next_sibling(cursor) {
                    break Some(sibling);
                }
                match self.tree.parent(cursor) {
                    Some(parent) if parent != self.root => cursor = parent,
                    _ => break None,
                }
            }
        };
        Some(current)
    }
}
