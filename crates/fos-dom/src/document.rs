//! Document - High-level document API
//!
//! Mutations made through `Document` are journaled as `MutationRecord`s.
//! Raw `tree_mut()` edits (used while parsing) are not.

use crate::{
    user_agent_style, Attribute, ComputedStyle, DOMRect, DomError, DomResult, DomTree,
    ElementRef, MutationRecord, Node, NodeId,
};
use std::collections::HashMap;

/// Document loading state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    Loading,
    Interactive,
    #[default]
    Complete,
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    ready_state: ReadyState,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Viewport scroll offset
    scroll: (f64, f64),
    /// Layout boxes in viewport coordinates
    rects: HashMap<NodeId, DOMRect>,
    /// Host-provided style overrides
    styles: HashMap<NodeId, ComputedStyle>,
    /// Mutation journal
    records: Vec<MutationRecord>,
}

impl Document {
    /// Create a document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let tree = &mut doc.tree;
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        // Fresh detached nodes cannot violate the hierarchy
        let _ = tree.append_child(NodeId::ROOT, html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);
        doc.finalize();
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            ready_state: ReadyState::Complete,
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            scroll: (0.0, 0.0),
            rects: HashMap::new(),
            styles: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// Locate html/head/body after the tree was built through `tree_mut()`
    pub fn finalize(&mut self) {
        let find = |tree: &DomTree, parent: NodeId, tag: &str| {
            tree.children(parent)
                .find(|(_, n)| n.as_element().is_some_and(|e| e.name == tag))
                .map(|(id, _)| id)
                .unwrap_or(NodeId::NONE)
        };
        self.html_element = find(&self.tree, NodeId::ROOT, "html");
        self.head_element = find(&self.tree, self.html_element, "head");
        self.body_element = find(&self.tree, self.html_element, "body");
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
    }

    /// Text of the first `<title>`, whitespace-trimmed
    pub fn title(&self) -> String {
        self.tree
            .descendants(NodeId::ROOT)
            .find(|&id| self.tag(id) == Some("title"))
            .map(|id| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Borrowed handle to the body element
    pub fn body_element(&self) -> Option<ElementRef<'_>> {
        ElementRef::new(self, self.body_element)
    }

    /// Borrowed handle to any element
    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        ElementRef::new(self, id)
    }

    /// Lowercase tag name of an element node
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.tree.get(id)?.as_element().map(|e| e.name.as_str())
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.tree.descendants(NodeId::ROOT).find(|&node| {
            self.tree
                .get(node)
                .and_then(Node::as_element)
                .and_then(|e| e.get_attr("id"))
                == Some(id)
        })
    }

    /// Pre-order walk of the whole document
    pub fn descendants(&self) -> crate::Descendants<'_> {
        self.tree.descendants(NodeId::ROOT)
    }

    pub fn text_content(&self, id: NodeId) -> String {
        self.tree.text_content(id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably, bypassing the journal
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // ---- journaled mutations ----

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.tree.create_element(name)
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.append_child(parent, child)?;
        self.records.push(MutationRecord::child_list(parent, vec![child], Vec::new()));
        Ok(child)
    }

    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.tree.insert_before(parent, child, reference)?;
        self.records.push(MutationRecord::child_list(parent, vec![child], Vec::new()));
        Ok(child)
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.remove_child(parent, child)?;
        self.records.push(MutationRecord::child_list(parent, Vec::new(), vec![child]));
        Ok(child)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let element = self
            .tree
            .get_mut(id)
            .and_then(Node::as_element_mut)
            .ok_or(DomError::NotFound)?;
        element.set_attr(name, value);
        self.records.push(MutationRecord::attributes(id, &name.to_ascii_lowercase()));
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<()> {
        let element = self
            .tree
            .get_mut(id)
            .and_then(Node::as_element_mut)
            .ok_or(DomError::NotFound)?;
        if element.remove_attr(name).is_some() {
            self.records.push(MutationRecord::attributes(id, name));
        }
        Ok(())
    }

    /// Replace the data of a text node
    pub fn set_text(&mut self, id: NodeId, content: &str) -> DomResult<()> {
        match self.tree.get_mut(id).map(|n| &mut n.data) {
            Some(crate::NodeData::Text(text)) | Some(crate::NodeData::Comment(text)) => {
                *text = content.to_string();
            }
            _ => return Err(DomError::NotFound),
        }
        self.records.push(MutationRecord::character_data(id));
        Ok(())
    }

    /// Replace all children with a single text node, as one record
    pub fn set_text_content(&mut self, id: NodeId, content: &str) -> DomResult<()> {
        if self.tree.get(id).is_none() {
            return Err(DomError::NotFound);
        }
        let removed: Vec<NodeId> = self.tree.children(id).map(|(child, _)| child).collect();
        for &child in &removed {
            self.tree.remove_child(id, child)?;
        }
        let mut added = Vec::new();
        if !content.is_empty() {
            let text = self.tree.create_text(content);
            self.tree.append_child(id, text)?;
            added.push(text);
        }
        self.records.push(MutationRecord::child_list(id, added, removed));
        Ok(())
    }

    /// Drain the pending mutation batch in delivery order
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        tracing::trace!("Delivering {} mutation records", self.records.len());
        std::mem::take(&mut self.records)
    }

    // ---- geometry & style ----

    /// Set the layout box of a node (viewport coordinates)
    pub fn set_rect(&mut self, id: NodeId, rect: DOMRect) {
        self.rects.insert(id, rect);
    }

    /// getBoundingClientRect; zero-sized when no layout box is known
    pub fn rect(&self, id: NodeId) -> DOMRect {
        self.rects.get(&id).copied().unwrap_or_default()
    }

    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.scroll = (x, y);
    }

    /// Viewport scroll offset (scrollX, scrollY)
    pub fn scroll(&self) -> (f64, f64) {
        self.scroll
    }

    /// Override a resolved style property, as a stylesheet would
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        self.styles.entry(id).or_default().set(property, value);
    }

    /// getComputedStyle
    pub fn computed_style(&self, id: NodeId) -> ComputedStyle {
        let Some(element) = self.tree.get(id).and_then(Node::as_element) else {
            return ComputedStyle::new();
        };
        let mut style = user_agent_style(&element.name, &element.attrs);
        let mut explicit_visibility = false;
        if let Some(overrides) = self.styles.get(&id) {
            explicit_visibility |= overrides.get("visibility").is_some();
            style.merge(overrides);
        }
        if let Some(inline) = element.get_attr("style") {
            let mut declared = ComputedStyle::new();
            declared.apply_declarations(inline);
            explicit_visibility |= declared.get("visibility").is_some();
            style.merge(&declared);
        }
        if !explicit_visibility {
            if let Some(parent) = self.tree.parent(id).filter(|&p| self.tag(p).is_some()) {
                let inherited = self.computed_style(parent);
                style.set("visibility", inherited.value("visibility"));
            }
        }
        style
    }

    /// Style of a bare element that is not part of the tree
    pub fn detached_style(&self, tag: &str, attrs: &[Attribute]) -> ComputedStyle {
        user_agent_style(tag, attrs)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MutationType;

    #[test]
    fn test_skeleton() {
        let doc = Document::new("https://example.com/");
        assert!(doc.body().is_valid());
        assert_eq!(doc.tag(doc.head()), Some("head"));
        assert_eq!(doc.title(), "");
    }

    #[test]
    fn test_journal_records_in_order() {
        let mut doc = Document::default();
        let div = doc.create_element("div");
        doc.append_child(doc.body(), div).unwrap();
        doc.set_attribute(div, "role", "status").unwrap();
        doc.set_text_content(div, "saved").unwrap();

        let records = doc.take_records();
        let kinds: Vec<_> = records.iter().map(|r| r.mutation_type).collect();
        assert_eq!(
            kinds,
            vec![MutationType::ChildList, MutationType::Attributes, MutationType::ChildList]
        );
        assert_eq!(records[1].attribute_name.as_deref(), Some("role"));
        assert_eq!(records[2].added_nodes.len(), 1);
        assert!(doc.take_records().is_empty());
    }

    #[test]
    fn test_removed_text_stays_readable() {
        let mut doc = Document::default();
        let p = doc.create_element("p");
        doc.append_child(doc.body(), p).unwrap();
        doc.set_text_content(p, "old").unwrap();
        doc.take_records();
        doc.set_text_content(p, "new").unwrap();
        let record = doc.take_records().remove(0);
        assert_eq!(doc.text_content(record.removed_nodes[0]), "old");
        assert_eq!(doc.text_content(record.added_nodes[0]), "new");
    }

    #[test]
    fn test_visibility_inherits() {
        let mut doc = Document::default();
        let outer = doc.create_element("div");
        let inner = doc.create_element("span");
        doc.append_child(doc.body(), outer).unwrap();
        doc.append_child(outer, inner).unwrap();
        doc.set_attribute(outer, "style", "visibility: hidden").unwrap();
        assert_eq!(doc.computed_style(inner).value("visibility"), "hidden");
        doc.set_style(inner, "visibility", "visible");
        assert_eq!(doc.computed_style(inner).value("visibility"), "visible");
    }
}
