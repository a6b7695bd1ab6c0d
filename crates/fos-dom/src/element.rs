//! Element handles
//!
//! `ElementRef` borrows a document and points at one element node. All
//! navigation helpers skip non-element nodes.

use crate::{ComputedStyle, DOMRect, Document, ElementData, Node, NodeId};
use std::fmt;

/// Borrowed element handle
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    id: NodeId,
    data: &'a ElementData,
}

impl<'a> ElementRef<'a> {
    /// Handle to `id`, if it is an element of `doc`
    pub fn new(doc: &'a Document, id: NodeId) -> Option<Self> {
        let data = doc.tree().get(id)?.as_element()?;
        Some(Self { doc, id, data })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Owning document
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Lowercase tag name
    pub fn tag_name(&self) -> &'a str {
        &self.data.name
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.data.get_attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.data.has_attr(name)
    }

    /// Attribute equals `value` exactly
    pub fn attr_is(&self, name: &str, value: &str) -> bool {
        self.attr(name) == Some(value)
    }

    pub fn parent_element(&self) -> Option<ElementRef<'a>> {
        let parent = self.doc.tree().parent(self.id)?;
        ElementRef::new(self.doc, parent)
    }

    /// Ancestor elements, nearest first (excluding self)
    pub fn ancestors(&self) -> impl Iterator<Item = ElementRef<'a>> + use<'a> {
        std::iter::successors(self.parent_element(), |el| el.parent_element())
    }

    /// Nearest inclusive ancestor matching `pred`
    pub fn closest(&self, pred: impl Fn(&ElementRef<'a>) -> bool) -> Option<ElementRef<'a>> {
        std::iter::once(*self).chain(self.ancestors()).find(|el| pred(el))
    }

    /// Child elements in document order
    pub fn children(&self) -> impl Iterator<Item = ElementRef<'a>> + use<'a> {
        let doc = self.doc;
        doc.tree()
            .children(self.id)
            .filter_map(move |(id, _)| ElementRef::new(doc, id))
    }

    /// Descendant elements in pre-order (excluding self)
    pub fn descendants(&self) -> impl Iterator<Item = ElementRef<'a>> + use<'a> {
        let doc = self.doc;
        doc.tree()
            .descendants(self.id)
            .filter_map(move |id| ElementRef::new(doc, id))
    }

    pub fn first_element_child(&self) -> Option<ElementRef<'a>> {
        self.children().next()
    }

    /// Is this the first element child of its parent
    pub fn is_first_element_child(&self) -> bool {
        self.parent_element()
            .and_then(|p| p.first_element_child())
            .is_some_and(|first| first.id == self.id)
    }

    /// Previous and next sibling nodes that are text, concatenated
    pub fn sibling_text(&self) -> String {
        let tree = self.doc.tree();
        let mut out = String::new();
        for sibling in [tree.prev_sibling(self.id), tree.next_sibling(self.id)]
            .into_iter()
            .flatten()
        {
            if let Some(text) = tree.get(sibling).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }

    pub fn text_content(&self) -> String {
        self.doc.text_content(self.id)
    }

    /// getBoundingClientRect
    pub fn rect(&self) -> DOMRect {
        self.doc.rect(self.id)
    }

    /// getComputedStyle
    pub fn style(&self) -> ComputedStyle {
        self.doc.computed_style(self.id)
    }

    /// Inclusive descendant check
    pub fn contains(&self, other: &ElementRef<'_>) -> bool {
        std::ptr::eq(self.doc, other.doc)
            && self.doc.tree().is_inclusive_ancestor(self.id, other.id)
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for ElementRef<'_> {}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>#{}", self.tag_name(), self.id.index())
    }
}
