//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to our DOM format.
//! Whitespace-only text nodes and doctypes are dropped.

use crate::ParseError;
use fos_dom::{Document, DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        // Convert RcDom to our DOM
        let mut document = Document::empty(url);
        self.convert_node(&dom.document, document.tree_mut(), NodeId::ROOT);

        // Find html, head, body elements
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    self.attach(tree, parent, id);
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                self.attach(tree, parent, id);
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                if let Some(element) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
                    for attr in attrs.borrow().iter() {
                        element.set_attr(&attr.name.local, &attr.value);
                    }
                }
                self.attach(tree, parent, id);

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id);
                }
            }
            RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
        }
    }

    fn attach(&self, tree: &mut DomTree, parent: NodeId, child: NodeId) {
        if let Err(err) = tree.append_child(parent, child) {
            tracing::warn!("Dropping node {:?}: {}", child, err);
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html).unwrap();

        assert_eq!(doc.title(), "Test");
        assert!(doc.body().is_valid());
    }

    #[test]
    fn test_parse_fragment() {
        let html = "<div><span>Text</span></div>";
        let doc = HtmlParser::new().parse(html).unwrap();

        // Even fragments get wrapped in html/head/body by html5ever
        let body = doc.body_element().unwrap();
        assert_eq!(body.first_element_child().unwrap().tag_name(), "div");
    }

    #[test]
    fn test_attributes_preserved() {
        let doc = HtmlParser::new()
            .parse(r#"<img id="logo" alt="" SRC="x.png">"#)
            .unwrap();
        let img = doc.element(doc.get_element_by_id("logo").unwrap()).unwrap();
        assert_eq!(img.attr("alt"), Some(""));
        assert_eq!(img.attr("src"), Some("x.png"));
    }
}
