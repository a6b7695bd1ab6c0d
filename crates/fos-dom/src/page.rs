//! Page - documents and frames
//!
//! A page owns the top-level document plus one document per loaded
//! same-origin frame. Cross-origin frames are bound but never readable.

use crate::{DomError, DomResult, Document, NodeId};
use std::collections::HashMap;

/// Index of a document inside a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u32);

impl DocumentId {
    /// Top-level document
    pub const MAIN: DocumentId = DocumentId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameBinding {
    SameOrigin(DocumentId),
    CrossOrigin,
}

/// Browsing context tree
#[derive(Debug)]
pub struct Page {
    documents: Vec<Document>,
    frames: HashMap<(DocumentId, NodeId), FrameBinding>,
}

impl Page {
    pub fn new(main: Document) -> Self {
        Self {
            documents: vec![main],
            frames: HashMap::new(),
        }
    }

    pub fn main(&self) -> &Document {
        &self.documents[0]
    }

    pub fn main_mut(&mut self) -> &mut Document {
        &mut self.documents[0]
    }

    pub fn document(&self, id: DocumentId) -> DomResult<&Document> {
        self.documents.get(id.0 as usize).ok_or(DomError::NotFound)
    }

    pub fn document_mut(&mut self, id: DocumentId) -> DomResult<&mut Document> {
        self.documents.get_mut(id.0 as usize).ok_or(DomError::NotFound)
    }

    /// All document ids, main first
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + use<> {
        (0..self.documents.len() as u32).map(DocumentId)
    }

    /// Load `doc` into the `<iframe>` element `iframe` of `host`
    pub fn attach_frame(
        &mut self,
        host: DocumentId,
        iframe: NodeId,
        doc: Document,
    ) -> DomResult<DocumentId> {
        self.check_iframe(host, iframe)?;
        let id = DocumentId(self.documents.len() as u32);
        self.documents.push(doc);
        self.frames.insert((host, iframe), FrameBinding::SameOrigin(id));
        tracing::debug!("Attached frame document {:?} to {:?}/{:?}", id, host, iframe);
        Ok(id)
    }

    /// Mark an `<iframe>` as showing a cross-origin document
    pub fn attach_cross_origin_frame(&mut self, host: DocumentId, iframe: NodeId) -> DomResult<()> {
        self.check_iframe(host, iframe)?;
        self.frames.insert((host, iframe), FrameBinding::CrossOrigin);
        Ok(())
    }

    fn check_iframe(&self, host: DocumentId, iframe: NodeId) -> DomResult<()> {
        match self.document(host)?.tag(iframe) {
            Some("iframe") => Ok(()),
            _ => Err(DomError::NotFound),
        }
    }

    /// `<iframe>` elements of `host` in document order
    pub fn frames_of(&self, host: DocumentId) -> Vec<NodeId> {
        let Ok(doc) = self.document(host) else {
            return Vec::new();
        };
        doc.descendants()
            .filter(|&id| doc.tag(id) == Some("iframe"))
            .collect()
    }

    /// contentDocument of an `<iframe>`
    pub fn frame_document(&self, host: DocumentId, iframe: NodeId) -> DomResult<DocumentId> {
        match self.frames.get(&(host, iframe)) {
            Some(FrameBinding::SameOrigin(id)) => Ok(*id),
            Some(FrameBinding::CrossOrigin) => Err(DomError::CrossOrigin),
            None => Err(DomError::FrameNotReady),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_access() {
        let mut main = Document::default();
        let a = main.create_element("iframe");
        let b = main.create_element("iframe");
        let c = main.create_element("iframe");
        for frame in [a, b, c] {
            main.append_child(main.body(), frame).unwrap();
        }
        let mut page = Page::new(main);
        let child = page.attach_frame(DocumentId::MAIN, a, Document::default()).unwrap();
        page.attach_cross_origin_frame(DocumentId::MAIN, b).unwrap();

        assert_eq!(page.frames_of(DocumentId::MAIN), vec![a, b, c]);
        assert_eq!(page.frame_document(DocumentId::MAIN, a), Ok(child));
        assert_eq!(page.frame_document(DocumentId::MAIN, b), Err(DomError::CrossOrigin));
        assert_eq!(page.frame_document(DocumentId::MAIN, c), Err(DomError::FrameNotReady));
    }

    #[test]
    fn test_non_iframe_rejected() {
        let mut page = Page::new(Document::default());
        let body = page.main().body();
        assert_eq!(
            page.attach_frame(DocumentId::MAIN, body, Document::default()),
            Err(DomError::NotFound)
        );
    }
}
