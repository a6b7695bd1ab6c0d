//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM used as the platform layer of the accessibility
//! auditor. Besides the tree itself it answers the questions an overlay
//! needs from a rendered page: element geometry, resolved style, the
//! user-agent default style of a bare element, frame access, and the
//! batch of mutations since the last observation.

mod node;
mod tree;
mod document;
mod element;
mod error;
mod geometry;
mod mutation;
mod page;
mod style;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::{DomTree, Descendants};
pub use document::{Document, ReadyState};
pub use element::ElementRef;
pub use error::{DomError, DomResult};
pub use geometry::DOMRect;
pub use mutation::{MutationRecord, MutationType};
pub use page::{Page, DocumentId};
pub use style::{ComputedStyle, user_agent_style};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert a sentinel-based link into an Option
    #[inline]
    pub(crate) fn valid(self) -> Option<NodeId> {
        if self.is_valid() { Some(self) } else { None }
    }
}
