//! DOM errors

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation and access errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("node not found")]
    NotFound,

    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("hierarchy request error")]
    HierarchyRequest,

    /// Node is not a child of the given parent
    #[error("node is not a child")]
    NotAChild,

    /// Frame belongs to another origin and cannot be read
    #[error("frame document is cross-origin")]
    CrossOrigin,

    /// Frame has no document yet
    #[error("frame document is not available yet")]
    FrameNotReady,
}
