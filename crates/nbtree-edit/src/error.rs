//! Error types for tree edits.

use nbtree_types::TagPath;
use nbtree_validate::ValidationError;

/// Reasons an edit is refused. A refused edit never produces a new tree.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The textual value failed its type's domain check.
    #[error("rejected value: {0}")]
    Validation(#[from] ValidationError),

    /// The element kind does not match what the container stores.
    #[error("cannot add {element} to a {container} tag")]
    ElementMismatch {
        container: String,
        element: &'static str,
    },

    /// The target holds no children.
    #[error("{0} tags hold no children")]
    NotAContainer(String),

    /// The target holds no single assignable value.
    #[error("{0} tags hold no single value")]
    NotALeaf(String),

    /// Terminators are managed by the compound and cannot be added directly.
    #[error("the compound terminator cannot be added explicitly")]
    SentinelNotAddable,

    #[error("no tag at path {0}")]
    PathNotFound(TagPath),

    #[error("index {index} out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    /// The compound terminator stays in the last slot.
    #[error("the compound terminator at index {index} cannot be moved or removed")]
    TerminatorPinned { index: usize },

    #[error("compound children need a non-empty name")]
    EmptyName,

    #[error("a child named {0:?} already exists")]
    DuplicateName(String),

    #[error("unknown editor mode: {0}")]
    UnknownMode(String),

    /// The session's mode does not allow edits.
    #[error("edits are disabled in {0} mode")]
    ReadOnly(&'static str),
}

/// Convenience alias for edit results.
pub type EditResult<T> = Result<T, EditError>;
