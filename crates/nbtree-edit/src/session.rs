//! Editing sessions: an edited tree, the original it started from, and the
//! mode that decides whether edits and diff annotations apply.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use nbtree_diff::{compute_diff_maps, DiffMaps};
use nbtree_types::{Tag, TagPath};

use crate::assign::update_at;
use crate::error::{EditError, EditResult};

/// How a session presents its tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorMode {
    #[default]
    Edit,
    View,
    EditDiff,
    ViewDiff,
}

impl EditorMode {
    pub const ALL: [EditorMode; 4] = [
        EditorMode::Edit,
        EditorMode::View,
        EditorMode::EditDiff,
        EditorMode::ViewDiff,
    ];

    pub fn is_editable(self) -> bool {
        matches!(self, EditorMode::Edit | EditorMode::EditDiff)
    }

    pub fn is_view_only(self) -> bool {
        matches!(self, EditorMode::View | EditorMode::ViewDiff)
    }

    pub fn is_diff_mode(self) -> bool {
        matches!(self, EditorMode::EditDiff | EditorMode::ViewDiff)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EditorMode::Edit => "edit",
            EditorMode::View => "view",
            EditorMode::EditDiff => "edit-diff",
            EditorMode::ViewDiff => "view-diff",
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorMode {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditorMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| EditError::UnknownMode(s.to_string()))
    }
}

/// An edited tree together with the original it is compared against.
///
/// Edits never touch the tree in place: [`apply`](Self::apply) computes a new
/// tree and swaps it in only when the edit succeeds.
#[derive(Clone, Debug)]
pub struct EditSession {
    original: Option<Tag>,
    edited: Tag,
    mode: EditorMode,
    revision: u64,
}

impl EditSession {
    /// A session with no original to compare against.
    pub fn new(edited: Tag, mode: EditorMode) -> Self {
        Self {
            original: None,
            edited,
            mode,
            revision: 0,
        }
    }

    /// A session that starts editing a copy of `original`.
    pub fn from_original(original: Tag, mode: EditorMode) -> Self {
        Self {
            edited: original.clone(),
            original: Some(original),
            mode,
            revision: 0,
        }
    }

    /// A session over an existing pair of trees.
    pub fn with_pair(original: Tag, edited: Tag, mode: EditorMode) -> Self {
        Self {
            original: Some(original),
            edited,
            mode,
            revision: 0,
        }
    }

    pub fn original(&self) -> Option<&Tag> {
        self.original.as_ref()
    }

    pub fn edited(&self) -> &Tag {
        &self.edited
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        debug!(from = %self.mode, to = %mode, "editor mode changed");
        self.mode = mode;
    }

    /// Number of edits applied since the session started or last imported.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn into_edited(self) -> Tag {
        self.edited
    }

    /// Run `edit` against the current tree and keep the result.
    ///
    /// Refused in view-only modes. A failed edit leaves the session as it was.
    pub fn apply<F>(&mut self, edit: F) -> EditResult<()>
    where
        F: FnOnce(&Tag) -> EditResult<Tag>,
    {
        if self.mode.is_view_only() {
            return Err(EditError::ReadOnly(self.mode.as_str()));
        }
        self.edited = edit(&self.edited)?;
        self.revision += 1;
        debug!(revision = self.revision, "edit applied");
        Ok(())
    }

    /// Run `edit` against the node at `path` and keep the rebuilt tree.
    pub fn apply_at<F>(&mut self, path: &TagPath, edit: F) -> EditResult<()>
    where
        F: FnOnce(&Tag) -> EditResult<Tag>,
    {
        self.apply(|root| update_at(root, path, edit))
    }

    /// Replace both trees with `tree`, discarding any pending edits.
    pub fn import(&mut self, tree: Tag) {
        self.edited = tree.clone();
        self.original = Some(tree);
        self.revision = 0;
        debug!("tree imported");
    }

    /// Drop all edits, returning to the original tree.
    pub fn revert(&mut self) {
        if let Some(original) = &self.original {
            self.edited = original.clone();
            self.revision = 0;
        }
    }

    /// Annotations of the original and edited trees. `None` outside diff
    /// modes or without an original.
    pub fn diff(&self) -> Option<DiffMaps> {
        if !self.mode.is_diff_mode() {
            return None;
        }
        let original = self.original.as_ref()?;
        Some(compute_diff_maps(original, &self.edited))
    }
}
