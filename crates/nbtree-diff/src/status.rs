//! Diff annotation types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use nbtree_types::TagPath;

/// How a node changed between the original and the edited tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    Added,
    Modified,
    Deleted,
}

impl DiffStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DiffStatus::Added => "added",
            DiffStatus::Modified => "modified",
            DiffStatus::Deleted => "deleted",
        }
    }

    /// Presentation colour conventionally used for this status.
    pub fn color(self) -> &'static str {
        match self {
            DiffStatus::Added => "green",
            DiffStatus::Modified => "orange",
            DiffStatus::Deleted => "red",
        }
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-node annotations for both sides of a diff.
///
/// Each map is keyed by the node's path within its own tree. Nodes absent from
/// a map are unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffMaps {
    /// Annotations on nodes of the original tree.
    #[serde(serialize_with = "serialize_path_map")]
    pub original: BTreeMap<TagPath, DiffStatus>,
    /// Annotations on nodes of the edited tree.
    #[serde(serialize_with = "serialize_path_map")]
    pub edited: BTreeMap<TagPath, DiffStatus>,
}

impl DiffMaps {
    /// Returns `true` if neither side carries any annotation.
    pub fn is_empty(&self) -> bool {
        self.original.is_empty() && self.edited.is_empty()
    }

    pub fn original_status(&self, path: &TagPath) -> Option<DiffStatus> {
        self.original.get(path).copied()
    }

    pub fn edited_status(&self, path: &TagPath) -> Option<DiffStatus> {
        self.edited.get(path).copied()
    }

    /// Count the annotated nodes.
    ///
    /// Additions are counted on the edited side, deletions on the original
    /// side, and modifications once per edited node.
    pub fn summary(&self) -> DiffSummary {
        let count = |map: &BTreeMap<TagPath, DiffStatus>, status| {
            map.values().filter(|s| **s == status).count()
        };
        DiffSummary {
            added: count(&self.edited, DiffStatus::Added),
            modified: count(&self.edited, DiffStatus::Modified),
            deleted: count(&self.original, DiffStatus::Deleted),
        }
    }
}

/// Node counts of a diff, by status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
}

impl DiffSummary {
    pub fn total(&self) -> usize {
        self.added + self.modified + self.deleted
    }
}

fn serialize_path_map<S: Serializer>(
    map: &BTreeMap<TagPath, DiffStatus>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(map.iter().map(|(path, status)| (path.to_string(), status)))
}
