//! Structural well-formedness checks over a whole tree.
//!
//! Checks performed, each reported with the path of the offending node:
//! - every compound ends with exactly one terminator
//! - terminators appear only as the last child of a compound
//! - names within one compound are unique (warning only)
//! - every tag has a known type

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use nbtree_types::{Tag, TagPath, TagValue};

/// How serious a structural issue is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The tree is usable but ambiguous (e.g. diffing may pair the wrong nodes).
    Warning,
    /// The tree violates a model invariant.
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    MissingCompoundEnd,
    CompoundEndNotLast,
    ExtraCompoundEnd,
    CompoundEndOutsideCompound,
    DuplicateName { name: String, count: usize },
    UnknownType { type_name: String },
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::DuplicateName { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A single problem found in a tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StructureIssue {
    /// The node the issue belongs to (the compound, for per-compound checks).
    pub path: TagPath,
    #[serde(flatten)]
    pub kind: IssueKind,
    pub severity: Severity,
}

/// Result of [`check_structure`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StructureReport {
    pub issues: Vec<StructureIssue>,
}

impl StructureReport {
    /// Returns `true` if no error-level issues were found. Warnings allowed.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &StructureIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &StructureIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    fn push(&mut self, path: TagPath, kind: IssueKind) {
        let severity = kind.severity();
        self.issues.push(StructureIssue {
            path,
            kind,
            severity,
        });
    }
}

/// Check every structural invariant of the tree rooted at `root`.
pub fn check_structure(root: &Tag) -> StructureReport {
    let mut report = StructureReport::default();
    if root.is_end() {
        report.push(TagPath::root(), IssueKind::CompoundEndOutsideCompound);
    }
    for (path, tag) in root.walk() {
        match &tag.value {
            TagValue::Compound(children) => check_compound(&path, children, &mut report),
            TagValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if item.is_end() {
                        report.push(path.child(i), IssueKind::CompoundEndOutsideCompound);
                    }
                }
            }
            TagValue::Unknown { type_name, .. } => report.push(
                path,
                IssueKind::UnknownType {
                    type_name: type_name.clone(),
                },
            ),
            _ => {}
        }
    }
    debug!(issues = report.issues.len(), "structure check complete");
    report
}

fn check_compound(path: &TagPath, children: &[Tag], report: &mut StructureReport) {
    let ends: Vec<usize> = children
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_end())
        .map(|(i, _)| i)
        .collect();

    match ends.as_slice() {
        [] => report.push(path.clone(), IssueKind::MissingCompoundEnd),
        [first, rest @ ..] => {
            if !rest.is_empty() {
                report.push(path.clone(), IssueKind::ExtraCompoundEnd);
            } else if *first != children.len() - 1 {
                report.push(path.clone(), IssueKind::CompoundEndNotLast);
            }
        }
    }

    for (name, count) in duplicate_names(children) {
        report.push(
            path.clone(),
            IssueKind::DuplicateName {
                name: name.to_string(),
                count,
            },
        );
    }
}

/// Names used by more than one non-terminator child, with their counts, in
/// name order.
pub fn duplicate_names(children: &[Tag]) -> Vec<(&str, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for child in children.iter().filter(|c| !c.is_end()) {
        *counts.entry(child.name.as_str()).or_default() += 1;
    }
    counts.into_iter().filter(|(_, n)| *n > 1).collect()
}
