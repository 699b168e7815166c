use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Address of a node inside one tree: the child index taken at each level,
/// starting from the root.
///
/// The empty path addresses the root. A path is only meaningful relative to
/// the tree it was produced from; the same path in two different trees may
/// name unrelated nodes.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagPath(Vec<usize>);

impl TagPath {
    /// The path of the root node.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of steps from the root.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// The path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut steps = Vec::with_capacity(self.0.len() + 1);
        steps.extend_from_slice(&self.0);
        steps.push(index);
        Self(steps)
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.0.split_last().map(|(_, rest)| Self(rest.to_vec()))
    }

    /// The last step, or `None` for the root.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }
}

impl From<Vec<usize>> for TagPath {
    fn from(steps: Vec<usize>) -> Self {
        Self(steps)
    }
}

impl fmt::Debug for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagPath({self})")
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for step in &self.0 {
            write!(f, "/{step}")?;
        }
        Ok(())
    }
}

/// Parses `/`-separated indices. `""` and `"/"` both name the root.
impl FromStr for TagPath {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('/')
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<usize>()
                    .map_err(|_| TypeError::invalid("path", format!("bad step {part:?} in {s:?}")))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
