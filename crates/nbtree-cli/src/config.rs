use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Presentation settings, read from `nbtree.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Colour diff annotations and type labels. `true` still defers to the
    /// terminal check, so piped output stays plain.
    pub color: bool,
    /// Print unannotated nodes in `diff` output.
    pub show_unchanged: bool,
    /// Spaces per nesting level.
    pub indent: usize,
    /// Report duplicate compound names from `check`.
    pub warn_duplicate_names: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_unchanged: true,
            indent: 2,
            warn_duplicate_names: true,
        }
    }
}

impl CliConfig {
    pub const FILE_NAME: &'static str = "nbtree.toml";

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// The forced colour setting, if any. Only turning colour off is forced.
    pub fn color_override(&self) -> Option<bool> {
        (!self.color).then_some(false)
    }

    /// Load `explicit` if given, else `nbtree.toml` in the working directory
    /// if present, else the defaults.
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = Path::new(Self::FILE_NAME);
        if local.is_file() {
            tracing::debug!(path = Self::FILE_NAME, "using local config");
            return Self::load(local);
        }
        Ok(Self::default())
    }
}
