//! Migration step domain model

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One SQL file applied as a unit
///
/// The SQL text is not held here; it is read when the step executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStep {
    /// 1-indexed position in the run
    pub ordinal: usize,
    /// Path as declared (e.g., "scripts/001_create_users_and_profiles.sql")
    pub path: String,
}

impl MigrationStep {
    pub fn new(ordinal: usize, path: impl Into<String>) -> Self {
        Self {
            ordinal,
            path: path.into(),
        }
    }

    /// Build ordered steps from a list of paths, numbering from 1
    pub fn from_paths<I, S>(paths: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths
            .into_iter()
            .enumerate()
            .map(|(i, path)| Self::new(i + 1, path))
            .collect()
    }

    /// Resolve the declared path against a base directory
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, base_dir: &Path) -> PathBuf {
        let path = Path::new(&self.path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// File name portion of the path, for compact display
    pub fn file_name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.path)
    }
}
