//! Filesystem adapter for the ScriptSource port

use std::path::{Path, PathBuf};

use crate::domain::result::{Error, Result};
use crate::domain::MigrationStep;
use crate::ports::ScriptSource;

/// Reads step files relative to a base directory
#[derive(Debug, Clone)]
pub struct FsScriptSource {
    base_dir: PathBuf,
}

impl FsScriptSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl ScriptSource for FsScriptSource {
    fn read(&self, step: &MigrationStep) -> Result<String> {
        std::fs::read_to_string(step.resolve(&self.base_dir)).map_err(|source| Error::MissingFile {
            path: step.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FailureKind;
    use tempfile::tempdir;

    #[test]
    fn test_reads_relative_to_base_dir() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("scripts")).unwrap();
        std::fs::write(dir.path().join("scripts/001_x.sql"), "CREATE TABLE x ();").unwrap();

        let source = FsScriptSource::new(dir.path());
        let sql = source.read(&MigrationStep::new(1, "scripts/001_x.sql")).unwrap();
        assert_eq!(sql, "CREATE TABLE x ();");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let source = FsScriptSource::new(dir.path());

        let err = source.read(&MigrationStep::new(3, "scripts/003_gone.sql")).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingFile);
        assert_eq!(err.to_string(), "Script file not found: scripts/003_gone.sql");
    }

    #[test]
    fn test_unreadable_path_is_missing_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("scripts/dir.sql")).unwrap();
        let source = FsScriptSource::new(dir.path());

        let err = source.read(&MigrationStep::new(1, "scripts/dir.sql")).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingFile);
    }
}
