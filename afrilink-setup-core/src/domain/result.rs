//! Result and error types for the core library

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Terminal classification of a failed setup run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    MissingConfig,
    MissingFile,
    ClientError,
    UnexpectedError,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::MissingConfig => "missing-config",
            FailureKind::MissingFile => "missing-file",
            FailureKind::ClientError => "client-error",
            FailureKind::UnexpectedError => "unexpected-error",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} environment variable not set")]
    MissingConfig(String),

    #[error("Script file not found: {path}")]
    MissingFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error executing {path}: {stderr}")]
    Client {
        path: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unexpected error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Failure kind this error ends a run with
    ///
    /// I/O outside a step's script read is reported as unexpected.
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::MissingConfig(_) => FailureKind::MissingConfig,
            Error::MissingFile { .. } => FailureKind::MissingFile,
            Error::Client { .. } => FailureKind::ClientError,
            Error::Unexpected(_) | Error::Io(_) => FailureKind::UnexpectedError,
        }
    }

    /// Human-readable detail without the kind prefix
    ///
    /// For client errors this is the captured stderr.
    pub fn detail(&self) -> String {
        match self {
            Error::MissingConfig(var) => format!("{} environment variable not set", var),
            Error::MissingFile { source, .. } => source.to_string(),
            Error::Client { stderr, .. } => stderr.clone(),
            Error::Unexpected(msg) => msg.clone(),
            Error::Io(e) => e.to_string(),
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::MissingConfig("POSTGRES_URL".into()).kind(), FailureKind::MissingConfig);
        let missing = Error::MissingFile {
            path: "scripts/003.sql".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(missing.kind(), FailureKind::MissingFile);
        let client = Error::Client {
            path: "scripts/001.sql".into(),
            exit_code: Some(1),
            stderr: "syntax error".into(),
        };
        assert_eq!(client.kind(), FailureKind::ClientError);
        assert_eq!(client.detail(), "syntax error");
        let io = Error::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert_eq!(io.kind(), FailureKind::UnexpectedError);
        assert_eq!(Error::unexpected("boom").kind(), FailureKind::UnexpectedError);
    }

    #[test]
    fn test_messages() {
        let missing = Error::MissingFile {
            path: "scripts/003_create_currencies.sql".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(
            missing.to_string(),
            "Script file not found: scripts/003_create_currencies.sql"
        );
        assert_eq!(
            Error::MissingConfig("POSTGRES_URL".into()).to_string(),
            "POSTGRES_URL environment variable not set"
        );
    }

    #[test]
    fn test_failure_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&FailureKind::ClientError).unwrap();
        assert_eq!(json, "\"client-error\"");
        assert_eq!(FailureKind::MissingFile.to_string(), "missing-file");
    }
}
