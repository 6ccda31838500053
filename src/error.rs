use std::path::PathBuf;

use thiserror::Error;

use crate::merge::Conflict;


pub type Result<T> = std::result::Result<T, ErrorKind>;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("invalid configuration: {}", .0)]
    Config(#[from]ConfigError),

    #[error("merging child manifests failed: {}", .0)]
    Reconcile(#[from]ErrorKind),
}

impl MergeError {
    /// Whether the user should be shown the usage text alongside the error.
    pub fn wants_usage(&self) -> bool {
        matches!(self, MergeError::Config(_))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no root directory was specified for the child packages (--child)")]
    MissingChild,

    #[error("no directory was specified for the parent package (--parent)")]
    MissingParent,

    #[error("no manifest type was specified (--type)")]
    MissingType,

    #[error("invalid type: {value}, expected one of: bower, npm")]
    InvalidType { value: String },

    #[error("parent manifest not found: {}", .path.display())]
    MissingParentManifest { path: PathBuf },

    #[error("child root is not a directory: {}", .path.display())]
    MissingChildRoot { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("{}", .0)]
    Conflict(Conflict),

    #[error("malformed manifest {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: &'static str },

    #[error("unable to parse {}: {source}", .path.display())]
    Json { path: PathBuf, source: serde_json::Error },

    #[error("io error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("unable to list child packages: {}", .0)]
    Walkdir(#[from]walkdir::Error),

    #[error("serializing failed: {}", .0)]
    Serde(#[from]serde_json::Error),
}

impl From<Conflict> for ErrorKind {
    fn from(value: Conflict) -> Self {
        ErrorKind::Conflict(value)
    }
}

impl ErrorKind {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ErrorKind::Io { path: path.into(), source }
    }
}
