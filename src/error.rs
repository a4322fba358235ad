use std::path::PathBuf;

use thiserror::Error;

use crate::path_de::DecodeError;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid glob pattern `{pattern}`")]
    Pattern { pattern: String, #[source] source: glob::PatternError },
    #[error("glob pattern matched no files: {0}")]
    NoMatch(String),
    #[error("unreadable glob entry")]
    Entry(#[from] glob::GlobError),
    #[error("failed to read {path}")]
    Read { path: PathBuf, #[source] source: std::io::Error },
    #[error("failed to parse {path} (line {line})")]
    Json { path: PathBuf, line: usize, #[source] source: serde_json::Error },
    #[error("invalid candidate in {path}, document {index}")]
    Candidate { path: PathBuf, index: usize, #[source] source: DecodeError },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read { path: PathBuf, #[source] source: std::io::Error },
    #[error("invalid config {path}")]
    Decode { path: PathBuf, #[source] source: DecodeError },
    #[error("indent must be whitespace, got {0:?}")]
    Indent(String),
    #[error("class suffix `{0}` is not a valid identifier tail")]
    ClassSuffix(String),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to create directory {path}")]
    CreateDir { path: PathBuf, #[source] source: std::io::Error },
    #[error("failed to write {path}")]
    Write { path: PathBuf, #[source] source: std::io::Error },
}
