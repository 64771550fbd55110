use std::{
    path::PathBuf,
    process::ExitStatus,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid home server entry {entry:?}: {reason}")]
    InvalidEndpoint { entry: String, reason: &'static str },
    #[error("Failed to write radmin commands file {path:?}: {source}")]
    CommandsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a single radmin invocation.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("Failed to spawn {binary:?}: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("radmin exited with {status}")]
    Exit { status: ExitStatus, output: String },
}

impl RunError {
    /// Combined output captured before the failure, if any.
    pub fn output(&self) -> &str {
        match self {
            RunError::Spawn { .. } => "",
            RunError::Exit { output, .. } => output,
        }
    }
}
