use crate::error::RunError;
use std::{
    path::PathBuf,
    process::Command,
};

/// Executes radmin and hands back whatever it printed.
pub trait RadminRunner: Send + Sync {
    /// Runs to completion and returns combined stdout and stderr.
    fn run(&self, args: &[String]) -> Result<String, RunError>;
}

/// Spawns the radmin binary as a child process. Blocks until it exits.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary: PathBuf,
}

impl ProcessRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }
}

impl RadminRunner for ProcessRunner {
    fn run(&self, args: &[String]) -> Result<String, RunError> {
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| RunError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(RunError::Exit {
                status: output.status,
                output: combined,
            });
        }

        Ok(combined)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    fn captures_stdout_and_stderr() {
        let output = ProcessRunner::new("/bin/sh")
            .run(&sh("printf 'elapsed.1\\t5\\n'; printf 'warning\\n' >&2"))
            .unwrap();
        assert_eq!(output, "elapsed.1\t5\nwarning\n");
    }

    #[test]
    fn non_zero_exit_keeps_output() {
        let err = ProcessRunner::new("/bin/sh")
            .run(&sh("echo 'radmin: Failed to connect'; exit 3"))
            .unwrap_err();
        assert!(matches!(err, RunError::Exit { .. }));
        assert_eq!(err.output(), "radmin: Failed to connect\n");
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let err = ProcessRunner::new("/nonexistent/radmin").run(&[]).unwrap_err();
        assert!(matches!(err, RunError::Spawn { .. }));
        assert_eq!(err.output(), "");
    }
}
