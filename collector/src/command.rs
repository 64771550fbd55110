use crate::{
    endpoint::HostEndpoint,
    error::Error,
};
use std::path::{
    Path,
    PathBuf,
};

/// How the `stats home_server` commands are handed to radmin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InvocationMode {
    /// One `-e <command>` pair per home server.
    #[default]
    Inline,
    /// Commands are written to this file once and passed with `-i`.
    CommandsFile(PathBuf),
}

/// The fixed radmin argument vector used on every scrape.
#[derive(Debug, Clone)]
pub struct RadminCommand {
    socket_file: PathBuf,
    endpoints: Vec<HostEndpoint>,
    mode: InvocationMode,
}

impl RadminCommand {
    pub fn new(socket_file: impl Into<PathBuf>, endpoints: Vec<HostEndpoint>) -> Self {
        Self {
            socket_file: socket_file.into(),
            endpoints,
            mode: InvocationMode::Inline,
        }
    }

    /// Parses `address:port` entries; blank entries are skipped.
    pub fn from_home_servers<S: AsRef<str>>(socket_file: impl Into<PathBuf>, home_servers: &[S]) -> Result<Self, Error> {
        Ok(Self::new(socket_file, HostEndpoint::parse_all(home_servers)?))
    }

    pub fn with_mode(mut self, mode: InvocationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn endpoints(&self) -> &[HostEndpoint] {
        &self.endpoints
    }

    pub fn mode(&self) -> &InvocationMode {
        &self.mode
    }

    pub fn has_endpoints(&self) -> bool {
        !self.endpoints.is_empty()
    }

    /// Newline-terminated command script, one line per endpoint.
    pub fn script(&self) -> String {
        self.endpoints
            .iter()
            .map(|endpoint| format!("{}\n", stats_command(endpoint)))
            .collect()
    }

    /// Writes the commands file when running in [`InvocationMode::CommandsFile`].
    pub fn prepare(&self) -> Result<(), Error> {
        if let InvocationMode::CommandsFile(path) = &self.mode {
            write_commands_file(path, &self.script())?;
            debug!(path = %path.display(), endpoints = self.endpoints.len(), "wrote radmin commands file");
        }
        Ok(())
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            self.socket_file.display().to_string(),
            "-E".to_string(),
        ];
        match &self.mode {
            InvocationMode::Inline => {
                for endpoint in &self.endpoints {
                    args.push("-e".to_string());
                    args.push(stats_command(endpoint));
                }
            }
            InvocationMode::CommandsFile(path) => {
                args.push("-i".to_string());
                args.push(path.display().to_string());
            }
        }
        args
    }
}

pub fn stats_command(endpoint: &HostEndpoint) -> String {
    format!("stats home_server {} {}", endpoint.address, endpoint.port)
}

fn write_commands_file(path: &Path, script: &str) -> Result<(), Error> {
    std::fs::write(path, script).map_err(|source| Error::CommandsFile {
        path: path.to_path_buf(),
        source,
    })
}
