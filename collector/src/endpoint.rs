use crate::error::Error;
use std::{
    fmt,
    str::FromStr,
};

/// Label applied to samples that appear before any `stats home_server` header.
pub const DEFAULT_ENDPOINT: &str = "127.0.0.1:1812";

/// An upstream RADIUS home server, as configured by `address:port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostEndpoint {
    pub address: String,
    pub port: u16,
}

impl HostEndpoint {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// Parses every non-empty entry of `home_servers`, skipping blanks.
    pub fn parse_all<S: AsRef<str>>(home_servers: &[S]) -> Result<Vec<Self>, Error> {
        home_servers
            .iter()
            .map(|entry| entry.as_ref())
            .filter(|entry: &&str| !entry.is_empty())
            .map(|entry| entry.parse())
            .collect()
    }
}

impl FromStr for HostEndpoint {
    type Err = Error;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &'static str| Error::InvalidEndpoint {
            entry: entry.to_string(),
            reason,
        };

        let (address, port) = entry.rsplit_once(':').ok_or_else(|| invalid("missing ':' separator"))?;
        if address.is_empty() {
            return Err(invalid("empty address"));
        }
        let port = port.parse::<u16>().map_err(|_| invalid("port is not a number in 0..=65535"))?;

        Ok(Self::new(address, port))
    }
}

impl fmt::Display for HostEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}
