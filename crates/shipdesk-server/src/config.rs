use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shipdesk_directory::AdminProfile;

use crate::error::{ServerError, ServerResult};

/// Environment variable that overrides the listening port.
pub const PORT_ENV: &str = "PORT";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    /// Insert the administrator account at startup when it is missing.
    pub seed_admin: bool,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub admin: AdminProfile,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 5000)),
            data_dir: PathBuf::from("data"),
            seed_admin: true,
            log_level: "info".into(),
            admin: AdminProfile::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Replace the port with `raw`.
    pub fn with_port(mut self, raw: &str) -> ServerResult<Self> {
        let port = raw
            .trim()
            .parse::<u16>()
            .map_err(|e| ServerError::Config(format!("invalid port {raw:?}: {e}")))?;
        self.bind_addr.set_port(port);
        Ok(self)
    }

    /// Apply the `PORT` environment variable, if set.
    pub fn with_env_port(self) -> ServerResult<Self> {
        match std::env::var(PORT_ENV) {
            Ok(raw) => self.with_port(&raw),
            Err(_) => Ok(self),
        }
    }
}
