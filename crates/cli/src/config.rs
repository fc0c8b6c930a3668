//! Listener configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional YAML file (`--config` / `F1_TELEMETRY_CONFIG`), then command-line
//! flags and their environment variables.

use crate::commands::ListenArgs;
use crate::error::CliError;
use f1_udp_protocol::DEFAULT_PORT;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListenerConfig {
    /// Local address to bind.
    pub bind: IpAddr,
    pub port: u16,
    /// Directory receiving `<unix_ms>_udp_telemetry_raw.log`.
    pub capture_dir: PathBuf,
    /// Stop after this many datagrams.
    pub max_packets: Option<u64>,
    /// Include decoded payloads in JSON output.
    pub payloads: bool,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            capture_dir: PathBuf::from("."),
            max_packets: None,
            payloads: false,
        }
    }
}

impl ListenerConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, CliError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::InvalidConfiguration(format!(
                "cannot read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Defaults, overlaid by the config file if given, overlaid by `args`.
    pub fn resolve(config_path: Option<&Path>, args: &ListenArgs) -> Result<Self, CliError> {
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(args);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, args: &ListenArgs) {
        if let Some(bind) = args.bind {
            self.bind = bind;
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(dir) = &args.capture_dir {
            self.capture_dir = dir.clone();
        }
        if args.max_packets.is_some() {
            self.max_packets = args.max_packets;
        }
        if args.payloads {
            self.payloads = true;
        }
    }

    pub fn validate(&self) -> Result<(), CliError> {
        if self.max_packets == Some(0) {
            return Err(CliError::InvalidConfiguration(
                "max_packets must be > 0".to_string(),
            ));
        }
        if self.capture_dir.as_os_str().is_empty() {
            return Err(CliError::InvalidConfiguration(
                "capture_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
