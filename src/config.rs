//! Startup configuration.
//!
//! Sources, later ones winning:
//! - built-in defaults
//! - `fraud-lens.toml` in the working directory (optional)
//! - `LENS_*` environment variables, `__` separating sections (e.g. `LENS_SOURCE__DATA_DIR`)
//! - a bare `PORT` variable for the listen port

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::LensError;

pub const CONFIG_FILE: &str = "fraud-lens.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: IpAddr,
    pub port: u16,
    pub loglevel: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8050,
            loglevel: "info".to_string(),
        }
    }
}

/// Where the seven tables come from. Resolved into a
/// [`SourcePlan`](crate::source::SourcePlan) once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory searched for `<Table>.csv` files.
    pub data_dir: PathBuf,
    /// `sqlite:` URL of the relational store used for tables without a CSV file.
    pub database_url: Option<String>,
    /// Per-table SQL overriding the built-in fallback query, keyed by table name.
    pub queries: HashMap<String, String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            database_url: None,
            queries: HashMap::new(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Self::figment_from(CONFIG_FILE)
    }

    /// Same layers as [`Config::figment`] with the TOML layer read from `file`.
    pub fn figment_from(file: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file.as_ref()))
            .merge(Env::prefixed("LENS_").split("__"))
            .merge(Env::raw().only(&["PORT"]).map(|_| "basic.port".into()))
    }

    pub fn load() -> Result<Self, LensError> {
        Ok(Self::figment().extract()?)
    }

    pub fn load_from(file: impl AsRef<Path>) -> Result<Self, LensError> {
        Ok(Self::figment_from(file).extract()?)
    }

    pub fn listen_socket(&self) -> SocketAddr {
        SocketAddr::new(self.basic.listen_addr, self.basic.port)
    }
}
