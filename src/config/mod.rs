mod file_config;

pub use file_config::FileConfig;

use crate::catalog_store::DEFAULT_READ_POOL_SIZE;
use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// TOML values override these where present.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub playlists_root: Option<PathBuf>,
    pub mount_point: Option<PathBuf>,
    pub read_pool_size: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            playlists_root: None,
            mount_point: None,
            read_pool_size: DEFAULT_READ_POOL_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub playlists_root: PathBuf,
    /// Anchors relative drop paths when resolving songs.
    pub mount_point: PathBuf,
    pub read_pool_size: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| anyhow!("db_path must be specified via --db-path or in config file"))?;

        let db_dir = match db_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !db_dir.is_dir() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }

        let playlists_root = file
            .playlists_root
            .map(PathBuf::from)
            .or_else(|| cli.playlists_root.clone())
            .unwrap_or_else(|| db_dir.join("playlists"));

        let mount_point = file
            .mount_point
            .map(PathBuf::from)
            .or_else(|| cli.mount_point.clone())
            .unwrap_or_default();

        let read_pool_size = file.read_pool_size.unwrap_or(cli.read_pool_size);
        if read_pool_size == 0 {
            bail!("read_pool_size must be greater than 0");
        }

        Ok(Self {
            db_path,
            playlists_root,
            mount_point,
            read_pool_size,
        })
    }
}
