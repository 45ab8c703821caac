use crate::fetch::TransportOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Transport tuning (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Seconds to wait for a TCP/TLS connection.
    pub connect_timeout_secs: u64,
    /// Abort a transfer stuck below 1 KiB/s for this many seconds.
    pub low_speed_time_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            low_speed_time_secs: 60,
        }
    }
}

impl From<&TransportConfig> for TransportOptions {
    fn from(c: &TransportConfig) -> Self {
        TransportOptions {
            connect_timeout: Duration::from_secs(c.connect_timeout_secs),
            low_speed_time: Duration::from_secs(c.low_speed_time_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/fontsnap/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontsnapConfig {
    /// Gzip-compressed registry listing, one package name per line.
    pub listing_url: String,
    /// Snapshot URLs are `<snapshot_base_url>/<base>.tar.gz`.
    pub snapshot_base_url: String,
    /// Only listing entries starting with this are resolved.
    pub package_prefix: String,
    /// Snapshots are extracted here, one subdirectory per base name.
    pub store_dir: PathBuf,
    /// Unresolved package names, one per line.
    pub unresolved_path: PathBuf,
    /// `package,base` pairs, one per line.
    pub mapping_path: PathBuf,
    /// Delay after each request, in seconds.
    pub pace_secs: f64,
    #[serde(default)]
    pub transport: Option<TransportConfig>,
}

impl Default for FontsnapConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://aur.archlinux.org/packages.gz".to_string(),
            snapshot_base_url: "https://aur.archlinux.org/cgit/aur.git/snapshot".to_string(),
            package_prefix: "ttf-".to_string(),
            store_dir: PathBuf::from("pkgs"),
            unresolved_path: PathBuf::from("wtfs.txt"),
            mapping_path: PathBuf::from("names.txt"),
            pace_secs: 5.0,
            transport: None,
        }
    }
}

impl FontsnapConfig {
    pub fn pace(&self) -> Duration {
        Duration::try_from_secs_f64(self.pace_secs).unwrap_or(Duration::ZERO)
    }

    pub fn transport_options(&self) -> TransportOptions {
        self.transport
            .as_ref()
            .map(TransportOptions::from)
            .unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fontsnap")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FontsnapConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<FontsnapConfig> {
    if !path.exists() {
        let default_cfg = FontsnapConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FontsnapConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FontsnapConfig::default();
        assert_eq!(cfg.package_prefix, "ttf-");
        assert_eq!(cfg.store_dir, PathBuf::from("pkgs"));
        assert_eq!(cfg.pace(), Duration::from_secs(5));
        assert_eq!(cfg.transport_options().connect_timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            listing_url = "http://mirror.local/packages.gz"
            snapshot_base_url = "http://mirror.local/snapshot"
            package_prefix = "otf-"
            store_dir = "/srv/fonts"
            unresolved_path = "out/unresolved.txt"
            mapping_path = "out/names.txt"
            pace_secs = 0.5

            [transport]
            connect_timeout_secs = 5
            low_speed_time_secs = 20
        "#;
        let cfg: FontsnapConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.package_prefix, "otf-");
        assert_eq!(cfg.pace(), Duration::from_millis(500));
        let t = cfg.transport_options();
        assert_eq!(t.connect_timeout, Duration::from_secs(5));
        assert_eq!(t.low_speed_time, Duration::from_secs(20));
    }

    #[test]
    fn negative_pace_is_zero() {
        let cfg = FontsnapConfig {
            pace_secs: -1.0,
            ..FontsnapConfig::default()
        };
        assert_eq!(cfg.pace(), Duration::ZERO);
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fontsnap/config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.mapping_path, PathBuf::from("names.txt"));

        let reloaded = load_or_init_at(&path).unwrap();
        assert_eq!(reloaded.snapshot_base_url, cfg.snapshot_base_url);
        assert!(reloaded.transport.is_none());
    }
}
