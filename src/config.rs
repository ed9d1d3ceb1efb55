//! Configuration management for bytescan

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

/// Default benchmark size sweep: 1KB through 100MB
pub const DEFAULT_SIZES: [u64; 6] = [KB, 10 * KB, 100 * KB, MB, 10 * MB, 100 * MB];

/// Default planted pattern length
pub const DEFAULT_PATTERN_SIZE: usize = 8;

/// Default timed calls per kernel per size
pub const DEFAULT_ITERATIONS: u32 = 10;

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory where fixture files are generated
    pub data_dir: PathBuf,

    /// Data sizes to sweep, in bytes
    pub sizes: Vec<u64>,

    /// Planted pattern length for substring fixtures
    pub pattern_size: usize,

    /// Timed calls per kernel per size
    pub iterations: u32,

    /// RNG seed for fixture generation (None = from entropy)
    pub seed: Option<u64>,

    /// Fail if naive and SIMD kernels disagree on a fixture
    pub verify: bool,

    /// Show a progress bar during the sweep
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            sizes: DEFAULT_SIZES.to_vec(),
            pattern_size: DEFAULT_PATTERN_SIZE,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            verify: true,
            progress: true,
        }
    }
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Defaults are used only when there is no default file; a file that
    /// exists but cannot be read or parsed is an error.
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading config {}", path.display()), e))?;
        toml::from_str(&contents)
            .map_err(|e| Error::config(format!("parsing {}: {}", path.display(), e)))
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io("creating config dir", e))?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("serializing config: {}", e)))?;
        std::fs::write(path, contents).map_err(|e| Error::io("writing config", e))?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("bytescan").join("config.toml"))
            .ok_or_else(|| Error::config("could not determine config directory"))
    }

    /// Parse a size string like "100", "100K", "100M", "100G" into bytes
    pub fn parse_size(s: &str) -> Result<u64> {
        let s = s.trim().to_uppercase();
        if s.is_empty() {
            return Err(Error::config("empty size value"));
        }

        let (num_part, multiplier) = if let Some(n) = s.strip_suffix("KB") {
            (n, KB)
        } else if let Some(n) = s.strip_suffix("MB") {
            (n, MB)
        } else if let Some(n) = s.strip_suffix("GB") {
            (n, 1024 * MB)
        } else if let Some(n) = s.strip_suffix('K') {
            (n, KB)
        } else if let Some(n) = s.strip_suffix('M') {
            (n, MB)
        } else if let Some(n) = s.strip_suffix('G') {
            (n, 1024 * MB)
        } else if let Some(n) = s.strip_suffix('B') {
            (n, 1)
        } else {
            (s.as_str(), 1)
        };

        let num: u64 = num_part
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("invalid size value: {}", s)))?;

        num.checked_mul(multiplier)
            .ok_or_else(|| Error::config(format!("size value overflows: {}", s)))
    }

    /// Short tag used in fixture file names: "512B", "10KB", "100MB"
    pub fn size_tag(bytes: u64) -> String {
        if bytes >= MB && bytes % MB == 0 {
            format!("{}MB", bytes / MB)
        } else if bytes >= KB && bytes % KB == 0 {
            format!("{}KB", bytes / KB)
        } else {
            format!("{}B", bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sizes.len(), 6);
        assert_eq!(config.sizes[0], 1024);
        assert_eq!(config.pattern_size, 8);
        assert!(config.verify);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(Config::parse_size("512").unwrap(), 512);
        assert_eq!(Config::parse_size("1K").unwrap(), 1024);
        assert_eq!(Config::parse_size("10kb").unwrap(), 10 * 1024);
        assert_eq!(Config::parse_size(" 1M ").unwrap(), 1024 * 1024);
        assert_eq!(Config::parse_size("2GB").unwrap(), 2 * 1024 * 1024 * 1024);
        assert_eq!(Config::parse_size("64B").unwrap(), 64);
        assert!(Config::parse_size("").is_err());
        assert!(Config::parse_size("ten").is_err());
    }

    #[test]
    fn test_size_tag() {
        assert_eq!(Config::size_tag(1024), "1KB");
        assert_eq!(Config::size_tag(100 * 1024), "100KB");
        assert_eq!(Config::size_tag(10 * 1024 * 1024), "10MB");
        assert_eq!(Config::size_tag(1000), "1000B");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            sizes: vec![4096],
            seed: Some(99),
            iterations: 3,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.sizes, vec![4096]);
        assert_eq!(loaded.seed, Some(99));
        assert_eq!(loaded.iterations, 3);
        assert_eq!(loaded.pattern_size, DEFAULT_PATTERN_SIZE);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "iterations = 2\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.iterations, 2);
        assert_eq!(loaded.sizes, DEFAULT_SIZES.to_vec());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "iterations = \"many\"\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config { .. })));
    }
}
