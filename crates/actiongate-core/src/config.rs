use crate::error::{GateError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Show an action's success message after its procedure completes.
    #[serde(default = "default_true")]
    pub notify_on_success: bool,
    /// Ignore re-activation of an action whose call is still in flight.
    #[serde(default = "default_true")]
    pub block_while_pending: bool,
}

fn default_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            notify_on_success: true,
            block_while_pending: true,
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(GateError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Write the default config unless one exists. Returns true if written.
    pub fn init(root: &Path) -> Result<bool> {
        std::fs::create_dir_all(root.join(paths::RECORDS_DIR))?;
        let data = serde_yaml::to_string(&Config::default())?;
        crate::io::write_if_missing(&paths::config_path(root), data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_without_init_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(GateError::NotInitialized)
        ));
    }

    #[test]
    fn init_then_load_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert!(Config::init(dir.path()).unwrap());
        assert!(!Config::init(dir.path()).unwrap());
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
        assert!(dir.path().join(paths::RECORDS_DIR).is_dir());
    }

    #[test]
    fn missing_keys_take_defaults() {
        let cfg: Config = serde_yaml::from_str("block_while_pending: false\n").unwrap();
        assert!(!cfg.block_while_pending);
        assert!(cfg.notify_on_success);
        assert_eq!(cfg.version, 1);
    }

    #[test]
    fn save_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cfg = Config {
            notify_on_success: false,
            ..Config::default()
        };
        cfg.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), cfg);
    }
}
