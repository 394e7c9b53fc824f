// Configuration loading

use crate::models::InsertOrder;
use crate::slot::{self, FileSlot};
use crate::store::{DEFAULT_SLOT_KEY, TaskStore};
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "taskplanner";
const CONFIG_FILE: &str = "config.yml";

/// Runtime configuration, read from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the slot files
    pub store_path: PathBuf,
    /// Keep tasks between runs
    pub persist: bool,
    /// Where new tasks are inserted
    pub order: InsertOrder,
    /// Slot the task list is stored under
    pub slot_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            persist: true,
            order: InsertOrder::default(),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// used if present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!(file = ?path, "Loading config");
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to null rather than an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        slot::validate_key(&self.slot_key).context("Invalid slot_key")?;
        if self.persist && self.store_path.as_os_str().is_empty() {
            return Err(eyre!("store_path must not be empty when persist is enabled"));
        }
        Ok(())
    }

    /// Build the store this configuration describes
    pub fn open_store(&self) -> Result<TaskStore> {
        if !self.persist {
            info!("Persistence disabled, tasks will not be saved");
            return Ok(TaskStore::in_memory(self.order));
        }

        TaskStore::open(FileSlot::new(&self.store_path), &self.slot_key, self.order)
            .with_context(|| format!("Failed to open task store at {:?}", self.store_path))
    }
}

/// `<config dir>/taskplanner/config.yml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}

/// `<data dir>/taskplanner`, falling back to `.taskplanner` in the working directory
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".taskplanner"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.persist);
        assert_eq!(config.order, InsertOrder::NewestFirst);
        assert_eq!(config.slot_key, "tasks");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("order: oldest_first\n").unwrap();
        assert_eq!(config.order, InsertOrder::OldestFirst);
        assert!(config.persist);
        assert_eq!(config.slot_key, "tasks");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "store_path: /tmp/tp\npersist: false\norder: newest_first\nslot_key: work\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/tp"));
        assert!(!config.persist);
        assert_eq!(config.slot_key, "work");
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(Config::from_yaml("order: sideways\n").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_slot_key() {
        let config = Config {
            slot_key: "../tasks".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "slot_key: mine\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.slot_key, "mine");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let temp = TempDir::new().unwrap();
        assert!(Config::load(Some(&temp.path().join("nope.yml"))).is_err());
    }

    #[test]
    fn test_open_store_persistent() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            store_path: temp.path().to_path_buf(),
            ..Config::default()
        };

        let mut store = config.open_store().unwrap();
        assert!(store.is_persistent());
        store
            .add_task(crate::models::TaskFields::new("a", "b", "c", "", "todo"))
            .unwrap();

        assert!(temp.path().join("tasks.json").exists());
        assert_eq!(config.open_store().unwrap().tasks().len(), 1);
    }

    #[test]
    fn test_open_store_in_memory() {
        let config = Config {
            persist: false,
            order: InsertOrder::OldestFirst,
            ..Config::default()
        };

        let store = config.open_store().unwrap();
        assert!(!store.is_persistent());
        assert_eq!(store.order(), InsertOrder::OldestFirst);
    }
}
