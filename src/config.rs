//! Parking configuration
//!
//! Layered sources, later ones win:
//!
//! 1. built-in defaults
//! 2. optional TOML file (`valet.toml` unless told otherwise)
//! 3. environment, `VALET_` prefix with `__` between nested keys,
//!    e.g. `VALET_SLOTS__SMALL=5`

use crate::error::{Error, Result};
use crate::slots::{SlotCapacities, SlotPool};
use crate::valet::ParkingClass;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "valet.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "VALET";

/// Logging settings consumed by the binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub dir: PathBuf,
    pub file: String,
    /// trace, debug, info, warn or error
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingConfig {
    pub parking_class: ParkingClass,
    /// Where open tickets are kept
    pub tickets_path: PathBuf,
    /// Initial number of slots per size
    pub slots: SlotCapacities,
    pub log: LogConfig,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            parking_class: ParkingClass::Car,
            tickets_path: PathBuf::from("tickets.json"),
            slots: SlotCapacities::default(),
            log: LogConfig {
                dir: PathBuf::from("."),
                file: "parking.log".to_string(),
                level: "info".to_string(),
            },
        }
    }
}

impl ParkingConfig {
    /// Load defaults, then `path` (or `valet.toml`) if present, then `VALET_*`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: &Path, env_prefix: &str) -> Result<Self> {
        let defaults = Self::default();

        let settings = ::config::Config::builder()
            .set_default("slots.small", defaults.slots.small)?
            .set_default("slots.medium", defaults.slots.medium)?
            .set_default("slots.large", defaults.slots.large)?
            .set_default("parking_class", defaults.parking_class.to_string())?
            .set_default("tickets_path", defaults.tickets_path.to_string_lossy().into_owned())?
            .set_default("log.dir", defaults.log.dir.to_string_lossy().into_owned())?
            .set_default("log.file", defaults.log.file)?
            .set_default("log.level", defaults.log.level)?
            .add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Build the slot pool from the configured capacities
    pub fn slot_pool(&self) -> Result<SlotPool> {
        SlotPool::new(self.slots)
    }

    /// Render the effective configuration
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("Failed to render config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, contents: &str) -> Result<PathBuf> {
        let path = temp.path().join("valet.toml");
        std::fs::write(&path, contents).map_err(|e| Error::Storage(e.to_string()))?;
        Ok(path)
    }

    #[test]
    fn test_defaults_without_file() -> Result<()> {
        let temp = TempDir::new().map_err(|e| Error::Storage(e.to_string()))?;
        let config =
            ParkingConfig::load_with_prefix(&temp.path().join("missing.toml"), "VALET_TEST_NONE")?;
        assert_eq!(config, ParkingConfig::default());
        Ok(())
    }

    #[test]
    fn test_file_overrides_defaults() -> Result<()> {
        let temp = TempDir::new().map_err(|e| Error::Storage(e.to_string()))?;
        let path = write_config(
            &temp,
            r#"
tickets_path = "/var/lib/valet/tickets.json"

[slots]
small = 1
medium = 0
large = 1
"#,
        )?;

        let config = ParkingConfig::load_with_prefix(&path, "VALET_TEST_FILE")?;
        assert_eq!(config.slots, SlotCapacities::new(1, 0, 1));
        assert_eq!(
            config.tickets_path,
            PathBuf::from("/var/lib/valet/tickets.json")
        );
        assert_eq!(config.log.file, "parking.log");
        Ok(())
    }

    #[test]
    fn test_environment_overrides_file() -> Result<()> {
        let temp = TempDir::new().map_err(|e| Error::Storage(e.to_string()))?;
        let path = write_config(&temp, "[slots]\nsmall = 3\n")?;

        std::env::set_var("VALET_TEST_ENV_SLOTS__SMALL", "7");
        std::env::set_var("VALET_TEST_ENV_LOG__LEVEL", "debug");
        let config = ParkingConfig::load_with_prefix(&path, "VALET_TEST_ENV");
        std::env::remove_var("VALET_TEST_ENV_SLOTS__SMALL");
        std::env::remove_var("VALET_TEST_ENV_LOG__LEVEL");

        let config = config?;
        assert_eq!(config.slots.small, 7);
        assert_eq!(config.slots.medium, 20);
        assert_eq!(config.log.level, "debug");
        Ok(())
    }

    #[test]
    fn test_negative_capacity_is_fatal() -> Result<()> {
        let temp = TempDir::new().map_err(|e| Error::Storage(e.to_string()))?;
        let path = write_config(&temp, "[slots]\nmedium = -4\n")?;

        let config = ParkingConfig::load_with_prefix(&path, "VALET_TEST_NEG")?;
        assert!(matches!(config.slot_pool(), Err(Error::Configuration(_))));
        Ok(())
    }

    #[test]
    fn test_unknown_parking_class_rejected() -> Result<()> {
        let temp = TempDir::new().map_err(|e| Error::Storage(e.to_string()))?;
        let path = write_config(&temp, "parking_class = \"truck\"\n")?;

        assert!(matches!(
            ParkingConfig::load_with_prefix(&path, "VALET_TEST_CLASS"),
            Err(Error::Configuration(_))
        ));
        Ok(())
    }

    #[test]
    fn test_to_toml() -> Result<()> {
        let rendered = ParkingConfig::default().to_toml()?;
        assert!(rendered.contains("parking_class = \"car\""));
        assert!(rendered.contains("[slots]"));
        assert!(rendered.contains("small = 10"));
        Ok(())
    }
}
