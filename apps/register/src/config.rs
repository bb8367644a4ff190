//! # Register Configuration
//!
//! Store identity, table count, UPI payee and storage locations.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BHOJAN_DB_PATH, BHOJAN_STORE_NAME, BHOJAN_TABLE_COUNT,             │
//! │     BHOJAN_UPI_ID, BHOJAN_UPI_NAME, BHOJAN_SALES_CSV                   │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform config dir)            │
//! │     ~/.config/bhojan-pos/register.toml (Linux)                         │
//! │     ~/Library/Application Support/com.bhojan.pos/register.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Bharat Bhojan"
//! currency_symbol = "₹"
//! currency_code = "INR"
//!
//! [tables]
//! count = 6
//!
//! [upi]
//! payee_id = "racharlas183-1@oksbi"
//! payee_name = "BharatBhojan"
//!
//! [storage]
//! database_path = "/var/lib/bhojan/bhojan.db"
//! sales_csv = "/var/lib/bhojan/sales_report.csv"
//! lock_wait_secs = 5
//! ```

use serde::Deserialize;
use std::time::Duration;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use bhojan_core::payment_link::UpiPayee;
use bhojan_core::DEFAULT_TABLE_COUNT;

use crate::error::{RegisterError, RegisterResult};

/// Most tables a register will manage.
pub const MAX_TABLE_COUNT: usize = 100;

const CONFIG_FILE_NAME: &str = "register.toml";
const DATABASE_FILE_NAME: &str = "bhojan.db";

// =============================================================================
// Sections
// =============================================================================

/// Printed on receipts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// ISO 4217 code used in payment links.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

fn default_store_name() -> String {
    "Bharat Bhojan".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_currency_code() -> String {
    "INR".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
            currency_code: default_currency_code(),
        }
    }
}

/// Dine-in tables `T1..Tn`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_table_count")]
    pub count: usize,
}

fn default_table_count() -> usize {
    DEFAULT_TABLE_COUNT
}

impl Default for TableSettings {
    fn default() -> Self {
        TableSettings {
            count: default_table_count(),
        }
    }
}

/// Who UPI payments go to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpiSettings {
    #[serde(default = "default_payee_id")]
    pub payee_id: String,

    #[serde(default = "default_payee_name")]
    pub payee_name: String,
}

fn default_payee_id() -> String {
    "racharlas183-1@oksbi".to_string()
}

fn default_payee_name() -> String {
    "BharatBhojan".to_string()
}

impl Default for UpiSettings {
    fn default() -> Self {
        UpiSettings {
            payee_id: default_payee_id(),
            payee_name: default_payee_name(),
        }
    }
}

/// Where data lives. Unset paths fall back to the platform data dir
/// (database) or are disabled (sales CSV).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Every recorded sale is also appended here when set.
    #[serde(default)]
    pub sales_csv: Option<PathBuf>,

    /// Seconds a write waits while another register holds the database.
    #[serde(default = "default_lock_wait_secs")]
    pub lock_wait_secs: u64,
}

fn default_lock_wait_secs() -> u64 {
    5
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            sales_csv: None,
            lock_wait_secs: default_lock_wait_secs(),
        }
    }
}

// =============================================================================
// Register Configuration
// =============================================================================

/// Complete register configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub tables: TableSettings,

    #[serde(default)]
    pub upi: UpiSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl RegisterConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`register.toml`); a missing file is not an error
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> RegisterResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Reads one TOML file, without environment overrides.
    pub fn from_file(path: &Path) -> RegisterResult<Self> {
        info!(?path, "Loading register config from file");
        let contents =
            std::fs::read_to_string(path).map_err(|e| RegisterError::file(path, e))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Checks values a file or the environment could have broken.
    pub fn validate(&self) -> RegisterResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(RegisterError::config("store name must not be empty"));
        }

        if self.tables.count == 0 || self.tables.count > MAX_TABLE_COUNT {
            return Err(RegisterError::config(format!(
                "table count must be between 1 and {}, got {}",
                MAX_TABLE_COUNT, self.tables.count
            )));
        }

        if !self.upi.payee_id.contains('@') {
            return Err(RegisterError::config(format!(
                "UPI payee id must look like name@bank, got '{}'",
                self.upi.payee_id
            )));
        }

        Ok(())
    }

    /// Applies `BHOJAN_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BHOJAN_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("BHOJAN_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(count) = lookup("BHOJAN_TABLE_COUNT") {
            match count.parse::<usize>() {
                Ok(n) => self.tables.count = n,
                Err(_) => warn!(value = %count, "Ignoring non-numeric BHOJAN_TABLE_COUNT"),
            }
        }

        if let Some(id) = lookup("BHOJAN_UPI_ID") {
            self.upi.payee_id = id;
        }

        if let Some(name) = lookup("BHOJAN_UPI_NAME") {
            self.upi.payee_name = name;
        }

        if let Some(path) = lookup("BHOJAN_SALES_CSV") {
            self.storage.sales_csv = Some(PathBuf::from(path));
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "bhojan", "pos")
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Database file to open: the configured path, else the platform data
    /// dir (created if missing).
    pub fn database_path(&self) -> RegisterResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = Self::project_dirs()
            .ok_or_else(|| RegisterError::config("could not determine app data directory"))?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|e| RegisterError::file(data_dir, e))?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }

    /// How long a write waits on another register's database lock.
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(self.storage.lock_wait_secs)
    }

    /// Payee for UPI links.
    pub fn upi_payee(&self) -> UpiPayee {
        UpiPayee {
            id: self.upi.payee_id.clone(),
            name: self.upi.payee_name.clone(),
            currency: self.store.currency_code.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegisterConfig::default();
        assert_eq!(config.store.name, "Bharat Bhojan");
        assert_eq!(config.store.currency_symbol, "₹");
        assert_eq!(config.tables.count, 6);
        assert!(config.storage.sales_csv.is_none());
        assert_eq!(config.lock_wait(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("register.toml");
        std::fs::write(
            &path,
            "[tables]\ncount = 10\n\n[store]\nname = \"Udupi Corner\"\n\n[storage]\nlock_wait_secs = 12\n",
        )
        .unwrap();

        let config = RegisterConfig::from_file(&path).unwrap();
        assert_eq!(config.tables.count, 10);
        assert_eq!(config.lock_wait(), Duration::from_secs(12));
        assert!(config.storage.sales_csv.is_none());
        assert_eq!(config.store.name, "Udupi Corner");
        assert_eq!(config.store.currency_code, "INR");
        assert_eq!(config.upi, UpiSettings::default());
    }

    #[test]
    fn test_bad_toml_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("register.toml");
        std::fs::write(&path, "[tables]\ncount = \"many\"\n").unwrap();

        assert!(matches!(
            RegisterConfig::from_file(&path),
            Err(RegisterError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("BHOJAN_DB_PATH", "/tmp/bhojan-test.db"),
            ("BHOJAN_TABLE_COUNT", "3"),
            ("BHOJAN_UPI_ID", "cafe@okaxis"),
            ("BHOJAN_SALES_CSV", "/tmp/sales.csv"),
        ]);

        let mut config = RegisterConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.tables.count, 3);
        assert_eq!(config.upi.payee_id, "cafe@okaxis");
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/bhojan-test.db")
        );
        assert_eq!(config.storage.sales_csv, Some(PathBuf::from("/tmp/sales.csv")));
        // Untouched
        assert_eq!(config.store.name, "Bharat Bhojan");
    }

    #[test]
    fn test_non_numeric_table_count_ignored() {
        let mut config = RegisterConfig::default();
        config.apply_overrides(|key| (key == "BHOJAN_TABLE_COUNT").then(|| "lots".to_string()));
        assert_eq!(config.tables.count, 6);
    }

    #[test]
    fn test_validation() {
        let mut config = RegisterConfig::default();

        config.tables.count = 0;
        assert!(config.validate().is_err());
        config.tables.count = MAX_TABLE_COUNT + 1;
        assert!(config.validate().is_err());
        config.tables.count = 6;

        config.upi.payee_id = "not-a-vpa".to_string();
        assert!(config.validate().is_err());
        config.upi.payee_id = default_payee_id();

        config.store.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_upi_payee_uses_currency_code() {
        let mut config = RegisterConfig::default();
        config.store.currency_code = "NPR".to_string();
        let payee = config.upi_payee();
        assert_eq!(payee.currency, "NPR");
        assert_eq!(payee.id, "racharlas183-1@oksbi");
    }
}
