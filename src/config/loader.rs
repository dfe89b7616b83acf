//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading company
//! settings from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{AttendancePolicy, BreakPolicy, CompanySettings, EngineConfig};

/// Loads and provides access to per-company settings.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/
/// └── companies/
///     ├── acme.yaml     # One file per company
///     └── globex.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// let acme = loader.get_company("acme").unwrap();
/// println!("{} allows {} breaks", acme.name, acme.breaks.max_breaks_per_day);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads every company file from `<path>/companies`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The companies directory is missing or holds no YAML files
    /// - Any file contains invalid YAML or misses a required field
    /// - Any company violates a settings constraint
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let companies_dir = path.as_ref().join("companies");
        let settings = Self::load_companies(&companies_dir)?;

        info!(
            path = %companies_dir.display(),
            companies = settings.len(),
            "Loaded company settings"
        );

        Self::from_settings(settings)
    }

    /// Builds a loader from settings that are already in memory.
    pub fn from_settings(settings: Vec<CompanySettings>) -> EngineResult<Self> {
        Ok(Self {
            config: EngineConfig::new(settings)?,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all company files from the companies directory.
    fn load_companies(companies_dir: &Path) -> EngineResult<Vec<CompanySettings>> {
        let dir_str = companies_dir.display().to_string();

        let entries = fs::read_dir(companies_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no company files found)", dir_str),
            });
        }

        // Directory order is platform dependent.
        paths.sort();

        paths
            .iter()
            .map(|path| {
                debug!(path = %path.display(), "Loading company settings");
                Self::load_yaml::<CompanySettings>(path)
            })
            .collect()
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Gets the settings for a company.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config")?;
    /// let settings = loader.get_company("acme")?;
    /// println!("Currency: {}", settings.currency);
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn get_company(&self, company_id: &str) -> EngineResult<&CompanySettings> {
        self.config
            .company(company_id)
            .ok_or_else(|| EngineError::CompanyNotFound {
                company_id: company_id.to_string(),
            })
    }

    /// Gets a company's attendance grace periods.
    pub fn attendance_policy(&self, company_id: &str) -> EngineResult<AttendancePolicy> {
        Ok(self.get_company(company_id)?.attendance)
    }

    /// Gets a company's break limits.
    pub fn break_policy(&self, company_id: &str) -> EngineResult<BreakPolicy> {
        Ok(self.get_company(company_id)?.breaks)
    }

    /// Returns the loaded company ids in sorted order.
    pub fn company_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .config
            .companies()
            .keys()
            .map(String::as_str)
            .collect();
        ids.sort_unstable();
        ids
    }
}
