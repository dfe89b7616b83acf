//! Application state for the evaluation API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{CompanySettings, ConfigLoader};
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the loaded company settings; handlers only read them.
#[derive(Clone)]
pub struct AppState {
    /// The loaded company settings.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Looks up a company's settings.
    pub fn company(&self, company_id: &str) -> EngineResult<&CompanySettings> {
        self.config.get_company(company_id)
    }
}
