//! Configuration loading and management for the attendance rule engine.
//!
//! This module loads per-company settings (grace periods, break limits,
//! default schedule, currency) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Loaded companies: {:?}", config.company_ids());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AttendancePolicy, BreakPolicy, CompanySettings, EngineConfig, WorkSchedule};
