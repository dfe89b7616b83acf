//! Configuration types for company settings.
//!
//! This module contains the strongly-typed settings structures that are
//! deserialized from the per-company YAML files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::TimeOfDay;

/// Grace periods applied when deriving attendance status.
///
/// Both values are unsigned: a negative grace period is rejected when the
/// settings are deserialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePolicy {
    /// Minutes after the scheduled start before a check-in counts as late.
    pub late_grace_minutes: u32,
    /// Minutes before the scheduled end before a check-out counts as early.
    pub early_departure_grace_minutes: u32,
}

/// Break limits for an attendance day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPolicy {
    /// Maximum number of break sessions per attendance day. Must be positive.
    pub max_breaks_per_day: u32,
}

/// The company's default working hours.
///
/// Used for attendance records that arrive without their own schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSchedule {
    /// Default scheduled start.
    pub start: TimeOfDay,
    /// Default scheduled end.
    pub end: TimeOfDay,
}

/// Settings for a single company (tenant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySettings {
    /// The tenant identifier.
    pub company_id: String,
    /// Display name of the company.
    pub name: String,
    /// ISO currency code payroll amounts are expressed in.
    pub currency: String,
    /// Default working hours.
    pub schedule: WorkSchedule,
    /// Attendance grace periods.
    pub attendance: AttendancePolicy,
    /// Break limits.
    pub breaks: BreakPolicy,
}

impl CompanySettings {
    /// Checks the constraints serde cannot express.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::InvalidConfig {
            company_id: self.company_id.clone(),
            message: message.to_string(),
        };

        if self.company_id.trim().is_empty() {
            return Err(invalid("company_id must not be empty"));
        }
        if self.breaks.max_breaks_per_day == 0 {
            return Err(invalid("max_breaks_per_day must be positive"));
        }
        if self.schedule.start >= self.schedule.end {
            return Err(invalid("schedule start must be before schedule end"));
        }
        Ok(())
    }
}

/// All loaded company settings, keyed by company id.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    companies: HashMap<String, CompanySettings>,
}

impl EngineConfig {
    /// Builds the configuration from validated settings.
    ///
    /// Fails if any settings are invalid or two files share a company id.
    pub fn new(settings: Vec<CompanySettings>) -> EngineResult<Self> {
        let mut companies = HashMap::with_capacity(settings.len());

        for company in settings {
            company.validate()?;
            let id = company.company_id.clone();
            if companies.insert(id.clone(), company).is_some() {
                return Err(EngineError::InvalidConfig {
                    company_id: id,
                    message: "company_id is defined more than once".to_string(),
                });
            }
        }

        Ok(Self { companies })
    }

    /// Returns the settings for a company, if loaded.
    pub fn company(&self, company_id: &str) -> Option<&CompanySettings> {
        self.companies.get(company_id)
    }

    /// Returns all loaded companies.
    pub fn companies(&self) -> &HashMap<String, CompanySettings> {
        &self.companies
    }
}
