//! Attendance rule engine for the HR dashboard.
//!
//! This crate derives attendance status from check-in/out times and grace
//! periods, validates the break sessions recorded for an attendance day, and
//! verifies payroll breakdown arithmetic. The rules are pure functions; the
//! `config` and `api` modules wrap them with per-company settings and an HTTP
//! evaluation surface.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod rules;
