//! Test Module
//!
//! Cross-module test suite for the classnote core.
//!
//! ## Test Categories
//! - `brain_tests`: Temporal resolution, segmentation, name extraction, severity, intent
//! - `config_tests`: Environment-driven configuration
//! - `integration_tests`: Full command interpretation scenarios
