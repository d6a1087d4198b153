//! # Hestia - Ontario Energy Board Tariff Rate Driver
//!
//! A Rust implementation of the tariff rate driver, periodically resolving
//! the published rate schedule for one configured distribution company and
//! exposing it as an immutable typed snapshot with last-known-good
//! semantics.
//!
//! ## Features
//!
//! - **Bounded-time retrieval**: one request per refresh with a hard timeout
//! - **Typed resolution**: all-or-nothing extraction into an immutable snapshot
//! - **Last-known-good**: failed refreshes never disturb the prior snapshot
//! - **Two profiles**: natural-gas tiered tariffs and legacy electricity rates
//! - **Time-of-use helpers**: holiday-aware off/mid/on-peak selection
//! - **Configuration**: YAML-based configuration with validation
//!
//! ## Architecture
//!
//! The crate follows a modular architecture with clear separation of concerns:
//!
//! - `config`: Configuration management and validation
//! - `logging`: Structured logging and tracing
//! - `feed`: Bounded-time retrieval of the published tariff document
//! - `tariff`: Document parsing, rate resolution, time-of-use selection
//! - `calendar`: Regional holiday calendar
//! - `driver`: Refresh scheduling and snapshot publication

pub mod calendar;
pub mod config;
pub mod driver;
pub mod error;
pub mod feed;
pub mod logging;
pub mod tariff;

// Re-export commonly used types
pub use config::Config;
pub use driver::{RateDriver, RefreshError};
pub use error::{HestiaError, Result};
pub use tariff::{RateSnapshot, ResolvedRates};
