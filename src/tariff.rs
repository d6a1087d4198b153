//! Tariff rate resolution engine
//!
//! Parses the published per-company tariff document and resolves the typed
//! rate schedule for one configured distribution company. The engine is
//! parameterized by an extraction profile: the canonical natural-gas field
//! set with tiered delivery charges, or the legacy electricity field set
//! with flat off/mid/on-peak rates.

pub mod document;
pub mod resolver;
pub mod schedule;
pub mod types;

// Re-exports for the public API surface
pub use document::{CompanyRecord, ParseError, TariffDocument};
pub use resolver::{RateResolver, ResolveError};
pub use schedule::{PeakPeriod, peak_period_at};
pub use types::{
    ElectricityRates, ExtractionProfile, NaturalGasRates, RateSnapshot, ResolvedRates, TieredBand,
};
