//! Rate resolution for one configured company
//!
//! Extraction is all-or-nothing: a snapshot is built into locals and only
//! published once every required field of the active profile has been
//! located and converted. A refresh that fails at any step leaves the
//! previously resolved snapshot wholly intact.

use super::document::{CompanyRecord, ParseError, TariffDocument};
use super::types::{
    ElectricityRates, ExtractionProfile, NaturalGasRates, RateSnapshot, ResolvedRates, TieredBand,
};
use super::types::{
    XML_KEY_DELIVERY_CHARGE_PRICE_ADJUSTMENT, XML_KEY_FACILITY_CARBON_CHARGE,
    XML_KEY_FEDERAL_CARBON_CHARGE, XML_KEY_GAS_SUPPLY_CHARGE,
    XML_KEY_GAS_SUPPLY_CHARGE_PRICE_ADJUSTMENT, XML_KEY_GST, XML_KEY_MID_PEAK_RATE,
    XML_KEY_MONTHLY_CHARGE, XML_KEY_OFF_PEAK_RATE, XML_KEY_ON_PEAK_RATE,
    XML_KEY_TRANSPORTATION_CHARGE, XML_KEY_TRANSPORTATION_CHARGE_PRICE_ADJUSTMENT,
    XML_KEYS_DELIVERY_TIERS,
};
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use std::sync::Arc;
use thiserror::Error;

/// Failure kinds for one resolution attempt
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The feed text was not well-formed markup
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No record in the document matched the configured company key
    #[error("no tariff record found for company {0:?}")]
    CompanyNotFound(String),

    /// A required field key was absent from the matched record
    #[error("required field {key:?} missing from tariff record")]
    FieldMissing { key: &'static str },

    /// A required field's raw text did not convert to a number
    #[error("field {key:?} holds unparseable value {value:?}")]
    FieldParse { key: &'static str, value: String },

    /// Parsed tier thresholds contradict the band ordering invariant
    #[error("delivery tiers violate threshold ordering: {detail}")]
    InvalidTiers { detail: String },
}

/// Resolves and caches the rate schedule for one company
///
/// Stateless across calls except for the last successfully resolved
/// snapshot, which stays authoritative through any number of failed
/// refreshes.
pub struct RateResolver {
    company_key: String,
    profile: ExtractionProfile,
    logger: StructuredLogger,
    last_good: Option<Arc<RateSnapshot>>,
}

impl RateResolver {
    /// Create a resolver for one company and extraction profile
    pub fn new<S: Into<String>>(company_key: S, profile: ExtractionProfile) -> Self {
        let company_key = company_key.into();
        let logger = get_logger_with_context(
            LogContext::new("tariff").with_company(company_key.clone()),
        );
        Self {
            company_key,
            profile,
            logger,
            last_good: None,
        }
    }

    /// Company key records are matched against
    pub fn company_key(&self) -> &str {
        &self.company_key
    }

    /// Active extraction profile
    pub fn profile(&self) -> ExtractionProfile {
        self.profile
    }

    /// Most recent successfully resolved snapshot, if any
    pub fn last_snapshot(&self) -> Option<Arc<RateSnapshot>> {
        self.last_good.clone()
    }

    /// Parse the feed text and resolve the configured company's rates
    ///
    /// On success the cached snapshot is replaced atomically; on failure it
    /// is left untouched and the error is reported upward.
    pub fn resolve(&mut self, text: &str) -> Result<Arc<RateSnapshot>, ResolveError> {
        let document = TariffDocument::parse(text)?;
        let snapshot = self.resolve_document(&document)?;
        let snapshot = Arc::new(snapshot);
        self.last_good = Some(Arc::clone(&snapshot));
        self.logger.debug(&format!(
            "Resolved {} fields for {}",
            snapshot.attributes().len(),
            snapshot.company
        ));
        Ok(snapshot)
    }

    /// Resolve against an already parsed document without touching the cache
    pub fn resolve_document(&self, document: &TariffDocument) -> Result<RateSnapshot, ResolveError> {
        let record = document.find_company(&self.company_key).ok_or_else(|| {
            self.logger.error(&format!(
                "Could not find energy rates for {}",
                self.company_key
            ));
            ResolveError::CompanyNotFound(self.company_key.clone())
        })?;

        let rates = match self.profile {
            ExtractionProfile::NaturalGas => {
                ResolvedRates::NaturalGas(extract_natural_gas(record)?)
            }
            ExtractionProfile::Electricity => {
                ResolvedRates::Electricity(extract_electricity(record)?)
            }
        };

        Ok(RateSnapshot {
            company: self.company_key.clone(),
            captured_at: chrono::Utc::now(),
            rates,
        })
    }
}

/// Extract one required numeric field from a record
fn required_field(record: &CompanyRecord, key: &'static str) -> Result<f64, ResolveError> {
    let raw = record
        .field(key)
        .ok_or(ResolveError::FieldMissing { key })?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ResolveError::FieldParse {
            key,
            value: raw.to_string(),
        })
}

fn extract_natural_gas(record: &CompanyRecord) -> Result<NaturalGasRates, ResolveError> {
    let monthly_charge = required_field(record, XML_KEY_MONTHLY_CHARGE)?;
    let gas_supply_charge = required_field(record, XML_KEY_GAS_SUPPLY_CHARGE)?;
    let gas_supply_charge_price_adjustment =
        required_field(record, XML_KEY_GAS_SUPPLY_CHARGE_PRICE_ADJUSTMENT)?;
    let transportation_charge = required_field(record, XML_KEY_TRANSPORTATION_CHARGE)?;
    let transportation_charge_price_adjustment =
        required_field(record, XML_KEY_TRANSPORTATION_CHARGE_PRICE_ADJUSTMENT)?;
    let delivery_charge_price_adjustment =
        required_field(record, XML_KEY_DELIVERY_CHARGE_PRICE_ADJUSTMENT)?;
    let facility_carbon_charge = required_field(record, XML_KEY_FACILITY_CARBON_CHARGE)?;
    let federal_carbon_charge = required_field(record, XML_KEY_FEDERAL_CARBON_CHARGE)?;
    let gst = required_field(record, XML_KEY_GST)?;

    let mut delivery_tiers = Vec::with_capacity(XML_KEYS_DELIVERY_TIERS.len());
    for [charge_key, start_key, end_key] in XML_KEYS_DELIVERY_TIERS {
        delivery_tiers.push(TieredBand {
            unit_charge: required_field(record, charge_key)?,
            threshold_start: required_field(record, start_key)?,
            threshold_end: required_field(record, end_key)?,
        });
    }
    validate_tiers(&delivery_tiers)?;

    Ok(NaturalGasRates {
        monthly_charge,
        gas_supply_charge,
        gas_supply_charge_price_adjustment,
        transportation_charge,
        transportation_charge_price_adjustment,
        delivery_charge_price_adjustment,
        facility_carbon_charge,
        federal_carbon_charge,
        gst,
        delivery_tiers,
    })
}

fn extract_electricity(record: &CompanyRecord) -> Result<ElectricityRates, ResolveError> {
    Ok(ElectricityRates {
        off_peak_rate: required_field(record, XML_KEY_OFF_PEAK_RATE)?,
        mid_peak_rate: required_field(record, XML_KEY_MID_PEAK_RATE)?,
        on_peak_rate: required_field(record, XML_KEY_ON_PEAK_RATE)?,
    })
}

/// Tier 1 covers the lowest consumption volumes; each band must be
/// internally ordered and band ranges must not decrease across tiers.
fn validate_tiers(tiers: &[TieredBand]) -> Result<(), ResolveError> {
    for (i, band) in tiers.iter().enumerate() {
        if !band.is_ordered() {
            return Err(ResolveError::InvalidTiers {
                detail: format!(
                    "tier {} start {} exceeds end {}",
                    i + 1,
                    band.threshold_start,
                    band.threshold_end
                ),
            });
        }
    }
    for (i, pair) in tiers.windows(2).enumerate() {
        if pair[1].threshold_start < pair[0].threshold_start
            || pair[1].threshold_end < pair[0].threshold_end
        {
            return Err(ResolveError::InvalidTiers {
                detail: format!("tier {} range precedes tier {}", i + 2, i + 1),
            });
        }
    }
    Ok(())
}
