//! Typed rate records and the feed's field-key vocabulary

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Element name of one company's tariff record in the feed
pub const RECORD_TAG: &str = "GasBillData";

/// Company-name child element; records are matched against it verbatim
pub const XML_KEY_COMPANY: &str = "Dist";

pub const XML_KEY_MONTHLY_CHARGE: &str = "MC";
pub const XML_KEY_GAS_SUPPLY_CHARGE: &str = "CM";
pub const XML_KEY_GAS_SUPPLY_CHARGE_PRICE_ADJUSTMENT: &str = "CMPA";
pub const XML_KEY_TRANSPORTATION_CHARGE: &str = "TC";
pub const XML_KEY_TRANSPORTATION_CHARGE_PRICE_ADJUSTMENT: &str = "TCPA";
pub const XML_KEY_DELIVERY_CHARGE_PRICE_ADJUSTMENT: &str = "DCPA";
pub const XML_KEY_FACILITY_CARBON_CHARGE: &str = "FacCC";
pub const XML_KEY_FEDERAL_CARBON_CHARGE: &str = "FedCC";
pub const XML_KEY_GST: &str = "GST";

pub const XML_KEY_OFF_PEAK_RATE: &str = "OffPeakRate";
pub const XML_KEY_MID_PEAK_RATE: &str = "MidPeakRate";
pub const XML_KEY_ON_PEAK_RATE: &str = "OnPeakRate";

/// Per-tier key triples: unit charge, threshold start, threshold end
pub const XML_KEYS_DELIVERY_TIERS: [[&str; 3]; 4] = [
    ["DCT1", "DCT1Start", "DCT1End"],
    ["DCT2", "DCT2Start", "DCT2End"],
    ["DCT3", "DCT3Start", "DCT3End"],
    ["DCT4", "DCT4Start", "DCT4End"],
];

/// Field extraction profile selecting which record children are required
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionProfile {
    /// Canonical natural-gas tariff fields including tiered delivery charges
    NaturalGas,
    /// Legacy flat off/mid/on-peak electricity rates
    Electricity,
}

impl ExtractionProfile {
    /// Parse a profile from its configuration name
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "natural_gas" => Some(Self::NaturalGas),
            "electricity" => Some(Self::Electricity),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NaturalGas => "natural_gas",
            Self::Electricity => "electricity",
        }
    }
}

/// One consumption bracket of a stepped delivery charge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TieredBand {
    /// Lower consumption threshold of the bracket
    pub threshold_start: f64,
    /// Upper consumption threshold of the bracket
    pub threshold_end: f64,
    /// Charge per unit of consumption within the bracket
    pub unit_charge: f64,
}

impl TieredBand {
    /// Whether the band's own thresholds are ordered
    pub fn is_ordered(&self) -> bool {
        self.threshold_start <= self.threshold_end
    }
}

/// Resolved natural-gas tariff fields
///
/// Percentage/adjustment fields (CMPA, TCPA, DCPA, GST) are exposed exactly
/// as published; whether they combine additively or multiplicatively with
/// the base charges is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaturalGasRates {
    pub monthly_charge: f64,
    pub gas_supply_charge: f64,
    pub gas_supply_charge_price_adjustment: f64,
    pub transportation_charge: f64,
    pub transportation_charge_price_adjustment: f64,
    pub delivery_charge_price_adjustment: f64,
    pub facility_carbon_charge: f64,
    pub federal_carbon_charge: f64,
    pub gst: f64,
    /// Four ordered delivery-charge consumption brackets
    pub delivery_tiers: Vec<TieredBand>,
}

/// Resolved legacy electricity rates (flat per-period values)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElectricityRates {
    pub off_peak_rate: f64,
    pub mid_peak_rate: f64,
    pub on_peak_rate: f64,
}

/// Profile-tagged resolved rate fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedRates {
    NaturalGas(NaturalGasRates),
    Electricity(ElectricityRates),
}

/// The resolved, typed output of one successful refresh
///
/// Immutable once constructed; a failed refresh never produces or mutates
/// one of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSnapshot {
    /// Company the record was resolved for
    pub company: String,
    /// Capture timestamp of the resolution
    pub captured_at: DateTime<Utc>,
    /// Profile-tagged rate fields
    pub rates: ResolvedRates,
}

impl RateSnapshot {
    /// The value a host layer typically surfaces as its primary state:
    /// the gas supply charge for the gas profile, the off-peak rate for
    /// the electricity profile.
    pub fn primary_rate(&self) -> f64 {
        match &self.rates {
            ResolvedRates::NaturalGas(gas) => gas.gas_supply_charge,
            ResolvedRates::Electricity(elec) => elec.off_peak_rate,
        }
    }

    /// Flat name/value exposure of every resolved numeric field
    pub fn attributes(&self) -> Vec<(&'static str, f64)> {
        match &self.rates {
            ResolvedRates::NaturalGas(gas) => {
                let mut attrs = vec![
                    ("monthly_charge", gas.monthly_charge),
                    ("gas_supply_charge", gas.gas_supply_charge),
                    (
                        "gas_supply_charge_price_adjustment",
                        gas.gas_supply_charge_price_adjustment,
                    ),
                    ("transportation_charge", gas.transportation_charge),
                    (
                        "transportation_charge_price_adjustment",
                        gas.transportation_charge_price_adjustment,
                    ),
                    (
                        "delivery_charge_price_adjustment",
                        gas.delivery_charge_price_adjustment,
                    ),
                    ("facility_carbon_charge", gas.facility_carbon_charge),
                    ("federal_carbon_charge", gas.federal_carbon_charge),
                    ("gst", gas.gst),
                ];
                const TIER_ATTRS: [[&'static str; 3]; 4] = [
                    [
                        "delivery_charge_tier_1",
                        "delivery_tier_1_start",
                        "delivery_tier_1_end",
                    ],
                    [
                        "delivery_charge_tier_2",
                        "delivery_tier_2_start",
                        "delivery_tier_2_end",
                    ],
                    [
                        "delivery_charge_tier_3",
                        "delivery_tier_3_start",
                        "delivery_tier_3_end",
                    ],
                    [
                        "delivery_charge_tier_4",
                        "delivery_tier_4_start",
                        "delivery_tier_4_end",
                    ],
                ];
                for (band, [charge, start, end]) in gas.delivery_tiers.iter().zip(TIER_ATTRS) {
                    attrs.push((charge, band.unit_charge));
                    attrs.push((start, band.threshold_start));
                    attrs.push((end, band.threshold_end));
                }
                attrs
            }
            ResolvedRates::Electricity(elec) => vec![
                ("off_peak_rate", elec.off_peak_rate),
                ("mid_peak_rate", elec.mid_peak_rate),
                ("on_peak_rate", elec.on_peak_rate),
            ],
        }
    }
}
