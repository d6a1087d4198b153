//! Time-of-use period selection
//!
//! Pure functions over (timestamp, calendar): the resolver never performs
//! time-of-use selection itself, it only resolves the flat per-period
//! values. Callers combine these helpers with a resolved snapshot to pick
//! the rate that applies at a given instant.

use super::types::ElectricityRates;
use crate::calendar::HolidayCalendar;
use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};

/// Time-of-use pricing period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakPeriod {
    OffPeak,
    MidPeak,
    OnPeak,
}

impl PeakPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OffPeak => "off_peak",
            Self::MidPeak => "mid_peak",
            Self::OnPeak => "on_peak",
        }
    }
}

/// Winter time-of-use season runs November through April
fn is_winter_month(month: u32) -> bool {
    !(5..=10).contains(&month)
}

/// Time-of-use period in effect at `ts`
///
/// Weekends and holidays are off-peak all day. On weekdays the window
/// 19:00-07:00 is off-peak; between 07:00 and 19:00 the mid-day block
/// (11:00-17:00) and the shoulder blocks swap between mid- and on-peak
/// with the season: mornings and evenings are on-peak in winter and
/// mid-peak in summer.
pub fn peak_period_at<Tz: TimeZone>(ts: &DateTime<Tz>, calendar: &HolidayCalendar) -> PeakPeriod {
    let date = ts.date_naive();
    if matches!(ts.weekday(), Weekday::Sat | Weekday::Sun) || calendar.is_holiday(date) {
        return PeakPeriod::OffPeak;
    }

    let hour = ts.hour();
    if !(7..19).contains(&hour) {
        return PeakPeriod::OffPeak;
    }

    let midday = (11..17).contains(&hour);
    if is_winter_month(ts.month()) {
        if midday {
            PeakPeriod::MidPeak
        } else {
            PeakPeriod::OnPeak
        }
    } else if midday {
        PeakPeriod::OnPeak
    } else {
        PeakPeriod::MidPeak
    }
}

impl ElectricityRates {
    /// Flat rate applying to the given time-of-use period
    pub fn rate_for(&self, period: PeakPeriod) -> f64 {
        match period {
            PeakPeriod::OffPeak => self.off_peak_rate,
            PeakPeriod::MidPeak => self.mid_peak_rate,
            PeakPeriod::OnPeak => self.on_peak_rate,
        }
    }

    /// Flat rate applying at the given instant
    pub fn rate_at<Tz: TimeZone>(&self, ts: &DateTime<Tz>, calendar: &HolidayCalendar) -> f64 {
        self.rate_for(peak_period_at(ts, calendar))
    }
}
