mod common;

use chrono::NaiveDate;
use chrono_tz::America::Toronto;
use common::FULL_FEED;
use hestia::calendar::HolidayCalendar;
use hestia::tariff::{
    ExtractionProfile, PeakPeriod, RateResolver, ResolvedRates, peak_period_at,
};

fn toronto(y: i32, m: u32, d: u32, h: u32, min: u32) -> chrono::DateTime<chrono_tz::Tz> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
        .and_local_timezone(Toronto)
        .unwrap()
}

#[test]
fn weekday_window_boundaries() {
    let cal = HolidayCalendar::ontario();

    // Wednesday, January 15th 2025
    assert_eq!(
        peak_period_at(&toronto(2025, 1, 15, 6, 59), &cal),
        PeakPeriod::OffPeak
    );
    assert_eq!(
        peak_period_at(&toronto(2025, 1, 15, 7, 0), &cal),
        PeakPeriod::OnPeak
    );
    assert_eq!(
        peak_period_at(&toronto(2025, 1, 15, 11, 0), &cal),
        PeakPeriod::MidPeak
    );
    assert_eq!(
        peak_period_at(&toronto(2025, 1, 15, 17, 0), &cal),
        PeakPeriod::OnPeak
    );
    assert_eq!(
        peak_period_at(&toronto(2025, 1, 15, 19, 0), &cal),
        PeakPeriod::OffPeak
    );
}

#[test]
fn seasons_swap_shoulder_and_midday_periods() {
    let cal = HolidayCalendar::ontario();

    // Wednesday, July 16th 2025
    assert_eq!(
        peak_period_at(&toronto(2025, 7, 16, 8, 0), &cal),
        PeakPeriod::MidPeak
    );
    assert_eq!(
        peak_period_at(&toronto(2025, 7, 16, 13, 0), &cal),
        PeakPeriod::OnPeak
    );
    assert_eq!(
        peak_period_at(&toronto(2025, 7, 16, 18, 0), &cal),
        PeakPeriod::MidPeak
    );
}

#[test]
fn holidays_are_off_peak_even_midweek() {
    let cal = HolidayCalendar::ontario();
    // Canada Day 2025 is a Tuesday
    assert_eq!(
        peak_period_at(&toronto(2025, 7, 1, 13, 0), &cal),
        PeakPeriod::OffPeak
    );
    // Good Friday 2025
    assert_eq!(
        peak_period_at(&toronto(2025, 4, 18, 9, 0), &cal),
        PeakPeriod::OffPeak
    );
}

#[test]
fn snapshot_rates_select_by_period() {
    let mut resolver = RateResolver::new("Lakeview Energy", ExtractionProfile::Electricity);
    let snapshot = resolver.resolve(FULL_FEED).unwrap();
    let ResolvedRates::Electricity(elec) = snapshot.rates else {
        panic!("expected electricity rates");
    };

    let cal = HolidayCalendar::ontario();
    // Winter weekday morning is on-peak
    assert_eq!(elec.rate_at(&toronto(2025, 1, 15, 8, 0), &cal), 0.151);
    // Winter weekday midday is mid-peak
    assert_eq!(elec.rate_at(&toronto(2025, 1, 15, 13, 0), &cal), 0.102);
    // Saturday is off-peak
    assert_eq!(elec.rate_at(&toronto(2025, 1, 18, 13, 0), &cal), 0.074);
}
