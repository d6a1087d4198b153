//! Regional holiday calendar
//!
//! Statutory holidays for the Ontario service territory, used by the
//! time-of-use helpers to treat holidays as off-peak. With observation
//! enabled, a holiday landing on a weekend also marks the following
//! business day.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Holiday calendar for one region
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    observed: bool,
}

impl HolidayCalendar {
    /// Ontario statutory holidays with observed-day shifting
    pub fn ontario() -> Self {
        Self { observed: true }
    }

    /// Calendar for a configured region selector
    ///
    /// Only the Ontario service territory is published today.
    pub fn for_region(region: &str) -> Option<Self> {
        match region {
            "ON" => Some(Self::ontario()),
            _ => None,
        }
    }

    /// Create a calendar with explicit observation behavior
    pub fn new(observed: bool) -> Self {
        Self { observed }
    }

    /// Whether `date` is a holiday (or an observed holiday weekday)
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays_for(date.year()).contains(&date)
    }

    /// All holiday dates for one calendar year, unsorted
    pub fn holidays_for(&self, year: i32) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = Vec::new();

        self.push_with_observed(&mut days, ymd(year, 1, 1));
        // Family Day, third Monday of February (statutory since 2008)
        days.push(nth_weekday(year, 2, Weekday::Mon, 3));
        days.push(good_friday(year));
        days.push(victoria_day(year));
        self.push_with_observed(&mut days, ymd(year, 7, 1));
        // Labour Day, first Monday of September
        days.push(nth_weekday(year, 9, Weekday::Mon, 1));
        // Thanksgiving, second Monday of October
        days.push(nth_weekday(year, 10, Weekday::Mon, 2));

        let christmas = ymd(year, 12, 25);
        let boxing_day = ymd(year, 12, 26);
        days.push(christmas);
        days.push(boxing_day);
        if self.observed {
            let christmas_observed = next_weekday_from(christmas);
            if christmas_observed != christmas {
                days.push(christmas_observed);
            }
            let mut boxing_observed = next_weekday_from(boxing_day);
            while boxing_observed == christmas_observed
                || is_weekend(boxing_observed)
            {
                boxing_observed = boxing_observed + Days::new(1);
            }
            if boxing_observed != boxing_day {
                days.push(boxing_observed);
            }
        }

        days
    }

    fn push_with_observed(&self, days: &mut Vec<NaiveDate>, date: NaiveDate) {
        days.push(date);
        if self.observed {
            let observed = next_weekday_from(date);
            if observed != date {
                days.push(observed);
            }
        }
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The date itself if it is a weekday, otherwise the following Monday
fn next_weekday_from(date: NaiveDate) -> NaiveDate {
    let mut d = date;
    while is_weekend(d) {
        d = d + Days::new(1);
    }
    d
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // All callers pass dates valid in every supported year
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Nth occurrence of a weekday within a month (1-based)
fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> NaiveDate {
    let mut d = ymd(year, month, 1);
    while d.weekday() != weekday {
        d = d + Days::new(1);
    }
    d + Days::new(u64::from(7 * (n - 1)))
}

/// Last Monday preceding May 25
fn victoria_day(year: i32) -> NaiveDate {
    let mut d = ymd(year, 5, 24);
    while d.weekday() != Weekday::Mon {
        d = d - Days::new(1);
    }
    d
}

/// Two days before Easter Sunday
fn good_friday(year: i32) -> NaiveDate {
    easter_sunday(year) - Days::new(2)
}

/// Gregorian Easter Sunday (anonymous computus)
fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;
    ymd(year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fixed_date_holidays() {
        let cal = HolidayCalendar::ontario();
        assert!(cal.is_holiday(date(2025, 1, 1)));
        assert!(cal.is_holiday(date(2025, 7, 1)));
        assert!(cal.is_holiday(date(2025, 12, 25)));
        assert!(cal.is_holiday(date(2025, 12, 26)));
        assert!(!cal.is_holiday(date(2025, 3, 3)));
    }

    #[test]
    fn formula_holidays_2025() {
        let cal = HolidayCalendar::ontario();
        // Family Day, Victoria Day, Labour Day, Thanksgiving
        assert!(cal.is_holiday(date(2025, 2, 17)));
        assert!(cal.is_holiday(date(2025, 5, 19)));
        assert!(cal.is_holiday(date(2025, 9, 1)));
        assert!(cal.is_holiday(date(2025, 10, 13)));
    }

    #[test]
    fn easter_computus() {
        assert_eq!(easter_sunday(2024), date(2024, 3, 31));
        assert_eq!(easter_sunday(2025), date(2025, 4, 20));
        assert_eq!(easter_sunday(2026), date(2026, 4, 5));
        // Good Friday 2025
        let cal = HolidayCalendar::ontario();
        assert!(cal.is_holiday(date(2025, 4, 18)));
    }

    #[test]
    fn weekend_holidays_are_observed_on_monday() {
        let cal = HolidayCalendar::ontario();
        // Canada Day 2023 fell on a Saturday; July 3 was the observed day
        assert!(cal.is_holiday(date(2023, 7, 1)));
        assert!(cal.is_holiday(date(2023, 7, 3)));

        let unobserved = HolidayCalendar::new(false);
        assert!(unobserved.is_holiday(date(2023, 7, 1)));
        assert!(!unobserved.is_holiday(date(2023, 7, 3)));
    }

    #[test]
    fn christmas_weekend_observation_does_not_collide() {
        let cal = HolidayCalendar::ontario();
        // 2021: Dec 25 Saturday, Dec 26 Sunday; observed Mon 27 and Tue 28
        assert!(cal.is_holiday(date(2021, 12, 27)));
        assert!(cal.is_holiday(date(2021, 12, 28)));
    }
}
