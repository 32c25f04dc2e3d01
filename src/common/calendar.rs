// src/common/calendar.rs

//! Date-range boundaries used by the appointment filters and the weekly
//! calendar. Appointment times are wall-clock times (`TIMESTAMP` without
//! zone), so everything here works on naive dates.

use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// `?filter=` values accepted by `GET /api/rendez-vous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFilter {
    Today,
    Week,
    Month,
}

impl RangeFilter {
    /// Unknown values mean "no date restriction".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    /// `None` when the range would leave the representable calendar.
    pub fn range_around(self, day: NaiveDate) -> Option<DateRange> {
        match self {
            Self::Today => DateRange::day(day),
            Self::Week => DateRange::week(day),
            Self::Month => DateRange::month(day),
        }
    }
}

/// Half-open range, meant for `>= start AND < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// `[first 00:00, midnight after last)`. Every constructor returns
    /// `None` near the ends of chrono's calendar instead of overflowing.
    pub fn spanning(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        let after_last = last.checked_add_days(Days::new(1))?;
        Some(Self {
            start: first.and_time(NaiveTime::MIN),
            end: after_last.and_time(NaiveTime::MIN),
        })
    }

    pub fn day(day: NaiveDate) -> Option<Self> {
        Self::spanning(day, day)
    }

    /// Monday to Sunday, same as the calendar view.
    pub fn week(day: NaiveDate) -> Option<Self> {
        let monday = week_start(day)?;
        Self::spanning(monday, monday.checked_add_days(Days::new(6))?)
    }

    pub fn month(day: NaiveDate) -> Option<Self> {
        let first = day.with_day(1)?;
        let last = first
            .checked_add_months(Months::new(1))?
            .checked_sub_days(Days::new(1))?;
        Self::spanning(first, last)
    }
}

/// Monday of the week containing `day`.
pub fn week_start(day: NaiveDate) -> Option<NaiveDate> {
    day.checked_sub_days(Days::new(u64::from(day.weekday().num_days_from_monday())))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses the date-times the browser sends: RFC 3339 (`toISOString()`), the
/// `datetime-local` input form, or a bare date (midnight).
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_milli_opt(h, min, s, ms).unwrap()
    }

    #[test]
    fn day_covers_the_whole_day() {
        let range = DateRange::day(date(2025, 12, 5)).unwrap();
        assert_eq!(range.start, at(2025, 12, 5, 0, 0, 0, 0));
        assert_eq!(range.end, at(2025, 12, 6, 0, 0, 0, 0));

        // Sub-millisecond times at the very end of the day are still inside.
        let late = date(2025, 12, 5).and_hms_micro_opt(23, 59, 59, 999_900).unwrap();
        assert!(range.start <= late && late < range.end);
    }

    #[test]
    fn week_starts_on_monday() {
        // 2025-12-05 is a Friday.
        let range = DateRange::week(date(2025, 12, 5)).unwrap();
        assert_eq!(range.start, at(2025, 12, 1, 0, 0, 0, 0));
        assert_eq!(range.end, at(2025, 12, 8, 0, 0, 0, 0));

        // A Sunday belongs to the week that started six days earlier.
        assert_eq!(week_start(date(2025, 12, 7)), Some(date(2025, 12, 1)));
        assert_eq!(week_start(date(2025, 12, 8)), Some(date(2025, 12, 8)));
    }

    #[test]
    fn week_can_cross_a_year() {
        let range = DateRange::week(date(2026, 1, 1)).unwrap();
        assert_eq!(range.start.date(), date(2025, 12, 29));
        assert_eq!(range.end.date(), date(2026, 1, 5));
    }

    #[test]
    fn month_handles_december_and_leap_years() {
        let december = DateRange::month(date(2025, 12, 17)).unwrap();
        assert_eq!(december.start, at(2025, 12, 1, 0, 0, 0, 0));
        assert_eq!(december.end, at(2026, 1, 1, 0, 0, 0, 0));

        let leap = DateRange::month(date(2024, 2, 10)).unwrap();
        assert_eq!(leap.end.date(), date(2024, 3, 1));

        let common = DateRange::month(date(2025, 2, 28)).unwrap();
        assert_eq!(common.start.date(), date(2025, 2, 1));
        assert_eq!(common.end.date(), date(2025, 3, 1));
    }

    #[test]
    fn ranges_at_the_calendar_edges_are_none() {
        assert_eq!(DateRange::day(NaiveDate::MAX), None);
        assert_eq!(DateRange::week(NaiveDate::MAX), None);
        assert_eq!(DateRange::month(NaiveDate::MAX), None);
        assert_eq!(RangeFilter::Week.range_around(NaiveDate::MAX), None);

        // Monday of the first representable week may not exist.
        let first_monday = week_start(NaiveDate::MIN);
        if NaiveDate::MIN.weekday() != chrono::Weekday::Mon {
            assert_eq!(first_monday, None);
        }
        assert!(DateRange::day(NaiveDate::MIN).is_some());
    }

    #[test]
    fn filter_parsing_is_lenient() {
        assert_eq!(RangeFilter::parse("week"), Some(RangeFilter::Week));
        assert_eq!(RangeFilter::parse(" Today "), Some(RangeFilter::Today));
        assert_eq!(RangeFilter::parse("all"), None);
        assert_eq!(
            RangeFilter::Month.range_around(date(2025, 4, 9)),
            DateRange::month(date(2025, 4, 9))
        );
        assert!(RangeFilter::Today.range_around(date(2025, 4, 9)).is_some());
    }

    #[test]
    fn parses_browser_formats() {
        assert_eq!(parse_date_time("2025-12-05T14:30"), Some(at(2025, 12, 5, 14, 30, 0, 0)));
        assert_eq!(
            parse_date_time("2025-12-05T14:30:15.250"),
            Some(at(2025, 12, 5, 14, 30, 15, 250))
        );
        assert_eq!(
            parse_date_time("2025-12-05T09:00:00.000Z"),
            Some(at(2025, 12, 5, 9, 0, 0, 0))
        );
        assert_eq!(
            parse_date_time("2025-12-05T09:00:00+01:00"),
            Some(at(2025, 12, 5, 9, 0, 0, 0))
        );
        assert_eq!(parse_date_time("2025-12-05 08:15"), Some(at(2025, 12, 5, 8, 15, 0, 0)));
        assert_eq!(parse_date_time("2025-12-05"), Some(at(2025, 12, 5, 0, 0, 0, 0)));
    }

    #[test]
    fn blank_or_garbage_is_none() {
        assert_eq!(parse_date_time(""), None);
        assert_eq!(parse_date_time("   "), None);
        assert_eq!(parse_date_time("demain"), None);
    }
}
