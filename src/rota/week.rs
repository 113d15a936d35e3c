use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// First day of the calendar week containing `date`.
pub fn week_start(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() as i64
        - first_day.num_days_from_monday() as i64)
        % 7;
    date - Duration::days(offset)
}

/// ISO-8601 week number of the calendar week starting on `starts_on`.
pub fn iso_week_number(starts_on: NaiveDate, first_day: Weekday) -> u32 {
    // Sunday-first weeks are numbered after the Monday they contain.
    let probe = match first_day {
        Weekday::Sun => starts_on + Duration::days(1),
        _ => starts_on,
    };
    probe.iso_week().week()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBucket {
    pub starts_on: NaiveDate,
    pub days: Vec<NaiveDate>,
}

/// Splits ordered days into calendar-week buckets.
///
/// Buckets keep input order; concatenating them gives back `days` unchanged.
pub fn partition_weeks(days: &[NaiveDate], first_day: Weekday) -> Vec<WeekBucket> {
    let mut buckets: Vec<WeekBucket> = Vec::new();

    for &day in days {
        let starts_on = week_start(day, first_day);
        match buckets.last_mut() {
            Some(bucket) if bucket.starts_on == starts_on => bucket.days.push(day),
            _ => buckets.push(WeekBucket {
                starts_on,
                days: vec![day],
            }),
        }
    }

    buckets
}

/// Every day of the given month, or `None` for an invalid month.
pub fn month_days(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(
        first
            .iter_days()
            .take_while(|d| d.month() == month)
            .collect(),
    )
}

/// Parses `YYYY-MM`.
pub fn parse_month(text: &str) -> Option<(i32, u32)> {
    let (year, month) = text.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

/// Inclusive day range; empty when `end` precedes `start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_monday_and_sunday() {
        // 2024-05-01 is a Wednesday.
        assert_eq!(week_start(date(2024, 5, 1), Weekday::Mon), date(2024, 4, 29));
        assert_eq!(week_start(date(2024, 5, 1), Weekday::Sun), date(2024, 4, 28));
        assert_eq!(week_start(date(2024, 5, 5), Weekday::Sun), date(2024, 5, 5));
        assert_eq!(week_start(date(2024, 5, 5), Weekday::Mon), date(2024, 4, 29));
    }

    #[test]
    fn test_partition_may_2024_monday_first() {
        let days = month_days(2024, 5).unwrap();
        let weeks = partition_weeks(&days, Weekday::Mon);

        let sizes: Vec<usize> = weeks.iter().map(|w| w.days.len()).collect();
        assert_eq!(sizes, vec![5, 7, 7, 7, 5]);
        assert_eq!(weeks[1].days[0], date(2024, 5, 6));
        assert_eq!(weeks[1].days[0].weekday(), Weekday::Mon);
        assert_eq!(iso_week_number(weeks[1].starts_on, Weekday::Mon), 19);
    }

    #[test]
    fn test_partition_concatenation_is_lossless() {
        for first_day in [Weekday::Mon, Weekday::Sun] {
            for year in [2023, 2024, 2025] {
                for month in 1..=12 {
                    let days = month_days(year, month).unwrap();
                    let weeks = partition_weeks(&days, first_day);

                    let joined: Vec<NaiveDate> =
                        weeks.iter().flat_map(|w| w.days.iter().copied()).collect();
                    assert_eq!(joined, days, "{}-{} {:?}", year, month, first_day);

                    for week in &weeks {
                        assert!(!week.days.is_empty() && week.days.len() <= 7);
                        assert!(week
                            .days
                            .iter()
                            .all(|d| week_start(*d, first_day) == week.starts_on));
                    }
                    for pair in weeks.windows(2) {
                        assert!(pair[0].starts_on < pair[1].starts_on);
                    }
                }
            }
        }
    }

    #[test]
    fn test_partition_empty() {
        assert!(partition_weeks(&[], Weekday::Mon).is_empty());
    }

    #[test]
    fn test_iso_week_for_sunday_first() {
        // Week starting Sunday 2024-12-29 contains Monday 2024-12-30, ISO week 1 of 2025.
        assert_eq!(iso_week_number(date(2024, 12, 29), Weekday::Sun), 1);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-05"), Some((2024, 5)));
        assert_eq!(parse_month("2024-13"), None);
        assert_eq!(parse_month("May"), None);
    }

    #[test]
    fn test_month_days_february_leap_year() {
        assert_eq!(month_days(2024, 2).unwrap().len(), 29);
        assert_eq!(month_days(2023, 2).unwrap().len(), 28);
        assert!(month_days(2024, 0).is_none());
    }
}
