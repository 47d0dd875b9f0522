//! Grouping of activity records into day / week / month buckets.
//!
//! [`group_by`] is a single accumulation pass over the full record list. Buckets come
//! back in the order their keys were first seen, so a feed listed newest-first yields
//! newest-first buckets. Callers that need chronological order sort afterwards (the chart
//! series builder does).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, OffsetDateTime};

use crate::core::activity::ActivityRecord;
use crate::core::error::StatsError;

/// Aggregated activity. Same shape as a record; values are sums over the bucket.
pub type Bucket = ActivityRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Day, Granularity::Week, Granularity::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = StatsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            other => Err(StatsError::InvalidArgument(format!(
                "unknown granularity `{other}` (expected day, week or month)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum GroupKey {
    Day(Date),
    /// ISO week-year and week number.
    Week(i32, u8),
    Month(i32, Month),
}

fn group_key(date: OffsetDateTime, granularity: Granularity) -> GroupKey {
    match granularity {
        Granularity::Day => GroupKey::Day(date.date()),
        Granularity::Week => {
            let (year, week, _) = date.to_iso_week_date();
            GroupKey::Week(year, week)
        }
        Granularity::Month => GroupKey::Month(date.year(), date.month()),
    }
}

/// Date a bucket is plotted at.
fn bucket_date(date: OffsetDateTime, granularity: Granularity) -> OffsetDateTime {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => start_of_week(date),
        Granularity::Month => start_of_month(date),
    }
}

/// Monday 00:00 of the ISO week containing `date`, in the same offset.
pub fn start_of_week(date: OffsetDateTime) -> OffsetDateTime {
    let back = i64::from(date.weekday().number_days_from_monday());
    let monday = date.date() - Duration::days(back);
    monday.midnight().assume_offset(date.offset())
}

pub fn start_of_month(date: OffsetDateTime) -> OffsetDateTime {
    let first = date.date().replace_day(1).unwrap_or(date.date());
    first.midnight().assume_offset(date.offset())
}

/// Sum records sharing a grouping key.
pub fn group_by(records: &[ActivityRecord], granularity: Granularity) -> Vec<Bucket> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut buckets: Vec<Bucket> = Vec::new();

    for record in records {
        let key = group_key(record.date, granularity);
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push(Bucket::new(bucket_date(record.date, granularity), 0.0, 0.0, 0.0));
            buckets.len() - 1
        });

        let bucket = &mut buckets[slot];
        bucket.moving_time_seconds += record.moving_time_seconds;
        bucket.distance_km += record.distance_km;
        bucket.elevation_meters += record.elevation_meters;
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn ride(date: OffsetDateTime, time: f64, km: f64, elevation: f64) -> ActivityRecord {
        ActivityRecord::new(date, time, km, elevation)
    }

    fn sample() -> Vec<ActivityRecord> {
        vec![
            ride(datetime!(2024-01-01 08:00 UTC), 3600.0, 30.0, 100.0),
            ride(datetime!(2024-01-08 09:30 UTC), 3600.0, 20.0, 50.0),
        ]
    }

    fn total_distance(buckets: &[Bucket]) -> f64 {
        buckets.iter().map(|b| b.distance_km).sum()
    }

    #[test]
    fn weeks_split_on_monday() {
        let buckets = group_by(&sample(), Granularity::Week);
        assert_eq!(buckets.len(), 2);
        assert_eq!(
            buckets[0],
            ride(datetime!(2024-01-01 00:00 UTC), 3600.0, 30.0, 100.0)
        );
        assert_eq!(
            buckets[1],
            ride(datetime!(2024-01-08 00:00 UTC), 3600.0, 20.0, 50.0)
        );
    }

    #[test]
    fn month_merges_january() {
        let buckets = group_by(&sample(), Granularity::Month);
        assert_eq!(
            buckets,
            vec![ride(datetime!(2024-01-01 00:00 UTC), 7200.0, 50.0, 150.0)]
        );
    }

    #[test]
    fn day_bucket_keeps_first_timestamp() {
        let records = vec![
            ride(datetime!(2024-02-03 17:10 UTC), 600.0, 5.0, 10.0),
            ride(datetime!(2024-02-03 07:45 UTC), 1200.0, 10.0, 20.0),
        ];
        let buckets = group_by(&records, Granularity::Day);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].date, datetime!(2024-02-03 17:10 UTC));
        assert_eq!(buckets[0].moving_time_seconds, 1800.0);
    }

    #[test]
    fn buckets_follow_first_seen_order() {
        // Newest-first feed: the March bucket is seen first and stays first.
        let records = vec![
            ride(datetime!(2024-03-20 08:00 UTC), 100.0, 1.0, 1.0),
            ride(datetime!(2024-01-15 08:00 UTC), 100.0, 2.0, 1.0),
            ride(datetime!(2024-03-02 08:00 UTC), 100.0, 4.0, 1.0),
        ];
        let buckets = group_by(&records, Granularity::Month);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, datetime!(2024-03-01 00:00 UTC));
        assert_eq!(buckets[0].distance_km, 5.0);
        assert_eq!(buckets[1].date, datetime!(2024-01-01 00:00 UTC));
    }

    #[test]
    fn iso_week_spans_new_year() {
        // 2024-12-30 (Mon) and 2025-01-02 (Thu) share ISO week 2025-W01.
        let records = vec![
            ride(datetime!(2024-12-30 08:00 UTC), 100.0, 1.0, 0.0),
            ride(datetime!(2025-01-02 08:00 UTC), 100.0, 2.0, 0.0),
            ride(datetime!(2024-01-03 08:00 UTC), 100.0, 4.0, 0.0),
        ];
        let buckets = group_by(&records, Granularity::Week);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, datetime!(2024-12-30 00:00 UTC));
        assert_eq!(buckets[0].distance_km, 3.0);
    }

    #[test]
    fn week_start_keeps_offset() {
        let sunday = datetime!(2024-06-09 23:30 +2);
        assert_eq!(start_of_week(sunday), datetime!(2024-06-03 00:00 +2));
    }

    #[test]
    fn totals_and_bucket_counts_are_consistent() {
        let mut records = Vec::new();
        let mut date = datetime!(2023-11-20 06:00 UTC);
        for i in 0..90 {
            records.push(ride(date, 1800.0 + i as f64, 0.1 * i as f64, i as f64));
            date += Duration::hours(19);
        }
        let expected: f64 = records.iter().map(|r| r.distance_km).sum();

        let day = group_by(&records, Granularity::Day);
        let week = group_by(&records, Granularity::Week);
        let month = group_by(&records, Granularity::Month);

        for buckets in [&day, &week, &month] {
            assert!((total_distance(buckets) - expected).abs() < 1e-9);
        }
        assert!(month.len() <= week.len());
        assert!(week.len() <= day.len());
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        for granularity in Granularity::ALL {
            assert!(group_by(&[], granularity).is_empty());
        }
    }

    #[test]
    fn unknown_granularity_is_invalid_argument() {
        assert_eq!("month".parse::<Granularity>().unwrap(), Granularity::Month);
        let err = "fortnight".parse::<Granularity>().unwrap_err();
        assert!(matches!(err, StatsError::InvalidArgument(_)));
    }
}
