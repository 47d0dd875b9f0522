//! Formatting helpers for presenting ride metrics and bucket titles.

use serde::{Deserialize, Serialize};
use time::{macros::format_description, Duration, OffsetDateTime};

use crate::core::aggregate::{start_of_week, Granularity};

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn format_distance_km(km: f64) -> String {
    format!("{} km", round1(km))
}

pub fn format_elevation(meters: f64) -> String {
    format!("{} m", round1(meters))
}

/// Average speed in km/h, `None` when there is no moving time.
pub fn average_speed_kmh(km: f64, seconds: f64) -> Option<f64> {
    if seconds <= 0.0 {
        return None;
    }
    Some(round1(km / (seconds / 3600.0)))
}

pub fn format_average_speed(km: f64, seconds: f64) -> String {
    match average_speed_kmh(km, seconds) {
        Some(speed) => format!("{speed} km/h"),
        None => "–".to_string(),
    }
}

/// `H:MM:SS`, hours not wrapped at 24.
pub fn format_moving_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours}:{minutes:02}:{secs:02}")
}

/// How the tooltip title describes a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleFormat {
    /// `Jan 5, 9:07`
    Day,
    /// `Jan 1 - Jan 7`
    Week,
    /// `January`
    Month,
}

impl TitleFormat {
    pub fn for_granularity(granularity: Granularity) -> Self {
        match granularity {
            Granularity::Day => TitleFormat::Day,
            Granularity::Week => TitleFormat::Week,
            Granularity::Month => TitleFormat::Month,
        }
    }

    pub fn title(self, date: OffsetDateTime) -> String {
        let formatted = match self {
            TitleFormat::Day => date.format(&format_description!(
                "[month repr:short] [day padding:none], [hour padding:none]:[minute]"
            )),
            TitleFormat::Week => {
                let start = start_of_week(date);
                let end = start + Duration::days(6);
                let short = format_description!("[month repr:short] [day padding:none]");
                start
                    .format(&short)
                    .and_then(|from| end.format(&short).map(|to| format!("{from} - {to}")))
            }
            TitleFormat::Month => date.format(&format_description!("[month repr:long]")),
        };
        formatted.unwrap_or_else(|_| "—".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(format_distance_km(30.0), "30 km");
        assert_eq!(format_distance_km(12.345), "12.3 km");
        assert_eq!(format_elevation(99.96), "100 m");
    }

    #[test]
    fn average_speed_matches_distance_over_hours() {
        assert_eq!(average_speed_kmh(30.0, 3600.0), Some(30.0));
        assert_eq!(average_speed_kmh(50.0, 7200.0), Some(25.0));
        assert_eq!(average_speed_kmh(42.2, 5400.0), Some(28.1));
        assert_eq!(format_average_speed(10.0, 0.0), "–");
    }

    #[test]
    fn moving_time_exceeds_a_day() {
        assert_eq!(format_moving_time(3600.0), "1:00:00");
        assert_eq!(format_moving_time(97_389.0), "27:03:09");
        assert_eq!(format_moving_time(59.9), "0:00:59");
    }

    #[test]
    fn titles() {
        let date = datetime!(2024-01-03 09:07 UTC);
        assert_eq!(TitleFormat::Day.title(date), "Jan 3, 9:07");
        assert_eq!(TitleFormat::Week.title(date), "Jan 1 - Jan 7");
        assert_eq!(TitleFormat::Month.title(date), "January");
        assert_eq!(
            TitleFormat::Week.title(datetime!(2024-12-31 12:00 UTC)),
            "Dec 30 - Jan 5"
        );
    }
}
