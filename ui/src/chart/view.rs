use serde::{Deserialize, Serialize};

use crate::core::aggregate::Granularity;
use crate::core::format::TitleFormat;

/// Time-axis unit of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Week,
    Month,
}

/// What one granularity button selects: grouping, tooltip title and axis unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewMode {
    pub granularity: Granularity,
    pub title: TitleFormat,
    pub unit: TimeUnit,
}

impl ViewMode {
    pub fn for_granularity(granularity: Granularity) -> Self {
        let unit = match granularity {
            Granularity::Day | Granularity::Week => TimeUnit::Week,
            Granularity::Month => TimeUnit::Month,
        };
        Self {
            granularity,
            title: TitleFormat::for_granularity(granularity),
            unit,
        }
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::for_granularity(Granularity::Week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_view_uses_week_axis() {
        assert_eq!(ViewMode::for_granularity(Granularity::Day).unit, TimeUnit::Week);
        assert_eq!(ViewMode::for_granularity(Granularity::Week).unit, TimeUnit::Week);
        let month = ViewMode::for_granularity(Granularity::Month);
        assert_eq!(month.unit, TimeUnit::Month);
        assert_eq!(month.title, TitleFormat::Month);
    }
}
