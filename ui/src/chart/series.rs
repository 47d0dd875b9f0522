//! Per-year series with connector points.
//!
//! Every series is sorted chronologically. A series gains one trailing point: the first
//! point of the nearest more-recent series that is visible. That joins the end of one
//! year to the start of the next into a single polyline. When all later series are hidden
//! (or there are none) no connector is added.

use std::collections::{BTreeMap, BTreeSet};

use time::OffsetDateTime;

use crate::core::aggregate::Bucket;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: OffsetDateTime,
    pub y: f64,
    pub bucket: Bucket,
}

impl ChartPoint {
    pub fn from_bucket(bucket: Bucket) -> Self {
        Self {
            x: bucket.date,
            y: bucket.distance_km,
            bucket,
        }
    }

    /// Calendar year the backing bucket belongs to.
    pub fn year(&self) -> i32 {
        self.bucket.date.year()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearSeries {
    pub year: i32,
    pub points: Vec<ChartPoint>,
    pub hidden: bool,
}

impl YearSeries {
    /// The borrowed point from a later year, if one was appended.
    pub fn connector(&self) -> Option<&ChartPoint> {
        self.points.last().filter(|point| point.year() != self.year)
    }

    /// Whether hovering `point` in this series should produce tooltip lines. Connector
    /// points are described by the series they belong to.
    pub fn owns(&self, point: &ChartPoint) -> bool {
        point.year() == self.year
    }
}

pub fn build_series(buckets: &[Bucket], hidden: &BTreeSet<i32>) -> Vec<YearSeries> {
    let mut years: BTreeMap<i32, Vec<ChartPoint>> = BTreeMap::new();
    for bucket in buckets {
        years
            .entry(bucket.date.year())
            .or_default()
            .push(ChartPoint::from_bucket(*bucket));
    }

    let mut series = Vec::with_capacity(years.len());
    let mut next_visible_first: Option<ChartPoint> = None;

    // Latest year first so each series can see its nearest visible successor.
    for (year, mut points) in years.into_iter().rev() {
        points.sort_by(|a, b| a.x.cmp(&b.x));
        let hidden = hidden.contains(&year);
        let first = points.first().cloned();

        if let Some(connector) = next_visible_first.clone() {
            points.push(connector);
        }
        if !hidden {
            if let Some(first) = first {
                next_visible_first = Some(first);
            }
        }

        series.push(YearSeries {
            year,
            points,
            hidden,
        });
    }

    series.reverse();
    series
}
