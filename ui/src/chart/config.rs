//! Chart.js line-chart configuration.
//!
//! The structs serialise to the JSON shape Chart.js (v3) expects. Things JSON cannot
//! carry (the y tick formatter, tooltip callbacks, legend clicks) are described in the
//! `velostat` hint block and installed by the JS bridge:
//!
//! - y ticks render as `"{value}{tick_suffix}"`,
//! - each data point carries its tooltip `title` and, for points owned by the series,
//!   its `label` lines; connector points have no `label`,
//! - a legend click sends the clicked dataset label (the year) back to Rust.

use serde::Serialize;

use crate::chart::series::{ChartPoint, YearSeries};
use crate::chart::view::{TimeUnit, ViewMode};
use crate::core::aggregate::Bucket;
use crate::core::format::{
    format_average_speed, format_distance_km, format_elevation, format_moving_time,
};
use crate::core::theme::Palette;
use crate::t;

pub const DISTANCE_SUFFIX: &str = " km";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
    #[serde(rename = "velostat")]
    pub hints: BridgeHints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub border_width: u32,
    pub line_tension: f64,
    pub point_radius: u32,
    pub point_hit_radius: u32,
    pub point_border_color: &'static str,
    pub point_background_color: &'static str,
    pub point_hover_radius: u32,
    pub data: Vec<DataPoint>,
    pub hidden: bool,
    pub fill: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    /// Milliseconds since the Unix epoch.
    pub x: i64,
    pub y: f64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub scales: Scales,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: TimeScale,
    pub y: LinearScale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub color: &'static str,
    pub border_color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticks {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeScale {
    pub grid: Grid,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub time: TimeOptions,
    pub ticks: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOptions {
    pub unit: TimeUnit,
    pub unit_step_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearScale {
    pub grid: Grid,
    pub ticks: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Legend {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub x_padding: u32,
    pub y_padding: u32,
    pub body_spacing: u32,
    pub corner_radius: u32,
    pub display_colors: bool,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            x_padding: 8,
            y_padding: 8,
            body_spacing: 4,
            corner_radius: 0,
            display_colors: false,
        }
    }
}

/// Global defaults and callback parameters applied by the JS bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeHints {
    pub default_color: &'static str,
    pub font_family: String,
    pub tick_suffix: &'static str,
}

/// Y-axis tick text for `value` kilometers.
pub fn format_axis_tick(value: f64) -> String {
    format!("{value}{DISTANCE_SUFFIX}")
}

/// Tooltip body lines describing a bucket.
pub fn tooltip_lines(bucket: &Bucket) -> Vec<String> {
    let distance = format_distance_km(bucket.distance_km);
    let moving_time = format_moving_time(bucket.moving_time_seconds);
    let speed = format_average_speed(bucket.distance_km, bucket.moving_time_seconds);
    let elevation = format_elevation(bucket.elevation_meters);
    vec![
        t!("tooltip-distance", value = distance),
        t!("tooltip-moving-time", value = moving_time),
        t!("tooltip-average-speed", value = speed),
        t!("tooltip-elevation", value = elevation),
    ]
}

/// Tooltip label for `point` hovered in `series`; `None` for a connector so a point shared
/// by two adjoining series is described once.
pub fn tooltip_label(series: &YearSeries, point: &ChartPoint) -> Option<Vec<String>> {
    series.owns(point).then(|| tooltip_lines(&point.bucket))
}

fn data_point(series: &YearSeries, point: &ChartPoint, view: &ViewMode) -> DataPoint {
    DataPoint {
        x: (point.x.unix_timestamp_nanos() / 1_000_000) as i64,
        y: point.y,
        title: view.title.title(point.bucket.date),
        label: tooltip_label(series, point),
    }
}

fn dataset(series: &YearSeries, palette: &Palette, view: &ViewMode) -> Dataset {
    Dataset {
        label: series.year.to_string(),
        border_color: palette.border,
        background_color: palette.background,
        border_width: 1,
        line_tension: 0.0,
        point_radius: 5,
        point_hit_radius: 5,
        point_border_color: palette.point_border,
        point_background_color: palette.point_background,
        point_hover_radius: 5,
        data: series
            .points
            .iter()
            .map(|point| data_point(series, point, view))
            .collect(),
        hidden: series.hidden,
        fill: true,
    }
}

pub fn build_config(
    series: &[YearSeries],
    palette: &Palette,
    view: &ViewMode,
    font_family: &str,
) -> ChartConfig {
    let grid = Grid {
        color: palette.grid_color,
        border_color: palette.grid_border,
    };
    let ticks = Ticks {
        color: palette.color,
    };

    ChartConfig {
        kind: "line",
        data: ChartData {
            datasets: series
                .iter()
                .map(|s| dataset(s, palette, view))
                .collect(),
        },
        options: ChartOptions {
            scales: Scales {
                x: TimeScale {
                    grid: grid.clone(),
                    kind: "time",
                    time: TimeOptions {
                        unit: view.unit,
                        unit_step_size: 1,
                    },
                    ticks: ticks.clone(),
                },
                y: LinearScale { grid, ticks },
            },
            plugins: Plugins {
                legend: Legend::default(),
                tooltip: Tooltip::default(),
            },
        },
        hints: BridgeHints {
            default_color: palette.color,
            font_family: font_family.to_string(),
            tick_suffix: DISTANCE_SUFFIX,
        },
    }
}
