//! Year-partitioned line chart over aggregated buckets.
//!
//! [`series`] turns buckets into per-year series with connector points, [`config`]
//! describes them as a Chart.js configuration, [`adapter`] owns the create-once /
//! update-afterwards lifecycle, and [`surface`] is the host-side bridge to Chart.js.

pub mod adapter;
pub mod config;
pub mod series;
pub mod surface;
mod view;

pub use adapter::{ChartAdapter, ChartCommands, ChartSurface};
pub use config::{build_config, ChartConfig};
pub use series::{build_series, ChartPoint, YearSeries};
pub use surface::BridgeSurface;
pub use view::{TimeUnit, ViewMode};
