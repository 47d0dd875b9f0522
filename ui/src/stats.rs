//! The statistics widget controller: loaded rides + chart adapter + current view.
//!
//! Every event (granularity button, legend click, theme change) regroups the full record
//! list and re-renders. Nothing from a previous grouping is reused.

use tracing::debug;

use crate::chart::adapter::{ChartAdapter, ChartSurface};
use crate::chart::ViewMode;
use crate::core::activity::ActivityRecord;
use crate::core::aggregate::{group_by, Bucket, Granularity};
use crate::core::error::Result;
use crate::core::theme::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsCommand {
    ToggleYear(i32),
    SetGranularity(Granularity),
    ThemeChanged(ThemeMode),
}

pub struct StatsController<S: ChartSurface> {
    records: Vec<ActivityRecord>,
    adapter: ChartAdapter<S>,
    view: ViewMode,
}

impl<S: ChartSurface> StatsController<S> {
    pub fn new(records: Vec<ActivityRecord>, adapter: ChartAdapter<S>, view: ViewMode) -> Self {
        Self {
            records,
            adapter,
            view,
        }
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn adapter(&self) -> &ChartAdapter<S> {
        &self.adapter
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn buckets(&self) -> Vec<Bucket> {
        group_by(&self.records, self.view.granularity)
    }

    /// Re-render with `view`, or with the cached view when `None`.
    pub fn update(&mut self, view: Option<ViewMode>) -> Result<()> {
        if let Some(view) = view {
            self.view = view;
        }
        let buckets = self.buckets();
        debug!(
            granularity = %self.view.granularity,
            buckets = buckets.len(),
            "rendering statistics"
        );
        self.adapter.render(&buckets, self.view)?;
        Ok(())
    }

    pub fn handle(&mut self, command: StatsCommand) -> Result<()> {
        match command {
            StatsCommand::ToggleYear(year) => {
                self.adapter.toggle_year_visibility(year);
                self.update(None)
            }
            StatsCommand::SetGranularity(granularity) => {
                self.update(Some(ViewMode::for_granularity(granularity)))
            }
            StatsCommand::ThemeChanged(mode) => {
                self.adapter.set_palette(mode.palette());
                self.update(None)
            }
        }
    }
}
