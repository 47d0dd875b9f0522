//! Chart lifecycle: build series and config from buckets, then create the host chart on
//! the first render and update it in place afterwards.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::chart::config::{build_config, ChartConfig};
use crate::chart::series::{build_series, YearSeries};
use crate::chart::view::ViewMode;
use crate::core::aggregate::{Bucket, Granularity};
use crate::core::config::DEFAULT_FONT_FAMILY;
use crate::core::error::SurfaceError;
use crate::core::theme::Palette;

/// Callbacks the chart (legend) and the surrounding controls dispatch through.
#[derive(Clone)]
pub struct ChartCommands {
    pub on_toggle_year: Rc<dyn Fn(i32)>,
    pub on_granularity_change: Rc<dyn Fn(Granularity)>,
}

impl ChartCommands {
    pub fn new(
        on_toggle_year: impl Fn(i32) + 'static,
        on_granularity_change: impl Fn(Granularity) + 'static,
    ) -> Self {
        Self {
            on_toggle_year: Rc::new(on_toggle_year),
            on_granularity_change: Rc::new(on_granularity_change),
        }
    }

    /// Commands that do nothing.
    pub fn noop() -> Self {
        Self::new(|_| {}, |_| {})
    }

    pub fn toggle_year(&self, year: i32) {
        (self.on_toggle_year)(year);
    }

    pub fn change_granularity(&self, granularity: Granularity) {
        (self.on_granularity_change)(granularity);
    }
}

impl fmt::Debug for ChartCommands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartCommands").finish_non_exhaustive()
    }
}

/// Host-side chart object (Chart.js in the browser/webview, a recorder in tests).
pub trait ChartSurface {
    type Handle;

    /// Instantiate the chart. `commands` receives legend clicks for the chart's lifetime.
    fn create(
        &mut self,
        config: &ChartConfig,
        commands: &ChartCommands,
    ) -> Result<Self::Handle, SurfaceError>;

    /// Replace the existing chart's data and options and redraw.
    fn update(&mut self, handle: &mut Self::Handle, config: &ChartConfig)
        -> Result<(), SurfaceError>;
}

enum AdapterState<H> {
    Uninitialized,
    Rendered(H),
}

pub struct ChartAdapter<S: ChartSurface> {
    surface: S,
    state: AdapterState<S::Handle>,
    commands: ChartCommands,
    hidden: BTreeSet<i32>,
    palette: Palette,
    view: ViewMode,
    font_family: String,
    series: Vec<YearSeries>,
}

impl<S: ChartSurface> ChartAdapter<S> {
    pub fn new(surface: S, commands: ChartCommands) -> Self {
        Self {
            surface,
            state: AdapterState::Uninitialized,
            commands,
            hidden: BTreeSet::new(),
            palette: Palette::default(),
            view: ViewMode::default(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            series: Vec::new(),
        }
    }

    pub fn with_font_family<T: Into<String>>(mut self, font_family: T) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self.state, AdapterState::Rendered(_))
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn commands(&self) -> &ChartCommands {
        &self.commands
    }

    pub fn hidden_years(&self) -> &BTreeSet<i32> {
        &self.hidden
    }

    pub fn series(&self) -> &[YearSeries] {
        &self.series
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Takes effect on the next render.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Flip `year` in the hidden set; returns whether it is now hidden. The caller
    /// re-renders.
    pub fn toggle_year_visibility(&mut self, year: i32) -> bool {
        let hidden = if self.hidden.remove(&year) {
            false
        } else {
            self.hidden.insert(year);
            true
        };
        debug!(year, hidden, "toggled year visibility");
        hidden
    }

    /// Configuration for the series of the last render.
    pub fn build_config(&self) -> ChartConfig {
        build_config(&self.series, &self.palette, &self.view, &self.font_family)
    }

    pub fn render(&mut self, buckets: &[Bucket], view: ViewMode) -> Result<(), SurfaceError> {
        self.view = view;
        self.series = build_series(buckets, &self.hidden);
        let config = self.build_config();

        match &mut self.state {
            AdapterState::Rendered(handle) => self.surface.update(handle, &config),
            AdapterState::Uninitialized => {
                let handle = self.surface.create(&config, &self.commands)?;
                self.state = AdapterState::Rendered(handle);
                debug!(series = self.series.len(), "chart created");
                Ok(())
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::testing::RecordingSurface;
    use super::*;
    use crate::chart::view::TimeUnit;
    use time::macros::datetime;

    fn buckets() -> Vec<Bucket> {
        vec![
            Bucket::new(datetime!(2024-01-08 00:00 UTC), 3600.0, 20.0, 50.0),
            Bucket::new(datetime!(2023-12-04 00:00 UTC), 3600.0, 30.0, 100.0),
        ]
    }

    fn adapter() -> ChartAdapter<RecordingSurface> {
        crate::i18n::init();
        ChartAdapter::new(RecordingSurface::default(), ChartCommands::noop())
    }

    #[test]
    fn first_render_creates_then_updates_in_place() {
        let mut adapter = adapter();
        assert!(!adapter.is_rendered());

        adapter.render(&buckets(), ViewMode::default()).unwrap();
        assert!(adapter.is_rendered());
        adapter.render(&buckets(), ViewMode::default()).unwrap();
        adapter.render(&buckets(), ViewMode::default()).unwrap();

        assert_eq!(adapter.surface().created, 1);
        assert_eq!(adapter.surface().updates, 2);
    }

    #[test]
    fn failed_create_stays_uninitialized() {
        crate::i18n::init();
        let surface = RecordingSurface {
            fail_create: true,
            ..RecordingSurface::default()
        };
        let mut adapter = ChartAdapter::new(surface, ChartCommands::noop());
        assert!(adapter.render(&buckets(), ViewMode::default()).is_err());
        assert!(!adapter.is_rendered());
    }

    #[test]
    fn double_toggle_restores_hidden_set() {
        let mut adapter = adapter();
        adapter.toggle_year_visibility(2022);
        let before = adapter.hidden_years().clone();

        assert!(adapter.toggle_year_visibility(2023));
        assert!(!adapter.toggle_year_visibility(2023));
        assert_eq!(adapter.hidden_years(), &before);
    }

    #[test]
    fn hidden_year_reaches_the_config() {
        let mut adapter = adapter();
        adapter.toggle_year_visibility(2024);
        adapter.render(&buckets(), ViewMode::default()).unwrap();

        let config = adapter.surface().last.clone().unwrap();
        let hidden: Vec<_> = config
            .data
            .datasets
            .iter()
            .map(|d| (d.label.clone(), d.hidden))
            .collect();
        assert_eq!(
            hidden,
            vec![("2023".to_string(), false), ("2024".to_string(), true)]
        );
        // 2024 hidden: 2023 has no connector.
        assert_eq!(config.data.datasets[0].data.len(), 1);
    }

    #[test]
    fn palette_and_view_apply_on_next_render() {
        let mut adapter = adapter();
        adapter.render(&buckets(), ViewMode::default()).unwrap();

        adapter.set_palette(Palette::DARK);
        adapter
            .render(&buckets(), ViewMode::for_granularity(Granularity::Month))
            .unwrap();

        let config = adapter.surface().last.clone().unwrap();
        assert_eq!(config.options.scales.x.ticks.color, Palette::DARK.color);
        assert_eq!(config.options.scales.x.time.unit, TimeUnit::Month);
        assert_eq!(adapter.view().granularity, Granularity::Month);
    }

    #[test]
    fn commands_are_handed_to_the_surface() {
        crate::i18n::init();
        let toggled = Rc::new(RefCell::new(Vec::new()));
        let sink = toggled.clone();
        let commands = ChartCommands::new(move |year| sink.borrow_mut().push(year), |_| {});
        let mut adapter = ChartAdapter::new(RecordingSurface::default(), commands);
        adapter.render(&buckets(), ViewMode::default()).unwrap();

        let legend = adapter.surface().commands.clone().unwrap();
        legend.toggle_year(2023);
        assert_eq!(*toggled.borrow(), vec![2023]);
    }
}
