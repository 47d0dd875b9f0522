//! Chart.js surface driven through Dioxus `document::eval`.
//!
//! The same bridge works in the browser and in the desktop webview: the first render
//! evaluates `assets/chart_bridge.js` and mounts the chart, keeping that evaluation alive
//! as the channel legend clicks come back on. Later renders post a new config to the
//! mounted chart; configs posted while Chart.js is still loading replace the pending one.
//! Dropping the handle destroys the chart, which also ends the mount evaluation.

use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::chart::adapter::{ChartCommands, ChartSurface};
use crate::chart::config::ChartConfig;
use crate::core::error::SurfaceError;

const BRIDGE_JS: &str = include_str!("../../assets/chart_bridge.js");

#[derive(Debug, Clone)]
pub struct BridgeSurface {
    canvas_id: String,
}

impl BridgeSurface {
    pub fn new<T: Into<String>>(canvas_id: T) -> Self {
        Self {
            canvas_id: canvas_id.into(),
        }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }
}

/// Keeps the legend listener alive; dropping it stops forwarding clicks and releases the chart.
pub struct BridgeHandle {
    canvas_id: String,
    listener: Task,
}

impl Drop for BridgeHandle {
    fn drop(&mut self) {
        self.listener.cancel();
        match release_script(&self.canvas_id) {
            Ok(script) => {
                let _ = document::eval(&script);
            }
            Err(err) => warn!(canvas = %self.canvas_id, %err, "chart release skipped"),
        }
    }
}

/// Mount, then stay pending until the bridge resolves `closed` on teardown.
fn mount_script(canvas_id: &str, config: &ChartConfig) -> Result<String, SurfaceError> {
    let id = serde_json::to_string(canvas_id)?;
    let payload = serde_json::to_string(config)?;
    Ok(format!(
        "{BRIDGE_JS}\n\
         const mounted = await window.velostatChart.mount({id}, {payload}, (year) => dioxus.send(year));\n\
         if (mounted) {{ await mounted.closed; }}"
    ))
}

fn update_script(canvas_id: &str, config: &ChartConfig) -> Result<String, SurfaceError> {
    let id = serde_json::to_string(canvas_id)?;
    let payload = serde_json::to_string(config)?;
    Ok(format!(
        "{BRIDGE_JS}\nreturn window.velostatChart.update({id}, {payload});"
    ))
}

fn release_script(canvas_id: &str) -> Result<String, SurfaceError> {
    let id = serde_json::to_string(canvas_id)?;
    Ok(format!(
        "if (window.velostatChart) {{ window.velostatChart.release({id}); }}"
    ))
}

impl ChartSurface for BridgeSurface {
    type Handle = BridgeHandle;

    fn create(
        &mut self,
        config: &ChartConfig,
        commands: &ChartCommands,
    ) -> Result<BridgeHandle, SurfaceError> {
        let mut eval = document::eval(&mount_script(&self.canvas_id, config)?);
        let commands = commands.clone();
        let canvas_id = self.canvas_id.clone();
        let listener = spawn(async move {
            loop {
                match eval.recv::<i32>().await {
                    Ok(year) => commands.toggle_year(year),
                    Err(err) => {
                        warn!(canvas = %canvas_id, ?err, "chart legend channel closed");
                        break;
                    }
                }
            }
        });

        debug!(canvas = %self.canvas_id, "chart mounted");
        Ok(BridgeHandle {
            canvas_id: self.canvas_id.clone(),
            listener,
        })
    }

    fn update(&mut self, _handle: &mut BridgeHandle, config: &ChartConfig) -> Result<(), SurfaceError> {
        // Runs immediately; the return value is not awaited.
        let _ = document::eval(&update_script(&self.canvas_id, config)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::config::build_config;
    use crate::chart::series::build_series;
    use crate::chart::ViewMode;
    use crate::core::aggregate::{Bucket, Granularity};
    use crate::core::theme::Palette;
    use std::collections::BTreeSet;
    use time::macros::datetime;

    fn config() -> ChartConfig {
        let _english = crate::i18n::test_language_guard();
        crate::i18n::init();
        let buckets = vec![Bucket::new(datetime!(2024-03-04 00:00 UTC), 3600.0, 30.0, 120.0)];
        let view = ViewMode::for_granularity(Granularity::Week);
        build_config(&build_series(&buckets, &BTreeSet::new()), &Palette::LIGHT, &view, "serif")
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("`{needle}` not found in chart bridge"))
    }

    #[test]
    fn mount_waits_on_the_release_promise() {
        let script = mount_script("stats-chart", &config()).unwrap();
        assert!(script.contains("window.velostatChart.mount(\"stats-chart\", {"));
        assert!(script.ends_with("if (mounted) { await mounted.closed; }"));
        assert!(!script.contains("new Promise(() => {})"));
    }

    #[test]
    fn update_and_release_target_the_canvas() {
        let update = update_script("a\"b", &config()).unwrap();
        assert!(update.contains("return window.velostatChart.update(\"a\\\"b\", {"));
        assert_eq!(
            release_script("stats-chart").unwrap(),
            "if (window.velostatChart) { window.velostatChart.release(\"stats-chart\"); }"
        );
    }

    #[test]
    fn pending_mount_is_registered_before_waiting_for_chart_js() {
        let mount = position(BRIDGE_JS, "async mount(");
        let body = &BRIDGE_JS[mount..];
        let registered = position(body, "charts.set(id, entry)");
        let waiting = position(body, "await whenChartReady()");
        assert!(registered < waiting);
        assert!(position(body, "latest: config") < waiting);
        // The chart is built from whatever config arrived last.
        assert!(body.contains("hydrate(entry.latest, send)"));
    }

    #[test]
    fn updates_before_the_chart_exists_replace_the_pending_config() {
        let update = &BRIDGE_JS[position(BRIDGE_JS, "update(id, config)")..];
        let pending = position(update, "if (!entry.chart)");
        assert!(position(update, "entry.latest = config") > pending);
        assert!(position(update, "entry.latest = config") < position(update, "entry.chart.update()"));
    }

    #[test]
    fn teardown_settles_the_mount_evaluation() {
        let teardown = &BRIDGE_JS[position(BRIDGE_JS, "function teardown(id)")..];
        let end = position(teardown, "\n  }\n");
        let body = &teardown[..end];
        assert!(body.contains("entry.chart.destroy()"));
        assert!(body.contains("entry.release()"));
        // A remount tears the previous chart down first.
        let mount = &BRIDGE_JS[position(BRIDGE_JS, "async mount(")..];
        assert!(position(mount, "teardown(id)") < position(mount, "charts.set(id, entry)"));
    }
}
