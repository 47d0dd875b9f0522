//! Runtime configuration for the statistics widget.
//!
//! Shells build a [`StatsConfig`] (usually the defaults, optionally overridden from JSON)
//! and provide it through Dioxus context. Every field is defaulted so partial overrides
//! such as `{"data_url": "/feeds/rides.json"}` are valid.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::activity::ActivitySource;
use crate::core::aggregate::Granularity;

pub const DEFAULT_DATA_URL: &str = "/data/strava.json";
pub const DEFAULT_ACTIVITY_KIND: &str = "Ride";
pub const DEFAULT_CANVAS_ID: &str = "chart";
pub const DEFAULT_FONT_FAMILY: &str =
    "\"Roboto\", system-ui, apple-system, \"Segoe UI\", Roboto, Helvetica, Arial, sans-serif";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Feed location, fetched with a single GET.
    pub data_url: String,
    /// Local feed file. Takes precedence over `data_url` on native targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
    /// Only records whose `type` equals this value are kept.
    pub activity_kind: String,
    pub default_granularity: Granularity,
    pub canvas_id: String,
    pub font_family: String,
    /// Applied to native HTTP requests; the browser governs fetch lifetime on wasm.
    pub request_timeout_secs: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            data_path: None,
            activity_kind: DEFAULT_ACTIVITY_KIND.to_string(),
            default_granularity: Granularity::Week,
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl StatsConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Where the feed is read from on the current target.
    pub fn source(&self) -> ActivitySource {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(path) = &self.data_path {
                return ActivitySource::File(path.clone());
            }
        }
        ActivitySource::Url(self.data_url.clone())
    }
}
