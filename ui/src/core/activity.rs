//! Activity records and the feed loader.
//!
//! The feed is a JSON array of objects shaped like
//! `{"type": "Ride", "date": "2024-01-01T08:00:00Z", "time": 3600, "distance": 30000, "elevation": 100}`
//! with `time` in seconds and `distance`/`elevation` in meters. Only records of the
//! configured kind are kept; distance is converted to kilometers once, here.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime,
};
use tracing::{debug, info, warn};

use crate::core::error::LoadError;

/// One ingested activity. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityRecord {
    pub date: OffsetDateTime,
    pub moving_time_seconds: f64,
    pub distance_km: f64,
    pub elevation_meters: f64,
}

impl ActivityRecord {
    pub fn new(
        date: OffsetDateTime,
        moving_time_seconds: f64,
        distance_km: f64,
        elevation_meters: f64,
    ) -> Self {
        Self {
            date,
            moving_time_seconds,
            distance_km,
            elevation_meters,
        }
    }
}

/// Where the feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivitySource {
    Url(String),
    #[cfg(not(target_arch = "wasm32"))]
    File(PathBuf),
    /// Feed text already in memory.
    Json(String),
}

/// Counts from one [`ActivityLog::load`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub kept: usize,
    pub skipped_kind: usize,
    pub skipped_malformed: usize,
}

#[derive(Debug, Deserialize)]
struct RawActivity {
    date: String,
    time: f64,
    distance: f64,
    elevation: f64,
}

/// In-memory list of loaded activities of one kind.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    kind: String,
    records: Vec<ActivityRecord>,
    timeout: Option<Duration>,
}

impl ActivityLog {
    pub fn new<T: Into<String>>(kind: T) -> Self {
        Self {
            kind: kind.into(),
            records: Vec::new(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ActivityRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fetch the feed and append every record of this log's kind.
    ///
    /// Nothing is appended when the source is unreachable or the payload is not a list.
    pub async fn load(&mut self, source: &ActivitySource) -> Result<LoadReport, LoadError> {
        let text = match source {
            ActivitySource::Url(url) => fetch_text(url, self.timeout).await?,
            #[cfg(not(target_arch = "wasm32"))]
            ActivitySource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?
            }
            ActivitySource::Json(text) => text.clone(),
        };

        let report = self.ingest(&text)?;
        info!(
            kept = report.kept,
            skipped_kind = report.skipped_kind,
            skipped_malformed = report.skipped_malformed,
            "activity feed loaded"
        );
        Ok(report)
    }

    /// Decode a feed payload and append the matching records.
    pub fn ingest(&mut self, payload: &str) -> Result<LoadReport, LoadError> {
        let entries: Vec<Value> = serde_json::from_str(payload)?;
        let mut report = LoadReport::default();
        let mut parsed = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let kind = entry.get("type").and_then(Value::as_str);
            if kind != Some(self.kind.as_str()) {
                report.skipped_kind += 1;
                continue;
            }

            match parse_record(entry) {
                Some(record) => parsed.push(record),
                None => {
                    warn!(index, "skipping malformed activity record");
                    report.skipped_malformed += 1;
                }
            }
        }

        report.kept = parsed.len();
        self.records.extend(parsed);
        Ok(report)
    }
}

fn parse_record(entry: Value) -> Option<ActivityRecord> {
    let raw: RawActivity = serde_json::from_value(entry).ok()?;

    let values = [raw.time, raw.distance, raw.elevation];
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return None;
    }

    let date = parse_date(&raw.date)?;
    Some(ActivityRecord::new(
        date,
        raw.time,
        raw.distance / 1000.0,
        raw.elevation,
    ))
}

/// Accepts RFC 3339, a local `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or a bare date.
pub fn parse_date(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    if let Ok(local) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(local.assume_utc());
    }
    Date::parse(raw, &format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

async fn fetch_text(url: &str, timeout: Option<Duration>) -> Result<String, LoadError> {
    let target = resolve_url(url);
    debug!(url = %target, "fetching activity feed");

    let client = reqwest::Client::new();
    #[allow(unused_mut)]
    let mut request = client.get(&target);
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
    }
    #[cfg(target_arch = "wasm32")]
    let _ = timeout;

    let response = request.send().await.map_err(|source| LoadError::Http {
        url: target.clone(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: target,
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| LoadError::Http { url: target, source })
}

/// The browser fetch in reqwest needs an absolute URL; site-relative paths are joined to
/// the page origin.
#[cfg(target_arch = "wasm32")]
fn resolve_url(url: &str) -> String {
    if !url.starts_with('/') {
        return url.to_string();
    }
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .map(|origin| format!("{origin}{url}"))
        .unwrap_or_else(|| url.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn resolve_url(url: &str) -> String {
    url.to_string()
}
