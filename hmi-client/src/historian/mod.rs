/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! History chart: backfill, tail polling and the rolling window.

mod chart;
mod poller;
mod surface;

pub use chart::{Axis, ChartBuffer, Series, SeriesSpec};
pub use poller::{HistorianPoller, PollStep};
pub use surface::ChartSurface;

#[cfg(feature = "wasm")]
pub use surface::ChartJsSurface;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHART_CANVAS, DEFAULT_FETCH_LIMIT, DEFAULT_POLL_IDLE_MS, DEFAULT_WINDOW_MS,
};

/// How the tail of history is polled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PollMode {
    /// `limit` rows after the cursor per request. A full page is followed up
    /// at once; otherwise the next poll waits `idle_ms`.
    Cursor {
        #[serde(default = "default_fetch_limit")]
        limit: u32,
        #[serde(rename = "idleMs", default = "default_poll_ms")]
        idle_ms: u32,
    },
    /// Everything from the cursor to now, every `interval_ms`.
    Range {
        #[serde(rename = "intervalMs", default = "default_poll_ms")]
        interval_ms: u32,
    },
}

impl Default for PollMode {
    fn default() -> Self {
        PollMode::Cursor {
            limit: DEFAULT_FETCH_LIMIT,
            idle_ms: DEFAULT_POLL_IDLE_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorianConfig {
    /// Id of the `<canvas>` the chart draws into.
    #[serde(default = "default_canvas")]
    pub canvas: String,
    #[serde(default = "default_window_ms")]
    pub window_ms: f64,
    pub series: Vec<SeriesSpec>,
    #[serde(default)]
    pub poll: PollMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_range: Option<AxisRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2_range: Option<AxisRange>,
}

impl HistorianConfig {
    pub fn new(series: Vec<SeriesSpec>) -> Self {
        Self {
            canvas: default_canvas(),
            window_ms: DEFAULT_WINDOW_MS,
            series,
            poll: PollMode::default(),
            y_range: None,
            y2_range: None,
        }
    }

    pub fn tags(&self) -> Vec<hmi_types::Tag> {
        self.series.iter().map(|s| s.tag.clone()).collect()
    }
}

fn default_canvas() -> String {
    DEFAULT_CHART_CANVAS.to_string()
}

fn default_window_ms() -> f64 {
    DEFAULT_WINDOW_MS
}

fn default_fetch_limit() -> u32 {
    DEFAULT_FETCH_LIMIT
}

fn default_poll_ms() -> u32 {
    DEFAULT_POLL_IDLE_MS
}
