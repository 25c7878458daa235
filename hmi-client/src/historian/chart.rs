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

//! Rolling time-series buffer behind the history chart.

use std::collections::VecDeque;

use hmi_types::{HistoryRow, Tag};
use log::debug;
use serde::{Deserialize, Serialize};

/// Which y axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Y,
    Y2,
}

impl Axis {
    pub fn id(self) -> &'static str {
        match self {
            Axis::Y => "y",
            Axis::Y2 => "y2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub tag: Tag,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub axis: Axis,
    #[serde(default)]
    pub dashed: bool,
}

impl SeriesSpec {
    pub fn new(tag: &str, label: &str) -> Self {
        Self {
            tag: Tag::from(tag),
            label: label.to_string(),
            axis: Axis::Y,
            dashed: false,
        }
    }

    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    /// The legend text; falls back to the tag.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            self.tag.as_str()
        } else {
            &self.label
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    spec: SeriesSpec,
    points: VecDeque<Option<f64>>,
    last: Option<f64>,
}

impl Series {
    pub fn spec(&self) -> &SeriesSpec {
        &self.spec
    }

    /// One entry per label; `None` until the series has seen a value.
    pub fn points(&self) -> &VecDeque<Option<f64>> {
        &self.points
    }

    /// Last known value, carried forward across rows for other tags.
    pub fn last(&self) -> Option<f64> {
        self.last
    }
}

/// Timestamps (epoch ms) plus one aligned column per series.
///
/// Every appended row adds one label and one point to every series, so all
/// columns always have the same length as `labels`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBuffer {
    labels: VecDeque<f64>,
    series: Vec<Series>,
    x_range: Option<(f64, f64)>,
}

impl ChartBuffer {
    pub fn new(specs: &[SeriesSpec]) -> Self {
        Self {
            labels: VecDeque::new(),
            series: specs
                .iter()
                .map(|spec| Series {
                    spec: spec.clone(),
                    points: VecDeque::new(),
                    last: None,
                })
                .collect(),
            x_range: None,
        }
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.series.iter().map(|s| s.spec.tag.clone()).collect()
    }

    pub fn labels(&self) -> &VecDeque<f64> {
        &self.labels
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Visible `[min, max]` of the x axis, set by the last [`trim`](Self::trim).
    pub fn x_range(&self) -> Option<(f64, f64)> {
        self.x_range
    }

    /// Appends rows in order and returns how many were charted. Rows for tags
    /// that have no series are skipped.
    pub fn append_rows(&mut self, rows: &[HistoryRow]) -> usize {
        let mut appended = 0;
        for row in rows {
            let Some(target) = self.series.iter().position(|s| s.spec.tag == row.tag) else {
                debug!("chart: skipping row for unplotted tag {}", row.tag);
                continue;
            };
            self.series[target].last = Some(row.value);
            self.labels.push_back(row.ts);
            for series in &mut self.series {
                series.points.push_back(series.last);
            }
            appended += 1;
        }
        appended
    }

    /// Drops leading points older than `now - window_ms` and sets the visible
    /// range to `[now - window_ms, now]`. Returns how many points went.
    pub fn trim(&mut self, now: f64, window_ms: f64) -> usize {
        let min_ts = now - window_ms;
        let mut removed = 0;
        while self.labels.front().is_some_and(|ts| *ts < min_ts) {
            self.labels.pop_front();
            for series in &mut self.series {
                series.points.pop_front();
            }
            removed += 1;
        }
        self.x_range = Some((min_ts, now));
        removed
    }
}
