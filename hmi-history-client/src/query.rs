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
 */

//! Query-string construction for `GET /api/history`.

use hmi_types::Tag;

/// Which slice of history to ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryWindow {
    /// Up to `limit` rows strictly after `after` (epoch ms), oldest first.
    Cursor { limit: u32, after: Option<f64> },
    /// All rows with `start <= ts <= end` (epoch ms).
    Range { start: f64, end: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryQuery {
    pub tags: Vec<Tag>,
    pub window: HistoryWindow,
}

impl HistoryQuery {
    pub fn cursor(tags: &[Tag], limit: u32, after: Option<f64>) -> Self {
        Self {
            tags: tags.to_vec(),
            window: HistoryWindow::Cursor { limit, after },
        }
    }

    pub fn range(tags: &[Tag], start: f64, end: f64) -> Self {
        Self {
            tags: tags.to_vec(),
            window: HistoryWindow::Range { start, end },
        }
    }

    /// The requested end of a range query; cursor queries have none.
    pub fn range_end(&self) -> Option<f64> {
        match self.window {
            HistoryWindow::Range { end, .. } => Some(end),
            HistoryWindow::Cursor { .. } => None,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let tags = self
            .tags
            .iter()
            .map(Tag::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let mut params = vec![("tags", tags)];
        match &self.window {
            HistoryWindow::Cursor { limit, after } => {
                params.push(("limit", limit.to_string()));
                if let Some(after) = after {
                    params.push(("after", format_ms(*after)));
                }
            }
            HistoryWindow::Range { start, end } => {
                params.push(("start", format_ms(*start)));
                params.push(("end", format_ms(*end)));
            }
        }
        params
    }
}

fn format_ms(ms: f64) -> String {
    if ms.fract() == 0.0 && ms.abs() < 9.0e15 {
        format!("{}", ms as i64)
    } else {
        ms.to_string()
    }
}
