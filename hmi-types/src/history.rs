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

//! Response body of `GET /api/history`.

use serde::{Deserialize, Serialize};

use crate::Tag;

/// One recorded `(tag, timestamp, value)` triple. Timestamps are epoch ms.
///
/// Some historian builds spell the timestamp column `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub tag: Tag,
    #[serde(alias = "timestamp")]
    pub ts: f64,
    pub value: f64,
}

/// A page of history rows, ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub rows: Vec<HistoryRow>,
    /// Timestamp up to which the server has answered, when it reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

impl HistoryPage {
    pub fn last_ts(&self) -> Option<f64> {
        self.rows.last().map(|row| row.ts)
    }
}
