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

//! Error types for the historian client.

use thiserror::Error;

/// Errors returned by [`HistorySource::fetch`](crate::HistorySource::fetch).
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The endpoint answered with a non-success status.
    #[error("History request failed ({status}): {body}")]
    Status { status: u16, body: String },

    /// A network or transport error (rejected fetch).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body was not a valid history page.
    #[error("Malformed history response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A configuration error (e.g. empty tag list).
    #[error("Configuration error: {0}")]
    Config(String),
}
