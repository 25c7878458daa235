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

//! Framework-agnostic event types for the dashboard.
//!
//! These are emitted on the dashboard's [`EventBus`](crate::EventBus) so a
//! status bar, toast layer or test can observe what the engine is doing.

use hmi_types::Tag;

#[derive(Clone, Debug, PartialEq)]
pub enum HmiEvent {
    // === Connection Events ===
    /// The tag transport is connected
    Connected,

    /// The tag transport dropped; carries the reason
    ConnectionLost(String),

    // === Live update Events ===
    /// A pushed batch was malformed and discarded as a whole
    BatchDiscarded(String),

    // === Write Events ===
    /// A write was not sent (transport not ready, read-only dashboard, ...)
    WriteDropped { tag: Tag, reason: String },

    /// The server acknowledged a write with status "ok"
    WriteAcknowledged { tag: Tag, value: f64 },

    /// The server rejected a write, or no acknowledgement arrived in time
    WriteFailed { tag: Tag, reason: String },

    // === Historian Events ===
    /// A tail poll failed; the next poll keeps the same cursor
    HistoryFetchFailed(String),

    /// Backfill failed; no further polling happens for this chart
    HistorianStopped(String),
}
