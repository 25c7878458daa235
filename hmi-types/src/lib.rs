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

pub mod batch;
pub mod callback;
pub mod history;
pub mod tag;
pub mod wire;

pub use batch::{BatchError, TagBatch};
pub use callback::Callback;
pub use history::{HistoryPage, HistoryRow};
pub use tag::Tag;
pub use wire::{SubscribeRequest, WriteAck, WriteRequest};

/// Interprets `"true"`/`"1"` (any case) as set, everything else as unset.
pub fn truthy(s: Option<&str>) -> bool {
    if let Some(s) = s {
        ["true".to_string(), "1".to_string()].contains(&s.to_lowercase())
    } else {
        false
    }
}
