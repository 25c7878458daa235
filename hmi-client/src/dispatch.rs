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

//! Fans pushed tag batches out to the widgets bound to each tag.

use std::rc::Rc;

use hmi_types::TagBatch;
use log::{debug, warn};
use serde_json::Value;

use crate::binding::SubscriptionIndex;
use crate::event_bus::EventBus;
use crate::events::HmiEvent;

#[derive(Debug, Clone)]
pub struct UpdateDispatcher {
    index: Rc<SubscriptionIndex>,
    events: EventBus,
}

impl UpdateDispatcher {
    pub fn new(index: Rc<SubscriptionIndex>, events: EventBus) -> Self {
        Self { index, events }
    }

    /// Dispatches one raw `tag_update` payload and returns how many widgets
    /// were updated.
    ///
    /// A malformed payload is logged once and dropped whole; no widget sees
    /// any part of it.
    pub fn dispatch(&self, payload: &Value) -> usize {
        match TagBatch::from_json(payload) {
            Ok(batch) => self.dispatch_batch(&batch),
            Err(err) => {
                warn!("HMI: discarding tag update: {err}");
                self.events.emit(HmiEvent::BatchDiscarded(err.to_string()));
                0
            }
        }
    }

    pub fn dispatch_batch(&self, batch: &TagBatch) -> usize {
        let mut updated = 0;
        for (tag, value) in batch.iter() {
            for widget in self.index.subscribers(tag.as_str()) {
                widget.on_value(value);
                updated += 1;
            }
        }
        debug!("HMI: batch of {} tags updated {updated} widgets", batch.len());
        updated
    }
}
