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

//! Tag writes with acknowledgement tracking.
//!
//! Every write settles exactly once: acknowledged, rejected by the server, or
//! timed out. An ack that arrives after its timeout is ignored. Writes are
//! never retried.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use hmi_types::{Callback, Tag, WriteAck, WriteRequest};
use log::{debug, warn};

use super::TagTransport;
use crate::error::WriteError;
use crate::event_bus::EventBus;
use crate::events::HmiEvent;
use crate::platform::TimeoutHandle;

const ACK_TIMEOUT_REASON: &str = "ack timeout";

struct PendingWrite {
    tag: Tag,
    value: f64,
    _timeout: Option<TimeoutHandle>,
}

type PendingWrites = RefCell<HashMap<u64, PendingWrite>>;

pub struct TagWriter {
    transport: Rc<dyn TagTransport>,
    events: EventBus,
    ack_timeout_ms: Option<u32>,
    read_only: bool,
    pending: Rc<PendingWrites>,
    next_id: Cell<u64>,
}

impl TagWriter {
    /// `ack_timeout_ms: None` waits for acknowledgements forever.
    pub fn new(
        transport: Rc<dyn TagTransport>,
        events: EventBus,
        ack_timeout_ms: Option<u32>,
        read_only: bool,
    ) -> Self {
        Self {
            transport,
            events,
            ack_timeout_ms,
            read_only,
            pending: Rc::new(RefCell::new(HashMap::new())),
            next_id: Cell::new(1),
        }
    }

    /// Writes waiting for an acknowledgement.
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Sends `value` to `tag`. The outcome of the acknowledgement is reported
    /// on the event bus; the result only says whether the request went out.
    pub fn write_tag(&self, tag: &Tag, value: f64) -> Result<(), WriteError> {
        if self.read_only {
            return Err(self.drop_write(WriteError::ReadOnly(tag.clone())));
        }
        if !self.transport.is_connected() {
            return Err(self.drop_write(WriteError::NotConnected(tag.clone())));
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        debug!("tag_write #{id} {tag} = {value}");

        let timeout = self.ack_timeout_ms.map(|millis| {
            let pending = Rc::downgrade(&self.pending);
            let events = self.events.clone();
            TimeoutHandle::new(millis, move || on_ack_timeout(&pending, &events, id))
        });
        self.pending.borrow_mut().insert(
            id,
            PendingWrite {
                tag: tag.clone(),
                value,
                _timeout: timeout,
            },
        );

        let on_ack = {
            let pending = Rc::downgrade(&self.pending);
            let events = self.events.clone();
            Callback::from(move |ack: WriteAck| on_ack(&pending, &events, id, ack))
        };
        let request = WriteRequest {
            tag: tag.clone(),
            value,
        };
        if let Err(source) = self.transport.emit_write(request, on_ack) {
            self.pending.borrow_mut().remove(&id);
            return Err(self.drop_write(WriteError::Transport {
                tag: tag.clone(),
                source,
            }));
        }
        Ok(())
    }

    fn drop_write(&self, error: WriteError) -> WriteError {
        warn!("{error}");
        let tag = match &error {
            WriteError::NotConnected(tag) | WriteError::ReadOnly(tag) => tag.clone(),
            WriteError::Transport { tag, .. } => tag.clone(),
        };
        self.events.emit(HmiEvent::WriteDropped {
            tag,
            reason: error.to_string(),
        });
        error
    }
}

fn on_ack(pending: &Weak<PendingWrites>, events: &EventBus, id: u64, ack: WriteAck) {
    let Some(pending) = pending.upgrade() else {
        return;
    };
    let entry = pending.borrow_mut().remove(&id);
    let Some(entry) = entry else {
        debug!("ignoring late ack for write #{id}: {ack:?}");
        return;
    };
    if ack.is_ok() {
        events.emit(HmiEvent::WriteAcknowledged {
            tag: entry.tag,
            value: entry.value,
        });
    } else {
        let reason = ack.msg.unwrap_or(ack.status);
        warn!("Write failed: {} = {} ({reason})", entry.tag, entry.value);
        events.emit(HmiEvent::WriteFailed {
            tag: entry.tag,
            reason,
        });
    }
}

fn on_ack_timeout(pending: &Weak<PendingWrites>, events: &EventBus, id: u64) {
    let Some(pending) = pending.upgrade() else {
        return;
    };
    let entry = pending.borrow_mut().remove(&id);
    if let Some(entry) = entry {
        warn!(
            "Write failed: {} = {} ({ACK_TIMEOUT_REASON})",
            entry.tag, entry.value
        );
        events.emit(HmiEvent::WriteFailed {
            tag: entry.tag,
            reason: ACK_TIMEOUT_REASON.to_string(),
        });
    }
}
