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

//! Socket.IO session state for one namespace, independent of the socket.
//!
//! The session answers the Engine.IO handshake and pings, joins the
//! namespace, routes `tag_update` events, and matches write acks to their
//! callbacks by id. The socket adapter only moves text frames in and out and
//! reports when the socket closed.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use hmi_types::wire::{EVENT_SUBSCRIBE, EVENT_TAG_UPDATE, EVENT_TAG_WRITE};
use hmi_types::{Callback, SubscribeRequest, WriteAck, WriteRequest};
use log::{debug, info, warn};
use serde_json::Value;

use super::packet::Packet;
use super::ConnectOptions;
use crate::constants::RECONNECT_DELAY_MS;
use crate::error::TransportError;
use crate::platform;

/// Ack status given to writes still waiting when the socket closes.
pub const DISCONNECTED_STATUS: &str = "disconnected";
/// Ack status given to an ack whose payload is not `{status, msg?}`.
pub const MALFORMED_STATUS: &str = "malformed";

/// What the socket adapter must do after an inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Send(String),
    /// Close the socket; the close event then reports the loss.
    Close(String),
}

pub struct SocketIoSession {
    namespace: String,
    ready: Cell<bool>,
    options: RefCell<ConnectOptions>,
    pending_acks: RefCell<HashMap<u64, Callback<WriteAck>>>,
    next_id: Cell<u64>,
}

impl SocketIoSession {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            ready: Cell::new(false),
            options: RefCell::new(ConnectOptions::default()),
            pending_acks: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn set_options(&self, options: ConnectOptions) {
        *self.options.borrow_mut() = options;
    }

    /// True once the server has admitted us to the namespace.
    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    pub fn pending_acks(&self) -> usize {
        self.pending_acks.borrow().len()
    }

    pub fn handle_text(&self, text: &str) -> Option<Reply> {
        let packet = match Packet::decode(text) {
            Ok(packet) => packet,
            Err(e) => {
                warn!("Socket.IO: dropping frame ({e}): {text}");
                return None;
            }
        };
        match packet {
            Packet::Open(_) => {
                debug!("Socket.IO: handshake done, joining {}", self.namespace);
                Some(Reply::Send(
                    Packet::Connect {
                        namespace: self.namespace.clone(),
                    }
                    .encode(),
                ))
            }
            Packet::Ping => Some(Reply::Send(Packet::Pong.encode())),
            Packet::Pong => None,
            Packet::Close => Some(Reply::Close("server closed the session".to_string())),
            Packet::Connect { namespace } if namespace == self.namespace => {
                info!("Socket.IO: joined {namespace}");
                self.ready.set(true);
                let on_connected = self.options.borrow().on_connected.clone();
                on_connected.emit(());
                None
            }
            Packet::Disconnect { namespace } if namespace == self.namespace => {
                self.ready.set(false);
                Some(Reply::Close(format!("server left {namespace}")))
            }
            Packet::ConnectError { namespace, message } if namespace == self.namespace => {
                Some(Reply::Close(format!("{namespace} refused: {message}")))
            }
            Packet::Event {
                namespace,
                name,
                data,
                ..
            } if namespace == self.namespace => {
                if name == EVENT_TAG_UPDATE {
                    let on_tag_update = self.options.borrow().on_tag_update.clone();
                    on_tag_update.emit(data);
                } else {
                    debug!("Socket.IO: ignoring '{name}' event");
                }
                None
            }
            Packet::Ack {
                namespace,
                id,
                args,
            } if namespace == self.namespace => {
                self.resolve_ack(id, args);
                None
            }
            other => {
                debug!("Socket.IO: ignoring {other:?}");
                None
            }
        }
    }

    /// Registers `on_ack` and returns the packet to send. If sending fails
    /// the caller must [`cancel_write`](Self::cancel_write) the returned id.
    pub fn write_packet(
        &self,
        request: &WriteRequest,
        on_ack: Callback<WriteAck>,
    ) -> Result<(u64, String), TransportError> {
        if !self.ready.get() {
            return Err(TransportError::NotConnected);
        }
        let data =
            serde_json::to_value(request).map_err(|e| TransportError::Encode(e.to_string()))?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.pending_acks.borrow_mut().insert(id, on_ack);
        let packet = Packet::Event {
            namespace: self.namespace.clone(),
            id: Some(id),
            name: EVENT_TAG_WRITE.to_string(),
            data,
        };
        Ok((id, packet.encode()))
    }

    pub fn cancel_write(&self, id: u64) {
        self.pending_acks.borrow_mut().remove(&id);
    }

    pub fn subscribe_packet(&self, request: &SubscribeRequest) -> Result<String, TransportError> {
        if !self.ready.get() {
            return Err(TransportError::NotConnected);
        }
        let data =
            serde_json::to_value(request).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(Packet::event(&self.namespace, EVENT_SUBSCRIBE, data).encode())
    }

    /// The socket closed or could not be opened. Fails every waiting write,
    /// reports the loss and runs `reopen` after [`RECONNECT_DELAY_MS`].
    pub fn connection_lost<F: FnOnce() + 'static>(&self, reason: String, reopen: F) {
        self.ready.set(false);
        warn!("{reason}, reconnecting in {RECONNECT_DELAY_MS} ms");

        let pending: Vec<_> = self.pending_acks.borrow_mut().drain().collect();
        for (_, on_ack) in pending {
            on_ack.emit(WriteAck::error(DISCONNECTED_STATUS, reason.clone()));
        }

        let on_connection_lost = self.options.borrow().on_connection_lost.clone();
        on_connection_lost.emit(reason);

        platform::spawn_local(async move {
            platform::sleep(RECONNECT_DELAY_MS).await;
            reopen();
        });
    }

    fn resolve_ack(&self, id: u64, args: Vec<Value>) {
        let on_ack = self.pending_acks.borrow_mut().remove(&id);
        let Some(on_ack) = on_ack else {
            debug!("Socket.IO: ack for unknown write #{id}");
            return;
        };
        let ack = match args.into_iter().next() {
            Some(payload) => serde_json::from_value::<WriteAck>(payload)
                .unwrap_or_else(|e| WriteAck::error(MALFORMED_STATUS, e.to_string())),
            None => WriteAck::error(MALFORMED_STATUS, "empty ack"),
        };
        on_ack.emit(ack);
    }
}
