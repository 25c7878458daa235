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

//! Browser WebSocket transport for the tag server's Socket.IO namespace.
//!
//! The socket only carries text frames; everything Socket.IO is handled by
//! [`SocketIoSession`]. When the socket closes, every write still waiting is
//! failed with status `disconnected` and the socket reopens after a fixed
//! delay.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use gloo::events::EventListener;
use hmi_types::{Callback, SubscribeRequest, WriteAck, WriteRequest};
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use super::session::{Reply, SocketIoSession};
use super::{ConnectOptions, TagTransport};
use crate::error::TransportError;

pub struct WebSocketTransport {
    inner: Rc<Inner>,
}

struct Inner {
    url: String,
    session: SocketIoSession,
    connection: RefCell<Option<Connection>>,
}

struct Connection {
    ws: WebSocket,
    _listeners: [EventListener; 3],
}

impl Drop for Connection {
    fn drop(&mut self) {
        if matches!(
            self.ws.ready_state(),
            WebSocket::CONNECTING | WebSocket::OPEN
        ) {
            self.ws.close().ok();
        }
    }
}

impl WebSocketTransport {
    /// `url` is the Engine.IO endpoint, e.g.
    /// `ws://smoker.lan:5000/socket.io/?EIO=4&transport=websocket`.
    pub fn new(url: &str, namespace: &str) -> Self {
        Self {
            inner: Rc::new(Inner {
                url: url.to_string(),
                session: SocketIoSession::new(namespace),
                connection: RefCell::new(None),
            }),
        }
    }
}

impl fmt::Debug for WebSocketTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSocketTransport")
            .field("url", &self.inner.url)
            .field("namespace", &self.inner.session.namespace())
            .field("ready", &self.inner.session.is_ready())
            .finish()
    }
}

impl TagTransport for WebSocketTransport {
    fn connect(&self, options: ConnectOptions) -> Result<(), TransportError> {
        self.inner.session.set_options(options);
        open(&self.inner)
    }

    fn is_connected(&self) -> bool {
        self.inner.session.is_ready()
    }

    fn emit_write(
        &self,
        request: WriteRequest,
        on_ack: Callback<WriteAck>,
    ) -> Result<(), TransportError> {
        let (id, text) = self.inner.session.write_packet(&request, on_ack)?;
        let sent = send_text(&self.inner, &text);
        if sent.is_err() {
            self.inner.session.cancel_write(id);
        }
        sent
    }

    fn emit_subscribe(&self, request: SubscribeRequest) -> Result<(), TransportError> {
        let text = self.inner.session.subscribe_packet(&request)?;
        send_text(&self.inner, &text)
    }
}

fn send_text(inner: &Inner, text: &str) -> Result<(), TransportError> {
    let connection = inner.connection.borrow();
    let Some(connection) = connection.as_ref() else {
        return Err(TransportError::NotConnected);
    };
    connection
        .ws
        .send_with_str(text)
        .map_err(|e| TransportError::Send(format!("{e:?}")))
}

fn open(inner: &Rc<Inner>) -> Result<(), TransportError> {
    debug!("WebSocket connecting to {}", inner.url);
    let ws = WebSocket::new(&inner.url).map_err(|e| {
        TransportError::Connect(
            e.dyn_ref::<js_sys::Error>()
                .and_then(|e| e.message().as_string())
                .unwrap_or_else(|| format!("{e:?}")),
        )
    })?;

    let weak = Rc::downgrade(inner);
    let on_message = move |event: &Event| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let Some(text) = event
            .dyn_ref::<MessageEvent>()
            .and_then(|event| event.data().as_string())
        else {
            warn!("WebSocket: ignoring non-text frame");
            return;
        };
        match inner.session.handle_text(&text) {
            Some(Reply::Send(reply)) => {
                if let Err(e) = send_text(&inner, &reply) {
                    warn!("WebSocket: could not answer server: {e}");
                }
            }
            Some(Reply::Close(reason)) => {
                warn!("WebSocket: {reason}");
                if let Some(connection) = inner.connection.borrow().as_ref() {
                    connection.ws.close().ok();
                }
            }
            None => {}
        }
    };

    let weak = Rc::downgrade(inner);
    let on_close = move |event: &Event| {
        let reason = event
            .dyn_ref::<CloseEvent>()
            .map(|close| format!("WebSocket closed (code {})", close.code()))
            .unwrap_or_else(|| "WebSocket closed".to_string());
        if let Some(inner) = weak.upgrade() {
            connection_lost(&inner, reason);
        }
    };

    let url = inner.url.clone();
    let on_error = move |_: &Event| {
        // The browser follows every error with a close event.
        warn!("WebSocket error on {url}");
    };

    let listeners = [
        EventListener::new(&ws, "message", on_message),
        EventListener::new(&ws, "close", on_close),
        EventListener::new(&ws, "error", on_error),
    ];
    *inner.connection.borrow_mut() = Some(Connection {
        ws,
        _listeners: listeners,
    });
    Ok(())
}

fn connection_lost(inner: &Rc<Inner>, reason: String) {
    let weak = Rc::downgrade(inner);
    inner.session.connection_lost(reason, move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if let Err(e) = open(&inner) {
            connection_lost(&inner, e.to_string());
        }
    });
}
