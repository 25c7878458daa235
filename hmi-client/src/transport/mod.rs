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

//! The push transport as seen by the dashboard.
//!
//! The dashboard only needs to be told about tag updates and connection state,
//! and to send writes (with an acknowledgement) and subscriptions. Any
//! bidirectional channel that can do that implements [`TagTransport`].

pub mod packet;
pub mod session;
mod writer;

#[cfg(feature = "wasm")]
mod websocket;

pub use packet::{Packet, PacketError};
pub use session::{Reply, SocketIoSession};
pub use writer::TagWriter;

#[cfg(feature = "wasm")]
pub use websocket::WebSocketTransport;

use hmi_types::{Callback, SubscribeRequest, WriteAck, WriteRequest};
use serde_json::Value;

use crate::error::TransportError;

#[derive(Clone, Default)]
pub struct ConnectOptions {
    /// Raw `tag_update` payload, validated by the dispatcher.
    pub on_tag_update: Callback<Value>,
    pub on_connected: Callback<()>,
    pub on_connection_lost: Callback<String>,
}

pub trait TagTransport {
    /// Starts connecting. Progress is reported through `options`.
    fn connect(&self, options: ConnectOptions) -> Result<(), TransportError>;

    fn is_connected(&self) -> bool;

    /// Sends a write. `on_ack` runs at most once, when the server answers.
    fn emit_write(
        &self,
        request: WriteRequest,
        on_ack: Callback<WriteAck>,
    ) -> Result<(), TransportError>;

    fn emit_subscribe(&self, request: SubscribeRequest) -> Result<(), TransportError>;
}
