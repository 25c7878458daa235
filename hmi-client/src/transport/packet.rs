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

//! Engine.IO v4 / Socket.IO v5 text packets.
//!
//! The tag server is a Socket.IO server. Over its WebSocket every text frame
//! is one Engine.IO packet (`0` open, `1` close, `2` ping, `3` pong,
//! `4` message) and a message carries one Socket.IO packet:
//!
//! ```text
//! 4 <type> [/<namespace>,] [<ack id>] [<json>]
//! 42/tags,["tag_update",{"smoker.temp":225.4}]
//! 42/tags,7["tag_write",{"tag":"tic1.sp","value":225.0}]
//! 43/tags,7[{"status":"ok"}]
//! ```
//!
//! Binary packets are never used by the tag server and are not supported.

use serde_json::Value;
use thiserror::Error;

/// Path and query of the Socket.IO WebSocket endpoint.
pub const ENGINE_IO_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

/// The namespace every Socket.IO server has.
pub const ROOT_NAMESPACE: &str = "/";

#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// Engine.IO handshake sent by the server (`sid`, `pingInterval`, ...).
    Open(Value),
    Close,
    Ping,
    Pong,
    Connect {
        namespace: String,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        id: Option<u64>,
        name: String,
        data: Value,
    },
    Ack {
        namespace: String,
        id: u64,
        args: Vec<Value>,
    },
    ConnectError {
        namespace: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PacketError {
    #[error("empty packet")]
    Empty,

    #[error("unsupported engine packet type '{0}'")]
    EngineType(char),

    #[error("unsupported socket packet type '{0}'")]
    SocketType(char),

    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("ack without id")]
    MissingAckId,

    #[error("event without a name")]
    MissingEventName,
}

impl Packet {
    pub fn event(namespace: &str, name: &str, data: Value) -> Self {
        Packet::Event {
            namespace: namespace.to_string(),
            id: None,
            name: name.to_string(),
            data,
        }
    }

    pub fn decode(text: &str) -> Result<Self, PacketError> {
        let mut chars = text.chars();
        let kind = chars.next().ok_or(PacketError::Empty)?;
        let rest = chars.as_str();
        match kind {
            '0' => Ok(Packet::Open(parse_json(rest)?)),
            '1' => Ok(Packet::Close),
            '2' => Ok(Packet::Ping),
            '3' => Ok(Packet::Pong),
            '4' => decode_message(rest),
            other => Err(PacketError::EngineType(other)),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            Packet::Open(handshake) => format!("0{handshake}"),
            Packet::Close => "1".to_string(),
            Packet::Ping => "2".to_string(),
            Packet::Pong => "3".to_string(),
            Packet::Connect { namespace } => format!("40{}", namespace_prefix(namespace)),
            Packet::Disconnect { namespace } => format!("41{}", namespace_prefix(namespace)),
            Packet::Event {
                namespace,
                id,
                name,
                data,
            } => {
                let mut args = vec![Value::String(name.clone())];
                if !data.is_null() {
                    args.push(data.clone());
                }
                format!(
                    "42{}{}{}",
                    namespace_prefix(namespace),
                    id.map(|id| id.to_string()).unwrap_or_default(),
                    Value::Array(args)
                )
            }
            Packet::Ack {
                namespace,
                id,
                args,
            } => format!(
                "43{}{id}{}",
                namespace_prefix(namespace),
                Value::Array(args.clone())
            ),
            Packet::ConnectError { namespace, message } => format!(
                "44{}{}",
                namespace_prefix(namespace),
                serde_json::json!({ "message": message })
            ),
        }
    }
}

fn decode_message(text: &str) -> Result<Packet, PacketError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(PacketError::Empty)?;
    let (namespace, rest) = split_namespace(chars.as_str());
    let (id, payload) = split_id(rest);

    match kind {
        '0' => Ok(Packet::Connect { namespace }),
        '1' => Ok(Packet::Disconnect { namespace }),
        '2' => {
            let Value::Array(mut args) = parse_json(payload)? else {
                return Err(PacketError::Payload("event payload is not an array".into()));
            };
            if args.is_empty() {
                return Err(PacketError::MissingEventName);
            }
            let Value::String(name) = args.remove(0) else {
                return Err(PacketError::MissingEventName);
            };
            let data = if args.is_empty() {
                Value::Null
            } else {
                args.remove(0)
            };
            Ok(Packet::Event {
                namespace,
                id,
                name,
                data,
            })
        }
        '3' => {
            let id = id.ok_or(PacketError::MissingAckId)?;
            let args = match parse_json(payload)? {
                Value::Array(args) => args,
                _ => return Err(PacketError::Payload("ack payload is not an array".into())),
            };
            Ok(Packet::Ack {
                namespace,
                id,
                args,
            })
        }
        '4' => {
            let message = match parse_json(payload).unwrap_or(Value::Null) {
                Value::Object(map) => map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                Value::String(message) => message,
                _ => String::new(),
            };
            Ok(Packet::ConnectError { namespace, message })
        }
        other => Err(PacketError::SocketType(other)),
    }
}

fn namespace_prefix(namespace: &str) -> String {
    if namespace == ROOT_NAMESPACE {
        String::new()
    } else {
        format!("{namespace},")
    }
}

fn split_namespace(text: &str) -> (String, &str) {
    if !text.starts_with('/') {
        return (ROOT_NAMESPACE.to_string(), text);
    }
    match text.find(',') {
        Some(comma) => (text[..comma].to_string(), &text[comma + 1..]),
        None => (text.to_string(), ""),
    }
}

fn split_id(text: &str) -> (Option<u64>, &str) {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    match text[..digits].parse() {
        Ok(id) => (Some(id), &text[digits..]),
        Err(_) => (None, text),
    }
}

fn parse_json(text: &str) -> Result<Value, PacketError> {
    if text.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| PacketError::Payload(e.to_string()))
}
