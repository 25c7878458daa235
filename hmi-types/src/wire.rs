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

//! Event names and payloads of the tag server's `/tags` namespace.

use serde::{Deserialize, Serialize};

use crate::Tag;

pub const EVENT_TAG_UPDATE: &str = "tag_update";
pub const EVENT_TAG_WRITE: &str = "tag_write";
pub const EVENT_SUBSCRIBE: &str = "subscribe";

pub const ACK_STATUS_OK: &str = "ok";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteRequest {
    pub tag: Tag,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteAck {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl WriteAck {
    pub fn ok() -> Self {
        Self {
            status: ACK_STATUS_OK.to_string(),
            msg: None,
        }
    }

    pub fn error(status: &str, msg: impl Into<String>) -> Self {
        Self {
            status: status.to_string(),
            msg: Some(msg.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ACK_STATUS_OK
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub tags: Vec<Tag>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn write_request_layout() {
        let request = WriteRequest {
            tag: Tag::from("heater.1.pct"),
            value: 40.0,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"tag": "heater.1.pct", "value": 40.0})
        );
    }

    #[test]
    fn ack_with_error_message() {
        let ack: WriteAck =
            serde_json::from_value(json!({"status": "error", "msg": "Tag not writable"})).unwrap();
        assert!(!ack.is_ok());
        assert_eq!(ack.msg.as_deref(), Some("Tag not writable"));
        assert!(WriteAck::ok().is_ok());
    }

    #[test]
    fn ack_without_message() {
        let ack: WriteAck = serde_json::from_value(json!({"status": "ok"})).unwrap();
        assert_eq!(ack, WriteAck::ok());
    }
}
