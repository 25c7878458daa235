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

//! Parsing of server-pushed `tag_update` payloads.
//!
//! The server pushes either a bare object of tag -> value, or the envelope
//! `{"tags": {...}, "ts": <seconds>}` emitted by the mock source. A batch is
//! validated as a whole before anything is dispatched from it.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::Tag;

const ENVELOPE_TAGS_KEY: &str = "tags";
const ENVELOPE_TS_KEY: &str = "ts";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    #[error("tag update is not an object (got {0})")]
    NotAnObject(&'static str),

    #[error("tag '{tag}' carries a non-numeric value ({kind})")]
    NonNumeric { tag: String, kind: &'static str },
}

/// One pushed batch of tag values, in the order the server inserted them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagBatch {
    pub entries: Vec<(Tag, f64)>,
    /// Server timestamp in seconds, only present on enveloped batches.
    pub ts: Option<f64>,
}

impl TagBatch {
    pub fn from_json(payload: &Value) -> Result<Self, BatchError> {
        let object = payload
            .as_object()
            .ok_or_else(|| BatchError::NotAnObject(json_kind(payload)))?;

        match object.get(ENVELOPE_TAGS_KEY) {
            Some(Value::Object(tags)) => Ok(Self {
                entries: parse_entries(tags)?,
                ts: object.get(ENVELOPE_TS_KEY).and_then(Value::as_f64),
            }),
            _ => Ok(Self {
                entries: parse_entries(object)?,
                ts: None,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tag, f64)> {
        self.entries.iter().map(|(tag, value)| (tag, *value))
    }
}

fn parse_entries(object: &Map<String, Value>) -> Result<Vec<(Tag, f64)>, BatchError> {
    object
        .iter()
        .map(|(name, value)| {
            numeric_value(value)
                .map(|v| (Tag::from(name.as_str()), v))
                .ok_or_else(|| BatchError::NonNumeric {
                    tag: name.clone(),
                    kind: json_kind(value),
                })
        })
        .collect()
}

/// Numbers pass through, booleans become 1/0, anything else is rejected.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
