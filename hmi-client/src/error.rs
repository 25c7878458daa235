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

//! Error types for the dashboard engine.

use hmi_types::Tag;
use thiserror::Error;

/// Why a single binding was skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("unknown widget: {0}")]
    UnknownWidget(String),

    #[error("widget '{widget}' needs a tag")]
    MissingTag { widget: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WriteError {
    #[error("transport not ready, dropping write to {0}")]
    NotConnected(Tag),

    #[error("dashboard is read-only, dropping write to {0}")]
    ReadOnly(Tag),

    #[error("write to {tag} could not be sent: {source}")]
    Transport {
        tag: Tag,
        #[source]
        source: TransportError,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("not connected")]
    NotConnected,

    #[error("could not open connection: {0}")]
    Connect(String),

    #[error("could not encode frame: {0}")]
    Encode(String),

    #[error("send failed: {0}")]
    Send(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("runtime configuration not found ({0} missing)")]
    Missing(&'static str),

    #[error("failed to parse dashboard configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("chart canvas #{0} not found")]
    CanvasNotFound(String),

    #[error("could not set up chart: {0}")]
    Setup(String),
}
