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

//! Runtime configuration of a dashboard page.
//!
//! The page publishes it as `window.__HMI_CONFIG` before the wasm module
//! loads. Flags are strings, the same way the page templates write them.

use hmi_types::truthy;
use serde::Deserialize;

use crate::binding::BindingTable;
use crate::constants::{DEFAULT_ACK_TIMEOUT_MS, DEFAULT_HISTORY_PATH, DEFAULT_TAGS_NAMESPACE};
use crate::error::ConfigError;
use crate::historian::HistorianConfig;

pub const CONFIG_GLOBAL: &str = "__HMI_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardConfig {
    /// Engine.IO WebSocket endpoint. Empty means "derive it from the page".
    #[serde(rename = "wsUrl")]
    #[serde(default)]
    pub ws_url: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(rename = "historyUrl")]
    #[serde(default = "default_history_url")]
    pub history_url: String,
    /// `null` waits for write acknowledgements forever.
    #[serde(rename = "ackTimeoutMs")]
    #[serde(default = "default_ack_timeout_ms")]
    pub ack_timeout_ms: Option<u32>,
    #[serde(rename = "readOnly")]
    #[serde(default)]
    pub read_only: String,
    #[serde(default)]
    pub bindings: BindingTable,
    #[serde(default)]
    pub historian: Option<HistorianConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ws_url: String::new(),
            namespace: default_namespace(),
            history_url: default_history_url(),
            ack_timeout_ms: default_ack_timeout_ms(),
            read_only: String::new(),
            bindings: BindingTable::default(),
            historian: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads `window.__HMI_CONFIG`.
    #[cfg(feature = "wasm")]
    pub fn from_window() -> Result<Self, ConfigError> {
        use wasm_bindgen::JsValue;

        let win = web_sys::window().ok_or(ConfigError::Missing("window"))?;
        let config = js_sys::Reflect::get(&win, &JsValue::from_str(CONFIG_GLOBAL))
            .unwrap_or(JsValue::UNDEFINED);
        if config.is_undefined() || config.is_null() {
            return Err(ConfigError::Missing("window.__HMI_CONFIG"));
        }
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| ConfigError::Parse(format!("{CONFIG_GLOBAL}: {e}")))
    }

    pub fn read_only(&self) -> bool {
        truthy(Some(self.read_only.as_str()))
    }
}

fn default_namespace() -> String {
    DEFAULT_TAGS_NAMESPACE.to_string()
}

fn default_history_url() -> String {
    DEFAULT_HISTORY_PATH.to_string()
}

fn default_ack_timeout_ms() -> Option<u32> {
    Some(DEFAULT_ACK_TIMEOUT_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ValueFormat;
    use crate::historian::PollMode;

    #[test]
    fn empty_object_gives_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.namespace, "/tags");
        assert_eq!(config.history_url, "/api/history");
        assert_eq!(config.ack_timeout_ms, Some(5000));
        assert!(!config.read_only());
        assert!(config.historian.is_none());
    }

    #[test]
    fn null_ack_timeout_disables_it() {
        let config = DashboardConfig::from_json(r#"{"ackTimeoutMs": null}"#).unwrap();
        assert_eq!(config.ack_timeout_ms, None);
    }

    #[test]
    fn read_only_flag_is_truthy_string() {
        for (raw, expected) in [("true", true), ("1", true), ("TRUE", true), ("no", false)] {
            let config =
                DashboardConfig::from_json(&format!(r#"{{"readOnly": "{raw}"}}"#)).unwrap();
            assert_eq!(config.read_only(), expected, "readOnly = {raw}");
        }
    }

    #[test]
    fn bindings_keep_page_order() {
        let config = DashboardConfig::from_json(
            r##"{
                "wsUrl": "ws://smoker.lan:5000/socket.io/?EIO=4&transport=websocket",
                "namespace": "/pit",
                "bindings": {
                    "#pv": {"widget": "label", "tag": "tic1.pid.pv", "format": "fixed", "precision": 1, "unit": "°F"},
                    "#sp": {"widget": "label", "tag": "tic1.sp"},
                    "#start": {"widget": "button", "tag": "tic1.mode", "value": 2}
                },
                "historian": {"series": [{"tag": "tic1.pid.pv"}], "poll": {"mode": "range"}}
            }"##,
        )
        .unwrap();

        assert_eq!(
            config.ws_url,
            "ws://smoker.lan:5000/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(config.namespace, "/pit");
        let selectors: Vec<_> = config.bindings.iter().map(|b| b.selector.as_str()).collect();
        assert_eq!(selectors, vec!["#pv", "#sp", "#start"]);

        let pv = &config.bindings.iter().next().unwrap().config;
        assert_eq!(pv.format, ValueFormat::Fixed);
        assert_eq!(pv.precision, Some(1));
        assert_eq!(pv.unit.as_deref(), Some("°F"));

        let historian = config.historian.unwrap();
        assert_eq!(historian.poll, PollMode::Range { interval_ms: 2000 });
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = DashboardConfig::from_json(r#"{"bindings": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err:?}");
    }
}
