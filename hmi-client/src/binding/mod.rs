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

//! Declarative binding table: selector -> {widget kind, tag, display config}.

mod diagnostics;
mod engine;
mod subscriptions;

pub use diagnostics::{
    BindingDiagnostic, HMI_BIND_ELEMENT_NOT_FOUND, HMI_UNKNOWN_WIDGET_KIND, HMI_WIDGET_INIT_FAILED,
};
pub use engine::{BindReport, BindingEngine};
pub use subscriptions::SubscriptionIndex;

use std::fmt;

use hmi_types::Tag;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// How a numeric value is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// Fixed-point with `precision` decimals.
    Fixed,
    /// The number as JavaScript would print it. Unknown formats land here.
    #[default]
    #[serde(other)]
    Raw,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BindingConfig {
    pub widget: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,
    #[serde(default)]
    pub format: ValueFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Value a button writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// CSS class an indicator toggles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl BindingConfig {
    pub fn new(widget: &str) -> Self {
        Self {
            widget: widget.to_string(),
            ..Default::default()
        }
    }

    pub fn label(tag: &str) -> Self {
        Self::new("label").tag(tag)
    }

    pub fn button(tag: &str, value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::new("button").tag(tag)
        }
    }

    pub fn input(tag: &str) -> Self {
        Self::new("input").tag(tag)
    }

    pub fn indicator(tag: &str) -> Self {
        Self::new("indicator").tag(tag)
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = Some(Tag::from(tag));
        self
    }

    pub fn fixed(mut self, precision: usize) -> Self {
        self.format = ValueFormat::Fixed;
        self.precision = Some(precision);
        self
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub selector: String,
    pub config: BindingConfig,
}

/// Bindings in declaration order.
///
/// Deserializes from a map of selector -> config and keeps the map's order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BindingTable {
    bindings: Vec<Binding>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, selector: &str, config: BindingConfig) -> Self {
        self.bindings.push(Binding {
            selector: selector.to_string(),
            config,
        });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<'de> Deserialize<'de> for BindingTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = BindingTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of selector to binding config")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<BindingTable, A::Error> {
                let mut bindings = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((selector, config)) = map.next_entry::<String, BindingConfig>()? {
                    bindings.push(Binding { selector, config });
                }
                Ok(BindingTable { bindings })
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
