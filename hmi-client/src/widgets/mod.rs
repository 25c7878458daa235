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

//! Widget kinds and the registry the binding engine resolves them from.
//!
//! A kind is a factory: [`WidgetKind::init`] attaches to an element and
//! returns the live [`Widget`] that receives tag values. New kinds are added
//! with [`WidgetRegistry::register`]; the engine does not change.

mod button;
pub mod format;
mod indicator;
mod input;
mod label;

pub use button::ButtonKind;
pub use indicator::IndicatorKind;
pub use input::InputKind;
pub use label::LabelKind;

use std::collections::HashMap;
use std::rc::Rc;

use crate::binding::BindingConfig;
use crate::dom::Element;
use crate::error::BindError;
use crate::transport::TagWriter;

/// A widget bound to an element for the lifetime of the dashboard.
pub trait Widget {
    fn on_value(&self, value: f64);
}

pub trait WidgetKind {
    fn init(
        &self,
        element: Rc<dyn Element>,
        config: &BindingConfig,
        ctx: &WidgetContext,
    ) -> Result<Rc<dyn Widget>, BindError>;
}

/// What a widget may reach besides its own element.
#[derive(Clone)]
pub struct WidgetContext {
    pub writer: Rc<TagWriter>,
}

#[derive(Default)]
pub struct WidgetRegistry {
    kinds: HashMap<String, Rc<dyn WidgetKind>>,
}

impl WidgetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// `label`, `button`, `input` and `indicator`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("label", LabelKind);
        registry.register("button", ButtonKind);
        registry.register("input", InputKind);
        registry.register("indicator", IndicatorKind);
        registry
    }

    /// Adds `kind` under `name`, replacing any kind already registered there.
    pub fn register(&mut self, name: &str, kind: impl WidgetKind + 'static) {
        self.kinds.insert(name.to_string(), Rc::new(kind));
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn WidgetKind>> {
        self.kinds.get(name).cloned()
    }
}

/// Reads the tag a writable widget needs, or fails its init.
fn required_tag(config: &BindingConfig) -> Result<hmi_types::Tag, BindError> {
    config.tag.clone().ok_or_else(|| BindError::MissingTag {
        widget: config.widget.clone(),
    })
}
