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

use std::rc::Rc;

use super::{Widget, WidgetContext, WidgetKind};
use crate::binding::BindingConfig;
use crate::constants::DEFAULT_INDICATOR_CLASS;
use crate::dom::Element;
use crate::error::BindError;

/// Sets a CSS class while the value is non-zero.
pub struct IndicatorKind;

struct Indicator {
    element: Rc<dyn Element>,
    class: String,
}

impl WidgetKind for IndicatorKind {
    fn init(
        &self,
        element: Rc<dyn Element>,
        config: &BindingConfig,
        _ctx: &WidgetContext,
    ) -> Result<Rc<dyn Widget>, BindError> {
        let class = config
            .class
            .clone()
            .filter(|class| !class.is_empty())
            .unwrap_or_else(|| DEFAULT_INDICATOR_CLASS.to_string());
        Ok(Rc::new(Indicator { element, class }))
    }
}

impl Widget for Indicator {
    fn on_value(&self, value: f64) {
        // NaN counts as off.
        self.element.toggle_class(&self.class, value != 0.0 && !value.is_nan());
    }
}
