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

use hmi_types::Callback;

use super::{required_tag, Widget, WidgetContext, WidgetKind};
use crate::binding::BindingConfig;
use crate::constants::DEFAULT_BUTTON_VALUE;
use crate::dom::Element;
use crate::error::BindError;

/// Writes a fixed value to its tag on every click. Ignores updates.
pub struct ButtonKind;

struct Button {
    _element: Rc<dyn Element>,
}

impl WidgetKind for ButtonKind {
    fn init(
        &self,
        element: Rc<dyn Element>,
        config: &BindingConfig,
        ctx: &WidgetContext,
    ) -> Result<Rc<dyn Widget>, BindError> {
        let tag = required_tag(config)?;
        let value = config.value.unwrap_or(DEFAULT_BUTTON_VALUE);
        let writer = ctx.writer.clone();
        element.add_event_listener(
            "click",
            Callback::from(move |_| {
                // The writer logs and reports dropped writes itself.
                let _ = writer.write_tag(&tag, value);
            }),
        );
        Ok(Rc::new(Button { _element: element }))
    }
}

impl Widget for Button {
    fn on_value(&self, _value: f64) {}
}
