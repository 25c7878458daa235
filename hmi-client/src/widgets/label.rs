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

use super::format::format_value;
use super::{Widget, WidgetContext, WidgetKind};
use crate::binding::BindingConfig;
use crate::dom::Element;
use crate::error::BindError;

/// Writes the formatted value as the element's text. Read-only.
pub struct LabelKind;

struct Label {
    element: Rc<dyn Element>,
    config: BindingConfig,
}

impl WidgetKind for LabelKind {
    fn init(
        &self,
        element: Rc<dyn Element>,
        config: &BindingConfig,
        _ctx: &WidgetContext,
    ) -> Result<Rc<dyn Widget>, BindError> {
        Ok(Rc::new(Label {
            element,
            config: config.clone(),
        }))
    }
}

impl Widget for Label {
    fn on_value(&self, value: f64) {
        self.element
            .set_text_content(&format_value(&self.config, value));
    }
}
