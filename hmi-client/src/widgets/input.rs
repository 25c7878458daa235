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

use std::cell::Cell;
use std::rc::Rc;

use hmi_types::Callback;
use log::{debug, warn};

use super::format::format_number;
use super::{required_tag, Widget, WidgetContext, WidgetKind};
use crate::binding::BindingConfig;
use crate::constants::INVALID_INPUT_CLASS;
use crate::dom::Element;
use crate::error::BindError;

/// A numeric entry field (e.g. a setpoint).
///
/// Incoming values are reflected into the field while it does not have focus.
/// A value that arrives while the operator is editing is held and shown on
/// `blur` unless the operator committed their own text. On `change` the text
/// is parsed and written; text that is not a finite number marks the field
/// `invalid` and writes nothing.
pub struct InputKind;

struct Input {
    element: Rc<dyn Element>,
    config: BindingConfig,
    edit: Rc<EditState>,
}

#[derive(Default)]
struct EditState {
    editing: Cell<bool>,
    held: Cell<Option<f64>>,
}

impl WidgetKind for InputKind {
    fn init(
        &self,
        element: Rc<dyn Element>,
        config: &BindingConfig,
        ctx: &WidgetContext,
    ) -> Result<Rc<dyn Widget>, BindError> {
        let tag = required_tag(config)?;
        let writer = ctx.writer.clone();
        let edit = Rc::new(EditState::default());

        for event in ["focus", "input"] {
            let edit = edit.clone();
            element.add_event_listener(
                event,
                Callback::from(move |_| edit.editing.set(true)),
            );
        }

        let field = Rc::downgrade(&element);
        let blur_edit = edit.clone();
        let blur_config = config.clone();
        element.add_event_listener(
            "blur",
            Callback::from(move |_| {
                blur_edit.editing.set(false);
                let (Some(field), Some(value)) = (field.upgrade(), blur_edit.held.take()) else {
                    return;
                };
                field.set_value(&format_number(&blur_config, value));
            }),
        );

        let field = Rc::downgrade(&element);
        let change_edit = edit.clone();
        element.add_event_listener(
            "change",
            Callback::from(move |_| {
                // The operator's text wins over anything that arrived meanwhile.
                change_edit.held.set(None);
                let Some(field) = field.upgrade() else {
                    return;
                };
                let text = field.value();
                match parse_number(&text) {
                    Some(value) => {
                        field.toggle_class(INVALID_INPUT_CLASS, false);
                        let _ = writer.write_tag(&tag, value);
                    }
                    None => {
                        warn!("Invalid value for {tag}: {text:?}");
                        field.toggle_class(INVALID_INPUT_CLASS, true);
                    }
                }
            }),
        );
        Ok(Rc::new(Input {
            element,
            config: config.clone(),
            edit,
        }))
    }
}

impl Widget for Input {
    fn on_value(&self, value: f64) {
        if self.edit.editing.get() {
            debug!("Holding {value} while the field is being edited");
            self.edit.held.set(Some(value));
            return;
        }
        self.element.set_value(&format_number(&self.config, value));
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::parse_number;

    #[test]
    fn parses_trimmed_decimal_text() {
        assert_eq!(parse_number(" 225 "), Some(225.0));
        assert_eq!(parse_number("42.5"), Some(42.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
    }

    #[test]
    fn rejects_blank_and_non_numeric_text() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("hot"), None);
        assert_eq!(parse_number("12abc"), None);
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }
}
