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

//! `web-sys` backed DOM handles.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use hmi_types::Callback;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};

use super::{Document, Element};

pub struct WebElement {
    element: web_sys::Element,
    listeners: RefCell<Vec<EventListener>>,
}

impl WebElement {
    pub fn new(element: web_sys::Element) -> Self {
        Self {
            element,
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl Element for WebElement {
    fn text_content(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn value(&self) -> String {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            self.element.get_attribute("value").unwrap_or_default()
        }
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Err(e) = self.element.set_attribute("value", value) {
            warn!("could not set value attribute: {e:?}");
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn toggle_class(&self, class: &str, present: bool) {
        if let Err(e) = self.element.class_list().toggle_with_force(class, present) {
            warn!("could not toggle class '{class}': {e:?}");
        }
    }

    fn add_event_listener(&self, event: &'static str, callback: Callback<()>) {
        let listener = EventListener::new(&self.element, event, move |_| callback.emit(()));
        self.listeners.borrow_mut().push(listener);
    }
}

/// The page's `document`.
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }
}

impl Document for WebDocument {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn Element>> {
        match self.document.query_selector(selector) {
            Ok(Some(element)) => Some(Rc::new(WebElement::new(element))),
            Ok(None) => None,
            Err(e) => {
                warn!("invalid selector '{selector}': {e:?}");
                None
            }
        }
    }
}
