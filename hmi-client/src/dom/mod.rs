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

//! The slice of the DOM the widgets touch.
//!
//! Widgets only ever read and write text content, form values and CSS class
//! membership, and listen for a handful of events. Keeping that behind two
//! traits lets the binding engine run against `web-sys` in the browser and
//! against in-memory fakes natively.

use std::rc::Rc;

use hmi_types::Callback;

#[cfg(feature = "wasm")]
mod web;

#[cfg(feature = "wasm")]
pub use web::{WebDocument, WebElement};

pub trait Element {
    fn text_content(&self) -> String;
    fn set_text_content(&self, text: &str);

    /// Current form value; empty for elements that have none.
    fn value(&self) -> String;
    fn set_value(&self, value: &str);

    fn has_class(&self, class: &str) -> bool;
    fn toggle_class(&self, class: &str, present: bool);

    /// Registers `callback` for `event` (e.g. `"click"`, `"change"`) for the
    /// lifetime of the element handle.
    fn add_event_listener(&self, event: &'static str, callback: Callback<()>);
}

pub trait Document {
    /// Resolves a selector to its first matching element. Invalid selectors
    /// resolve to `None`.
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn Element>>;
}
