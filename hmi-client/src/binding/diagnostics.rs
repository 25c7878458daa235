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
 */

use serde::Serialize;

use crate::error::BindError;

pub const HMI_BIND_ELEMENT_NOT_FOUND: &str = "HMI_BIND_ELEMENT_NOT_FOUND";
pub const HMI_UNKNOWN_WIDGET_KIND: &str = "HMI_UNKNOWN_WIDGET_KIND";
pub const HMI_WIDGET_INIT_FAILED: &str = "HMI_WIDGET_INIT_FAILED";

/// A binding that was skipped during bind, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingDiagnostic {
    pub code: &'static str,
    pub message: String,
    pub selector: String,
    pub widget: String,
}

impl BindingDiagnostic {
    pub(crate) fn from_error(selector: &str, widget: &str, error: &BindError) -> Self {
        let code = match error {
            BindError::ElementNotFound(_) => HMI_BIND_ELEMENT_NOT_FOUND,
            BindError::UnknownWidget(_) => HMI_UNKNOWN_WIDGET_KIND,
            BindError::MissingTag { .. } => HMI_WIDGET_INIT_FAILED,
        };
        Self {
            code,
            message: error.to_string(),
            selector: selector.to_string(),
            widget: widget.to_string(),
        }
    }
}
