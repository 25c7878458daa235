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

use log::{error, info, warn};

use super::{BindingDiagnostic, BindingTable, SubscriptionIndex};
use crate::dom::Document;
use crate::error::BindError;
use crate::widgets::{WidgetContext, WidgetRegistry};

/// Outcome of a bind pass.
#[derive(Debug, Default)]
pub struct BindReport {
    pub index: SubscriptionIndex,
    /// Bindings that were skipped, in table order.
    pub diagnostics: Vec<BindingDiagnostic>,
}

/// Turns a binding table into live widgets.
pub struct BindingEngine<'a> {
    registry: &'a WidgetRegistry,
    ctx: &'a WidgetContext,
}

impl<'a> BindingEngine<'a> {
    pub fn new(registry: &'a WidgetRegistry, ctx: &'a WidgetContext) -> Self {
        Self { registry, ctx }
    }

    /// Resolves every binding against `document`, in table order.
    ///
    /// A binding that cannot be resolved is skipped and reported; the rest
    /// still bind.
    pub fn bind(&self, document: &dyn Document, table: &BindingTable) -> BindReport {
        let mut report = BindReport::default();

        for binding in table.iter() {
            let selector = binding.selector.as_str();
            let config = &binding.config;

            let Some(element) = document.query_selector(selector) else {
                let err = BindError::ElementNotFound(selector.to_string());
                warn!("HMI: {err}");
                report
                    .diagnostics
                    .push(BindingDiagnostic::from_error(selector, &config.widget, &err));
                continue;
            };

            let Some(kind) = self.registry.get(&config.widget) else {
                let err = BindError::UnknownWidget(config.widget.clone());
                error!("HMI: {err} (selector {selector})");
                report
                    .diagnostics
                    .push(BindingDiagnostic::from_error(selector, &config.widget, &err));
                continue;
            };

            let widget = match kind.init(element, config, self.ctx) {
                Ok(widget) => widget,
                Err(err) => {
                    warn!("HMI: could not init {selector}: {err}");
                    report
                        .diagnostics
                        .push(BindingDiagnostic::from_error(selector, &config.widget, &err));
                    continue;
                }
            };

            if let Some(tag) = &config.tag {
                report.index.insert(tag.clone(), widget);
            }
        }

        info!(
            "HMI: bound {} widgets over {} tags ({} skipped)",
            report.index.len(),
            report.index.tags().len(),
            report.diagnostics.len()
        );
        report
    }
}
