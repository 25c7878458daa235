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

//! The dashboard context: everything one page needs, owned in one place.
//!
//! Nothing here is global. Two dashboards over two documents and two
//! transports do not see each other.

use std::rc::{Rc, Weak};

use hmi_history_client::HistorySource;
use hmi_types::{Callback, SubscribeRequest};
use log::{info, warn};
use serde_json::Value;

use crate::binding::{BindingDiagnostic, BindingEngine, SubscriptionIndex};
use crate::config::DashboardConfig;
use crate::dispatch::UpdateDispatcher;
use crate::dom::Document;
use crate::event_bus::EventBus;
use crate::events::HmiEvent;
use crate::historian::{ChartSurface, HistorianConfig, HistorianPoller};
use crate::platform;
use crate::transport::{ConnectOptions, TagTransport, TagWriter};
use crate::widgets::{WidgetContext, WidgetRegistry};

pub struct Dashboard {
    events: EventBus,
    transport: Rc<dyn TagTransport>,
    writer: Rc<TagWriter>,
    index: Rc<SubscriptionIndex>,
    dispatcher: UpdateDispatcher,
    diagnostics: Vec<BindingDiagnostic>,
}

impl Dashboard {
    /// Binds `config.bindings` against `document` with the default widget
    /// kinds, then connects `transport`.
    pub fn start(
        document: &dyn Document,
        transport: Rc<dyn TagTransport>,
        config: &DashboardConfig,
    ) -> Self {
        Self::start_with(
            document,
            transport,
            config,
            &WidgetRegistry::with_defaults(),
            EventBus::new(),
        )
    }

    pub fn start_with(
        document: &dyn Document,
        transport: Rc<dyn TagTransport>,
        config: &DashboardConfig,
        registry: &WidgetRegistry,
        events: EventBus,
    ) -> Self {
        let writer = Rc::new(TagWriter::new(
            transport.clone(),
            events.clone(),
            config.ack_timeout_ms,
            config.read_only(),
        ));
        let ctx = WidgetContext {
            writer: writer.clone(),
        };
        let report = BindingEngine::new(registry, &ctx).bind(document, &config.bindings);
        let index = Rc::new(report.index);
        let dispatcher = UpdateDispatcher::new(index.clone(), events.clone());

        let dashboard = Self {
            events,
            transport,
            writer,
            index,
            dispatcher,
            diagnostics: report.diagnostics,
        };
        dashboard.connect();
        dashboard
    }

    fn connect(&self) {
        let dispatcher = self.dispatcher.clone();
        let on_tag_update = Callback::from(move |payload: Value| {
            dispatcher.dispatch(&payload);
        });

        let events = self.events.clone();
        let transport: Weak<dyn TagTransport> = Rc::downgrade(&self.transport);
        let tags = self.index.tags().to_vec();
        let on_connected = Callback::from(move |_| {
            events.emit(HmiEvent::Connected);
            let Some(transport) = transport.upgrade() else {
                return;
            };
            if tags.is_empty() {
                return;
            }
            let request = SubscribeRequest { tags: tags.clone() };
            if let Err(e) = transport.emit_subscribe(request) {
                warn!("HMI: subscribe failed: {e}");
            }
        });

        let events = self.events.clone();
        let on_connection_lost = Callback::from(move |reason: String| {
            events.emit(HmiEvent::ConnectionLost(reason));
        });

        let options = ConnectOptions {
            on_tag_update,
            on_connected,
            on_connection_lost,
        };
        if let Err(e) = self.transport.connect(options) {
            warn!("HMI: could not connect: {e}");
            self.events.emit(HmiEvent::ConnectionLost(e.to_string()));
        }
    }

    /// Runs backfill and tail polling for a history chart on the local
    /// executor. The chart lives as long as the page.
    pub fn start_historian<H>(
        &self,
        source: H,
        config: &HistorianConfig,
        surface: Box<dyn ChartSurface>,
    ) where
        H: HistorySource + 'static,
    {
        info!(
            "Historian starting for {} series, {} ms window",
            config.series.len(),
            config.window_ms
        );
        let poller = HistorianPoller::new(source, config, surface, self.events.clone());
        platform::spawn_local(poller.run());
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn writer(&self) -> &Rc<TagWriter> {
        &self.writer
    }

    pub fn index(&self) -> &SubscriptionIndex {
        &self.index
    }

    pub fn dispatcher(&self) -> &UpdateDispatcher {
        &self.dispatcher
    }

    /// Bindings skipped at startup.
    pub fn diagnostics(&self) -> &[BindingDiagnostic] {
        &self.diagnostics
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }
}
