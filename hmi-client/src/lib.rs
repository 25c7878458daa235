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

//! This crate provides the browser side of the smoker HMI: it binds page
//! elements to process tags, fans pushed tag updates out to them, sends
//! operator writes back, and keeps a rolling history chart up to date.
//!
//! It makes no assumptions about the page markup beyond the selectors in the
//! binding table and the id of the chart canvas. The DOM, the push transport,
//! the history endpoint and the chart are reached through traits, so
//! everything except the `web-sys` adapters (behind the `wasm` feature) also
//! runs natively.
//!
//! # Outline of usage
//!
//! ```no_run
//! # use std::rc::Rc;
//! # use hmi_client::*;
//! # fn page(document: &dyn Document, transport: Rc<dyn TagTransport>) {
//! let config = DashboardConfig::from_json(r##"{
//!     "bindings": {
//!         "#pv": {"widget": "label", "tag": "tic1.pid.pv", "format": "fixed", "precision": 1, "unit": "°F"},
//!         "#start": {"widget": "button", "tag": "tic1.mode", "value": 2}
//!     }
//! }"##).unwrap();
//!
//! let dashboard = Dashboard::start(document, transport, &config);
//! let mut events = dashboard.events().subscribe();
//! # }
//! ```

pub mod binding;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod dispatch;
pub mod dom;
pub mod error;
pub mod event_bus;
pub mod events;
pub mod historian;
pub mod platform;
pub mod transport;
pub mod widgets;

pub use binding::{
    Binding, BindingConfig, BindingDiagnostic, BindingEngine, BindingTable, BindReport,
    SubscriptionIndex, ValueFormat,
};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use dispatch::UpdateDispatcher;
pub use dom::{Document, Element};
pub use error::{BindError, ConfigError, SurfaceError, TransportError, WriteError};
pub use event_bus::EventBus;
pub use events::HmiEvent;
pub use historian::{
    Axis, AxisRange, ChartBuffer, ChartSurface, HistorianConfig, HistorianPoller, PollMode,
    PollStep, SeriesSpec,
};
pub use transport::{ConnectOptions, SocketIoSession, TagTransport, TagWriter};
pub use widgets::{Widget, WidgetContext, WidgetKind, WidgetRegistry};

#[cfg(feature = "wasm")]
pub use dom::{WebDocument, WebElement};
#[cfg(feature = "wasm")]
pub use historian::ChartJsSurface;
#[cfg(feature = "wasm")]
pub use transport::WebSocketTransport;
