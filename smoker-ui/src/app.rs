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

use std::cell::RefCell;
use std::rc::Rc;

use hmi_client::{
    ChartJsSurface, ConfigError, Dashboard, DashboardConfig, WebDocument, WebSocketTransport,
};
use hmi_history_client::HistoryApiClient;
use log::{info, warn};

use crate::{resolve_url, tags_url, with_page_defaults, PageError};

thread_local! {
    // The dashboard lives as long as the page.
    static PAGE: RefCell<Option<Dashboard>> = const { RefCell::new(None) };
}

fn page_config() -> DashboardConfig {
    match DashboardConfig::from_window() {
        Ok(config) => config,
        Err(ConfigError::Missing(what)) => {
            info!("{what} missing, using smoker page defaults");
            DashboardConfig::default()
        }
        Err(e) => {
            warn!("{e}; using smoker page defaults");
            DashboardConfig::default()
        }
    }
}

/// Binds the page, connects the tag transport and starts the history chart.
pub fn run() -> Result<(), PageError> {
    let config = with_page_defaults(page_config());
    let location = gloo_utils::window().location();
    let origin = location.origin().unwrap_or_default();

    let ws_url = if config.ws_url.is_empty() {
        tags_url(
            &location.protocol().unwrap_or_default(),
            &location.host().unwrap_or_default(),
        )
    } else {
        config.ws_url.clone()
    };

    let document = WebDocument::from_window().ok_or(PageError::NoDocument)?;
    let transport = Rc::new(WebSocketTransport::new(&ws_url, &config.namespace));
    let dashboard = Dashboard::start(&document, transport, &config);

    if let Some(historian) = &config.historian {
        match ChartJsSurface::attach(historian) {
            Ok(surface) => {
                let source = HistoryApiClient::new(&resolve_url(&origin, &config.history_url));
                dashboard.start_historian(source, historian, Box::new(surface));
            }
            Err(e) => warn!("History chart disabled: {}", PageError::from(e)),
        }
    }

    info!(
        "Smoker dashboard up: {} widgets, {} bindings skipped, tags via {ws_url} namespace {}",
        dashboard.index().len(),
        dashboard.diagnostics().len(),
        config.namespace
    );
    PAGE.with(|page| *page.borrow_mut() = Some(dashboard));
    Ok(())
}
