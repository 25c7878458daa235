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

//! smoker-ui library root.
//!
//! Page wiring for the smoker dashboard. The pure parts (page defaults, URL
//! resolution) are here so they can be tested natively; the browser start-up
//! lives in `app` and the binary entry point in `main.rs`.

pub mod constants;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
pub use app::run;

pub use constants::{default_bindings, default_historian};

use hmi_client::transport::packet::ENGINE_IO_PATH;
use hmi_client::{DashboardConfig, SurfaceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("page has no document")]
    NoDocument,

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Fills whatever the page left out with the smoker page defaults.
pub fn with_page_defaults(mut config: DashboardConfig) -> DashboardConfig {
    if config.bindings.is_empty() {
        config.bindings = default_bindings();
    }
    if config.historian.is_none() {
        config.historian = Some(default_historian());
    }
    config
}

/// The Socket.IO endpoint on the page's own host: `wss://` for https pages,
/// `ws://` otherwise.
pub fn tags_url(protocol: &str, host: &str) -> String {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}{ENGINE_IO_PATH}")
}

/// Resolves `url` against the page origin unless it is already absolute.
pub fn resolve_url(origin: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if url.starts_with('/') {
        format!("{}{url}", origin.trim_end_matches('/'))
    } else {
        format!("{}/{url}", origin.trim_end_matches('/'))
    }
}
