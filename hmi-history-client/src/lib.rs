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

//! Cross-platform HTTP client for the smoker historian API.
//!
//! Works on WASM (browser) and native targets via [`reqwest`].
//!
//! # Example
//!
//! ```no_run
//! use hmi_history_client::{HistoryApiClient, HistoryQuery, HistorySource};
//! use hmi_types::Tag;
//!
//! # async fn example() -> Result<(), hmi_history_client::HistoryError> {
//! let client = HistoryApiClient::new("http://smoker.lan:5000/api/history");
//! let tags = [Tag::from("tic1.pid.pv"), Tag::from("tic1.sp")];
//! let page = client.fetch(&HistoryQuery::cursor(&tags, 300, None)).await?;
//! println!("{} rows", page.rows.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod query;

pub use error::HistoryError;
pub use query::{HistoryQuery, HistoryWindow};

use hmi_types::HistoryPage;
use log::debug;
use reqwest::Client;

/// Anything that can answer a history query.
///
/// The historian poller is generic over this so tests can script responses.
#[allow(async_fn_in_trait)]
pub trait HistorySource {
    async fn fetch(&self, query: &HistoryQuery) -> Result<HistoryPage, HistoryError>;
}

/// Typed client for `GET /api/history`.
#[derive(Debug, Clone)]
pub struct HistoryApiClient {
    endpoint: String,
    http: Client,
}

impl HistoryApiClient {
    /// Create a client for the given absolute endpoint URL,
    /// e.g. `"http://smoker.lan:5000/api/history"`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl HistorySource for HistoryApiClient {
    async fn fetch(&self, query: &HistoryQuery) -> Result<HistoryPage, HistoryError> {
        if query.tags.is_empty() {
            return Err(HistoryError::Config("no tags requested".to_string()));
        }
        let params = query.params();
        debug!("GET {} {:?}", self.endpoint, params);
        let response = self.http.get(&self.endpoint).query(&params).send().await?;
        parse_history_response(response).await
    }
}

pub(crate) async fn parse_history_response(
    response: reqwest::Response,
) -> Result<HistoryPage, HistoryError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(HistoryError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let body = response.text().await?;
    decode_page(&body)
}

pub(crate) fn decode_page(body: &str) -> Result<HistoryPage, HistoryError> {
    Ok(serde_json::from_str(body)?)
}
