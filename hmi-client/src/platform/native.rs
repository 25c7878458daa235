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

//! Native platform primitives.
//!
//! Everything here is single-threaded: timers and tasks are spawned with
//! `tokio::task::spawn_local`, so a `LocalSet` must be driving the caller.

use std::future::Future;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::task::JoinHandle;

/// Returns the current time in milliseconds since the Unix epoch.
pub fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as f64
}

/// A one-shot timer. The callback does not run if the handle is dropped first.
pub struct TimeoutHandle {
    handle: Option<JoinHandle<()>>,
}

impl TimeoutHandle {
    /// **Important:** must be called from inside a `tokio::task::LocalSet`.
    pub fn new<F: FnOnce() + 'static>(millis: u32, callback: F) -> Self {
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(Duration::from_millis(millis as u64)).await;
            callback();
        });
        Self {
            handle: Some(handle),
        }
    }
}

impl Drop for TimeoutHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

pub async fn sleep(millis: u32) {
    tokio::time::sleep(Duration::from_millis(millis as u64)).await;
}

/// Spawn a task on the current `LocalSet`.
pub fn spawn_local<F: Future<Output = ()> + 'static>(future: F) {
    tokio::task::spawn_local(future);
}
