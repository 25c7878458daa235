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

//! WASM (browser) platform primitives.
//!
//! These implementations use browser APIs through `js-sys`, `gloo-timers`,
//! and `wasm-bindgen-futures`.

use std::future::Future;

/// Returns the current time in milliseconds since the Unix epoch.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// A one-shot timer. Wraps `gloo_timers::callback::Timeout`, which is
/// cancelled when dropped.
pub struct TimeoutHandle {
    _timeout: gloo_timers::callback::Timeout,
}

impl TimeoutHandle {
    pub fn new<F: FnOnce() + 'static>(millis: u32, callback: F) -> Self {
        Self {
            _timeout: gloo_timers::callback::Timeout::new(millis, callback),
        }
    }
}

pub async fn sleep(millis: u32) {
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

/// Spawn an async task on the browser's microtask queue.
pub fn spawn_local<F: Future<Output = ()> + 'static>(future: F) {
    wasm_bindgen_futures::spawn_local(future);
}
