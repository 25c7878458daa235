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

//! Platform abstraction layer for hmi-client.
//!
//! The dashboard runs on the browser event loop, and natively (tests, tools)
//! on a current-thread tokio runtime inside a `LocalSet`:
//!
//! - **`now_ms()`**: current time in milliseconds since the Unix epoch
//! - **`TimeoutHandle`**: a one-shot timer, cancelled when dropped
//! - **`sleep(ms)`**: an async delay
//! - **`spawn_local(future)`**: spawn a non-`Send` task on the local executor
//!
//! The implementation is selected at compile time via `cfg(target_arch = "wasm32")`.

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::*;
#[cfg(target_arch = "wasm32")]
pub use web::*;
