/// Decimals used by `format: "fixed"` when no precision is configured.
pub const DEFAULT_PRECISION: usize = 1;
/// Value a button writes when its binding has none.
pub const DEFAULT_BUTTON_VALUE: f64 = 1.0;
/// Class an indicator toggles when its binding has none.
pub const DEFAULT_INDICATOR_CLASS: &str = "on";
/// Class an input gets while it holds text that is not a number.
pub const INVALID_INPUT_CLASS: &str = "invalid";

/// How long a write may wait for its acknowledgement.
pub const DEFAULT_ACK_TIMEOUT_MS: u32 = 5000;
/// Socket.IO namespace of the tag server.
pub const DEFAULT_TAGS_NAMESPACE: &str = "/tags";
/// Delay before the WebSocket transport reconnects.
pub const RECONNECT_DELAY_MS: u32 = 2000;

pub const DEFAULT_HISTORY_PATH: &str = "/api/history";
pub const DEFAULT_CHART_CANVAS: &str = "tempChart";
/// Visible chart window (1 hour).
pub const DEFAULT_WINDOW_MS: f64 = 60.0 * 60.0 * 1000.0;
/// Records per cursor request.
pub const DEFAULT_FETCH_LIMIT: u32 = 300;
/// Delay between polls once caught up.
pub const DEFAULT_POLL_IDLE_MS: u32 = 2000;
