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

//! Defaults for the smoker page. A page that publishes `window.__HMI_CONFIG`
//! overrides any of these.

use hmi_client::historian::AxisRange;
use hmi_client::{Axis, BindingConfig, BindingTable, HistorianConfig, SeriesSpec};

pub const PROCESS_TEMP_TAG: &str = "tic1.pid.pv";
pub const SETPOINT_TAG: &str = "tic1.sp";
pub const CONTROL_OUTPUT_TAG: &str = "tic1.pid.cv";

pub const SMOKER_TEMP_TAG: &str = "smoker.temp";
pub const MEAT_TEMP_TAG: &str = "meat.temp";
pub const HEATER_PCT_TAG: &str = "heater.1.pct";

pub fn default_bindings() -> BindingTable {
    BindingTable::new()
        .bind("#smoker-temp", BindingConfig::label(SMOKER_TEMP_TAG).fixed(1))
        .bind("#meat-temp", BindingConfig::label(MEAT_TEMP_TAG).fixed(1))
        .bind("#heater-pct", BindingConfig::label(HEATER_PCT_TAG))
        .bind("#heater-setpoint", BindingConfig::input(HEATER_PCT_TAG).fixed(0))
        .bind(
            "#tic1-pv",
            BindingConfig::label(PROCESS_TEMP_TAG).fixed(1).unit("°F"),
        )
        .bind("#tic1-sp", BindingConfig::label(SETPOINT_TAG).fixed(1).unit("°F"))
        .bind(
            "#tic1-cv",
            BindingConfig::label(CONTROL_OUTPUT_TAG).fixed(0).unit("%"),
        )
}

/// Process temp and setpoint on the left axis (°F), control output on the
/// right (%), one hour visible.
pub fn default_historian() -> HistorianConfig {
    HistorianConfig {
        y_range: Some(AxisRange {
            min: 0.0,
            max: 500.0,
        }),
        y2_range: Some(AxisRange {
            min: 0.0,
            max: 100.0,
        }),
        ..HistorianConfig::new(vec![
            SeriesSpec::new(PROCESS_TEMP_TAG, "Process Temp (°F)"),
            SeriesSpec::new(SETPOINT_TAG, "Setpoint (°F)").dashed(),
            SeriesSpec::new(CONTROL_OUTPUT_TAG, "Control Output (%)").axis(Axis::Y2),
        ])
    }
}
