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

use super::ChartBuffer;

/// Something that can draw the chart buffer.
pub trait ChartSurface {
    fn render(&self, chart: &ChartBuffer);
}

#[cfg(feature = "wasm")]
pub use chartjs::ChartJsSurface;

#[cfg(feature = "wasm")]
mod chartjs {
    use log::warn;
    use serde::Serialize;
    use serde_json::{json, Value};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::HtmlCanvasElement;

    use super::ChartSurface;
    use crate::error::SurfaceError;
    use crate::historian::{Axis, AxisRange, ChartBuffer, HistorianConfig};

    #[wasm_bindgen]
    extern "C" {
        /// The page-global `Chart` from Chart.js (with a time adapter loaded).
        #[wasm_bindgen(js_name = Chart)]
        type JsChart;

        #[wasm_bindgen(constructor, js_class = "Chart", catch)]
        fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<JsChart, JsValue>;

        #[wasm_bindgen(method, setter = data)]
        fn set_data(this: &JsChart, data: &JsValue);

        #[wasm_bindgen(method, setter = options)]
        fn set_options(this: &JsChart, options: &JsValue);

        #[wasm_bindgen(method)]
        fn update(this: &JsChart, mode: &str);
    }

    /// Stepped line chart over a time x axis, `y` on the left and `y2` on
    /// the right.
    pub struct ChartJsSurface {
        chart: JsChart,
        y_range: Option<AxisRange>,
        y2_range: Option<AxisRange>,
    }

    impl ChartJsSurface {
        pub fn attach(config: &HistorianConfig) -> Result<Self, SurfaceError> {
            let canvas = gloo::utils::document()
                .get_element_by_id(&config.canvas)
                .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
                .ok_or_else(|| SurfaceError::CanvasNotFound(config.canvas.clone()))?;

            let empty = ChartBuffer::new(&config.series);
            let initial = json!({
                "type": "line",
                "data": chart_data(&empty),
                "options": chart_options(&empty, config.y_range, config.y2_range),
            });
            let chart = JsChart::new(&canvas, &to_js(&initial)?)
                .map_err(|e| SurfaceError::Setup(format!("{e:?}")))?;
            Ok(Self {
                chart,
                y_range: config.y_range,
                y2_range: config.y2_range,
            })
        }
    }

    impl ChartSurface for ChartJsSurface {
        fn render(&self, chart: &ChartBuffer) {
            let data = to_js(&chart_data(chart));
            let options = to_js(&chart_options(chart, self.y_range, self.y2_range));
            match (data, options) {
                (Ok(data), Ok(options)) => {
                    self.chart.set_data(&data);
                    self.chart.set_options(&options);
                    self.chart.update("none");
                }
                (Err(e), _) | (_, Err(e)) => warn!("chart render skipped: {e}"),
            }
        }
    }

    fn to_js(value: &Value) -> Result<JsValue, SurfaceError> {
        value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| SurfaceError::Setup(e.to_string()))
    }

    fn chart_data(chart: &ChartBuffer) -> Value {
        let datasets: Vec<Value> = chart
            .series()
            .iter()
            .map(|series| {
                let spec = series.spec();
                let border_width = if spec.axis == Axis::Y2 { 1 } else { 2 };
                let mut dataset = json!({
                    "label": spec.display_label(),
                    "data": series.points(),
                    "stepped": true,
                    "pointRadius": 0,
                    "borderWidth": border_width,
                    "yAxisID": spec.axis.id(),
                });
                if spec.dashed {
                    dataset["borderDash"] = json!([6, 4]);
                }
                dataset
            })
            .collect();
        json!({ "labels": chart.labels(), "datasets": datasets })
    }

    fn chart_options(
        chart: &ChartBuffer,
        y_range: Option<AxisRange>,
        y2_range: Option<AxisRange>,
    ) -> Value {
        let grid = json!({ "display": true, "color": "rgba(255,255,255,0.15)" });
        let mut x = json!({ "type": "time", "ticks": { "color": "#fff" }, "grid": grid });
        if let Some((min, max)) = chart.x_range() {
            x["min"] = json!(min);
            x["max"] = json!(max);
        }
        let mut y = json!({
            "type": "linear",
            "ticks": { "color": "#fff" },
            "grid": grid,
        });
        let mut y2 = json!({
            "type": "linear",
            "position": "right",
            "grid": { "drawOnChartArea": false },
        });
        for (axis, range) in [(&mut y, y_range), (&mut y2, y2_range)] {
            if let Some(range) = range {
                axis["min"] = json!(range.min);
                axis["max"] = json!(range.max);
            }
        }
        json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "animation": false,
            "scales": { "x": x, "y": y, "y2": y2 },
        })
    }
}
