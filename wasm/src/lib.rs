use scatter_labels::{Config, Theme, annotate_chart_json, render_chart_svg};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacementOptions {
    theme: Option<String>,
    font_family: Option<String>,
    max_iterations: Option<usize>,
    width: Option<f64>,
    height: Option<f64>,
}

fn build_config(options: PlacementOptions) -> Config {
    let mut config = Config::default();
    if options.theme.as_deref() == Some("modern") {
        config.theme = Theme::modern();
    }
    if let Some(font_family) = options.font_family {
        config.theme.font_family = font_family;
    }
    if let Some(max_iterations) = options.max_iterations {
        config.placement.max_iterations = max_iterations;
    }
    if let Some(width) = options.width {
        config.render.width = width;
    }
    if let Some(height) = options.height {
        config.render.height = height;
    }
    config
}

fn parse_options(options_json: Option<String>) -> Result<PlacementOptions, JsValue> {
    match options_json {
        Some(raw) => serde_json::from_str::<PlacementOptions>(&raw)
            .map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(PlacementOptions::default()),
    }
}

/// Returns the chart with resolved defaults and `layout.annotations` filled in.
#[wasm_bindgen]
pub fn place_labels_json(chart_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let config = build_config(parse_options(options_json)?);
    annotate_chart_json(chart_json, &config).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn render_labels_svg(chart_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let config = build_config(parse_options(options_json)?);
    render_chart_svg(chart_json, &config).map_err(|error| JsValue::from_str(&error.to_string()))
}
