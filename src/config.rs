use crate::layout::Side;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Upper bound on solver passes.
    pub max_iterations: usize,
    /// Distance step per pass, as a fraction of the smaller canvas side.
    pub step_fraction: f64,
    pub initial_side: Side,
    /// Padding factor applied to the approximate text width.
    pub text_width_scale: f64,
    pub default_marker_size: f64,
    /// Font size fallback, as a fraction of the figure height.
    pub font_size_fraction: f64,
    /// Margin added on each side of an auto-computed axis range.
    pub range_margin: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            step_fraction: 0.01,
            initial_side: Side::Top,
            text_width_scale: 1.1,
            default_marker_size: 10.0,
            font_size_fraction: 0.015,
            range_margin: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationConfig {
    pub arrowhead: u32,
    pub opacity: f64,
    /// Arrows to labels closer than this many pixels are hidden.
    pub arrow_threshold: f64,
    pub arrow_opacity: f64,
    /// Factor applied to caller-supplied label colors.
    pub darken: f64,
    pub default_color: String,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            arrowhead: 0,
            opacity: 0.8,
            arrow_threshold: 2.0,
            arrow_opacity: 0.25,
            darken: 0.75,
            default_color: "rgb(10,10,10)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: 50.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub placement: PlacementConfig,
    pub annotation: AnnotationConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            placement: PlacementConfig::default(),
            annotation: AnnotationConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    background: Option<String>,
    plot_background: Option<String>,
    frame_color: Option<String>,
    marker_color: Option<String>,
    marker_stroke: Option<String>,
    text_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PlacementConfigFile {
    max_iterations: Option<usize>,
    step_fraction: Option<NumberOrString>,
    initial_side: Option<String>,
    text_width_scale: Option<NumberOrString>,
    default_marker_size: Option<NumberOrString>,
    font_size_fraction: Option<NumberOrString>,
    range_margin: Option<NumberOrString>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AnnotationConfigFile {
    arrowhead: Option<u32>,
    opacity: Option<NumberOrString>,
    arrow_threshold: Option<NumberOrString>,
    arrow_opacity: Option<NumberOrString>,
    darken: Option<NumberOrString>,
    default_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    margin: Option<f64>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    placement: Option<PlacementConfigFile>,
    annotation: Option<AnnotationConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "classic" | "default" => config.theme = Theme::classic(),
            other => anyhow::bail!("unknown theme `{other}`"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.plot_background {
            config.theme.plot_background = v;
        }
        if let Some(v) = vars.frame_color {
            config.theme.frame_color = v;
        }
        if let Some(v) = vars.marker_color {
            config.theme.marker_color = v;
        }
        if let Some(v) = vars.marker_stroke {
            config.theme.marker_stroke = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
    }

    if let Some(placement) = parsed.placement {
        if let Some(v) = placement.max_iterations {
            config.placement.max_iterations = v;
        }
        if let Some(v) = placement.step_fraction.and_then(|v| v.as_f64()) {
            config.placement.step_fraction = v;
        }
        if let Some(token) = placement.initial_side.as_deref() {
            config.placement.initial_side = Side::from_token(token)
                .ok_or_else(|| anyhow::anyhow!("unknown label side `{token}`"))?;
        }
        if let Some(v) = placement.text_width_scale.and_then(|v| v.as_f64()) {
            config.placement.text_width_scale = v;
        }
        if let Some(v) = placement.default_marker_size.and_then(|v| v.as_f64()) {
            config.placement.default_marker_size = v;
        }
        if let Some(v) = placement.font_size_fraction.and_then(|v| v.as_f64()) {
            config.placement.font_size_fraction = v;
        }
        if let Some(v) = placement.range_margin.and_then(|v| v.as_f64()) {
            config.placement.range_margin = v;
        }
    }

    if let Some(annotation) = parsed.annotation {
        if let Some(v) = annotation.arrowhead {
            config.annotation.arrowhead = v;
        }
        if let Some(v) = annotation.opacity.and_then(|v| v.as_f64()) {
            config.annotation.opacity = v;
        }
        if let Some(v) = annotation.arrow_threshold.and_then(|v| v.as_f64()) {
            config.annotation.arrow_threshold = v;
        }
        if let Some(v) = annotation.arrow_opacity.and_then(|v| v.as_f64()) {
            config.annotation.arrow_opacity = v;
        }
        if let Some(v) = annotation.darken.and_then(|v| v.as_f64()) {
            config.annotation.darken = v;
        }
        if let Some(v) = annotation.default_color {
            v.parse::<crate::color::Color>()?;
            config.annotation.default_color = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.margin {
            config.render.margin = v;
        }
        // Same knob as `themeVariables.background`; this one wins.
        if let Some(v) = render.background {
            config.theme.background = v;
        }
    }

    Ok(config)
}
