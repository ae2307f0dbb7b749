pub mod annotation;
#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;

pub use annotation::{Annotation, annotate};
#[cfg(feature = "cli")]
pub use cli::run;
pub use color::{Color, ColorError};
pub use config::{Config, load_config};
pub use ir::Chart;
pub use layout::{
    LabelBox, LabelRequest, Layout, PlotArea, Rect, Scale, Side, compute_layout, place_labels,
    resolve_label_positions,
};
pub use parser::{parse_chart, parse_charts};
pub use render::render_svg;
pub use theme::Theme;

/// Parse a chart document, place its labels and return the annotated chart
/// as pretty JSON.
pub fn annotate_chart_json(input: &str, config: &Config) -> anyhow::Result<String> {
    let chart = parse_chart(input)?;
    let layout = compute_layout(&chart, config)?;
    Ok(serde_json::to_string_pretty(&layout.chart)?)
}

/// Parse a chart document and render it with placed labels as SVG.
pub fn render_chart_svg(input: &str, config: &Config) -> anyhow::Result<String> {
    let chart = parse_chart(input)?;
    let layout = compute_layout(&chart, config)?;
    Ok(render_svg(&layout, &config.theme))
}
