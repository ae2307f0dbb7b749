mod factory;
mod label_box;
pub mod label_placement;
mod types;

pub use factory::BoxFactory;
pub use label_box::{LabelBox, Side};
pub use label_placement::{PlacementReport, find_bad_labels, resolve_label_positions};
pub use types::{Rect, Scale, Shape, overlap};

use crate::annotation::{Annotation, annotate};
use crate::color::ColorError;
use crate::config::{AnnotationConfig, Config, PlacementConfig};
use crate::ir::{Chart, OneOrMany};

/// Pixel size of the plotting area and the data spans it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width_px: f64,
    pub height_px: f64,
    pub x_span: f64,
    pub y_span: f64,
}

impl PlotArea {
    pub fn scale(&self) -> Scale {
        Scale::from_spans(self.x_span, self.y_span, self.width_px, self.height_px)
    }
}

/// One point to label, with its scalars already broadcast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRequest<'a> {
    pub x: f64,
    pub y: f64,
    pub text: &'a str,
    pub marker_size: f64,
    pub color: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub markers: Vec<Rect>,
    pub labels: Vec<LabelBox>,
    pub report: PlacementReport,
}

/// Build marker and label boxes for `requests` and resolve their overlaps.
///
/// Labels come back in request order. The only failure is a label color
/// that cannot be parsed.
pub fn place_labels(
    requests: &[LabelRequest<'_>],
    area: PlotArea,
    font_size: f64,
    placement: &PlacementConfig,
    annotation: &AnnotationConfig,
) -> Result<Placement, ColorError> {
    let factory = BoxFactory::from_config(area.scale(), font_size, placement, annotation)?;
    let markers: Vec<Rect> = requests
        .iter()
        .map(|req| factory.center_box(req.x, req.y, req.marker_size, req.marker_size))
        .collect();
    let mut labels = requests
        .iter()
        .zip(&markers)
        .map(|(req, marker)| factory.text_box(*marker, req.text, placement.initial_side, req.color))
        .collect::<Result<Vec<_>, _>>()?;

    let report = resolve_label_positions(
        &markers,
        &mut labels,
        (area.width_px, area.height_px),
        placement,
    );
    Ok(Placement {
        markers,
        labels,
        report,
    })
}

/// Resolved figure geometry in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Canvas {
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    /// Input chart with every default written back and annotations attached.
    pub chart: Chart,
    pub canvas: Canvas,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub scale: Scale,
    pub font_size: f64,
    pub marker_sizes: Vec<f64>,
    pub placement: Placement,
    pub annotations: Vec<Annotation>,
}

/// Resolve chart defaults, place every label and emit annotations.
pub fn compute_layout(chart: &Chart, config: &Config) -> Result<Layout, ColorError> {
    let mut chart = chart.clone();
    let render = &config.render;
    let placement_cfg = &config.placement;

    let fig = &mut chart.layout;
    let canvas = Canvas {
        width: *fig.width.get_or_insert(render.width),
        height: *fig.height.get_or_insert(render.height),
        margin_left: *fig.margin.l.get_or_insert(render.margin),
        margin_right: *fig.margin.r.get_or_insert(render.margin),
        margin_top: *fig.margin.t.get_or_insert(render.margin),
        margin_bottom: *fig.margin.b.get_or_insert(render.margin),
    };

    let count = chart.scatter.point_count();
    let scatter = &mut chart.scatter;
    let marker_sizes: Vec<f64> = match &scatter.marker.size {
        Some(sizes) => (0..count)
            .map(|idx| sizes.get(idx).copied().unwrap_or(placement_cfg.default_marker_size))
            .collect(),
        None => {
            let sizes = vec![placement_cfg.default_marker_size; scatter.x.len()];
            scatter.marker.size = Some(OneOrMany::Many(sizes.clone()));
            sizes.into_iter().take(count).collect()
        }
    };
    let font_size = *scatter.textfont.size.get_or_insert_with(|| {
        (placement_cfg.font_size_fraction * canvas.height).round_ties_even()
    });

    // Ranges cover every supplied value, including points past `count`.
    let x_range = resolve_axis_range(
        &scatter.x,
        &mut chart.layout.xaxis,
        placement_cfg.range_margin,
    );
    let y_range = resolve_axis_range(
        &scatter.y,
        &mut chart.layout.yaxis,
        placement_cfg.range_margin,
    );

    let area = PlotArea {
        width_px: canvas.plot_width(),
        height_px: canvas.plot_height(),
        x_span: (x_range[1] - x_range[0]).abs(),
        y_span: (y_range[1] - y_range[0]).abs(),
    };
    tracing::debug!(
        points = count,
        plot_width = area.width_px,
        plot_height = area.height_px,
        ?x_range,
        ?y_range,
        font_size,
        "resolved chart geometry"
    );

    let scatter = &chart.scatter;
    let requests: Vec<LabelRequest<'_>> = (0..count)
        .map(|idx| LabelRequest {
            x: scatter.x[idx],
            y: scatter.y[idx],
            text: scatter.text[idx].as_str(),
            marker_size: marker_sizes[idx],
            color: scatter
                .marker
                .color
                .as_ref()
                .and_then(|colors| colors.get(idx))
                .map(String::as_str),
        })
        .collect();

    let placement = place_labels(&requests, area, font_size, placement_cfg, &config.annotation)?;
    let annotations = annotate(&placement.labels, font_size, &config.annotation);
    chart.layout.annotations = annotations.clone();

    Ok(Layout {
        chart,
        canvas,
        x_range,
        y_range,
        scale: area.scale(),
        font_size,
        marker_sizes,
        placement,
        annotations,
    })
}

fn resolve_axis_range(values: &[f64], axis: &mut crate::ir::Axis, margin: f64) -> [f64; 2] {
    if let Some(range) = axis.range {
        return range;
    }
    let range = auto_range(values, margin);
    axis.range = Some(range);
    axis.autorange = Some(false);
    range
}

/// Data extent padded by `margin` of its span on both sides.
///
/// An empty or single-valued extent is widened by one unit each way so the
/// axis keeps a usable scale.
pub fn auto_range(values: &[f64], margin: f64) -> [f64; 2] {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return [-1.0, 1.0];
    }
    if min == max {
        return [min - 1.0, max + 1.0];
    }
    let pad = (max - min) * margin;
    [min - pad, max + pad]
}
