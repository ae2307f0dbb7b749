use crate::layout::{Layout, Scale, Shape, Side};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const MARKER_FILL: &str = "rgba(128, 0, 128, 0.7)";
const LABEL_FILL: &str = "rgba(0, 128, 128, 0.4)";
const UNRESOLVED_FILL: &str = "rgba(220, 20, 60, 0.6)";

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub scale: Scale,
    pub font_size: f64,
    pub iterations: usize,
    pub markers: Vec<Shape>,
    pub labels: Vec<LabelDump>,
}

#[derive(Debug, Serialize)]
pub struct LabelDump {
    pub index: usize,
    pub text: String,
    pub side: Side,
    pub distance_px: f64,
    pub unresolved: bool,
    pub shape: Shape,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let report = &layout.placement.report;
        let markers = layout
            .placement
            .markers
            .iter()
            .map(|marker| marker.as_shape(MARKER_FILL))
            .collect();
        let labels = layout
            .placement
            .labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let unresolved = report.unresolved.contains(&index);
                let fill = if unresolved { UNRESOLVED_FILL } else { LABEL_FILL };
                LabelDump {
                    index,
                    text: label.text().to_string(),
                    side: label.side(),
                    distance_px: label.distance_to_anchor(),
                    unresolved,
                    shape: label.rect.as_shape(fill),
                }
            })
            .collect();

        LayoutDump {
            width: layout.canvas.width,
            height: layout.canvas.height,
            plot_width: layout.canvas.plot_width(),
            plot_height: layout.canvas.plot_height(),
            x_range: layout.x_range,
            y_range: layout.y_range,
            scale: layout.scale,
            font_size: layout.font_size,
            iterations: report.iterations,
            markers,
            labels,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
