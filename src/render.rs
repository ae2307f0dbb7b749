use crate::layout::Layout;
use crate::theme::Theme;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Maps data coordinates to figure pixels.
struct Projection {
    left: f64,
    top: f64,
    plot_width: f64,
    plot_height: f64,
    x_range: [f64; 2],
    y_range: [f64; 2],
}

impl Projection {
    fn new(layout: &Layout) -> Self {
        Self {
            left: layout.canvas.margin_left,
            top: layout.canvas.margin_top,
            plot_width: layout.canvas.plot_width(),
            plot_height: layout.canvas.plot_height(),
            x_range: layout.x_range,
            y_range: layout.y_range,
        }
    }

    fn x(&self, value: f64) -> f64 {
        let span = self.x_range[1] - self.x_range[0];
        if span == 0.0 {
            return self.left + self.plot_width * 0.5;
        }
        self.left + (value - self.x_range[0]) / span * self.plot_width
    }

    fn y(&self, value: f64) -> f64 {
        let span = self.y_range[1] - self.y_range[0];
        if span == 0.0 {
            return self.top + self.plot_height * 0.5;
        }
        self.top + (self.y_range[1] - value) / span * self.plot_height
    }
}

pub fn render_svg(layout: &Layout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.canvas.width.max(1.0);
    let height = layout.canvas.height.max(1.0);
    let proj = Projection::new(layout);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
        proj.left,
        proj.top,
        proj.plot_width.max(0.0),
        proj.plot_height.max(0.0),
        theme.plot_background,
        theme.frame_color
    ));

    let scatter = &layout.chart.scatter;
    for (idx, marker) in layout.placement.markers.iter().enumerate() {
        let fill = scatter
            .marker
            .color
            .as_ref()
            .and_then(|colors| colors.get(idx))
            .map(String::as_str)
            .unwrap_or(theme.marker_color.as_str());
        let radius = layout.marker_sizes.get(idx).copied().unwrap_or(0.0) * 0.5;
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"0.5\"/>",
            proj.x(marker.h_center()),
            proj.y(marker.v_center()),
            radius,
            escape_xml(fill),
            theme.marker_stroke
        ));
    }

    for record in &layout.annotations {
        if record.showarrow && record.arrow_visible() {
            svg.push_str(&format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
                proj.x(record.ax),
                proj.y(record.ay),
                proj.x(record.x),
                proj.y(record.y),
                record.arrowcolor
            ));
        }
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" opacity=\"{}\">{}</text>",
            proj.x(record.ax),
            proj.y(record.ay),
            escape_xml(&theme.font_family),
            record.font.size,
            record.font.color,
            record.opacity,
            escape_xml(&record.text)
        ));
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

pub fn write_output_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
        }
        None => {
            println!("{}", json);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    if let Some(family) = theme.font_family.split(',').next() {
        opt.font_family = family.trim().trim_matches('"').to_string();
    }
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
