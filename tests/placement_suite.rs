use std::path::Path;

use scatter_labels::layout::find_bad_labels;
use scatter_labels::{Config, Layout, Side, Theme, compute_layout, parse_charts, render_svg};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn layout_fixture(rel: &str) -> Vec<Layout> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    assert!(path.exists(), "fixture missing: {}", rel);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    let charts = parse_charts(&input).expect("parse failed");
    let config = Config::default();
    charts
        .iter()
        .map(|chart| compute_layout(chart, &config).expect("layout failed"))
        .collect()
}

#[test]
fn place_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "sparse.json",
        "autorange.json",
        "colored.json",
        "dense.json5",
        "multiple.json",
    ];

    for rel in candidates {
        for layout in layout_fixture(rel) {
            let points = layout.chart.scatter.point_count();
            assert_eq!(layout.annotations.len(), points, "{rel}: one annotation per point");
            assert_eq!(layout.placement.labels.len(), points, "{rel}");
            assert_eq!(
                layout.placement.report.unresolved,
                find_bad_labels(&layout.placement.markers, &layout.placement.labels),
                "{rel}: report must match final overlaps"
            );
            for (label, record) in layout.placement.labels.iter().zip(&layout.annotations) {
                assert_eq!(label.text(), record.text, "{rel}: annotations keep input order");
                assert!(
                    record.arrow_opacity == 0.0 || record.arrow_opacity == 0.25,
                    "{rel}: unexpected arrow opacity {}",
                    record.arrow_opacity
                );
            }
            let svg = render_svg(&layout, &Theme::modern());
            assert_valid_svg(&svg, rel);
        }
    }
}

#[test]
fn sparse_points_sit_on_top() {
    let layout = layout_fixture("sparse.json").remove(0);
    assert!(layout.placement.report.is_resolved());
    assert_eq!(layout.placement.report.iterations, 1);
    for label in &layout.placement.labels {
        assert_eq!(label.side(), Side::Top);
    }
    for record in &layout.annotations {
        assert_eq!(record.arrow_opacity, 0.0);
    }
}

#[test]
fn autorange_pads_data_extent() {
    let layout = layout_fixture("autorange.json").remove(0);
    assert!((layout.x_range[0] - 0.1).abs() < 1e-9);
    assert!((layout.x_range[1] - 10.9).abs() < 1e-9);
    assert!((layout.y_range[0] - 0.3).abs() < 1e-9);
    assert!((layout.y_range[1] - 8.7).abs() < 1e-9);
    assert_eq!(layout.chart.layout.xaxis.autorange, Some(false));
}

#[test]
fn colored_labels_are_darkened() {
    let layout = layout_fixture("colored.json").remove(0);
    assert_eq!(layout.font_size, 11.0);
    assert_eq!(layout.canvas.plot_width(), 580.0);
    assert_eq!(layout.canvas.plot_height(), 410.0);
    assert_eq!(layout.annotations[0].font.color, "rgb(23,89,135)");
    assert_eq!(layout.annotations[1].font.color, "rgb(191,95,10)");
    assert_eq!(layout.annotations[2].font.color, "rgba(33,120,33,0.8)");
}

#[test]
fn multiple_charts_are_independent() {
    let layouts = layout_fixture("multiple.json");
    assert_eq!(layouts.len(), 2);
    assert_eq!(layouts[0].annotations.len(), 2);
    assert_eq!(layouts[1].annotations.len(), 3);
    assert_eq!(layouts[1].annotations[0].font.color, "rgb(38,76,114)");
}

#[test]
fn placement_is_repeatable() {
    let first = layout_fixture("dense.json5");
    let second = layout_fixture("dense.json5");
    assert_eq!(first[0].annotations, second[0].annotations);
    assert_eq!(first[0].placement.report, second[0].placement.report);
}
