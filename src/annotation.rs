use serde::{Deserialize, Serialize};

use crate::config::AnnotationConfig;
use crate::layout::LabelBox;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: f64,
    pub color: String,
}

/// A positioned label: an arrow from the label centre (`ax`, `ay`) to the
/// marker centre (`x`, `y`), both in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub ax: f64,
    pub ay: f64,
    pub xref: String,
    pub yref: String,
    pub axref: String,
    pub ayref: String,
    pub text: String,
    pub showarrow: bool,
    pub arrowhead: u32,
    pub opacity: f64,
    pub arrowcolor: String,
    pub arrow_opacity: f64,
    pub font: Font,
}

impl Annotation {
    /// Emit the record for a placed label.
    ///
    /// The arrow is hidden when the label sits closer than
    /// `style.arrow_threshold` pixels to its marker and dimmed to
    /// `style.arrow_opacity` otherwise. `style.opacity` is copied to the
    /// record as is and does not affect the arrow.
    pub fn from_label(label: &LabelBox, font_size: f64, style: &AnnotationConfig) -> Self {
        let arrow_opacity = if label.distance_to_anchor() < style.arrow_threshold {
            0.0
        } else {
            style.arrow_opacity
        };
        let color = label.color();
        let anchor = label.anchor();
        Self {
            x: anchor.h_center(),
            y: anchor.v_center(),
            ax: label.rect.h_center(),
            ay: label.rect.v_center(),
            xref: "x".to_string(),
            yref: "y".to_string(),
            axref: "x".to_string(),
            ayref: "y".to_string(),
            text: label.text().to_string(),
            showarrow: true,
            arrowhead: style.arrowhead,
            opacity: style.opacity,
            arrowcolor: color.to_rgba(arrow_opacity),
            arrow_opacity,
            font: Font {
                size: font_size,
                color: color.to_string(),
            },
        }
    }

    pub fn arrow_visible(&self) -> bool {
        self.arrow_opacity > 0.0
    }
}

pub fn annotate(labels: &[LabelBox], font_size: f64, style: &AnnotationConfig) -> Vec<Annotation> {
    labels
        .iter()
        .map(|label| Annotation::from_label(label, font_size, style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BoxFactory, Scale, Side};

    fn label_at(side: Side, distance: f64) -> LabelBox {
        let factory = BoxFactory::new(Scale::new(0.5, 0.25), 12.0);
        let anchor = factory.center_box(3.0, 4.0, 10.0, 10.0);
        let mut label = factory
            .text_box(anchor, "point", Side::Top, Some("rgb(200,100,40)"))
            .unwrap();
        label.place_at_side(side, distance);
        label
    }

    #[test]
    fn arrow_hidden_below_threshold() {
        let style = AnnotationConfig::default();
        let record = Annotation::from_label(&label_at(Side::Top, 1.0), 12.0, &style);
        assert_eq!(record.arrow_opacity, 0.0);
        assert!(!record.arrow_visible());
        assert_eq!(record.arrowcolor, "rgba(150,75,30,0)");
    }

    #[test]
    fn arrow_dimmed_beyond_threshold() {
        let style = AnnotationConfig::default();
        for distance in [3.0, 5.0, 40.0] {
            let record = Annotation::from_label(&label_at(Side::Right, distance), 12.0, &style);
            assert_eq!(record.arrow_opacity, 0.25);
            assert_eq!(record.arrowcolor, "rgba(150,75,30,0.25)");
        }
    }

    #[test]
    fn base_opacity_does_not_reach_the_arrow() {
        for opacity in [0.0, 0.3, 1.0] {
            let style = AnnotationConfig {
                opacity,
                ..Default::default()
            };
            let near = Annotation::from_label(&label_at(Side::Top, 1.0), 12.0, &style);
            let far = Annotation::from_label(&label_at(Side::Top, 30.0), 12.0, &style);
            assert_eq!(near.arrow_opacity, 0.0);
            assert_eq!(far.arrow_opacity, 0.25);
            assert_eq!(far.opacity, opacity);
        }
    }

    #[test]
    fn record_carries_positions_text_and_font() {
        let label = label_at(Side::Bottom, 10.0);
        let record = Annotation::from_label(&label, 14.0, &AnnotationConfig::default());
        assert_eq!((record.x, record.y), (3.0, 4.0));
        assert_eq!(record.ax, label.rect.h_center());
        assert_eq!(record.ay, label.rect.v_center());
        assert!(record.ay < record.y);
        assert_eq!(record.text, "point");
        assert_eq!(record.font.size, 14.0);
        assert_eq!(record.font.color, "rgb(150,75,30)");
        assert!(record.showarrow);
        assert_eq!(record.xref, "x");
        assert_eq!(record.ayref, "y");
    }

    #[test]
    fn annotate_keeps_input_order() {
        let labels = vec![label_at(Side::Top, 1.0), label_at(Side::Left, 20.0)];
        let records = annotate(&labels, 12.0, &AnnotationConfig::default());
        assert_eq!(records.len(), 2);
        assert!(records[0].ax > records[1].ax);
    }

    #[test]
    fn serializes_with_plot_field_names() {
        let record = Annotation::from_label(&label_at(Side::Top, 1.0), 12.0, &AnnotationConfig::default());
        let value = serde_json::to_value(&record).unwrap();
        for key in ["x", "y", "ax", "ay", "axref", "showarrow", "arrowcolor", "font"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
