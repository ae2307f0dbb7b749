use super::label_box::{LabelBox, Side};
use super::types::{Rect, Scale};
use crate::color::{Color, ColorError};
use crate::config::{AnnotationConfig, PlacementConfig};
use crate::text_metrics::approximate_text_width;

const DEFAULT_LABEL_COLOR: Color = Color::rgb(10.0, 10.0, 10.0);
const DEFAULT_DARKEN: f64 = 0.75;
const DEFAULT_TEXT_WIDTH_SCALE: f64 = 1.1;

/// Builds marker and label boxes for one chart, converting pixel sizes to
/// data units with a shared scale.
#[derive(Debug, Clone)]
pub struct BoxFactory {
    scale: Scale,
    font_size: f64,
    text_width_scale: f64,
    darken: f64,
    default_color: Color,
}

impl BoxFactory {
    pub fn new(scale: Scale, font_size: f64) -> Self {
        Self {
            scale,
            font_size,
            text_width_scale: DEFAULT_TEXT_WIDTH_SCALE,
            darken: DEFAULT_DARKEN,
            default_color: DEFAULT_LABEL_COLOR,
        }
    }

    pub fn from_config(
        scale: Scale,
        font_size: f64,
        placement: &PlacementConfig,
        annotation: &AnnotationConfig,
    ) -> Result<Self, ColorError> {
        Ok(Self {
            scale,
            font_size,
            text_width_scale: placement.text_width_scale,
            darken: annotation.darken,
            default_color: annotation.default_color.parse()?,
        })
    }

    /// A box of `width_px` x `height_px` centred on `(x, y)`.
    pub fn center_box(&self, x: f64, y: f64, width_px: f64, height_px: f64) -> Rect {
        let half_w = width_px * self.scale.x * 0.5;
        let half_h = height_px * self.scale.y * 0.5;
        Rect::new(self.scale, y + half_h, x + half_w, y - half_h, x - half_w)
    }

    /// Size a label for `text` and place it on `side` of `anchor`.
    ///
    /// A caller-supplied color is darkened; the default color is used as is.
    pub fn text_box(
        &self,
        anchor: Rect,
        text: &str,
        side: Side,
        color: Option<&str>,
    ) -> Result<LabelBox, ColorError> {
        let color = match color {
            Some(raw) => raw.parse::<Color>()?.scale(self.darken),
            None => self.default_color,
        };
        let text_width = approximate_text_width(text) * self.font_size * self.text_width_scale;
        let rect = self.center_box(
            anchor.h_center(),
            anchor.v_center(),
            text_width,
            self.font_size,
        );
        let mut label = LabelBox::new(text, anchor, rect, color);
        label.place_at_side(side, 1.0);
        Ok(label)
    }
}
