use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::Rect;
use crate::color::Color;

/// Where a label sits relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
    TopRight,
    BottomRight,
    BottomLeft,
    TopLeft,
}

impl Side {
    /// Search order used by the placement solver.
    pub const SEARCH_ORDER: [Side; 8] = [
        Side::Top,
        Side::Bottom,
        Side::Right,
        Side::Left,
        Side::TopRight,
        Side::BottomRight,
        Side::BottomLeft,
        Side::TopLeft,
    ];

    /// Parse a side from a token such as `"top"` or `"bottomleft"`.
    ///
    /// Matching is by containment, so `"top-left"` and `"lefttop"` both
    /// resolve to [`Side::TopLeft`].
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.to_ascii_lowercase();
        let top = token.contains("top");
        let bottom = token.contains("bottom");
        let left = token.contains("left");
        let right = token.contains("right");
        match (top, bottom, left, right) {
            (true, false, false, false) => Some(Side::Top),
            (false, true, false, false) => Some(Side::Bottom),
            (false, false, true, false) => Some(Side::Left),
            (false, false, false, true) => Some(Side::Right),
            (true, false, false, true) => Some(Side::TopRight),
            (false, true, false, true) => Some(Side::BottomRight),
            (false, true, true, false) => Some(Side::BottomLeft),
            (true, false, true, false) => Some(Side::TopLeft),
            _ => None,
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Side::TopRight | Side::BottomRight | Side::BottomLeft | Side::TopLeft
        )
    }

    fn is_top(self) -> bool {
        matches!(self, Side::Top | Side::TopRight | Side::TopLeft)
    }

    fn is_bottom(self) -> bool {
        matches!(self, Side::Bottom | Side::BottomRight | Side::BottomLeft)
    }

    fn is_left(self) -> bool {
        matches!(self, Side::Left | Side::BottomLeft | Side::TopLeft)
    }

    fn is_right(self) -> bool {
        matches!(self, Side::Right | Side::TopRight | Side::BottomRight)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
            Side::TopRight => "topright",
            Side::BottomRight => "bottomright",
            Side::BottomLeft => "bottomleft",
            Side::TopLeft => "topleft",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text box tethered to a fixed marker box.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBox {
    pub rect: Rect,
    anchor: Rect,
    text: String,
    color: Color,
    side: Side,
}

impl LabelBox {
    /// Build a label box from an already-sized rectangle. The box is not
    /// moved; call [`LabelBox::place_at_side`] to position it.
    pub fn new(text: impl Into<String>, anchor: Rect, rect: Rect, color: Color) -> Self {
        Self {
            rect,
            anchor,
            text: text.into(),
            color,
            side: Side::Top,
        }
    }

    pub fn anchor(&self) -> &Rect {
        &self.anchor
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Side this box was last placed at.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Move the box next to its anchor on `side`, `distance` pixels away.
    ///
    /// The pixel distance is turned into data units through each axis'
    /// own scale. Diagonal placements shrink both components by √2/2 so the
    /// offset length matches the cardinal case.
    pub fn place_at_side(&mut self, side: Side, distance: f64) {
        let mut x_off = self.rect.scale.x * distance;
        let mut y_off = self.rect.scale.y * distance;
        if side.is_diagonal() {
            x_off *= FRAC_1_SQRT_2;
            y_off *= FRAC_1_SQRT_2;
        }

        let anchor = &self.anchor;
        let vertical = if side.is_top() {
            anchor.top - self.rect.bottom + y_off
        } else if side.is_bottom() {
            anchor.bottom - self.rect.top - y_off
        } else {
            anchor.v_center() - self.rect.v_center()
        };
        let horizontal = if side.is_left() {
            anchor.left - self.rect.right - x_off
        } else if side.is_right() {
            anchor.right - self.rect.left + x_off
        } else {
            anchor.h_center() - self.rect.h_center()
        };

        self.rect.offset(horizontal, vertical);
        self.side = side;
    }

    /// Pixel distance between the label's edge and the anchor's edge.
    ///
    /// Axes where the extents overlap contribute nothing.
    pub fn distance_to_anchor(&self) -> f64 {
        let anchor = &self.anchor;
        let rect = &self.rect;
        let x_gap = ((anchor.h_center() - rect.h_center()).abs()
            - (anchor.width() + rect.width()) * 0.5)
            .max(0.0);
        let y_gap = ((anchor.v_center() - rect.v_center()).abs()
            - (anchor.height() + rect.height()) * 0.5)
            .max(0.0);
        let x_px = x_gap / rect.scale.x;
        let y_px = y_gap / rect.scale.y;
        x_px.hypot(y_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::Scale;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn label(scale: Scale) -> LabelBox {
        let anchor = Rect::new(scale, 1.0, 1.0, -1.0, -1.0);
        let rect = Rect::new(scale, 2.0, 4.0, -2.0, -4.0);
        LabelBox::new("label", anchor, rect, Color::rgb(10.0, 10.0, 10.0))
    }

    #[test]
    fn parses_side_tokens() {
        assert_eq!(Side::from_token("top"), Some(Side::Top));
        assert_eq!(Side::from_token("Right"), Some(Side::Right));
        assert_eq!(Side::from_token("bottomleft"), Some(Side::BottomLeft));
        assert_eq!(Side::from_token("top-right"), Some(Side::TopRight));
        assert_eq!(Side::from_token("lefttop"), Some(Side::TopLeft));
        assert_eq!(Side::from_token("middle"), None);
        assert_eq!(Side::from_token("topbottom"), None);
    }

    #[test]
    fn side_names_round_trip() {
        for side in Side::SEARCH_ORDER {
            assert_eq!(Side::from_token(side.as_str()), Some(side));
        }
    }

    #[test]
    fn top_places_above_anchor_centered() {
        let mut label = label(Scale::new(0.5, 2.0));
        label.place_at_side(Side::Top, 3.0);
        assert!(approx_eq(label.rect.bottom, 1.0 + 6.0));
        assert!(approx_eq(label.rect.height(), 4.0));
        assert!(approx_eq(label.rect.h_center(), 0.0));
        assert_eq!(label.side(), Side::Top);
    }

    #[test]
    fn cardinal_sides_use_per_axis_scale() {
        let scale = Scale::new(0.5, 2.0);
        let mut label = label(scale);

        label.place_at_side(Side::Bottom, 1.0);
        assert!(approx_eq(label.rect.top, -1.0 - 2.0));
        assert!(approx_eq(label.rect.h_center(), 0.0));

        label.place_at_side(Side::Left, 1.0);
        assert!(approx_eq(label.rect.right, -1.0 - 0.5));
        assert!(approx_eq(label.rect.v_center(), 0.0));

        label.place_at_side(Side::Right, 4.0);
        assert!(approx_eq(label.rect.left, 1.0 + 2.0));
        assert!(approx_eq(label.rect.v_center(), 0.0));
    }

    #[test]
    fn diagonal_sides_shrink_offset_by_sqrt_half() {
        let mut label = label(Scale::new(1.0, 1.0));
        label.place_at_side(Side::TopRight, 2.0);
        let expected = 2.0 * FRAC_1_SQRT_2;
        assert!(approx_eq(label.rect.bottom, 1.0 + expected));
        assert!(approx_eq(label.rect.left, 1.0 + expected));

        label.place_at_side(Side::BottomLeft, 2.0);
        assert!(approx_eq(label.rect.top, -1.0 - expected));
        assert!(approx_eq(label.rect.right, -1.0 - expected));
    }

    #[test]
    fn placement_does_not_depend_on_previous_position() {
        let mut a = label(Scale::new(1.0, 1.0));
        let mut b = label(Scale::new(1.0, 1.0));
        a.place_at_side(Side::Left, 5.0);
        a.place_at_side(Side::TopLeft, 2.0);
        b.place_at_side(Side::TopLeft, 2.0);
        assert!(approx_eq(a.rect.top, b.rect.top));
        assert!(approx_eq(a.rect.left, b.rect.left));
    }

    #[test]
    fn placement_never_moves_anchor() {
        let mut label = label(Scale::new(1.0, 1.0));
        let anchor = *label.anchor();
        for side in Side::SEARCH_ORDER {
            label.place_at_side(side, 7.0);
        }
        assert_eq!(*label.anchor(), anchor);
    }

    #[test]
    fn distance_is_zero_when_extents_overlap() {
        let label = label(Scale::new(1.0, 1.0));
        assert_eq!(label.distance_to_anchor(), 0.0);
    }

    #[test]
    fn distance_matches_pixel_gap() {
        let mut label = label(Scale::new(0.5, 2.0));
        label.place_at_side(Side::Top, 3.0);
        assert!(approx_eq(label.distance_to_anchor(), 3.0));
        label.place_at_side(Side::Right, 4.0);
        assert!(approx_eq(label.distance_to_anchor(), 4.0));
    }

    #[test]
    fn diagonal_distance_matches_cardinal() {
        let mut label = label(Scale::new(1.0, 1.0));
        label.place_at_side(Side::BottomRight, 10.0);
        assert!(approx_eq(label.distance_to_anchor(), 10.0));
    }
}
