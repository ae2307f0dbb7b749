use serde::Serialize;

/// Data units per pixel along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale for a plot area of `width_px` x `height_px` showing the given data spans.
    pub fn from_spans(x_span: f64, y_span: f64, width_px: f64, height_px: f64) -> Self {
        Self {
            x: x_span / width_px,
            y: y_span / height_px,
        }
    }
}

/// Axis-aligned box in data-space units.
///
/// `top >= bottom` and `right >= left`. The scale travels with the box so
/// pixel offsets can be converted per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    pub scale: Scale,
}

impl Rect {
    pub fn new(scale: Scale, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
            scale,
        }
    }

    pub fn h_center(&self) -> f64 {
        (self.right + self.left) * 0.5
    }

    pub fn v_center(&self) -> f64 {
        (self.top + self.bottom) * 0.5
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Translate by data-space deltas.
    pub fn offset(&mut self, horizontal: f64, vertical: f64) {
        self.top += vertical;
        self.bottom += vertical;
        self.right += horizontal;
        self.left += horizontal;
    }

    /// Closed-interval intersection test: shared edges count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let h_overlaps = self.left <= other.right && self.right >= other.left;
        let v_overlaps = self.bottom <= other.top && self.top >= other.bottom;
        h_overlaps && v_overlaps
    }

    pub fn as_shape(&self, fill: &str) -> Shape {
        Shape {
            kind: "rect",
            x0: self.left,
            y0: self.bottom,
            x1: self.right,
            y1: self.top,
            fillcolor: fill.to_string(),
        }
    }
}

pub fn overlap(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Filled rectangle record in data coordinates, used for debug overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub fillcolor: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Scale {
        Scale::new(1.0, 1.0)
    }

    #[test]
    fn derived_attributes() {
        let rect = Rect::new(unit(), 4.0, 6.0, 2.0, 0.0);
        assert_eq!(rect.h_center(), 3.0);
        assert_eq!(rect.v_center(), 3.0);
        assert_eq!(rect.width(), 6.0);
        assert_eq!(rect.height(), 2.0);
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (
                Rect::new(unit(), 10.0, 10.0, 0.0, 0.0),
                Rect::new(unit(), 15.0, 15.0, 5.0, 5.0),
            ),
            (
                Rect::new(unit(), 10.0, 10.0, 0.0, 0.0),
                Rect::new(unit(), 30.0, 30.0, 20.0, 20.0),
            ),
            (
                Rect::new(unit(), 10.0, 10.0, 0.0, 0.0),
                Rect::new(unit(), 5.0, 30.0, 4.0, 20.0),
            ),
        ];
        for (a, b) in cases {
            assert_eq!(overlap(&a, &b), overlap(&b, &a));
        }
    }

    #[test]
    fn disjoint_boxes_do_not_overlap() {
        let a = Rect::new(unit(), 10.0, 10.0, 0.0, 0.0);
        let b = Rect::new(unit(), 10.0, 30.0, 0.0, 20.0);
        let c = Rect::new(unit(), 30.0, 10.0, 20.0, 0.0);
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn contained_box_overlaps() {
        let outer = Rect::new(unit(), 20.0, 20.0, 0.0, 0.0);
        let inner = Rect::new(unit(), 6.0, 6.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn shared_edge_counts_as_overlap() {
        let a = Rect::new(unit(), 10.0, 10.0, 0.0, 0.0);
        let right = Rect::new(unit(), 10.0, 20.0, 0.0, 10.0);
        let above = Rect::new(unit(), 20.0, 10.0, 10.0, 0.0);
        assert!(a.overlaps(&right));
        assert!(a.overlaps(&above));
    }

    #[test]
    fn offset_round_trip_restores_extents() {
        let original = Rect::new(Scale::new(0.5, 0.25), 3.5, 8.0, 1.25, -2.0);
        let mut rect = original;
        rect.offset(4.75, -1.5);
        assert_ne!(rect, original);
        rect.offset(-4.75, 1.5);
        assert_eq!(rect, original);
    }

    #[test]
    fn offset_moves_all_edges() {
        let mut rect = Rect::new(unit(), 2.0, 2.0, 0.0, 0.0);
        rect.offset(1.0, -3.0);
        assert_eq!((rect.top, rect.right, rect.bottom, rect.left), (-1.0, 3.0, -3.0, 1.0));
    }

    #[test]
    fn shape_uses_corner_coordinates() {
        let rect = Rect::new(unit(), 4.0, 3.0, 1.0, 2.0);
        let shape = rect.as_shape("red");
        assert_eq!((shape.x0, shape.y0, shape.x1, shape.y1), (2.0, 1.0, 3.0, 4.0));
        assert_eq!(shape.kind, "rect");
    }
}
