use serde::{Deserialize, Serialize};

use crate::annotation::Annotation;

/// A scalar applied to every point, or one value per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn get(&self, idx: usize) -> Option<&T> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.get(idx),
        }
    }

    /// Number of points this value can serve, `None` when broadcast.
    pub fn len_limit(&self) -> Option<usize> {
        match self {
            OneOrMany::One(_) => None,
            OneOrMany::Many(values) => Some(values.len()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<OneOrMany<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<OneOrMany<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFont {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scatter {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub text: Vec<String>,
    #[serde(default)]
    pub marker: Marker,
    #[serde(default)]
    pub textfont: TextFont,
}

impl Scatter {
    /// Number of labelled points. Arrays of different lengths are cut to
    /// the shortest.
    pub fn point_count(&self) -> usize {
        let mut count = self.x.len().min(self.y.len()).min(self.text.len());
        if let Some(limit) = self.marker.size.as_ref().and_then(OneOrMany::len_limit) {
            count = count.min(limit);
        }
        if let Some(limit) = self.marker.color.as_ref().and_then(OneOrMany::len_limit) {
            count = count.min(limit);
        }
        count
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autorange: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default)]
    pub xaxis: Axis,
    #[serde(default)]
    pub yaxis: Axis,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

/// One scatter trace plus the figure it is drawn in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub scatter: Scatter,
    #[serde(default)]
    pub layout: ChartLayout,
}
