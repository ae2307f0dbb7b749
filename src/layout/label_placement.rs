// Collision-avoiding label placement for scatter markers.
// Bounded greedy search: every badly placed label swings around its marker
// through the fixed side order, moving further out on each pass.

use super::label_box::{LabelBox, Side};
use super::types::Rect;
use crate::config::PlacementConfig;
use serde::Serialize;

/// Outcome of one solver run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlacementReport {
    /// Passes actually run.
    pub iterations: usize,
    /// Indices of labels still overlapping a marker or another label.
    pub unresolved: Vec<usize>,
}

impl PlacementReport {
    pub fn is_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Reposition `labels` so they avoid `markers` and each other.
///
/// `canvas` is the plot-area size in pixels. Labels that cannot be placed
/// cleanly are left at the top of their marker at the last distance tried.
pub fn resolve_label_positions(
    markers: &[Rect],
    labels: &mut [LabelBox],
    canvas: (f64, f64),
    config: &PlacementConfig,
) -> PlacementReport {
    let step = canvas.0.min(canvas.1) * config.step_fraction;
    let mut bad: Vec<usize> = (0..labels.len()).collect();
    let mut iterations = 0;

    for iteration in 0..config.max_iterations {
        if bad.is_empty() {
            break;
        }
        iterations = iteration + 1;
        let distance = 1.0 + iteration as f64 * step;

        for &idx in &bad {
            let mut placed = false;
            for side in Side::SEARCH_ORDER {
                labels[idx].place_at_side(side, distance);
                if !collides(idx, markers, labels) {
                    placed = true;
                    break;
                }
            }
            if !placed {
                labels[idx].place_at_side(Side::Top, distance);
            }
        }

        bad = find_bad_labels(markers, labels);
        tracing::debug!(
            iteration,
            distance,
            remaining = bad.len(),
            "label placement pass"
        );
    }

    if iterations == 0 {
        bad = find_bad_labels(markers, labels);
    }
    if !bad.is_empty() {
        tracing::warn!(
            unresolved = bad.len(),
            total = labels.len(),
            "some labels still overlap after placement"
        );
    }
    tracing::debug!(iterations, labels = labels.len(), "label placement finished");

    PlacementReport {
        iterations,
        unresolved: bad,
    }
}

/// Indices of labels overlapping any marker or any other label.
pub fn find_bad_labels(markers: &[Rect], labels: &[LabelBox]) -> Vec<usize> {
    (0..labels.len())
        .filter(|&idx| collides(idx, markers, labels))
        .collect()
}

fn collides(idx: usize, markers: &[Rect], labels: &[LabelBox]) -> bool {
    let rect = &labels[idx].rect;
    markers.iter().any(|marker| rect.overlaps(marker))
        || labels
            .iter()
            .enumerate()
            .any(|(other, label)| other != idx && rect.overlaps(&label.rect))
}
