use anyhow::{Context, Result};
use serde::Deserialize;

use crate::ir::Chart;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChartDocument {
    Multiple(Vec<Chart>),
    Single(Box<Chart>),
}

/// Parse a chart document: one chart object or an array of them.
///
/// Strict JSON is tried first; JSON5 (comments, trailing commas, unquoted
/// keys) is accepted as a fallback.
pub fn parse_charts(input: &str) -> Result<Vec<Chart>> {
    let document: ChartDocument = match serde_json::from_str(input) {
        Ok(document) => document,
        Err(json_err) => json5::from_str(input)
            .with_context(|| format!("chart document is neither JSON ({json_err}) nor JSON5"))?,
    };
    Ok(match document {
        ChartDocument::Multiple(charts) => charts,
        ChartDocument::Single(chart) => vec![*chart],
    })
}

pub fn parse_chart(input: &str) -> Result<Chart> {
    let mut charts = parse_charts(input)?;
    match charts.len() {
        1 => Ok(charts.remove(0)),
        n => Err(anyhow::anyhow!("expected a single chart, found {n}")),
    }
}
