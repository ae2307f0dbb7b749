use crate::config::{Config, load_config};
use crate::ir::Chart;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_charts;
use crate::render::{render_svg, write_output_json, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "scatter-labels",
    version,
    about = "Place non-overlapping labels on scatter charts"
)]
pub struct Args {
    /// Input chart file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for JSON/SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Figure width for charts that do not set one
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Figure height for charts that do not set one
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Write the placed boxes as JSON to this path
    #[arg(short = 'd', long = "dumpLayout")]
    pub dump: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

/// JSON output: the resolved chart plus how placement went.
#[derive(Debug, Serialize)]
struct AnnotatedChart<'a> {
    #[serde(flatten)]
    chart: &'a Chart,
    placement: &'a crate::layout::PlacementReport,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }

    let input = read_input(args.input.as_deref())?;
    let charts = parse_charts(&input)?;
    if charts.is_empty() {
        return Err(anyhow::anyhow!("No charts found in input"));
    }
    tracing::info!(charts = charts.len(), "placing labels");

    if charts.len() == 1 {
        let output = match args.output_format {
            OutputFormat::Png => Some(ensure_output(&args.output, "png")?),
            _ => args.output.clone(),
        };
        return process_chart(
            &charts[0],
            &config,
            args.output_format,
            output.as_deref(),
            args.dump.as_deref(),
        );
    }

    let outputs = resolve_multi_outputs(args.output.as_deref(), args.output_format, charts.len())?;
    let dumps = match args.dump.as_deref() {
        Some(path) => Some(resolve_multi_outputs(Some(path), OutputFormat::Json, charts.len())?),
        None => None,
    };
    for (idx, chart) in charts.iter().enumerate() {
        let dump = dumps.as_ref().map(|paths| paths[idx].as_path());
        process_chart(chart, &config, args.output_format, Some(&outputs[idx]), dump)?;
    }

    Ok(())
}

fn process_chart(
    chart: &Chart,
    config: &Config,
    format: OutputFormat,
    output: Option<&Path>,
    dump: Option<&Path>,
) -> Result<()> {
    let layout = compute_layout(chart, config)?;
    if let Some(path) = dump {
        write_layout_dump(path, &layout)?;
    }
    match format {
        OutputFormat::Json => {
            let annotated = AnnotatedChart {
                chart: &layout.chart,
                placement: &layout.placement.report,
            };
            write_output_json(&annotated, output)?;
        }
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme);
            write_output_svg(&svg, output)?;
        }
        OutputFormat::Png => {
            let output = output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_png(&render_svg(&layout, &config.theme), output, config)?;
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}

fn resolve_multi_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    count: usize,
) -> Result<Vec<PathBuf>> {
    let ext = format.extension();
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for multiple charts"))?;
    if base.is_dir() {
        let mut outputs = Vec::new();
        for idx in 0..count {
            outputs.push(base.join(format!("chart-{}.{}", idx + 1, ext)));
        }
        return Ok(outputs);
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    let mut outputs = Vec::new();
    for idx in 0..count {
        outputs.push(parent.join(format!("{}-{}.{}", stem, idx + 1, ext)));
    }
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_outputs_next_to_base_file() {
        let outputs =
            resolve_multi_outputs(Some(Path::new("out/plot.svg")), OutputFormat::Svg, 2).unwrap();
        assert_eq!(
            outputs,
            vec![PathBuf::from("out/plot-1.svg"), PathBuf::from("out/plot-2.svg")]
        );
    }

    #[test]
    fn multiple_charts_need_an_output_path() {
        assert!(resolve_multi_outputs(None, OutputFormat::Json, 2).is_err());
    }

    #[test]
    fn png_requires_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        assert_eq!(
            ensure_output(&Some(PathBuf::from("a.png")), "png").unwrap(),
            PathBuf::from("a.png")
        );
    }

    #[test]
    fn parses_arguments() {
        let args = Args::try_parse_from([
            "scatter-labels",
            "-i",
            "chart.json",
            "-e",
            "svg",
            "-w",
            "640",
            "--dumpLayout",
            "boxes.json",
        ])
        .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("chart.json")));
        assert_eq!(args.output_format, OutputFormat::Svg);
        assert_eq!(args.width, Some(640.0));
        assert_eq!(args.height, None);
        assert_eq!(args.dump, Some(PathBuf::from("boxes.json")));
    }

    #[test]
    fn json_output_flattens_chart() {
        let chart = crate::parser::parse_chart(
            r#"{ "scatter": { "x": [1, 2], "y": [1, 2], "text": ["a", "b"] } }"#,
        )
        .unwrap();
        let layout = compute_layout(&chart, &Config::default()).unwrap();
        let annotated = AnnotatedChart {
            chart: &layout.chart,
            placement: &layout.placement.report,
        };
        let value = serde_json::to_value(&annotated).unwrap();
        assert!(value["scatter"].is_object());
        assert_eq!(value["layout"]["annotations"].as_array().unwrap().len(), 2);
        assert!(value["placement"]["iterations"].is_number());
    }
}
