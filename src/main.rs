//! Chartify - render a chart from a CSV file
//!
//! Loads the CSV with Polars, dispatches on `--kind` and writes the figure to `--output`.

use anyhow::{Context, Result};
use chartify::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use chartify::data::DataLoader;
use chartify::dispatch::available_tags;
use chartify::options::{DEFAULT_PLOT_TYPE, DEFAULT_SAVE_PATH};
use chartify::{plot, PlotOptions, PlotRequest, RenderConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chartify")]
#[command(about = "Render a chart from a CSV file", version)]
struct Cli {
    /// CSV file to plot
    #[arg(required_unless_present = "list")]
    csv: Option<String>,

    /// Column for the x axis
    #[arg(long)]
    x: Option<String>,

    /// Column for the y axis
    #[arg(long)]
    y: Option<String>,

    /// Plot type tag (case-insensitive)
    #[arg(long, default_value = DEFAULT_PLOT_TYPE)]
    kind: String,

    /// Output file; `.svg` writes bare SVG, anything else HTML
    #[arg(long, short, default_value = DEFAULT_SAVE_PATH)]
    output: String,

    /// Builder options as a JSON object, e.g. '{"color": "sex", "nbins": 20}'
    #[arg(long)]
    options: Option<String>,

    /// Canvas width in pixels
    #[arg(long, env = "CHARTIFY_WIDTH", default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, env = "CHARTIFY_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Open the written file with the system viewer
    #[arg(long)]
    open: bool,

    /// Fail on options that do not apply to the plot type
    #[arg(long)]
    strict: bool,

    /// List the recognised plot types and exit
    #[arg(long)]
    list: bool,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if cli.list {
        println!("{}", available_tags().join("\n"));
        return Ok(());
    }

    let csv = cli.csv.context("a CSV file is required")?;
    let options = match cli.options.as_deref() {
        Some(json) => PlotOptions::from_json(json).context("failed to parse --options")?,
        None => PlotOptions::default(),
    };

    let df = DataLoader::load_csv(&csv).with_context(|| format!("failed to load {csv}"))?;
    info!(rows = df.height(), columns = df.width(), "loaded {csv}");

    let mut request = PlotRequest::new(cli.kind.as_str())
        .options(options)
        .render_config(RenderConfig::default().with_size(cli.width, cli.height))
        .strict(cli.strict)
        .save_to(cli.output.as_str());
    request.x = cli.x;
    request.y = cli.y;

    plot(&df, &request).with_context(|| format!("failed to build '{}' plot", cli.kind))?;

    if cli.open {
        open::that(&cli.output).with_context(|| format!("failed to open {}", cli.output))?;
    }
    Ok(())
}
