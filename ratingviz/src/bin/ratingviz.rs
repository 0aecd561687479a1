// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line entry point: draws `data.csv` into `chart.html`.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, ValueEnum};
use ratingviz::{ChartConfig, ChartRenderer, Page, TotalPolicy, selector_id};

#[derive(Parser, Debug)]
#[command(name = "ratingviz", version, about)]
struct Cli {
    /// Input CSV with a `Genre` column and one column per rating bucket.
    #[arg(long, default_value = "data.csv")]
    data: PathBuf,

    /// Output file.
    #[arg(long, default_value = "chart.html")]
    out: PathBuf,

    /// Id selector of the container the chart is appended to.
    #[arg(long, default_value = "#visualization")]
    selector: String,

    /// JSON chart configuration; omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write only the `<svg>` element instead of a full HTML page.
    #[arg(long)]
    svg: bool,

    /// How to treat rows whose bucket values do not sum to 1.
    #[arg(long, value_enum)]
    total_policy: Option<PolicyChoice>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyChoice {
    Reject,
    Normalize,
    Accept,
}

impl From<PolicyChoice> for TotalPolicy {
    fn from(value: PolicyChoice) -> Self {
        match value {
            PolicyChoice::Reject => Self::Reject,
            PolicyChoice::Normalize => Self::Normalize,
            PolicyChoice::Accept => Self::Accept,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => ChartConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => ChartConfig::default(),
    };
    if let Some(policy) = cli.total_policy {
        config.total_policy = policy.into();
    }

    let container = selector_id(&cli.selector)?;
    let page = Page::new(config.title.clone()).with_container(container);
    let mut renderer = ChartRenderer::new(config, page).context("configure renderer")?;

    let chart = renderer
        .render(&cli.data, &cli.selector)
        .with_context(|| format!("draw chart from '{}'", cli.data.display()))?;

    let output = if cli.svg {
        chart.svg().to_owned()
    } else {
        renderer.page().to_html()
    };
    std::fs::write(&cli.out, output)
        .with_context(|| format!("write '{}'", cli.out.display()))?;
    tracing::info!(out = %cli.out.display(), "wrote chart");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
