use anyhow::Result;
use clap::Parser;
use tidal_dashboard::{cli, config, domain, report, simulation, telemetry, view};
use cli::{Cli, Command};
use config::{Config, OutputFormat};
use domain::Sample;
use simulation::{Dataset, DatasetSynthesizer};
use telemetry::init_tracing;
use tracing::{info, warn};
use view::ViewSelector;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut cfg = Config::load_from(&cli.config)?;
    if let Some(seed) = cli.seed {
        cfg.simulation.random_seed = Some(seed);
    }
    if let Some(format) = cli.format {
        cfg.output.format = format;
    }

    init_tracing(&cfg.logging);
    info!(config = %cli.config.display(), "starting tidal dashboard");

    let dataset = DatasetSynthesizer::new(cfg.simulation.clone()).synthesize()?;
    let selector = ViewSelector::new(&dataset, cfg.view.clone());
    let format = cfg.output.format;

    let rendered = match cli.command.view_request(selector.default_hour()) {
        Some(request) => {
            let output = selector.select(&request).inspect_err(|err| {
                warn!(error = %err, mode = %request.mode(), "view request rejected");
            })?;
            report::render(&output, format)?
        }
        None => render_listing(&cli.command, &dataset, format)?,
    };

    println!("{rendered}");
    Ok(())
}

fn render_listing(command: &Command, dataset: &Dataset, format: OutputFormat) -> Result<String> {
    let in_month = |s: &&Sample, month: &Option<String>| {
        month.as_deref().map_or(true, |m| s.month_name() == m)
    };
    match command {
        Command::Labels { month } => {
            let labels: Vec<String> = dataset
                .samples()
                .iter()
                .filter(|s| in_month(s, month))
                .map(|s| s.label())
                .collect();
            report::render_list(&labels, format)
        }
        Command::Dump { month } => {
            let rows: Vec<&Sample> = dataset.samples().iter().filter(|s| in_month(s, month)).collect();
            info!(rows = rows.len(), "dumping hourly data");
            report::render_samples(&rows, format)
        }
        _ => {
            let months: Vec<String> = dataset.months().into_iter().map(str::to_string).collect();
            report::render_list(&months, format)
        }
    }
}
