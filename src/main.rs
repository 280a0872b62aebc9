use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use data_availability::{AvailabilitySummary, EngineConfig, compute, load_tables, write_results};
use log::info;

const USAGE: &str = "usage: data-availability <observations.parquet> <criteria.parquet> \
                     [output.parquet] [--config <config.json>]";

struct Args {
    observations: PathBuf,
    criteria: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
}

/// Parse the command line; `None` when usage was requested
fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Option<Args>> {
    let mut positional = Vec::new();
    let mut config = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => return Ok(None),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    let (Some(observations), Some(criteria)) = (positional.next(), positional.next()) else {
        bail!(USAGE);
    };
    let output = positional.next();
    if positional.next().is_some() {
        bail!(USAGE);
    }

    Ok(Some(Args {
        observations,
        criteria,
        output,
        config,
    }))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };
    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let start = Instant::now();
    let tables = load_tables(&args.observations, &args.criteria, &config)
        .context("Failed to load input tables")?;

    let results = compute(&tables.records, &tables.criteria, &config)
        .context("Failed to compute availability")?;

    let summary = AvailabilitySummary::from_table(&results);
    info!("\n{}", summary.render());

    if let Some(output) = &args.output {
        write_results(output, &results)
            .with_context(|| format!("Failed to write results to {}", output.display()))?;
    }

    info!(
        "Processed {} observations into {} result rows in {:?}",
        tables.records.len(),
        results.len(),
        start.elapsed()
    );
    Ok(())
}
