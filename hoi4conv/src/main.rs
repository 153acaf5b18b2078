use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

mod loader;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World snapshot to convert (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Conversion settings (JSON); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the converted world
    #[arg(short, long, default_value = "output.json")]
    output: PathBuf,

    /// Also write per-country factory totals as CSV
    #[arg(long)]
    industry_report: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    log::info!("Starting hoi4conv...");

    let config = loader::load_config(args.config.as_deref())?;
    let (mut world, graph, inputs) = loader::load_snapshot(&args.input)?;

    let summary = hoi4conv_core::convert_world(&mut world, &graph, &inputs, &config)
        .context("Conversion aborted")?;

    let output = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(output), &world)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Wrote converted world to {:?}", args.output);

    if let Some(path) = &args.industry_report {
        let report = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        hoi4conv_core::systems::write_industry_report(&world, BufWriter::new(report))
            .with_context(|| format!("Failed to write industry report {}", path.display()))?;
        log::info!("Wrote industry report to {:?}", path);
    }

    log::info!(
        "Conversion finished: {} countries, {} factories",
        summary.landed_countries,
        summary.industry.total()
    );

    Ok(())
}
