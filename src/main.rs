use anyhow::{bail, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use std::{path::PathBuf, time::Instant};

use compute_sales::{
    load_json, output_path_for, reconcile, write_report, CatalogueEntry, PriceIndex, SaleRecord,
};

/// Prices sales records against a product catalogue, and reports the total.
///
/// The report is written to a file (by default, `SalesResults.txt` in the
/// directory containing the sales file) and printed to standard output.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// JSON file containing the product catalogue (objects with `title` and `price`)
    catalogue: PathBuf,
    /// JSON file containing the sales records (objects with `SALE_ID`, `Product` and `Quantity`)
    sales: PathBuf,
    /// Write the report to this file instead of beside the sales file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Log progress as well as warnings (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let start = Instant::now();
    let catalogue = load_json::<Vec<CatalogueEntry>>(&args.catalogue)
        .inspect_err(|e| error!("could not load catalogue: {e:#}"));
    let sales = load_json::<Vec<SaleRecord>>(&args.sales)
        .inspect_err(|e| error!("could not load sales: {e:#}"));
    let (Ok(catalogue), Ok(sales)) = (catalogue, sales) else {
        bail!("Input files could not be loaded");
    };
    let prices = PriceIndex::build(&catalogue);
    let report = reconcile(&sales, &prices);
    let elapsed = start.elapsed().as_secs_f64();
    let text = format!("{report}\nExecution time: {elapsed:.4} seconds");
    let output = args.output.unwrap_or_else(|| output_path_for(&args.sales));
    write_report(&output, &text)?;
    info!(
        path = %output.display(),
        total = report.total().dollars(),
        failures = report.failures(),
        "wrote report"
    );
    println!("{text}");
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
