use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;

use loadcmp_core::compare::compare_architectures;
use loadcmp_core::locate::{discover_results, CoordinateStrategy};
use loadcmp_core::metrics::{MetricSet, RateSource};
use loadcmp_core::model::Architecture;
use loadcmp_core::report::{console, write_report_files, ReportBundle};
use loadcmp_core::store::ResultStore;
use loadcmp_core::LoadcmpError;

/// Compare monolith and microservices load-test results and generate a
/// report (console summary, standalone HTML, SVG charts, JSON export).
#[derive(Parser, Debug)]
#[command(name = "loadcmp", version, about)]
struct Cli {
    /// Directory containing `results-*.json` artifacts.
    #[arg(default_value = ".")]
    results_dir: PathBuf,

    /// Directory the report artifacts are written into.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Derive coordinates from `testConfig` metadata embedded in each
    /// document instead of from filenames.
    #[arg(long)]
    embedded_metadata: bool,

    /// Which error/success-rate source wins when a document carries both.
    #[arg(long, value_enum, default_value = "counts")]
    rate_source: RateSourceArg,

    /// Architecture treated as the comparison baseline.
    #[arg(long, value_enum, default_value = "monolith")]
    baseline: BaselineArg,

    /// Suppress the console summary (artifacts are still written).
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RateSourceArg {
    /// Explicit successful/failed request counters win.
    Counts,
    /// The fractional `errors` rate metric wins.
    ErrorsMetric,
}

impl From<RateSourceArg> for RateSource {
    fn from(arg: RateSourceArg) -> Self {
        match arg {
            RateSourceArg::Counts => RateSource::PreferCounts,
            RateSourceArg::ErrorsMetric => RateSource::PreferErrorsMetric,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BaselineArg {
    Monolith,
    Microservices,
}

impl From<BaselineArg> for Architecture {
    fn from(arg: BaselineArg) -> Self {
        match arg {
            BaselineArg::Monolith => Architecture::Monolith,
            BaselineArg::Microservices => Architecture::Microservices,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Diagnostics go to stderr — stdout is reserved for the report summary.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), LoadcmpError> {
    let strategy = if cli.embedded_metadata {
        CoordinateStrategy::Document
    } else {
        CoordinateStrategy::Filename
    };

    let located = discover_results(&cli.results_dir, strategy).await?;
    if located.is_empty() {
        return Err(LoadcmpError::NoResults(
            cli.results_dir.display().to_string(),
        ));
    }
    info!(count = located.len(), "loaded result files");

    let store = ResultStore::from_located(located);
    let set = MetricSet::from_store_with(&store, cli.rate_source.into());

    let baseline: Architecture = cli.baseline.into();
    let comparison = compare_architectures(&set, baseline, baseline.counterpart());
    let bundle = ReportBundle::new(set, comparison);

    if !cli.quiet {
        print!("{}", console::render_console(&bundle));
    }

    let artifacts = write_report_files(&bundle, &cli.output_dir).await?;
    println!("Report written:");
    for path in artifacts.paths() {
        println!("  {}", path.display());
    }

    Ok(())
}
