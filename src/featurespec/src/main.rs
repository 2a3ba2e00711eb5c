//! FeatureSpec — feature-to-spec translation engine and scenario runner.
//!
//! Cleans previously generated spec files, regenerates one Playwright
//! spec per feature file, and optionally executes the scenarios
//! in-process against the built-in mock page driver.

use clap::Parser;
use tracing::{info, warn};

use featurespec_core::config::AppConfig;
use featurespec_generator::pipeline::{FsStore, Pipeline};
use featurespec_harness::driver::MockPageDriver;
use featurespec_harness::report::RunReport;
use featurespec_harness::runner::{ScenarioRun, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "featurespec")]
#[command(about = "Generates Playwright specs from Gherkin-style feature files")]
#[command(version)]
struct Cli {
    /// Directory containing .feature files (overrides config)
    #[arg(long, env = "FEATURESPEC__GENERATOR__FEATURES_DIR")]
    features_dir: Option<String>,

    /// Output directory for generated spec files (overrides config)
    #[arg(long, env = "FEATURESPEC__GENERATOR__SPECS_DIR")]
    specs_dir: Option<String>,

    /// Execute scenarios in-process after generating specs (dry run
    /// against the built-in mock driver; real drivers plug in via the
    /// harness library)
    #[arg(long, default_value_t = false)]
    run: bool,

    /// Write a JSON run report to this path (requires --run)
    #[arg(long)]
    report: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "featurespec=info".into()),
        )
        .init();

    let cli = Cli::parse();

    info!("FeatureSpec starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(dir) = cli.features_dir {
        config.generator.features_dir = dir;
    }
    if let Some(dir) = cli.specs_dir {
        config.generator.specs_dir = dir;
    }

    info!(
        features_dir = %config.generator.features_dir,
        specs_dir = %config.generator.specs_dir,
        "Configuration loaded"
    );

    let mut store = FsStore;
    let mut pipeline = Pipeline::new(
        &mut store,
        &config.generator.features_dir,
        &config.generator.specs_dir,
    );

    let summary = pipeline.run()?;
    info!(
        generated = summary.generated.len(),
        removed = summary.removed.len(),
        skipped = summary.skipped.len(),
        "Spec generation complete"
    );

    if cli.run {
        let features = pipeline.load_features()?;

        let mut runs: Vec<ScenarioRun> = Vec::new();
        for (name, feature) in &features {
            info!(file = %name, feature = %feature.title, "Running feature");
            let mut driver = MockPageDriver::new();
            let mut runner = ScenarioRunner::new(config.runner.clone(), &mut driver);
            runs.extend(runner.run_feature(feature));
        }

        let report = RunReport::generate("Feature Run", &runs);
        println!("{}", report.render_text());

        if let Some(path) = cli.report {
            std::fs::write(&path, report.to_json()?)?;
            info!(path = %path, "Run report written");
        }

        if report.has_failures() {
            anyhow::bail!("{} of {} scenarios failed", report.failed_runs, report.total_runs);
        }
    }

    Ok(())
}
