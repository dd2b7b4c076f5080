use anyhow::Context;
use clap::Parser;
use generator::{build_samples, load_samples};
use log::info;
use std::fs;
use std::path::PathBuf;
use workflow::config::{Overrides, WorkflowConfig};
use workflow::runner::{Runner, WorkflowResult};

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline driver for the stepcore step detector")]
struct Args {
    /// Load a workflow config (detector + gait profile) from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Replay recorded samples from a JSON array instead of generating a session
    #[arg(long)]
    samples: Option<PathBuf>,
    #[arg(long)]
    batch_size: Option<usize>,
    #[arg(long)]
    min_step_interval_ms: Option<i64>,
    /// Feed raw readings straight to the magnitude stage
    #[arg(long, default_value_t = false)]
    no_gravity_filter: bool,
    /// Process the trailing partial batch when the session ends
    #[arg(long, default_value_t = false)]
    flush: bool,
    /// Seed for the synthetic session's noise
    #[arg(long)]
    seed: Option<u64>,
    /// Wall-clock milliseconds assigned to sample timestamp zero
    #[arg(long)]
    epoch_ms: Option<i64>,
    /// Write a JSON report with tallies, metrics and every step event
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            batch_size: self.batch_size,
            min_step_interval_ms: self.min_step_interval_ms,
            disable_gravity_filter: self.no_gravity_filter,
            flush: self.flush,
            seed: self.seed,
            epoch_ms: self.epoch_ms,
        }
    }
}

fn print_summary(result: &WorkflowResult) {
    println!(
        "Session -> samples {}, rejected {}, batches {}",
        result.samples, result.rejected, result.metrics.batches_processed
    );
    println!(
        "Steps -> walking {}, jogging {}, running {} (total {})",
        result.tally.walking,
        result.tally.jogging,
        result.tally.running,
        result.tally.total()
    );
    println!(
        "Peaks -> found {}, suppressed {}, flushed steps {}",
        result.metrics.peaks_found, result.metrics.peaks_suppressed, result.flushed_steps
    );
    if let Some(latest) = result.tally.latest {
        println!("Latest activity: {}", latest);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let base = match args.workflow.as_ref() {
        Some(path) => WorkflowConfig::load(path)?,
        None => WorkflowConfig::default(),
    };
    let workflow_config = base.apply(&args.overrides());

    let samples = match args.samples.as_ref() {
        Some(path) => load_samples(path)?,
        None => build_samples(&workflow_config.profile).context("generating gait session")?,
    };
    info!(
        "running {} samples with batch size {}",
        samples.len(),
        workflow_config.detector.batch_size
    );

    let runner = Runner::new(workflow_config);
    let result = runner.execute(&samples)?;
    print_summary(&result);

    if let Some(report_path) = args.report {
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
        let report = serde_json::to_string_pretty(&result).context("serializing report")?;
        fs::write(&report_path, report)
            .with_context(|| format!("writing report {}", report_path.display()))?;
        info!("report written to {}", report_path.display());
    }

    Ok(())
}
