use anyhow::{Context, Result};
use clap::Parser;
use img_webp::cli::{Args, Commands, ConvertArgs};
use img_webp::constants::{ERROR_PREFIX, INFO_PREFIX, SUCCESS_PREFIX, WARNING_PREFIX};
use img_webp::{
    create_progress_bar, run_batch, BatchSummary, ConvertOptions, JobConfig, LogReporter,
    OutcomeKind, ProgressTracker, SuspendingLogger,
};
use indicatif::ProgressBar;
use log::LevelFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    let bar = create_progress_bar();
    setup_logging(args.log_level.into(), &bar)?;

    match args.command {
        Commands::Convert(convert) => run_convert(convert, bar)?,
    }

    Ok(())
}

// Log lines are printed with the progress bar suspended so they never tear it.
fn setup_logging(level: LevelFilter, bar: &ProgressBar) -> Result<()> {
    let logger = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_env("RUST_LOG")
        .build();
    let max_level = logger.filter();

    log::set_boxed_logger(Box::new(SuspendingLogger::new(logger, bar.clone())))
        .context("Failed to install logger")?;
    log::set_max_level(max_level);
    Ok(())
}

fn run_convert(args: ConvertArgs, bar: ProgressBar) -> Result<()> {
    let config = JobConfig::from_options(ConvertOptions::from(args))?;
    log::debug!("{:?}", config);

    let tracker = ProgressTracker::with_bar(bar);
    let summary = run_batch(&config, &tracker, &LogReporter).with_context(|| {
        format!(
            "Failed to convert {:?} into {:?}",
            config.input(),
            config.output()
        )
    })?;

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    println!("\n{} Conversion summary:", INFO_PREFIX);
    println!("  {} Converted: {}", SUCCESS_PREFIX, summary.converted());
    println!(
        "  ⏭️  Skipped (existing): {}",
        summary.count(OutcomeKind::SkippedExisting)
    );
    println!(
        "  ⏭️  Skipped (size): {}",
        summary.count(OutcomeKind::SkippedSize)
    );
    println!("  ⏱️  Total time: {:?}", summary.elapsed());

    if summary.failed() > 0 {
        println!("  {}  Failed: {}", WARNING_PREFIX, summary.failed());
        for (path, error) in summary.failures() {
            eprintln!("{} {:?}: {}", ERROR_PREFIX, path, error);
        }
    }
}
