use crate::codec::{decode_image, read_dimensions, save_webp, EncodeSettings};
use crate::config::JobConfig;
use crate::constants::{CONVERTING_MESSAGE, SEARCHING_MESSAGE};
use crate::discovery::{discover_files, SourceFile};
use crate::error::{ConvertError, Result};
use crate::filter::SizeViolation;
use crate::output::generate_output_path;
use crate::progress::ProgressTracker;
use crate::report::Reporter;
use crate::resize::resize_image;
use rayon::prelude::*;
use std::any::Any;
use std::fmt;
use std::fs;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Terminal state of one source file.
#[derive(Debug)]
pub enum ConversionOutcome {
    Converted {
        output: PathBuf,
        bytes_written: u64,
        /// False when removal was requested but failed.
        source_removed: bool,
    },
    SkippedExisting {
        output: PathBuf,
    },
    SkippedSize {
        width: u32,
        height: u32,
        violation: SizeViolation,
    },
    Failed(ConvertError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeKind {
    Converted,
    SkippedExisting,
    SkippedSize,
    Failed,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeKind::Converted => "converted",
            OutcomeKind::SkippedExisting => "skipped (existing)",
            OutcomeKind::SkippedSize => "skipped (size)",
            OutcomeKind::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

impl ConversionOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ConversionOutcome::Converted { .. } => OutcomeKind::Converted,
            ConversionOutcome::SkippedExisting { .. } => OutcomeKind::SkippedExisting,
            ConversionOutcome::SkippedSize { .. } => OutcomeKind::SkippedSize,
            ConversionOutcome::Failed(_) => OutcomeKind::Failed,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ConversionOutcome::Failed(_))
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub source: PathBuf,
    pub outcome: ConversionOutcome,
}

/// Everything a batch run produced: one report per discovered file.
#[derive(Debug, Default)]
pub struct BatchSummary {
    reports: Vec<FileReport>,
    elapsed: Duration,
}

impl BatchSummary {
    pub fn new(reports: Vec<FileReport>, elapsed: Duration) -> Self {
        Self { reports, elapsed }
    }

    pub fn reports(&self) -> &[FileReport] {
        &self.reports
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome.kind() == kind)
            .count()
    }

    pub fn converted(&self) -> usize {
        self.count(OutcomeKind::Converted)
    }

    pub fn skipped(&self) -> usize {
        self.count(OutcomeKind::SkippedExisting) + self.count(OutcomeKind::SkippedSize)
    }

    pub fn failed(&self) -> usize {
        self.count(OutcomeKind::Failed)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &ConvertError)> {
        self.reports.iter().filter_map(|r| match &r.outcome {
            ConversionOutcome::Failed(e) => Some((r.source.as_path(), e)),
            _ => None,
        })
    }
}

/// Converts one file to WebP.
///
/// Steps run in order: resolve the destination, skip if it exists (when
/// ignore-existing is set), probe the header against the size bounds,
/// decode, resize, encode and publish, then optionally remove the source.
///
/// # Arguments
/// * `source` - File found by discovery
/// * `config` - Validated job configuration
/// * `reporter` - Receives source-removal failures
///
/// # Returns
/// The file's terminal outcome. Never panics outward and never returns an
/// error: every failure becomes [`ConversionOutcome::Failed`].
pub fn convert_file(
    source: &SourceFile,
    config: &JobConfig,
    reporter: &dyn Reporter,
) -> ConversionOutcome {
    let attempt = panic::catch_unwind(AssertUnwindSafe(|| try_convert(source, config, reporter)));

    match attempt {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(err)) => ConversionOutcome::Failed(err),
        Err(payload) => {
            ConversionOutcome::Failed(ConvertError::JobPanicked(panic_message(&*payload)))
        }
    }
}

fn try_convert(
    source: &SourceFile,
    config: &JobConfig,
    reporter: &dyn Reporter,
) -> Result<ConversionOutcome> {
    let output = generate_output_path(source, config)?;

    // Checked before opening the source so existing outputs cost no decode.
    if config.ignore_existing() && output.exists() {
        return Ok(ConversionOutcome::SkippedExisting { output });
    }

    let (width, height) = read_dimensions(source.path())?;
    if let Some(violation) = config.bounds().check(width, height) {
        return Ok(ConversionOutcome::SkippedSize {
            width,
            height,
            violation,
        });
    }

    let mut img = decode_image(source.path())?;
    resize_image(&mut img, config.resize_policy());

    let Some(bytes_written) = save_webp(
        &img,
        &output,
        &EncodeSettings::from(config),
        !config.ignore_existing(),
    )?
    else {
        // Another job with the same destination published first.
        return Ok(ConversionOutcome::SkippedExisting { output });
    };

    let source_removed = config.unlink() && remove_source(source.path(), &output, reporter);

    Ok(ConversionOutcome::Converted {
        output,
        bytes_written,
        source_removed,
    })
}

fn remove_source(source: &Path, output: &Path, reporter: &dyn Reporter) -> bool {
    if is_same_file(source, output) {
        let err = io::Error::new(
            io::ErrorKind::InvalidInput,
            "source was replaced by its own output",
        );
        reporter.source_removal_failed(source, &err);
        return false;
    }

    match fs::remove_file(source) {
        Ok(()) => {
            log::debug!("Unlinked {:?}", source);
            true
        }
        Err(err) => {
            reporter.source_removal_failed(source, &err);
            false
        }
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn process_one(
    source: &SourceFile,
    config: &JobConfig,
    tracker: &ProgressTracker,
    reporter: &dyn Reporter,
) -> FileReport {
    let report = FileReport {
        source: source.path().to_path_buf(),
        outcome: convert_file(source, config, reporter),
    };
    reporter.file_finished(&report);
    tracker.advance();
    report
}

/// Runs every file to a terminal outcome and blocks until all are done.
///
/// Sequential mode completes in discovery order. Pool mode runs on a
/// dedicated rayon pool of `config.workers()` threads; the returned reports
/// are still in discovery order, completion order is not. Two sources that
/// map to the same destination yield the same set of outcomes in both modes.
///
/// # Arguments
/// * `files` - Discovered sources, in discovery order
/// * `config` - Validated job configuration
/// * `tracker` - Advanced once per file, whatever the outcome
/// * `reporter` - Receives one `file_finished` event per file
///
/// # Returns
/// * `Ok(reports)` - One [`FileReport`] per input file
/// * `Err(ConvertError::ThreadPool)` - If the pool could not be built; no file
///   was touched
pub fn execute(
    files: &[SourceFile],
    config: &JobConfig,
    tracker: &ProgressTracker,
    reporter: &dyn Reporter,
) -> Result<Vec<FileReport>> {
    if !config.use_threads() {
        return Ok(files
            .iter()
            .map(|source| process_one(source, config, tracker, reporter))
            .collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers())
        .build()
        .map_err(|e| ConvertError::ThreadPool(e.to_string()))?;

    log::debug!("Using {} worker threads", config.workers());

    Ok(pool.install(|| {
        files
            .par_iter()
            .map(|source| process_one(source, config, tracker, reporter))
            .collect::<Vec<_>>()
    }))
}

/// Discovers and converts everything the configuration describes.
///
/// # Arguments
/// * `config` - Validated job configuration
/// * `tracker` - Progress sink; its total is published during discovery
/// * `reporter` - Diagnostics sink
///
/// # Returns
/// * `Ok(summary)` - Once every job has finished; per-file failures are inside
/// * `Err(ConvertError)` - If discovery or pool setup fails
pub fn run_batch(
    config: &JobConfig,
    tracker: &ProgressTracker,
    reporter: &dyn Reporter,
) -> Result<BatchSummary> {
    let start_time = Instant::now();

    tracker.set_message(SEARCHING_MESSAGE);
    let files = discover_files(config, tracker, reporter)?;
    log::debug!("Found {} image files", files.len());

    tracker.set_message(CONVERTING_MESSAGE);
    let reports = execute(&files, config, tracker, reporter)?;
    tracker.finish();

    let summary = BatchSummary::new(reports, start_time.elapsed());
    reporter.batch_finished(&summary);
    Ok(summary)
}
