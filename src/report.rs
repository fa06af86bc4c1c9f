//! Run diagnostics.
//!
//! Pipeline components receive a `&dyn Reporter` instead of writing to a
//! process-wide logger, so callers (and tests) decide where events go.

use crate::executor::{BatchSummary, ConversionOutcome, FileReport};
use std::io;
use std::path::Path;

pub trait Reporter: Send + Sync {
    /// One extension's scan finished; `total` is the running file count.
    fn extension_scanned(&self, _extension: &str, _found: usize, _total: usize) {}

    /// A directory entry could not be read during discovery.
    fn unreadable_entry(&self, _path: &Path, _error: &io::Error) {}

    fn file_finished(&self, _report: &FileReport) {}

    /// The source was converted but could not be deleted afterwards.
    fn source_removal_failed(&self, _path: &Path, _error: &io::Error) {}

    fn batch_finished(&self, _summary: &BatchSummary) {}
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn extension_scanned(&self, extension: &str, found: usize, total: usize) {
        log::debug!("Found {} {} files ({} so far)", found, extension, total);
    }

    fn unreadable_entry(&self, path: &Path, error: &io::Error) {
        log::warn!("Cannot read {:?}: {}", path, error);
    }

    fn file_finished(&self, report: &FileReport) {
        match &report.outcome {
            ConversionOutcome::Converted { output, .. } => {
                log::debug!("{:?} => {:?}", report.source, output);
            }
            ConversionOutcome::SkippedExisting { output } => {
                log::debug!("Skipping {:?} due to existing file", output);
            }
            ConversionOutcome::SkippedSize { violation, .. } => {
                log::debug!(
                    "Skipping {:?} due to min/max size requirements ({})",
                    report.source,
                    violation
                );
            }
            ConversionOutcome::Failed(error) => {
                log::error!("Failed to convert {:?}: {}", report.source, error);
            }
        }
    }

    fn source_removal_failed(&self, path: &Path, error: &io::Error) {
        log::warn!("Converted but could not remove {:?}: {}", path, error);
    }

    fn batch_finished(&self, summary: &BatchSummary) {
        log::debug!(
            "Task completed: {} files in {:?}",
            summary.reports().len(),
            summary.elapsed()
        );
        if summary.failed() > 0 {
            log::warn!("{} files failed to convert", summary.failed());
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}
