use crate::constants::PROGRESS_BAR_TEMPLATE;
use indicatif::{ProgressBar, ProgressStyle};
use log::{Log, Metadata, Record};
use std::sync::{Mutex, MutexGuard};

/// Point-in-time view of a run's progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressState {
    pub total: u64,
    pub completed: u64,
}

impl ProgressState {
    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

/// Shared counter of discovered and completed files.
///
/// Safe to update from any worker. When a [`ProgressBar`] is attached every
/// mutation is mirrored onto it; the tracker itself never renders anything.
#[derive(Default)]
pub struct ProgressTracker {
    state: Mutex<ProgressState>,
    bar: Option<ProgressBar>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bar(bar: ProgressBar) -> Self {
        Self {
            state: Mutex::new(ProgressState::default()),
            bar: Some(bar),
        }
    }

    pub fn set_total(&self, total: u64) {
        self.lock().total = total;
        if let Some(bar) = &self.bar {
            bar.set_length(total);
        }
    }

    pub fn advance(&self) {
        self.lock().completed += 1;
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub fn set_message(&self, message: &'static str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message);
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish();
        }
    }

    pub fn snapshot(&self) -> ProgressState {
        *self.lock()
    }

    // A panic while holding the lock leaves plain counters behind, still usable.
    fn lock(&self) -> MutexGuard<'_, ProgressState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Bar used by the command line front end.
pub fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

/// Wraps a logger so every record is written with `bar` cleared from the
/// terminal, then redrawn.
pub struct SuspendingLogger<L> {
    inner: L,
    bar: ProgressBar,
}

impl<L: Log> SuspendingLogger<L> {
    pub fn new(inner: L, bar: ProgressBar) -> Self {
        Self { inner, bar }
    }
}

impl<L: Log> Log for SuspendingLogger<L> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        // Filtered records must not flicker the bar.
        if self.inner.enabled(record.metadata()) {
            self.bar.suspend(|| self.inner.log(record));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_empty() {
        let tracker = ProgressTracker::new();
        assert_eq!(tracker.snapshot(), ProgressState { total: 0, completed: 0 });
        assert!(tracker.snapshot().is_done());
    }

    #[test]
    fn test_set_total_and_advance() {
        let tracker = ProgressTracker::new();
        tracker.set_total(2);
        tracker.advance();
        assert!(!tracker.snapshot().is_done());
        tracker.advance();
        assert_eq!(tracker.snapshot(), ProgressState { total: 2, completed: 2 });
        assert!(tracker.snapshot().is_done());
    }

    #[test]
    fn test_concurrent_advance() {
        let tracker = Arc::new(ProgressTracker::new());
        tracker.set_total(800);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || {
                    for _ in 0..100 {
                        tracker.advance();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(tracker.snapshot().completed, 800);
    }

    #[test]
    fn test_bar_mirrors_counts() {
        let bar = ProgressBar::hidden();
        let tracker = ProgressTracker::with_bar(bar.clone());
        tracker.set_total(3);
        tracker.advance();

        assert_eq!(bar.length(), Some(3));
        assert_eq!(bar.position(), 1);
    }

    #[derive(Default)]
    struct Recording {
        lines: Mutex<Vec<String>>,
    }

    impl Log for Recording {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &Record<'_>) {
            self.lines.lock().unwrap().push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_suspending_logger_forwards_enabled_records() {
        let logger = SuspendingLogger::new(Recording::default(), ProgressBar::hidden());

        logger.log(
            &Record::builder()
                .args(format_args!("disk full"))
                .level(log::Level::Warn)
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("chatter"))
                .level(log::Level::Debug)
                .build(),
        );

        assert_eq!(*logger.inner.lines.lock().unwrap(), vec!["disk full"]);
        assert!(!logger.enabled(&Metadata::builder().level(log::Level::Info).build()));
    }
}
