//! Validated job configuration.
//!
//! [`ConvertOptions`] is the raw, user-facing bag of options (what the CLI
//! fills in). [`JobConfig::from_options`] validates it once and produces an
//! immutable [`JobConfig`] shared read-only by every worker.

use crate::constants::{
    DEFAULT_ALPHA_QUALITY, DEFAULT_METHOD, DEFAULT_QUALITY, MAX_DEFAULT_WORKERS, MAX_METHOD,
    MAX_QUALITY, MAX_WORKERS, SIZE_SEPARATOR, WORKERS_PER_CPU,
};
use crate::error::{ConvertError, Result};
use crate::filter::SizeBounds;
use crate::formats::normalize_formats;
use crate::resize::ResizePolicy;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Raw conversion options, before validation.
///
/// `Default` yields the documented command line defaults.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub files_format: Vec<String>,
    pub quality: u8,
    pub alpha_quality: u8,
    pub lossless: bool,
    pub method: u8,
    pub exact: bool,
    pub keep_directory: bool,
    pub recursive: bool,
    pub use_threads: bool,
    pub threads: Option<usize>,
    pub unlink: bool,
    pub ignore_existing: bool,
    pub resize: Option<String>,
    pub keep_aspect_ratio: bool,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("."),
            output: PathBuf::from("."),
            files_format: Vec::new(),
            quality: DEFAULT_QUALITY,
            alpha_quality: DEFAULT_ALPHA_QUALITY,
            lossless: false,
            method: DEFAULT_METHOD,
            exact: false,
            keep_directory: true,
            recursive: false,
            use_threads: false,
            threads: None,
            unlink: false,
            ignore_existing: true,
            resize: None,
            keep_aspect_ratio: true,
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
        }
    }
}

/// Requested output box, parsed from `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl FromStr for TargetSize {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ConvertError::InvalidSizeFormat(s.to_string());

        let lowered = s.trim().to_ascii_lowercase();
        let (w, h) = lowered.split_once(SIZE_SEPARATOR).ok_or_else(invalid)?;

        let width = parse_dimension(w).ok_or_else(invalid)?;
        let height = parse_dimension(h).ok_or_else(invalid)?;
        Ok(TargetSize { width, height })
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.width, SIZE_SEPARATOR, self.height)
    }
}

// Digits only: rejects signs, blanks and zero.
fn parse_dimension(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u32>().ok().filter(|&v| v > 0)
}

/// Immutable, validated configuration for one batch run.
#[derive(Debug, Clone)]
pub struct JobConfig {
    input: PathBuf,
    output: PathBuf,
    formats: Vec<String>,
    quality: u8,
    alpha_quality: u8,
    lossless: bool,
    method: u8,
    exact: bool,
    keep_directory: bool,
    recursive: bool,
    use_threads: bool,
    workers: usize,
    unlink: bool,
    ignore_existing: bool,
    size: Option<TargetSize>,
    keep_aspect_ratio: bool,
    bounds: SizeBounds,
}

impl JobConfig {
    /// Validates raw options and builds the configuration.
    ///
    /// The only filesystem access is the existence check on the input root.
    ///
    /// # Arguments
    /// * `options` - Raw options, typically from the command line
    ///
    /// # Returns
    /// * `Ok(config)` - Immutable configuration for one run
    /// * `Err(ConvertError)` - Missing input root, malformed `--resize`, or an
    ///   out-of-range quality, method or worker count
    pub fn from_options(options: ConvertOptions) -> Result<Self> {
        validate_input_root(&options.input)?;

        if options.quality > MAX_QUALITY {
            return Err(ConvertError::InvalidQuality(options.quality));
        }
        if options.alpha_quality > MAX_QUALITY {
            return Err(ConvertError::InvalidAlphaQuality(options.alpha_quality));
        }
        if options.method > MAX_METHOD {
            return Err(ConvertError::InvalidMethod(options.method));
        }

        // The thread count only matters in pool mode.
        let workers = match (options.use_threads, options.threads) {
            (false, _) => 1,
            (true, Some(n)) if (1..=MAX_WORKERS).contains(&n) => n,
            (true, Some(n)) => return Err(ConvertError::InvalidWorkerCount(n)),
            (true, None) => default_worker_count(),
        };

        let size = options
            .resize
            .as_deref()
            .map(TargetSize::from_str)
            .transpose()?;

        let bounds = SizeBounds::new(
            options.min_width,
            options.min_height,
            options.max_width,
            options.max_height,
        );

        Ok(Self {
            input: options.input,
            output: options.output,
            formats: normalize_formats(&options.files_format),
            quality: options.quality,
            alpha_quality: options.alpha_quality,
            lossless: options.lossless,
            method: options.method,
            exact: options.exact,
            keep_directory: options.keep_directory,
            recursive: options.recursive,
            use_threads: options.use_threads,
            workers,
            unlink: options.unlink,
            ignore_existing: options.ignore_existing,
            size,
            keep_aspect_ratio: options.keep_aspect_ratio,
            bounds,
        })
    }

    /// Input root as given; discovery makes it absolute.
    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Normalized source extensions, lowercase and without dots.
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn alpha_quality(&self) -> u8 {
        self.alpha_quality
    }

    pub fn lossless(&self) -> bool {
        self.lossless
    }

    pub fn method(&self) -> u8 {
        self.method
    }

    pub fn exact(&self) -> bool {
        self.exact
    }

    pub fn keep_directory(&self) -> bool {
        self.keep_directory
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn use_threads(&self) -> bool {
        self.use_threads
    }

    /// Pool size used when [`use_threads`](Self::use_threads) is set; 1 otherwise.
    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn unlink(&self) -> bool {
        self.unlink
    }

    /// Skip sources whose destination already exists instead of overwriting.
    pub fn ignore_existing(&self) -> bool {
        self.ignore_existing
    }

    pub fn size(&self) -> Option<TargetSize> {
        self.size
    }

    pub fn keep_aspect_ratio(&self) -> bool {
        self.keep_aspect_ratio
    }

    pub fn bounds(&self) -> &SizeBounds {
        &self.bounds
    }

    pub fn resize_policy(&self) -> ResizePolicy {
        ResizePolicy::from_request(self.size, self.keep_aspect_ratio)
    }
}

pub fn validate_input_root(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ConvertError::InputPathNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// A multiple of the logical CPU count, capped at [`MAX_DEFAULT_WORKERS`].
pub fn default_worker_count() -> usize {
    (num_cpus::get() * WORKERS_PER_CPU).clamp(1, MAX_DEFAULT_WORKERS)
}
