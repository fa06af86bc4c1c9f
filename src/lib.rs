pub mod cli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod filter;
pub mod formats;
pub mod output;
pub mod progress;
pub mod report;
pub mod resize;

pub use codec::{decode_image, encode_webp, read_dimensions, save_webp, EncodeSettings};
pub use config::{ConvertOptions, JobConfig, TargetSize};
pub use discovery::{discover_files, SourceFile};
pub use error::{ConvertError, Result};
pub use executor::{
    convert_file, execute, run_batch, BatchSummary, ConversionOutcome, FileReport, OutcomeKind,
};
pub use filter::{SizeBounds, SizeViolation};
pub use formats::normalize_formats;
pub use output::{generate_output_path, resolve_output_path};
pub use progress::{create_progress_bar, ProgressState, ProgressTracker, SuspendingLogger};
pub use report::{LogReporter, Reporter, SilentReporter};
pub use resize::{resize_image, ResizePolicy};
