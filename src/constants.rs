pub const DEFAULT_QUALITY: u8 = 80;
pub const DEFAULT_ALPHA_QUALITY: u8 = 100;
pub const MAX_QUALITY: u8 = 100;

pub const DEFAULT_METHOD: u8 = 4;
pub const MAX_METHOD: u8 = 6;

/// Default pool size is this many workers per logical CPU...
pub const WORKERS_PER_CPU: usize = 4;
/// ...capped here.
pub const MAX_DEFAULT_WORKERS: usize = 32;
/// Largest explicit `--threads` value accepted.
pub const MAX_WORKERS: usize = 1024;

pub const DEFAULT_SOURCE_FORMATS: &[&str] = &["jpg", "jpeg", "png"];
pub const TARGET_EXTENSION: &str = "webp";

pub const SIZE_SEPARATOR: char = 'x';

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{bar:40.cyan/blue}] {elapsed_precise} {msg:<10} ({pos}/{len})";
pub const SEARCHING_MESSAGE: &str = "Searching";
pub const CONVERTING_MESSAGE: &str = "Converting";

pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️";
pub const ERROR_PREFIX: &str = "❌";
pub const INFO_PREFIX: &str = "📋";
