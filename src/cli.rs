use crate::config::ConvertOptions;
use crate::constants::{DEFAULT_ALPHA_QUALITY, DEFAULT_METHOD, DEFAULT_QUALITY};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-webp",
    about = "Batch convert images to WebP",
    long_about = "img-webp converts every matching image under an input directory to WebP, \
                  optionally resizing, filtering by size, mirroring the directory layout \
                  and running on a worker pool.",
    version,
    after_help = "EXAMPLES:\n  \
    img-webp convert ./photos ./webp --recursive\n  \
    img-webp convert ./in ./out --resize 1920x1080 --min-width 200 --use-threads\n  \
    img-webp --log-level debug convert . ./out --files-format png,gif --lossless"
)]
pub struct Args {
    #[arg(
        long,
        global = true,
        value_enum,
        ignore_case = true,
        default_value = "warning",
        help = "Log level"
    )]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Error | LogLevel::Critical => LevelFilter::Error,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Convert images to WebP format",
        long_about = "Convert every image matching the input formats under INPUT into WebP files under OUTPUT."
    )]
    Convert(ConvertArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ConvertArgs {
    #[arg(default_value = ".", help = "Input directory")]
    pub input: PathBuf,

    #[arg(default_value = ".", help = "Output directory")]
    pub output: PathBuf,

    #[arg(
        long,
        value_name = "WxH",
        help = "Resize image to the given size, e.g. 640x800"
    )]
    pub resize: Option<String>,

    #[arg(long, help = "Skip images narrower than this")]
    pub min_width: Option<u32>,

    #[arg(long, help = "Skip images shorter than this")]
    pub min_height: Option<u32>,

    #[arg(long, help = "Skip images wider than this")]
    pub max_width: Option<u32>,

    #[arg(long, help = "Skip images taller than this")]
    pub max_height: Option<u32>,

    #[arg(
        long,
        overrides_with = "no_keep_aspect_ratio",
        help = "Keep the original aspect ratio while resizing (default)"
    )]
    pub keep_aspect_ratio: bool,

    #[arg(long, overrides_with = "keep_aspect_ratio", help = "Stretch to the exact resize dimensions")]
    pub no_keep_aspect_ratio: bool,

    #[arg(
        long,
        value_name = "FORMATS",
        help = "Input file formats, e.g. png,jpg,jpeg (default: jpg,jpeg,png)",
        long_help = "Input file extensions to search for. Comma separated and repeatable; \
                     matching is case insensitive."
    )]
    pub files_format: Vec<String>,

    #[arg(
        short = 'q',
        long,
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Quality 0-100",
        long_help = "For lossy, 0 gives the smallest size and 100 the largest. \
                     For lossless, this is the effort put into compression: 0 is fastest, 100 is slowest but best."
    )]
    pub quality: u8,

    #[arg(
        long,
        default_value_t = DEFAULT_ALPHA_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Alpha quality 0-100 (lossy only; 100 is lossless)"
    )]
    pub alpha_quality: u8,

    #[arg(long, help = "Enable lossless compression")]
    pub lossless: bool,

    #[arg(
        short = 'm',
        long,
        default_value_t = DEFAULT_METHOD,
        value_parser = clap::value_parser!(u8).range(0..=6),
        help = "Quality/speed trade-off (0=fast, 6=slower-better)"
    )]
    pub method: u8,

    #[arg(
        long,
        help = "Preserve RGB values under transparent pixels",
        long_help = "If set, preserve the transparent RGB values. Otherwise, \
                     discard invisible RGB values for better compression."
    )]
    pub exact: bool,

    #[arg(
        long,
        overrides_with = "no_keep_directory",
        help = "Mirror the input directory structure (default)"
    )]
    pub keep_directory: bool,

    #[arg(long, overrides_with = "keep_directory", help = "Write every output directly into OUTPUT")]
    pub no_keep_directory: bool,

    #[arg(short = 'r', long, help = "Convert images in subdirectories")]
    pub recursive: bool,

    #[arg(long, help = "Use a worker pool")]
    pub use_threads: bool,

    #[arg(
        short = 'j',
        long,
        help = "Number of worker threads with --use-threads, 1-1024 (default: 4 x CPU cores, max 32)"
    )]
    pub threads: Option<usize>,

    #[arg(long, help = "Delete each input file after converting it")]
    pub unlink: bool,

    #[arg(
        long,
        overrides_with = "no_ignore_existing",
        help = "Skip files whose output already exists (default)"
    )]
    pub ignore_existing: bool,

    #[arg(long, overrides_with = "ignore_existing", help = "Overwrite existing outputs")]
    pub no_ignore_existing: bool,
}

impl From<ConvertArgs> for ConvertOptions {
    fn from(args: ConvertArgs) -> Self {
        ConvertOptions {
            input: args.input,
            output: args.output,
            files_format: args.files_format,
            quality: args.quality,
            alpha_quality: args.alpha_quality,
            lossless: args.lossless,
            method: args.method,
            exact: args.exact,
            keep_directory: !args.no_keep_directory,
            recursive: args.recursive,
            use_threads: args.use_threads,
            threads: args.threads,
            unlink: args.unlink,
            ignore_existing: !args.no_ignore_existing,
            resize: args.resize,
            keep_aspect_ratio: !args.no_keep_aspect_ratio,
            min_width: args.min_width,
            min_height: args.min_height,
            max_width: args.max_width,
            max_height: args.max_height,
        }
    }
}
