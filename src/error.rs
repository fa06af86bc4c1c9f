use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Input directory \"{}\" does not exist", .0.display())]
    InputPathNotFound(PathBuf),

    #[error("Invalid size format: {0}, expected format: 640x800")]
    InvalidSizeFormat(String),

    #[error("Invalid quality value: {0}. Must be between 0 and 100")]
    InvalidQuality(u8),

    #[error("Invalid alpha quality value: {0}. Must be between 0 and 100")]
    InvalidAlphaQuality(u8),

    #[error("Invalid method value: {0}. Must be between 0 and 6")]
    InvalidMethod(u8),

    #[error("Invalid worker count: {0}. Must be between 1 and 1024")]
    InvalidWorkerCount(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("WebP encoding error: {0}")]
    WebpEncoding(String),

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("Invalid file name: {}", .0.display())]
    InvalidFileName(PathBuf),

    #[error("Conversion panicked: {0}")]
    JobPanicked(String),

    #[error("Path {} is outside of input directory {}", .0.display(), .1.display())]
    OutsideInputRoot(PathBuf, PathBuf),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_path_message() {
        let err = ConvertError::InputPathNotFound(PathBuf::from("missing"));
        assert_eq!(err.to_string(), "Input directory \"missing\" does not exist");
    }

    #[test]
    fn test_size_format_message() {
        let err = ConvertError::InvalidSizeFormat("abc".to_string());
        assert!(err.to_string().contains("640x800"));
    }

    #[test]
    fn test_io_conversion() {
        let err: ConvertError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ConvertError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: gone");
    }
}
