use crate::config::JobConfig;
use crate::discovery::SourceFile;
use crate::error::{ConvertError, Result};
use crate::formats::target_extension;
use std::fs;
use std::path::{Path, PathBuf};

/// Maps a source file to its destination under the output root.
///
/// With keep-directory the source's path relative to the input root is
/// mirrored; otherwise only the file name is kept. The extension is always
/// the target format's.
///
/// # Arguments
/// * `source` - Discovered file, with its path relative to the input root
/// * `config` - Supplies the output root and keep-directory flag
///
/// # Returns
/// * `Ok(path)` - Destination path; nothing is created
/// * `Err(ConvertError::InvalidFileName)` - If the source has no file name
pub fn resolve_output_path(source: &SourceFile, config: &JobConfig) -> Result<PathBuf> {
    let relative = if config.keep_directory() {
        source.relative()
    } else {
        Path::new(
            source
                .path()
                .file_name()
                .ok_or_else(|| ConvertError::InvalidFileName(source.path().to_path_buf()))?,
        )
    };

    Ok(config.output().join(relative).with_extension(target_extension()))
}

/// Creates every missing ancestor of `output_path`.
pub fn prepare_output_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Resolves the destination and makes sure its directory exists.
pub fn generate_output_path(source: &SourceFile, config: &JobConfig) -> Result<PathBuf> {
    let output_path = resolve_output_path(source, config)?;
    prepare_output_dir(&output_path)?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvertOptions;
    use tempfile::TempDir;

    fn config(input: &Path, output: &Path, keep_directory: bool) -> JobConfig {
        JobConfig::from_options(ConvertOptions {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            keep_directory,
            ..ConvertOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn test_keep_directory_mirrors_structure() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input");
        fs::create_dir(&input).unwrap();
        let output = temp_dir.path().join("output");

        let source = SourceFile::new(&input, input.join("sub").join("a.png")).unwrap();
        let resolved = resolve_output_path(&source, &config(&input, &output, true)).unwrap();

        assert_eq!(resolved, output.join("sub").join("a.webp"));
    }

    #[test]
    fn test_flatten_discards_directories() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input");
        fs::create_dir(&input).unwrap();
        let output = temp_dir.path().join("output");

        let source = SourceFile::new(&input, input.join("sub").join("a.png")).unwrap();
        let resolved = resolve_output_path(&source, &config(&input, &output, false)).unwrap();

        assert_eq!(resolved, output.join("a.webp"));
    }

    #[test]
    fn test_extension_replaced_regardless_of_case() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("output");

        let source = SourceFile::new(temp_dir.path(), temp_dir.path().join("PHOTO.JPEG")).unwrap();
        let resolved =
            resolve_output_path(&source, &config(temp_dir.path(), &output, true)).unwrap();

        assert_eq!(resolved, output.join("PHOTO.webp"));
    }

    #[test]
    fn test_only_last_extension_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("output");

        let source = SourceFile::new(temp_dir.path(), temp_dir.path().join("a.tar.png")).unwrap();
        let resolved =
            resolve_output_path(&source, &config(temp_dir.path(), &output, true)).unwrap();

        assert_eq!(resolved, output.join("a.tar.webp"));
    }

    #[test]
    fn test_generate_output_path_creates_directories_idempotently() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input");
        fs::create_dir(&input).unwrap();
        let output = temp_dir.path().join("output");
        let config = config(&input, &output, true);

        let source = SourceFile::new(&input, input.join("x").join("y").join("a.png")).unwrap();
        let first = generate_output_path(&source, &config).unwrap();
        let second = generate_output_path(&source, &config).unwrap();

        assert_eq!(first, second);
        assert!(output.join("x").join("y").is_dir());
        assert!(!first.exists());
    }
}
