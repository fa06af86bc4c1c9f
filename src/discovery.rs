use crate::config::JobConfig;
use crate::error::{ConvertError, Result};
use crate::progress::ProgressTracker;
use crate::report::Reporter;
use glob::{glob_with, MatchOptions, Pattern};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A file picked up by discovery. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    path: PathBuf,
    relative: PathBuf,
}

impl SourceFile {
    /// `root` must be a prefix of `path`.
    pub fn new(root: &Path, path: PathBuf) -> Result<Self> {
        let relative = path
            .strip_prefix(root)
            .map_err(|_| ConvertError::OutsideInputRoot(path.clone(), root.to_path_buf()))?
            .to_path_buf();
        Ok(Self { path, relative })
    }

    /// Absolute path of the source image.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the input root.
    pub fn relative(&self) -> &Path {
        &self.relative
    }
}

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: true,
    }
}

/// Builds the search pattern for one extension under `root`.
pub fn extension_pattern(root: &Path, extension: &str, recursive: bool) -> Result<String> {
    let root_str = root
        .to_str()
        .ok_or_else(|| ConvertError::NonUtf8Path(root.to_path_buf()))?;
    let root_str = root_str.trim_end_matches(['/', '\\']);
    let escaped_root = Pattern::escape(root_str);
    let escaped_ext = Pattern::escape(extension);

    Ok(if recursive {
        format!("{}/**/*.{}", escaped_root, escaped_ext)
    } else {
        format!("{}/*.{}", escaped_root, escaped_ext)
    })
}

/// Collects every source file under the input root.
///
/// Extensions are scanned in configured order; within an extension, glob
/// order. The tracker's total is published after each extension. A file
/// reached twice (listed twice, or through a symlink) is kept once.
///
/// # Arguments
/// * `config` - Supplies the input root, extensions and recursion flag
/// * `tracker` - Receives the running total
/// * `reporter` - Told about each scanned extension and unreadable entries
///
/// # Returns
/// * `Ok(files)` - Regular files in discovery order
/// * `Err(ConvertError)` - If the root cannot be made absolute or a pattern is invalid
pub fn discover_files(
    config: &JobConfig,
    tracker: &ProgressTracker,
    reporter: &dyn Reporter,
) -> Result<Vec<SourceFile>> {
    let root = std::path::absolute(config.input())?;
    let mut files = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for extension in config.formats() {
        let pattern = extension_pattern(&root, extension, config.recursive())?;
        let mut found = 0;

        for entry in glob_with(&pattern, match_options())? {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    reporter.unreadable_entry(err.path(), err.error());
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }

            let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if !seen.insert(key) {
                continue;
            }

            files.push(SourceFile::new(&root, path)?);
            found += 1;
        }

        reporter.extension_scanned(extension, found, files.len());
        tracker.set_total(files.len() as u64);
    }

    Ok(files)
}
