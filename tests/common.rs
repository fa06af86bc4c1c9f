#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use img_webp::{FileReport, Reporter};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Writes a real image of the given size; the format follows the extension.
pub fn create_test_image(path: &Path, width: u32, height: u32) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let format = ImageFormat::from_path(path).unwrap();
    let img = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8())
    } else {
        DynamicImage::ImageRgba8(img)
    };
    img.save_with_format(path, format).unwrap();
    path.to_path_buf()
}

pub fn create_corrupt_file(path: &Path) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path)
        .unwrap()
        .write_all(b"definitely not an image")
        .unwrap();
    path.to_path_buf()
}

/// All files under `dir`, relative and sorted, with `/` separators.
pub fn list_files(dir: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}

/// Collects reporter events for assertions.
#[derive(Default)]
pub struct RecordingReporter {
    pub finished: Mutex<Vec<PathBuf>>,
    pub removal_failures: Mutex<Vec<PathBuf>>,
    pub totals: Mutex<Vec<usize>>,
}

impl Reporter for RecordingReporter {
    fn extension_scanned(&self, _extension: &str, _found: usize, total: usize) {
        self.totals.lock().unwrap().push(total);
    }

    fn file_finished(&self, report: &FileReport) {
        self.finished.lock().unwrap().push(report.source.clone());
    }

    fn source_removal_failed(&self, path: &Path, _error: &io::Error) {
        self.removal_failures.lock().unwrap().push(path.to_path_buf());
    }
}
