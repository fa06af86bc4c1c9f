//! Thin adapter over the image codecs: header probing and decoding through
//! `image`, WebP encoding through `webp` (libwebp).

use crate::config::JobConfig;
use crate::error::{ConvertError, Result};
use image::{DynamicImage, ImageReader};
use std::io::{self, Write};
use std::path::Path;
use webp::{Encoder, WebPConfig};

/// WebP encoder knobs taken from the job configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSettings {
    /// 0-100. Lossy: size/quality trade-off. Lossless: compression effort.
    pub quality: u8,
    pub alpha_quality: u8,
    pub lossless: bool,
    /// 0 (fast) to 6 (slow, smaller output).
    pub method: u8,
    /// Keep RGB values under fully transparent pixels.
    pub exact: bool,
}

impl From<&JobConfig> for EncodeSettings {
    fn from(config: &JobConfig) -> Self {
        Self {
            quality: config.quality(),
            alpha_quality: config.alpha_quality(),
            lossless: config.lossless(),
            method: config.method(),
            exact: config.exact(),
        }
    }
}

/// Reads width and height from the image header without decoding pixels.
pub fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    let dimensions = ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(dimensions)
}

pub fn decode_image(path: &Path) -> Result<DynamicImage> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img)
}

fn webp_config(settings: &EncodeSettings) -> Result<WebPConfig> {
    let mut config = WebPConfig::new()
        .map_err(|_| ConvertError::WebpEncoding("cannot initialise encoder config".to_string()))?;
    config.lossless = i32::from(settings.lossless);
    config.quality = f32::from(settings.quality);
    config.alpha_quality = i32::from(settings.alpha_quality);
    config.method = i32::from(settings.method);
    config.exact = i32::from(settings.exact);
    Ok(config)
}

/// Encodes `img` to WebP bytes.
pub fn encode_webp(img: &DynamicImage, settings: &EncodeSettings) -> Result<Vec<u8>> {
    let config = webp_config(settings)?;
    let (width, height) = (img.width(), img.height());

    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        Encoder::from_rgba(rgba.as_raw(), width, height)
            .encode_advanced(&config)
            .map(|memory| memory.to_vec())
    } else {
        let rgb = img.to_rgb8();
        Encoder::from_rgb(rgb.as_raw(), width, height)
            .encode_advanced(&config)
            .map(|memory| memory.to_vec())
    };

    encoded.map_err(|e| ConvertError::WebpEncoding(format!("{:?}", e)))
}

/// Encodes `img` and publishes it at `output`.
///
/// The bytes go to a hidden temporary file next to `output` which is then
/// renamed into place, so an interrupted write never leaves a truncated
/// `.webp` at the final path.
///
/// # Arguments
/// * `img` - Decoded (and already resized) image
/// * `output` - Final destination; its directory must exist
/// * `settings` - Encoder knobs
/// * `overwrite` - Replace an existing destination instead of yielding to it
///
/// # Returns
/// * `Ok(Some(bytes))` - Size of the published file
/// * `Ok(None)` - `overwrite` is false and the destination already exists,
///   including one published concurrently by another job
/// * `Err(ConvertError)` - If encoding or any filesystem step fails
pub fn save_webp(
    img: &DynamicImage,
    output: &Path,
    settings: &EncodeSettings,
    overwrite: bool,
) -> Result<Option<u64>> {
    let bytes = encode_webp(img, settings)?;

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = tempfile::Builder::new()
        .prefix(".")
        .suffix(".part")
        .tempfile_in(dir)?;
    staged.write_all(&bytes)?;

    let published = if overwrite {
        staged.persist(output)
    } else {
        staged.persist_noclobber(output)
    };

    // A failed persist drops the staged file, which removes it.
    match published {
        Ok(_) => Ok(Some(bytes.len() as u64)),
        Err(err) if !overwrite && err.error.kind() == io::ErrorKind::AlreadyExists => Ok(None),
        Err(err) => Err(err.error.into()),
    }
}
