use crate::config::TargetSize;
use image::imageops::FilterType;
use image::DynamicImage;

/// How the output dimensions of a file are derived from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Keep source dimensions.
    Original,
    /// Scale down to fit inside the box, keeping aspect ratio. Never enlarges.
    Fit { width: u32, height: u32 },
    /// Stretch to exactly the requested size.
    Exact { width: u32, height: u32 },
}

impl ResizePolicy {
    pub fn from_request(size: Option<TargetSize>, keep_aspect_ratio: bool) -> Self {
        match size {
            None => ResizePolicy::Original,
            Some(TargetSize { width, height }) if keep_aspect_ratio => {
                ResizePolicy::Fit { width, height }
            }
            Some(TargetSize { width, height }) => ResizePolicy::Exact { width, height },
        }
    }

    /// Output dimensions for a source of `width` x `height`.
    pub fn target_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        match *self {
            ResizePolicy::Original => (width, height),
            ResizePolicy::Exact { width: w, height: h } => (w, h),
            ResizePolicy::Fit { width: bw, height: bh } => fit_within(width, height, bw, bh),
        }
    }
}

fn fit_within(width: u32, height: u32, box_w: u32, box_h: u32) -> (u32, u32) {
    if width <= box_w && height <= box_h {
        return (width, height);
    }
    if width == 0 || height == 0 {
        return (width.min(box_w), height.min(box_h));
    }

    let scale = f64::min(
        box_w as f64 / width as f64,
        box_h as f64 / height as f64,
    );
    let new_w = ((width as f64 * scale).round() as u32).clamp(1, box_w);
    let new_h = ((height as f64 * scale).round() as u32).clamp(1, box_h);
    (new_w, new_h)
}

/// Resizes `img` in place according to `policy`. No-op when the
/// dimensions already match.
pub fn resize_image(img: &mut DynamicImage, policy: ResizePolicy) {
    let (width, height) = (img.width(), img.height());
    let (new_w, new_h) = policy.target_dimensions(width, height);

    if (new_w, new_h) != (width, height) {
        log::debug!("Resizing {}x{} -> {}x{}", width, height, new_w, new_h);
        *img = img.resize_exact(new_w, new_h, FilterType::Lanczos3);
    }
}
