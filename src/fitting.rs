use crate::*;
use image::imageops::{self, FilterType};
use image::RgbImage;
use tracing::*;

/// Resizes `source` to exactly `target` (`(width, height)`) under the given policy.
///
/// # Example
/// ```
/// use gridsplit::{fitting::fit_source, FittingPolicy};
/// use image::{imageops::FilterType, Rgb, RgbImage};
///
/// let source = RgbImage::from_pixel(40, 10, Rgb([200, 30, 30]));
/// let fitted = fit_source(&source, (30, 30), FittingPolicy::Fit, FilterType::Triangle).unwrap();
/// assert_eq!(fitted.dimensions(), (30, 30));
/// ```
pub fn fit_source(
    source: &RgbImage,
    target: (u32, u32),
    policy: FittingPolicy,
    filter: FilterType,
) -> Result<RgbImage, TilingError> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        error!(
            "Invalid image dimensions: width={}, height={}",
            width, height
        );
        return Err(TilingError::InvalidDimensions { width, height });
    }
    let (target_w, target_h) = target;
    if target_w == 0 || target_h == 0 {
        return Err(TilingError::InvalidDimensions {
            width: target_w,
            height: target_h,
        });
    }

    debug!(
        "Fitting {}x{} into {}x{} ({:?})",
        width, height, target_w, target_h, policy
    );
    Ok(match policy {
        FittingPolicy::Cover => resize_cover(source, target_w, target_h, filter),
        FittingPolicy::Fit => resize_fit(source, target_w, target_h, filter),
    })
}

/// Scales so the target is fully covered, then center-crops the overflow.
fn resize_cover(source: &RgbImage, target_w: u32, target_h: u32, filter: FilterType) -> RgbImage {
    let (width, height) = source.dimensions();
    let scale = f64::max(
        target_w as f64 / width as f64,
        target_h as f64 / height as f64,
    );
    // Rounding up keeps both axes at least as large as the target.
    let new_w = ((width as f64 * scale).ceil() as u32).max(target_w);
    let new_h = ((height as f64 * scale).ceil() as u32).max(target_h);
    trace!("Cover resize to {}x{}", new_w, new_h);

    let resized = imageops::resize(source, new_w, new_h, filter);
    let left = (new_w - target_w) / 2;
    let top = (new_h - target_h) / 2;
    imageops::crop_imm(&resized, left, top, target_w, target_h).to_image()
}

/// Scales so the whole source fits, then centers it on a background canvas.
fn resize_fit(source: &RgbImage, target_w: u32, target_h: u32, filter: FilterType) -> RgbImage {
    let (width, height) = source.dimensions();
    let scale = f64::min(
        target_w as f64 / width as f64,
        target_h as f64 / height as f64,
    );
    let new_w = ((width as f64 * scale).round() as u32).clamp(1, target_w);
    let new_h = ((height as f64 * scale).round() as u32).clamp(1, target_h);
    trace!("Fit resize to {}x{}", new_w, new_h);

    let resized = imageops::resize(source, new_w, new_h, filter);
    let mut canvas = RgbImage::from_pixel(target_w, target_h, BACKGROUND);
    let left = (target_w - new_w) / 2;
    let top = (target_h - new_h) / 2;
    imageops::replace(&mut canvas, &resized, left as i64, top as i64);
    canvas
}
