use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::error::{FundusError, Result};
use crate::frame::ColorFrame;
use crate::heatmap::overlay::OverlayComposite;

/// Decode an encoded image (PNG, JPEG, ...) into a ColorFrame.
pub fn decode_color_image(bytes: &[u8]) -> Result<ColorFrame> {
    let img = image::load_from_memory(bytes).map_err(|e| FundusError::ImageDecode(e.to_string()))?;
    let rgb = img.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(FundusError::ImageDecode("image has no pixels".into()));
    }
    Ok(ColorFrame::from_rgb8(&rgb))
}

/// Load an image file into a ColorFrame. Any read or decode failure is an
/// [`FundusError::ImageDecode`].
pub fn load_color_image(path: &Path) -> Result<ColorFrame> {
    let bytes = std::fs::read(path)
        .map_err(|e| FundusError::ImageDecode(format!("{}: {e}", path.display())))?;
    let frame = decode_color_image(&bytes)?;
    debug!(path = %path.display(), width = frame.width(), height = frame.height(), "Image loaded");
    Ok(frame)
}

/// Encode a ColorFrame as 8-bit RGB PNG in memory.
pub fn encode_png(color: &ColorFrame) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    color.to_rgb8().write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Save a ColorFrame as 8-bit RGB PNG.
pub fn save_color_png(color: &ColorFrame, path: &Path) -> Result<()> {
    color.to_rgb8().save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a ColorFrame as JPEG.
pub fn save_color_jpeg(color: &ColorFrame, path: &Path) -> Result<()> {
    color.to_rgb8().save_with_format(path, ImageFormat::Jpeg)?;
    Ok(())
}

/// Save a ColorFrame, choosing format from file extension (PNG by default).
pub fn save_color_image(color: &ColorFrame, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg" | "jpeg") => save_color_jpeg(color, path),
        _ => save_color_png(color, path),
    }
}

/// Save an RGBA buffer (e.g. a heat image) as PNG.
pub fn save_rgba_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save an overlay composite as RGBA PNG, keeping its transparency.
pub fn save_overlay_png(overlay: &OverlayComposite, path: &Path) -> Result<()> {
    save_rgba_png(&overlay.to_rgba8(), path)
}
