//! Built-in image-processing engine.
//!
//! Decodes source images with the `image` crate, scales the stamp to cover
//! the full frame while keeping its aspect ratio, centers it, alpha blends it
//! with the requested opacity, optionally draws a text label and re-encodes
//! the result as JPEG or WebP.

use std::io::Cursor;

use ab_glyph::FontVec;
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, ImageEncoder, ImageFormat, Rgba, RgbaImage};
use tracing::debug;

use super::text;
use super::StampEngine;
use crate::core::OutputFormat;
use crate::utils::{StamperError, StamperResult};

const LABEL_PADDING: u32 = 12;

pub struct ImageStamper {
    stamp: Option<RgbaImage>,
    label_font: Option<FontVec>,
}

impl ImageStamper {
    pub fn new() -> Self {
        Self {
            stamp: None,
            label_font: None,
        }
    }

    /// Loads a TTF/OTF font used for watermark label rendering.
    pub fn set_label_font(&mut self, font_bytes: &[u8]) -> StamperResult<()> {
        let font = FontVec::try_from_vec(font_bytes.to_vec())
            .map_err(|e| StamperError::image(format!("Failed to load label font: {}", e)))?;
        self.label_font = Some(font);
        Ok(())
    }

    fn encode(&self, img: &RgbaImage, quality: u8, format: OutputFormat) -> StamperResult<Vec<u8>> {
        let mut buffer = Vec::new();
        match format {
            OutputFormat::Jpg => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
                let (width, height) = rgb.dimensions();
                let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buffer), quality);
                encoder
                    .write_image(rgb.as_raw(), width, height, image::ColorType::Rgb8)
                    .map_err(|e| StamperError::image(format!("Failed to encode JPEG: {}", e)))?;
            }
            OutputFormat::Webp => {
                DynamicImage::ImageRgba8(img.clone())
                    .write_to(&mut Cursor::new(&mut buffer), ImageFormat::WebP)
                    .map_err(|e| StamperError::image(format!("Failed to encode WebP: {}", e)))?;
            }
        }
        Ok(buffer)
    }
}

impl Default for ImageStamper {
    fn default() -> Self {
        Self::new()
    }
}

impl StampEngine for ImageStamper {
    fn set_stamp(&mut self, stamp_bytes: &[u8]) -> StamperResult<()> {
        let stamp = image::load_from_memory(stamp_bytes)
            .map_err(|e| StamperError::image(format!("Failed to load stamp image: {}", e)))?
            .to_rgba8();
        debug!("Stamp set: {}x{}", stamp.width(), stamp.height());
        self.stamp = Some(stamp);
        Ok(())
    }

    fn apply_stamp(
        &self,
        image_bytes: &[u8],
        quality: u8,
        format: OutputFormat,
        label: &str,
        opacity: u8,
    ) -> StamperResult<Vec<u8>> {
        let stamp = self
            .stamp
            .as_ref()
            .ok_or_else(|| StamperError::image("Stamp not set"))?;

        let mut base = image::load_from_memory(image_bytes)
            .map_err(|e| StamperError::image(format!("Failed to load image: {}", e)))?
            .to_rgba8();
        let (width, height) = base.dimensions();
        let alpha = opacity as f32 / 100.0;

        // Scale the stamp so it covers the whole frame, preserving aspect ratio.
        let scale = (width as f32 / stamp.width() as f32)
            .max(height as f32 / stamp.height() as f32);
        let scaled_w = ((stamp.width() as f32 * scale) as u32).max(1);
        let scaled_h = ((stamp.height() as f32 * scale) as u32).max(1);
        let resized = imageops::resize(stamp, scaled_w, scaled_h, imageops::FilterType::Lanczos3);

        // Center the stamp; offsets go negative when the scaled stamp overflows.
        let x_offset = (width as i64 - scaled_w as i64) / 2;
        let y_offset = (height as i64 - scaled_h as i64) / 2;
        blend_overlay(&mut base, &resized, x_offset, y_offset, alpha);

        if !label.is_empty() {
            match &self.label_font {
                Some(font) => {
                    let font_size = (width as f32 / 24.0).clamp(16.0, 48.0);
                    let rendered = text::render_label(font, label, font_size);
                    let x = LABEL_PADDING as i64;
                    let y = height as i64 - rendered.height() as i64 - LABEL_PADDING as i64;
                    blend_overlay(&mut base, &rendered, x, y, alpha);
                }
                None => debug!("No label font configured, skipping label '{}'", label),
            }
        }

        let encoded = self.encode(&base, quality, format)?;
        debug!(
            "Stamped {}x{} image: {} bytes of {} at quality {}",
            width,
            height,
            encoded.len(),
            format.extension(),
            quality
        );
        Ok(encoded)
    }
}

/// Alpha blends `overlay` onto `base` at the given offset.
///
/// The overlay's own alpha channel is scaled by `opacity` (0.0 to 1.0);
/// pixels falling outside the base bounds are discarded. The base alpha
/// channel is left unchanged.
fn blend_overlay(base: &mut RgbaImage, overlay: &RgbaImage, x_offset: i64, y_offset: i64, opacity: f32) {
    let (base_w, base_h) = (base.width() as i64, base.height() as i64);

    for (ox, oy, overlay_px) in overlay.enumerate_pixels() {
        let bx = ox as i64 + x_offset;
        let by = oy as i64 + y_offset;
        if bx < 0 || by < 0 || bx >= base_w || by >= base_h {
            continue;
        }

        let base_px = base.get_pixel_mut(bx as u32, by as u32);
        let a = (overlay_px[3] as f32 / 255.0) * opacity;
        let inv = 1.0 - a;
        *base_px = Rgba([
            (base_px[0] as f32 * inv + overlay_px[0] as f32 * a) as u8,
            (base_px[1] as f32 * inv + overlay_px[1] as f32 * a) as u8,
            (base_px[2] as f32 * inv + overlay_px[2] as f32 * a) as u8,
            base_px[3],
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(rgba))
    }

    #[test]
    fn blend_full_opacity_replaces_pixels() {
        let mut base = solid(4, 4, [0, 0, 255, 255]);
        let overlay = solid(2, 2, [255, 0, 0, 255]);
        blend_overlay(&mut base, &overlay, 1, 1, 1.0);

        assert_eq!(base.get_pixel(1, 1)[0], 255);
        assert_eq!(base.get_pixel(1, 1)[2], 0);
        // Outside the overlay region the base is untouched.
        assert_eq!(base.get_pixel(0, 0)[2], 255);
    }

    #[test]
    fn blend_clips_out_of_bounds_overlay() {
        let mut base = solid(2, 2, [10, 10, 10, 255]);
        let overlay = solid(4, 4, [200, 200, 200, 255]);
        // Negative offsets: only the overlapping window lands on the base.
        blend_overlay(&mut base, &overlay, -1, -1, 1.0);
        assert_eq!(base.get_pixel(0, 0)[0], 200);
    }

    #[test]
    fn blend_preserves_base_alpha() {
        let mut base = solid(1, 1, [0, 0, 0, 200]);
        let overlay = solid(1, 1, [255, 255, 255, 255]);
        blend_overlay(&mut base, &overlay, 0, 0, 0.5);
        assert_eq!(base.get_pixel(0, 0)[3], 200);
    }
}
