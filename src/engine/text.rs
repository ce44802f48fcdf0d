//! Watermark label rendering.
//!
//! Rasterizes a single line of text into a transparent RGBA image that the
//! engine composites onto the stamped result.

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

/// Measures the rendered width and height of `text` at the given size.
fn measure(font: &FontVec, text: &str, font_size: f32) -> (u32, u32) {
    let scaled = font.as_scaled(PxScale::from(font_size));

    let mut width = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }

    // Small padding so antialiased edges are not clipped.
    (width.ceil() as u32 + 2, scaled.height().ceil() as u32 + 2)
}

/// Renders `text` in white onto a transparent canvas.
///
/// Opacity is applied later when the label is blended onto the image, so the
/// glyphs here carry only their antialiasing coverage in the alpha channel.
pub fn render_label(font: &FontVec, text: &str, font_size: f32) -> RgbaImage {
    let scale = PxScale::from(font_size);
    let scaled = font.as_scaled(scale);

    let (width, height) = measure(font, text, font_size);
    let mut canvas = RgbaImage::new(width.max(1), height.max(1));

    let baseline_y = scaled.ascent();
    let mut cursor_x = 0.0f32;
    let mut prev: Option<GlyphId> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            cursor_x += scaled.kern(prev, id);
        }

        let glyph = id.with_scale_and_position(scale, point(cursor_x, baseline_y));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;
                if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                    let alpha = (coverage * 255.0) as u8;
                    let existing = canvas.get_pixel(x as u32, y as u32)[3];
                    // Keep the strongest coverage where glyphs touch.
                    canvas.put_pixel(x as u32, y as u32, Rgba([255, 255, 255, alpha.max(existing)]));
                }
            });
        }

        cursor_x += scaled.h_advance(id);
        prev = Some(id);
    }

    canvas
}
