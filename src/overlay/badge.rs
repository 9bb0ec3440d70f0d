//! Runtime-drawn rating badge: a yellow box with the rating in bold black
//! text, pinned to the bottom-right corner of the poster.

use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

pub const BADGE_WIDTH: u32 = 180;
pub const BADGE_HEIGHT: u32 = 80;
pub const BADGE_PADDING: u32 = 20;
/// Em size of the rating text in pixels.
pub const FONT_SIZE: f32 = 80.0;

/// Empirical downward nudge that visually centers DejaVu Sans Bold at 80px.
/// Retune by eye if the font or size changes; it is not derived from metrics.
pub const BASELINE_OFFSET: f32 = 5.0;

const BADGE_FILL: Rgba<u8> = Rgba([245, 197, 24, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Top-left corner of the badge box on a `width` x `height` poster.
pub fn badge_origin(width: u32, height: u32) -> (i32, i32) {
    (
        width as i32 - (BADGE_WIDTH + BADGE_PADDING) as i32,
        height as i32 - (BADGE_HEIGHT + BADGE_PADDING) as i32,
    )
}

/// The rating as shown on the badge, one decimal place.
pub fn rating_label(vote_average: f64) -> String {
    format!("{vote_average:.1}")
}

/// Scale at which the font's em square is `em_px` pixels tall. `PxScale`
/// alone sets the ascent-to-descent height, which is larger than the em.
pub fn em_scale(font: &FontArc, em_px: f32) -> PxScale {
    let height = font.height_unscaled();
    let units_per_em = font.units_per_em().unwrap_or(height);
    PxScale::from(em_px * height / units_per_em)
}

/// Ink extent of `text` laid out on one line, as `(width, height)`.
///
/// Only painted pixels count, so side bearings and the space above the
/// digits are excluded. Returns `None` when nothing would be drawn.
pub fn ink_size(font: &FontArc, scale: PxScale, text: &str) -> Option<(u32, u32)> {
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0;
    let mut prev = None;
    let mut bounds: Option<(f32, f32, f32, f32)> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, scaled.ascent()));
        caret += scaled.h_advance(id);
        prev = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let b = outlined.px_bounds();
            bounds = Some(match bounds {
                None => (b.min.x, b.min.y, b.max.x, b.max.y),
                Some((l, t, r, btm)) => (
                    l.min(b.min.x),
                    t.min(b.min.y),
                    r.max(b.max.x),
                    btm.max(b.max.y),
                ),
            });
        }
    }

    bounds.map(|(l, t, r, b)| ((r - l).round() as u32, (b - t).round() as u32))
}

/// Top of the text line and left pen position for ink of the measured size,
/// centered on the box at `origin` and nudged down by [`BASELINE_OFFSET`].
/// The line top sits above the ink, so the digits land lower than center.
pub fn text_origin(origin: (i32, i32), text_w: u32, text_h: u32) -> (i32, i32) {
    let center_x = origin.0 as f32 + BADGE_WIDTH as f32 / 2.0;
    let center_y = origin.1 as f32 + BADGE_HEIGHT as f32 / 2.0;
    let x = center_x - text_w as f32 / 2.0;
    let y = center_y - text_h as f32 / 2.0 + BASELINE_OFFSET;
    (x.round() as i32, y.round() as i32)
}

/// Draw the badge on a transparent layer and composite it over `base`.
pub fn render_rating_badge(base: &mut RgbaImage, vote_average: f64, font: &FontArc) {
    let (width, height) = base.dimensions();
    let mut layer = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]));

    let origin = badge_origin(width, height);
    draw_filled_rect_mut(
        &mut layer,
        Rect::at(origin.0, origin.1).of_size(BADGE_WIDTH, BADGE_HEIGHT),
        BADGE_FILL,
    );

    let label = rating_label(vote_average);
    let scale = em_scale(font, FONT_SIZE);
    let (text_w, text_h) = ink_size(font, scale, &label)
        .unwrap_or((BADGE_WIDTH / 2, BADGE_HEIGHT / 2));
    let (x, y) = text_origin(origin, text_w, text_h);
    draw_text_mut(&mut layer, TEXT_COLOR, x, y, scale, font, &label);

    imageops::overlay(base, &layer, 0, 0);
}
