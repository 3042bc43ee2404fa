//! Glyph rasterization and the bitmap caches.
//!
//! Three caches sit in front of the rasterizer:
//!
//! - rendered bitmaps keyed by [`RenderKey`] `(name, size, color, font_path)`
//! - scaled fonts keyed by `(font_path, size)`
//! - transparent placeholders keyed by size
//!
//! Cached values are handed out as `Arc`s and never mutated, so repeated
//! requests return the same allocation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use parking_lot::Mutex;
use resvg::tiny_skia;

use crate::color::IconColor;
use crate::config::RenderConfig;
use crate::error::{IconError, IconResult};
use crate::logging::targets;
use crate::registry::IconSet;
use crate::rendered::{RenderKey, RenderedIcon};

/// Statistics about rasterizer activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Bitmaps drawn from a glyph outline.
    pub renders: u64,
    /// Requests answered from the bitmap cache.
    pub cache_hits: u64,
    /// Requests answered with a transparent placeholder.
    pub placeholders: u64,
    /// Fonts loaded and scaled.
    pub font_loads: u64,
}

/// A font file prepared for one pixel size.
#[derive(Debug)]
pub struct ScaledFont {
    path: PathBuf,
    data: Arc<[u8]>,
    scale: f32,
    ascent: i32,
    descent: i32,
}

impl ScaledFont {
    /// Read and validate a font file.
    ///
    /// Returns `Ok(None)` when the file cannot be read, and an error when
    /// its bytes are not a font.
    pub fn load(path: &Path, size: u32) -> IconResult<Option<Self>> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(
                    target: targets::RASTER,
                    path = %path.display(),
                    error = %e,
                    "font file unavailable, rendering placeholder"
                );
                return Ok(None);
            }
        };
        Self::from_bytes(path, data.into(), size).map(Some)
    }

    fn from_bytes(path: &Path, data: Arc<[u8]>, size: u32) -> IconResult<Self> {
        let face = parse_face(path, &data)?;
        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return Err(IconError::FontParse {
                path: path.to_path_buf(),
                message: "units per em is zero".into(),
            });
        }
        let scale = size.max(1) as f32 / f32::from(units_per_em);
        let ascent = (f32::from(face.ascender()) * scale).ceil() as i32;
        let descent = (-f32::from(face.descender()) * scale).ceil() as i32;
        Ok(Self {
            path: path.to_path_buf(),
            data,
            scale,
            ascent,
            descent,
        })
    }

    /// Pixels per font unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Ascent in whole pixels.
    pub fn ascent(&self) -> i32 {
        self.ascent
    }

    /// Descent in whole pixels, positive below the baseline.
    pub fn descent(&self) -> i32 {
        self.descent
    }
}

fn parse_face<'a>(path: &Path, data: &'a [u8]) -> IconResult<ttf_parser::Face<'a>> {
    ttf_parser::Face::parse(data, 0).map_err(|e| IconError::FontParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// A glyph's ink box in pixels, relative to the top of the ascent line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelBounds {
    /// Convert a font-unit bounding box, rounding outward.
    pub fn from_font_units(bbox: ttf_parser::Rect, scale: f32, ascent: i32) -> Self {
        Self {
            left: (f32::from(bbox.x_min) * scale).floor() as i32,
            right: (f32::from(bbox.x_max) * scale).ceil() as i32,
            top: ascent - (f32::from(bbox.y_max) * scale).ceil() as i32,
            bottom: ascent - (f32::from(bbox.y_min) * scale).floor() as i32,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Where a glyph's drawing origin lands on the canvas.
///
/// The origin is the top of the ascent line at the glyph's left edge
/// position, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPlacement {
    pub pad: i32,
    pub dx: i32,
    pub dy: i32,
}

impl GlyphPlacement {
    /// Center a glyph inside the padded canvas.
    pub fn compute(
        size: u32,
        config: RenderConfig,
        ascent: i32,
        descent: i32,
        bounds: PixelBounds,
    ) -> Self {
        let size_f = size as f32;
        let size = size as i32;
        let pad = (size_f * config.pad_factor) as i32;
        let inner = size - 2 * pad;
        let dx = pad + (inner - bounds.width()).div_euclid(2) - bounds.left;
        let dy = pad
            + (inner - (ascent + descent)).div_euclid(2)
            + (ascent - bounds.bottom)
            + (size_f * config.y_bias) as i32;
        Self { pad, dx, dy }
    }

    /// The glyph's ink box on the canvas.
    pub fn canvas_bounds(&self, bounds: PixelBounds) -> PixelBounds {
        PixelBounds {
            left: bounds.left + self.dx,
            top: bounds.top + self.dy,
            right: bounds.right + self.dx,
            bottom: bounds.bottom + self.dy,
        }
    }
}

/// Adapts `ttf_parser` outline callbacks to a `tiny_skia` path.
struct OutlinePath(tiny_skia::PathBuilder);

impl ttf_parser::OutlineBuilder for OutlinePath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

/// Draw one glyph onto a transparent `size` x `size` canvas.
///
/// Returns a fully transparent image when the font has no glyph for the
/// character or the glyph has no outline.
pub fn draw_glyph(
    font: &ScaledFont,
    glyph: char,
    size: u32,
    color: IconColor,
    config: RenderConfig,
) -> IconResult<RgbaImage> {
    let blank = || RgbaImage::new(size, size);
    let face = parse_face(&font.path, &font.data)?;

    let Some(glyph_id) = face.glyph_index(glyph) else {
        tracing::debug!(
            target: targets::RASTER,
            glyph = %glyph.escape_unicode(),
            "glyph missing from font cmap"
        );
        return Ok(blank());
    };
    let mut outline = OutlinePath(tiny_skia::PathBuilder::new());
    let Some(bbox) = face.outline_glyph(glyph_id, &mut outline) else {
        return Ok(blank());
    };
    let Some(path) = outline.0.finish() else {
        return Ok(blank());
    };

    let bounds = PixelBounds::from_font_units(bbox, font.scale, font.ascent);
    let placement = GlyphPlacement::compute(
        size,
        config.sanitized(),
        font.ascent,
        font.descent,
        bounds,
    );

    let Some(mut pixmap) = tiny_skia::Pixmap::new(size, size) else {
        return Ok(blank());
    };
    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;

    // Font units are y-up; flip around the baseline.
    let transform = tiny_skia::Transform::from_row(
        font.scale,
        0.0,
        0.0,
        -font.scale,
        placement.dx as f32,
        (placement.dy + font.ascent) as f32,
    );
    pixmap.fill_path(&path, &paint, tiny_skia::FillRule::Winding, transform, None);

    Ok(unpremultiply(&pixmap))
}

fn unpremultiply(pixmap: &tiny_skia::Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (pixel, chunk) in image.pixels_mut().zip(pixmap.data().chunks_exact(4)) {
        let a = chunk[3];
        if a == 0 {
            continue;
        }
        let alpha = f32::from(a) / 255.0;
        let channel = |c: u8| (f32::from(c) / alpha).round().min(255.0) as u8;
        *pixel = Rgba([channel(chunk[0]), channel(chunk[1]), channel(chunk[2]), a]);
    }
    image
}

/// Renders glyphs and owns the bitmap, font and placeholder caches.
#[derive(Debug, Default)]
pub struct Rasterizer {
    bitmaps: Mutex<HashMap<RenderKey, Arc<RenderedIcon>>>,
    fonts: Mutex<HashMap<(PathBuf, u32), Arc<ScaledFont>>>,
    placeholders: Mutex<HashMap<u32, Arc<RenderedIcon>>>,
    stats: Mutex<RasterStats>,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `name` from `set` at `size` pixels in `color`.
    ///
    /// Unknown names and missing font files produce the shared transparent
    /// placeholder. Invalid colors and corrupt fonts are errors.
    pub fn render(
        &self,
        set: &IconSet,
        name: &str,
        size: u32,
        color: &str,
    ) -> IconResult<Arc<RenderedIcon>> {
        let size = size.max(1);
        let key = RenderKey::new(name, size, color, set.font_path());

        if let Some(hit) = self.bitmaps.lock().get(&key) {
            self.stats.lock().cache_hits += 1;
            return Ok(Arc::clone(hit));
        }

        let icon_color = IconColor::parse(color)?;

        let Some(glyph) = set.glyph_map().get(name) else {
            tracing::trace!(
                target: targets::RASTER,
                icon_set = %set.id(),
                name,
                "unknown icon name"
            );
            return Ok(self.placeholder(size));
        };

        let Some(font) = self.font(set.font_path(), size)? else {
            return Ok(self.placeholder(size));
        };

        let image = draw_glyph(&font, glyph, size, icon_color, set.render_config())?;
        let rendered = Arc::new(RenderedIcon::new(image, key.clone()));
        self.stats.lock().renders += 1;
        tracing::trace!(
            target: targets::RASTER,
            icon_set = %set.id(),
            name,
            size,
            color,
            "rendered icon"
        );

        let mut bitmaps = self.bitmaps.lock();
        Ok(Arc::clone(bitmaps.entry(key).or_insert(rendered)))
    }

    /// The shared transparent bitmap for `size`.
    pub fn placeholder(&self, size: u32) -> Arc<RenderedIcon> {
        let size = size.max(1);
        self.stats.lock().placeholders += 1;
        let mut placeholders = self.placeholders.lock();
        Arc::clone(
            placeholders
                .entry(size)
                .or_insert_with(|| Arc::new(RenderedIcon::placeholder(size))),
        )
    }

    fn font(&self, path: &Path, size: u32) -> IconResult<Option<Arc<ScaledFont>>> {
        let cache_key = (path.to_path_buf(), size);
        if let Some(font) = self.fonts.lock().get(&cache_key) {
            return Ok(Some(Arc::clone(font)));
        }

        let Some(font) = ScaledFont::load(path, size)? else {
            return Ok(None);
        };
        self.stats.lock().font_loads += 1;
        tracing::debug!(target: targets::RASTER, path = %path.display(), size, "loaded font");

        let mut fonts = self.fonts.lock();
        Ok(Some(Arc::clone(
            fonts.entry(cache_key).or_insert_with(|| Arc::new(font)),
        )))
    }

    /// Current statistics.
    pub fn stats(&self) -> RasterStats {
        *self.stats.lock()
    }

    /// Number of cached bitmaps.
    pub fn cached_bitmaps(&self) -> usize {
        self.bitmaps.lock().len()
    }

    /// Number of cached scaled fonts.
    pub fn cached_fonts(&self) -> usize {
        self.fonts.lock().len()
    }

    /// Drop every cached bitmap, font and placeholder.
    pub fn clear(&self) {
        self.bitmaps.lock().clear();
        self.fonts.lock().clear();
        self.placeholders.lock().clear();
    }
}
