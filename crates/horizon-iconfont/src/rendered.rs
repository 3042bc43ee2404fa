//! Rendered icon bitmaps.

use std::path::{Path, PathBuf};

use image::RgbaImage;

/// The parameters that produced a bitmap; also the bitmap cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderKey {
    pub name: String,
    pub size: u32,
    pub color: String,
    pub font_path: PathBuf,
}

impl RenderKey {
    pub fn new(
        name: impl Into<String>,
        size: u32,
        color: impl Into<String>,
        font_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            color: color.into(),
            font_path: font_path.into(),
        }
    }
}

/// An immutable square RGBA bitmap, shared by reference between callers.
///
/// Pixels are straight (non-premultiplied) RGBA8, ready for upload into a
/// toolkit image.
#[derive(Debug, Clone)]
pub struct RenderedIcon {
    image: RgbaImage,
    params: Option<RenderKey>,
}

impl RenderedIcon {
    pub(crate) fn new(image: RgbaImage, params: RenderKey) -> Self {
        Self {
            image,
            params: Some(params),
        }
    }

    /// A fully transparent bitmap with no producing parameters.
    pub(crate) fn placeholder(size: u32) -> Self {
        Self {
            image: RgbaImage::new(size, size),
            params: None,
        }
    }

    /// The bitmap.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Edge length in pixels.
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_rgba(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Parameters that produced this bitmap, `None` for placeholders.
    pub fn params(&self) -> Option<&RenderKey> {
        self.params.as_ref()
    }

    /// Font file this bitmap was rendered from.
    pub fn font_path(&self) -> Option<&Path> {
        self.params.as_ref().map(|params| params.font_path.as_path())
    }

    /// Whether this is a shared placeholder rather than a rendered glyph.
    pub fn is_placeholder(&self) -> bool {
        self.params.is_none()
    }

    /// Whether every pixel has zero alpha.
    pub fn is_transparent(&self) -> bool {
        self.image.pixels().all(|pixel| pixel.0[3] == 0)
    }

    /// Number of pixels with non-zero alpha.
    pub fn coverage(&self) -> usize {
        self.image.pixels().filter(|pixel| pixel.0[3] != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_transparent() {
        let icon = RenderedIcon::placeholder(16);
        assert_eq!(icon.size(), 16);
        assert_eq!(icon.as_rgba().len(), 16 * 16 * 4);
        assert!(icon.is_placeholder());
        assert!(icon.is_transparent());
        assert_eq!(icon.coverage(), 0);
        assert!(icon.font_path().is_none());
    }
}
