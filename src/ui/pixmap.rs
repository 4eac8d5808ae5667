// SPDX-License-Identifier: MPL-2.0
//! Owned RGBA pixmaps for button rendering.
//!
//! A [`Pixmap`] is a `tiny_skia` raster tagged with the device-independent
//! scale it was rendered at. Buttons composite state/background/hover layers
//! into one pixmap, rescale it to the display's device-pixel ratio on
//! demand, and convert it to an Iced image handle for the canvas.

use iced::widget::image::Handle;
use iced::{Color, Size};

/// An RGBA raster with a device-independent scale factor.
///
/// `width()`/`height()` are physical pixels; `logical_size()` divides by the
/// scale, which is what layout works in.
#[derive(Debug, Clone)]
pub struct Pixmap {
    inner: tiny_skia::Pixmap,
    scale: f32,
}

impl Pixmap {
    /// Creates a transparent pixmap. `None` when either dimension is zero.
    pub fn new(width: u32, height: u32, scale: f32) -> Option<Self> {
        let inner = tiny_skia::Pixmap::new(width, height)?;
        Some(Self { inner, scale })
    }

    /// Wraps an already-rendered `tiny_skia` raster.
    pub fn from_raster(inner: tiny_skia::Pixmap, scale: f32) -> Self {
        Self { inner, scale }
    }

    /// A uniformly-filled pixmap, mostly useful in tests.
    pub fn solid(width: u32, height: u32, color: Color, scale: f32) -> Option<Self> {
        let mut pixmap = Self::new(width, height, scale)?;
        pixmap.inner.fill(to_skia_color(color));
        Some(pixmap)
    }

    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Size in device-independent (layout) units.
    pub fn logical_size(&self) -> Size {
        Size::new(
            self.inner.width() as f32 / self.scale,
            self.inner.height() as f32 / self.scale,
        )
    }

    /// Clears to fully transparent.
    pub fn clear(&mut self) {
        self.inner.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Alpha-composites `src` over this pixmap at the origin with the given
    /// extra opacity, matching source and destination pixel grids.
    pub fn draw_layer(&mut self, src: &Pixmap, opacity: f32) {
        let paint = tiny_skia::PixmapPaint {
            opacity: opacity.clamp(0.0, 1.0),
            ..tiny_skia::PixmapPaint::default()
        };
        self.inner.draw_pixmap(
            0,
            0,
            src.inner.as_ref(),
            &paint,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    /// Fills a path in device pixels. Used for the generated background
    /// pixmaps.
    pub fn fill_path(&mut self, path: &tiny_skia::Path, color: Color) {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(to_skia_color(color));
        paint.anti_alias = true;
        self.inner.fill_path(
            path,
            &paint,
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    /// Returns a smoothly-rescaled copy at a new device-independent scale.
    ///
    /// Rescaling through a full bilinear resample (rather than letting the
    /// renderer stretch at draw time) is what keeps the buttons crisp at
    /// fractional ratios.
    pub fn rescaled(&self, new_scale: f32) -> Pixmap {
        let factor = new_scale / self.scale;
        let width = ((self.inner.width() as f32 * factor).round() as u32).max(1);
        let height = ((self.inner.height() as f32 * factor).round() as u32).max(1);

        let mut target = tiny_skia::Pixmap::new(width, height)
            .unwrap_or_else(|| self.inner.clone());
        let paint = tiny_skia::PixmapPaint {
            quality: tiny_skia::FilterQuality::Bilinear,
            ..tiny_skia::PixmapPaint::default()
        };
        target.draw_pixmap(
            0,
            0,
            self.inner.as_ref(),
            &paint,
            tiny_skia::Transform::from_scale(factor, factor),
            None,
        );
        Pixmap {
            inner: target,
            scale: new_scale,
        }
    }

    /// Straight-alpha RGBA bytes (the raster is stored premultiplied).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.inner.pixels().len() * 4);
        for pixel in self.inner.pixels() {
            let c = pixel.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    /// Builds an Iced image handle from the current contents.
    pub fn to_handle(&self) -> Handle {
        Handle::from_rgba(self.inner.width(), self.inner.height(), self.to_rgba())
    }

    /// Straight-alpha pixel lookup for tests.
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        let idx = (y * self.inner.width() + x) as usize;
        self.inner.pixels().get(idx).map(|p| {
            let c = p.demultiply();
            (c.red(), c.green(), c.blue(), c.alpha())
        })
    }
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(color.r, color.g, color.b, color.a)
        .unwrap_or(tiny_skia::Color::TRANSPARENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_size_divides_by_scale() {
        let pixmap = Pixmap::new(64, 32, 2.0).unwrap();
        let size = pixmap.logical_size();
        assert_eq!(size.width, 32.0);
        assert_eq!(size.height, 16.0);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(Pixmap::new(0, 16, 1.0).is_none());
    }

    #[test]
    fn draw_layer_at_half_opacity_halves_alpha() {
        let mut base = Pixmap::new(4, 4, 1.0).unwrap();
        let red = Pixmap::solid(4, 4, Color::from_rgb(1.0, 0.0, 0.0), 1.0).unwrap();
        base.draw_layer(&red, 0.5);

        let (r, _, _, a) = base.pixel(1, 1).unwrap();
        assert_eq!(r, 255);
        assert!((a as i32 - 128).abs() <= 1, "alpha was {a}");
    }

    #[test]
    fn rescale_doubles_dimensions() {
        let pixmap = Pixmap::solid(8, 8, Color::WHITE, 1.0).unwrap();
        let scaled = pixmap.rescaled(2.0);
        assert_eq!(scaled.width(), 16);
        assert_eq!(scaled.height(), 16);
        assert_eq!(scaled.scale(), 2.0);
        // Logical size is unchanged by rescaling.
        assert_eq!(scaled.logical_size(), pixmap.logical_size());
    }

    #[test]
    fn to_rgba_round_trips_solid_color() {
        let pixmap = Pixmap::solid(2, 2, Color::from_rgb(0.0, 1.0, 0.0), 1.0).unwrap();
        let rgba = pixmap.to_rgba();
        assert_eq!(rgba.len(), 16);
        assert_eq!(&rgba[0..4], &[0, 255, 0, 255]);
    }
}
