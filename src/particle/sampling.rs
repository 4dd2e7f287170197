//! Turning a string into particles.
//!
//! The string is laid out on a padded, oversampled canvas, shrunk if it would
//! overflow, rasterized offscreen by the [`Surface`], and every opaque pixel
//! on a fixed stride becomes one [`Particle`].

use glam::Vec2;

use super::{Particle, ParticleField, TextBounds};
use crate::color::Rgb;
use crate::options::{FontOptions, TextAlignment};
use crate::surface::{FontSpec, PixelBuffer, RasterJob, Surface, Viewport};

/// Horizontal padding added on each side of the host element, CSS pixels.
pub const CANVAS_PADDING: f32 = 40.0;
/// Extra oversampling on top of the device pixel ratio.
pub const OVERSAMPLE: f32 = 1.5;

/// Canvas geometry for one sampling pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// Canvas CSS width (viewport width plus padding on both sides).
    pub css_width: f32,
    /// Canvas CSS height.
    pub css_height: f32,
    /// Backing store width in pixels.
    pub backing_width: u32,
    /// Backing store height in pixels.
    pub backing_height: u32,
    /// Backing pixels per CSS pixel requested (device ratio × oversample).
    pub scale: f32,
}

impl CanvasLayout {
    /// Layout for a viewport, or `None` if the viewport has no area.
    #[must_use]
    pub fn for_viewport(viewport: Viewport) -> Option<Self> {
        if !viewport.has_area() {
            return None;
        }
        let dpr = if viewport.device_pixel_ratio.is_finite()
            && viewport.device_pixel_ratio > 0.0
        {
            viewport.device_pixel_ratio
        } else {
            1.0
        };
        let scale = dpr * OVERSAMPLE;
        let css_width = viewport.width + CANVAS_PADDING * 2.0;
        let css_height = viewport.height;
        let backing_width = (css_width * scale).floor() as u32;
        let backing_height = (css_height * scale).floor() as u32;
        if backing_width == 0 || backing_height == 0 {
            return None;
        }
        Some(Self {
            css_width,
            css_height,
            backing_width,
            backing_height,
            scale,
        })
    }

    /// Backing pixels per CSS pixel actually realized after flooring.
    #[must_use]
    pub fn effective_ratio(&self) -> f32 {
        self.backing_width as f32 / self.css_width
    }

    /// Side of the square drawn per particle, in backing pixels. One CSS
    /// pixel, so the text keeps its weight on dense displays.
    #[must_use]
    pub fn dot_size(&self) -> f32 {
        self.scale
    }

    /// Sampling stride: coarser on denser displays.
    #[must_use]
    pub fn stride(&self) -> u32 {
        ((self.effective_ratio() / 3.0).round() as u32).max(1)
    }

    /// Text anchor for an alignment, vertically centered.
    #[must_use]
    pub fn anchor(&self, alignment: TextAlignment) -> Vec2 {
        let w = self.backing_width as f32;
        let x = match alignment {
            TextAlignment::Center => w / 2.0,
            TextAlignment::Left => CANVAS_PADDING * self.scale,
            TextAlignment::Right => w - CANVAS_PADDING * self.scale,
        };
        Vec2::new(x, self.backing_height as f32 / 2.0)
    }

    /// Widest text run that fits without shrinking.
    #[must_use]
    pub fn max_text_width(&self) -> f32 {
        self.backing_width as f32 - CANVAS_PADDING * 4.0 * self.scale
    }
}

/// What to sample.
#[derive(Debug, Clone)]
pub struct SampleRequest<'a> {
    /// String to render.
    pub text: &'a str,
    /// Its index in the text sequence.
    pub text_index: usize,
    /// Font descriptor (CSS pixel size).
    pub font: &'a FontOptions,
    /// Fill color.
    pub color: Rgb,
    /// Horizontal alignment.
    pub alignment: TextAlignment,
}

/// Sample `request` against `viewport`.
///
/// Returns `None` without side effects on the animator if the viewport has
/// no area or the surface cannot measure or rasterize yet.
pub fn sample_text<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: Viewport,
    request: &SampleRequest<'_>,
) -> Option<(ParticleField, CanvasLayout)> {
    let layout = CanvasLayout::for_viewport(viewport)?;
    let mut font = FontSpec {
        family: request.font.family.clone(),
        weight: request.font.weight,
        px: request.font.size * layout.scale,
    };

    let mut width = surface.measure_text(request.text, &font)?;
    let max_width = layout.max_text_width();
    if width > max_width && max_width > 0.0 {
        let shrink = max_width / width;
        font = font.scaled(shrink);
        width = surface
            .measure_text(request.text, &font)
            .unwrap_or(width * shrink);
        log::debug!(
            "text '{}' overflows by {:.1}%, font shrunk to {:.1}px",
            request.text,
            (1.0 / shrink - 1.0) * 100.0,
            font.px
        );
    }

    let anchor = layout.anchor(request.alignment);
    let buffer = surface.rasterize(&RasterJob {
        text: request.text,
        font: &font,
        color: request.color,
        alignment: request.alignment,
        anchor,
        layout,
    })?;

    let particles = sample_pixels(&buffer, layout.stride(), layout.effective_ratio());
    let bounds = TextBounds::from_anchor(anchor.x, width, request.alignment).covering(&particles);
    log::debug!(
        "sampled {} particles for text #{} ({}x{} backing, stride {})",
        particles.len(),
        request.text_index,
        layout.backing_width,
        layout.backing_height,
        layout.stride()
    );
    Some((ParticleField::new(particles, bounds, request.text_index), layout))
}

/// Collect one particle per non-transparent pixel on a `stride` grid.
///
/// Baseline opacity is `alpha / 255 × stride / ratio`, so coarser sampling
/// draws each particle proportionally stronger.
#[must_use]
pub fn sample_pixels(buffer: &PixelBuffer, stride: u32, ratio: f32) -> Vec<Particle> {
    let stride = stride.max(1);
    let density = stride as f32 / ratio;
    let mut particles = Vec::new();
    for y in (0..buffer.height()).step_by(stride as usize) {
        for x in (0..buffer.width()).step_by(stride as usize) {
            let Some([r, g, b, a]) = buffer.pixel(x, y) else {
                continue;
            };
            if a == 0 {
                continue;
            }
            let base = f32::from(a) / 255.0 * density;
            particles.push(Particle::new(
                Vec2::new(x as f32, y as f32),
                Rgb::new(r, g, b),
                base,
            ));
        }
    }
    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::BlockSurface;

    fn request<'a>(text: &'a str, font: &'a FontOptions) -> SampleRequest<'a> {
        SampleRequest {
            text,
            text_index: 0,
            font,
            color: Rgb::new(10, 20, 30),
            alignment: TextAlignment::Center,
        }
    }

    #[test]
    fn layout_pads_and_oversamples() {
        let layout = CanvasLayout::for_viewport(Viewport::new(200.0, 100.0)).unwrap();
        assert_eq!(layout.css_width, 280.0);
        assert_eq!(layout.backing_width, 420);
        assert_eq!(layout.backing_height, 150);
        assert_eq!(layout.scale, 1.5);
        assert_eq!(layout.stride(), 1);
    }

    #[test]
    fn dense_displays_sample_coarser() {
        let vp = Viewport::new(200.0, 100.0).with_device_pixel_ratio(4.0);
        let layout = CanvasLayout::for_viewport(vp).unwrap();
        // 4 × 1.5 = 6 backing px per CSS px -> stride 2
        assert_eq!(layout.stride(), 2);
    }

    #[test]
    fn dots_cover_one_css_pixel() {
        let layout = CanvasLayout::for_viewport(Viewport::new(200.0, 100.0)).unwrap();
        assert_eq!(layout.dot_size(), 1.5);
        let vp = Viewport::new(200.0, 100.0).with_device_pixel_ratio(2.0);
        let dense = CanvasLayout::for_viewport(vp).unwrap();
        assert_eq!(dense.dot_size(), 3.0);
        assert!(dense.dot_size() >= dense.stride() as f32);
    }

    #[test]
    fn zero_area_has_no_layout() {
        assert!(CanvasLayout::for_viewport(Viewport::new(0.0, 100.0)).is_none());
        assert!(CanvasLayout::for_viewport(Viewport::new(100.0, 0.0)).is_none());
    }

    #[test]
    fn anchors_follow_alignment() {
        let layout = CanvasLayout::for_viewport(Viewport::new(200.0, 100.0)).unwrap();
        assert_eq!(layout.anchor(TextAlignment::Center), Vec2::new(210.0, 75.0));
        assert_eq!(layout.anchor(TextAlignment::Left).x, 60.0);
        assert_eq!(layout.anchor(TextAlignment::Right).x, 360.0);
    }

    #[test]
    fn samples_only_opaque_pixels() {
        let mut buf = PixelBuffer::transparent(4, 4);
        buf.set_pixel(1, 1, [255, 0, 0, 255]);
        buf.set_pixel(2, 3, [0, 255, 0, 51]);
        let particles = sample_pixels(&buf, 1, 1.5);
        assert_eq!(particles.len(), 2);
        assert_eq!(particles[0].origin(), Vec2::new(1.0, 1.0));
        assert_eq!(particles[0].color, Rgb::new(255, 0, 0));
        assert!((particles[0].base_opacity() - 1.0 / 1.5).abs() < 1e-6);
        assert!((particles[1].base_opacity() - 0.2 / 1.5).abs() < 1e-6);
    }

    #[test]
    fn stride_skips_pixels() {
        let mut buf = PixelBuffer::transparent(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                buf.set_pixel(x, y, [0, 0, 0, 255]);
            }
        }
        let particles = sample_pixels(&buf, 2, 6.0);
        assert_eq!(particles.len(), 4);
        assert!((particles[0].base_opacity() - 2.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn sample_text_builds_field_within_bounds() {
        let mut surface = BlockSurface::new(Viewport::new(400.0, 100.0));
        let font = FontOptions::default();
        let (field, layout) =
            sample_text(&mut surface, Viewport::new(400.0, 100.0), &request("Hi", &font))
                .unwrap();
        assert!(!field.is_empty());
        let bounds = field.bounds();
        assert!((bounds.left + bounds.width / 2.0 - layout.backing_width as f32 / 2.0).abs() < 1e-3);
        for p in field.particles() {
            assert!(p.origin().x >= bounds.left - 1.0 && p.origin().x <= bounds.right + 1.0);
            assert_eq!(p.color, Rgb::new(10, 20, 30));
        }
    }

    #[test]
    fn overflowing_text_is_shrunk_to_fit() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut surface = BlockSurface::new(viewport);
        let font = FontOptions::default();
        let long = "a very long headline that cannot fit";
        let (field, layout) = sample_text(&mut surface, viewport, &request(long, &font)).unwrap();
        assert!(field.bounds().width <= layout.max_text_width() + 1e-3);
        let rastered = surface.last_font_px().unwrap();
        assert!(rastered < font.size * layout.scale);
    }

    #[test]
    fn unavailable_surface_defers() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut surface = BlockSurface::new(viewport);
        surface.fail_rasterize = true;
        let font = FontOptions::default();
        assert!(sample_text(&mut surface, viewport, &request("x", &font)).is_none());
        assert!(sample_text(&mut surface, Viewport::new(0.0, 0.0), &request("x", &font)).is_none());
    }
}
