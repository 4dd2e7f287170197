//! Rendering surface capability.
//!
//! The animator never touches a concrete canvas. A host hands it something
//! implementing [`Surface`] each frame: a viewport query, text measurement,
//! offscreen rasterization into a [`PixelBuffer`], and presentation of the
//! current particles. Any of these may report "not ready" by returning
//! `None`, in which case the animator defers and asks again next frame.

#[cfg(test)]
pub(crate) mod testing;
#[cfg(feature = "web")]
pub mod web;

use glam::Vec2;

use crate::color::Rgb;
use crate::options::TextAlignment;
use crate::particle::sampling::CanvasLayout;
use crate::particle::Particle;

/// Measured size of the element hosting the effect, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f32,
    /// Height in CSS pixels.
    pub height: f32,
    /// Device pixels per CSS pixel.
    pub device_pixel_ratio: f32,
}

impl Viewport {
    /// Viewport of the given CSS size at a device pixel ratio of 1.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    /// Same viewport at another device pixel ratio.
    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Whether both dimensions are positive and finite.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Concrete font at a concrete backing-pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// CSS font family list.
    pub family: String,
    /// Numeric weight.
    pub weight: u16,
    /// Size in backing pixels.
    pub px: f32,
}

impl FontSpec {
    /// CSS `font` shorthand, e.g. `"400 75px sans-serif"`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("{} {}px {}", self.weight, self.px, self.family)
    }

    /// Same font scaled by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            px: self.px * factor,
            ..self.clone()
        }
    }
}

/// One offscreen text render: draw `text` at `anchor` (middle baseline,
/// `alignment` relative to the anchor) into a buffer sized by `layout`.
#[derive(Debug, Clone)]
pub struct RasterJob<'a> {
    /// String to draw.
    pub text: &'a str,
    /// Font to draw it in.
    pub font: &'a FontSpec,
    /// Fill color.
    pub color: Rgb,
    /// Horizontal alignment relative to `anchor.x`.
    pub alignment: TextAlignment,
    /// Anchor point in backing pixels.
    pub anchor: Vec2,
    /// Canvas geometry for this pass.
    pub layout: CanvasLayout,
}

/// Particles to draw this frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Particles in backing-pixel coordinates.
    pub particles: &'a [Particle],
    /// Canvas geometry the particles were sampled against.
    pub layout: CanvasLayout,
}

/// Tightly packed RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes. Returns `None` if the length does not match
    /// `width × height × 4`.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * 4;
        (data.len() == expected).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Fully transparent buffer.
    #[must_use]
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrite the pixel at `(x, y)`; ignored outside the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }
}

/// What the animator needs from a drawing target.
pub trait Surface {
    /// Current host element size, or `None` if not mounted yet.
    fn viewport(&self) -> Option<Viewport>;

    /// Width of `text` in `font`, in backing pixels.
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> Option<f32>;

    /// Render the job offscreen and read the pixels back.
    fn rasterize(&mut self, job: &RasterJob<'_>) -> Option<PixelBuffer>;

    /// Clear and draw the given particles.
    fn present(&mut self, frame: &Frame<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_area() {
        assert!(Viewport::new(10.0, 5.0).has_area());
        assert!(!Viewport::new(0.0, 5.0).has_area());
        assert!(!Viewport::new(10.0, f32::NAN).has_area());
    }

    #[test]
    fn font_css_and_scale() {
        let font = FontSpec {
            family: "Inter".to_owned(),
            weight: 700,
            px: 60.0,
        };
        assert_eq!(font.css(), "700 60px Inter");
        assert_eq!(font.scaled(0.5).px, 30.0);
    }

    #[test]
    fn pixel_buffer_bounds() {
        assert!(PixelBuffer::from_rgba(2, 2, vec![0; 15]).is_none());
        let mut buf = PixelBuffer::transparent(2, 2);
        buf.set_pixel(1, 1, [1, 2, 3, 4]);
        buf.set_pixel(5, 5, [9, 9, 9, 9]);
        assert_eq!(buf.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(buf.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(buf.pixel(2, 0), None);
    }
}
