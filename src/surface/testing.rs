//! In-memory surface for tests: every visible glyph rasterizes as a solid
//! block, so particle counts and positions are predictable.

use super::{Frame, FontSpec, PixelBuffer, RasterJob, Surface, Viewport};
use crate::particle::TextBounds;

/// Glyph advance as a fraction of the font size.
const ADVANCE: f32 = 0.6;

#[derive(Debug)]
pub(crate) struct BlockSurface {
    pub(crate) viewport: Option<Viewport>,
    pub(crate) fail_rasterize: bool,
    /// Ink one faint pixel this far past the measured right edge, the way
    /// real glyphs overhang their advance width.
    pub(crate) overhang: Option<u32>,
    pub(crate) presented: usize,
    pub(crate) last_presented_len: usize,
    last_font: Option<FontSpec>,
}

impl BlockSurface {
    pub(crate) fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Some(viewport),
            fail_rasterize: false,
            overhang: None,
            presented: 0,
            last_presented_len: 0,
            last_font: None,
        }
    }

    pub(crate) fn unmounted() -> Self {
        Self {
            viewport: None,
            ..Self::new(Viewport::new(0.0, 0.0))
        }
    }

    pub(crate) fn last_font_px(&self) -> Option<f32> {
        self.last_font.as_ref().map(|f| f.px)
    }
}

impl Surface for BlockSurface {
    fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> Option<f32> {
        if self.viewport.is_none() {
            return None;
        }
        Some(text.chars().count() as f32 * font.px * ADVANCE)
    }

    fn rasterize(&mut self, job: &RasterJob<'_>) -> Option<PixelBuffer> {
        if self.fail_rasterize {
            return None;
        }
        self.last_font = Some(job.font.clone());

        let layout = job.layout;
        let mut buf = PixelBuffer::transparent(layout.backing_width, layout.backing_height);
        let advance = job.font.px * ADVANCE;
        let width = job.text.chars().count() as f32 * advance;
        let run = TextBounds::from_anchor(job.anchor.x, width, job.alignment);
        let half_height = job.font.px * 0.35;
        let (y0, y1) = (job.anchor.y - half_height, job.anchor.y + half_height);

        for (i, ch) in job.text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let cell = run.left + i as f32 * advance;
            let (x0, x1) = (cell + advance * 0.1, cell + advance * 0.9);
            for y in y0.ceil().max(0.0) as u32..y1.ceil().max(0.0) as u32 {
                for x in x0.ceil().max(0.0) as u32..x1.ceil().max(0.0) as u32 {
                    buf.set_pixel(x, y, [job.color.r, job.color.g, job.color.b, 255]);
                }
            }
        }
        if let Some(px) = self.overhang {
            let x = run.right.ceil().max(0.0) as u32 + px;
            buf.set_pixel(x, job.anchor.y as u32, [job.color.r, job.color.g, job.color.b, 40]);
        }
        Some(buf)
    }

    fn present(&mut self, frame: &Frame<'_>) {
        self.presented += 1;
        self.last_presented_len = frame.particles.len();
    }
}
