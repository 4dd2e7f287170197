//! Canvas 2D implementation of [`Surface`].

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use super::host_error;
use crate::error::VaporError;
use crate::options::TextAlignment;
use crate::particle::sampling::CANVAS_PADDING;
use crate::surface::{FontSpec, Frame, PixelBuffer, RasterJob, Surface, Viewport};

/// A visible canvas inside the host element plus an offscreen canvas used
/// for rasterizing glyphs before sampling.
pub struct CanvasSurface {
    host: HtmlElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    scratch: HtmlCanvasElement,
    scratch_ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Append a canvas to `host`. The canvas overhangs the host by the
    /// sampling padding on both sides so wide glyphs are not clipped.
    pub fn attach(host: &HtmlElement) -> Result<Self, VaporError> {
        let document = host
            .owner_document()
            .ok_or_else(|| host_error("host element has no document"))?;
        let canvas = create_canvas(&document)?;
        let ctx = context_2d(&canvas)?;
        let scratch = create_canvas(&document)?;
        let scratch_ctx = context_2d(&scratch)?;

        let style = canvas.style();
        let left = format!("-{CANVAS_PADDING}px");
        for (name, value) in [
            ("position", "absolute"),
            ("top", "0"),
            ("left", left.as_str()),
            ("pointer-events", "none"),
        ] {
            style.set_property(name, value).map_err(js_error)?;
        }
        if host.style().get_property_value("position").unwrap_or_default().is_empty() {
            host.style()
                .set_property("position", "relative")
                .map_err(js_error)?;
        }
        let _ = host.append_child(&canvas).map_err(js_error)?;

        Ok(Self {
            host: host.clone(),
            canvas,
            ctx,
            scratch,
            scratch_ctx,
        })
    }

    /// Remove the visible canvas from the document.
    pub fn detach(&self) {
        self.canvas.remove();
    }

    fn fit_canvas(&self, frame: &Frame<'_>) {
        let layout = frame.layout;
        if self.canvas.width() == layout.backing_width && self.canvas.height() == layout.backing_height
        {
            return;
        }
        self.canvas.set_width(layout.backing_width);
        self.canvas.set_height(layout.backing_height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", layout.css_width));
        let _ = style.set_property("height", &format!("{}px", layout.css_height));
    }
}

impl Surface for CanvasSurface {
    fn viewport(&self) -> Option<Viewport> {
        if !self.host.is_connected() {
            return None;
        }
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        Some(
            Viewport::new(self.host.client_width() as f32, self.host.client_height() as f32)
                .with_device_pixel_ratio(dpr as f32),
        )
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> Option<f32> {
        self.scratch_ctx.set_font(&font.css());
        let metrics = self.scratch_ctx.measure_text(text).ok()?;
        Some(metrics.width() as f32)
    }

    fn rasterize(&mut self, job: &RasterJob<'_>) -> Option<PixelBuffer> {
        let layout = job.layout;
        // Resizing resets the context state, so style after it.
        self.scratch.set_width(layout.backing_width);
        self.scratch.set_height(layout.backing_height);
        let (w, h) = (f64::from(layout.backing_width), f64::from(layout.backing_height));

        let ctx = &self.scratch_ctx;
        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_font(&job.font.css());
        ctx.set_fill_style_str(&job.color.to_css_rgba(1.0));
        ctx.set_text_align(match job.alignment {
            TextAlignment::Left => "left",
            TextAlignment::Center => "center",
            TextAlignment::Right => "right",
        });
        ctx.set_text_baseline("middle");
        ctx.fill_text(job.text, f64::from(job.anchor.x), f64::from(job.anchor.y))
            .ok()?;

        let image = ctx.get_image_data(0.0, 0.0, w, h).ok()?;
        PixelBuffer::from_rgba(image.width(), image.height(), image.data().0)
    }

    fn present(&mut self, frame: &Frame<'_>) {
        self.fit_canvas(frame);
        let ctx = &self.ctx;
        ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        let size = f64::from(frame.layout.dot_size());
        for p in frame.particles {
            if p.opacity <= 0.0 {
                continue;
            }
            ctx.set_fill_style_str(&p.color.to_css_rgba(p.opacity));
            ctx.fill_rect(f64::from(p.position.x), f64::from(p.position.y), size, size);
        }
        log::trace!("presented {} particles", frame.particles.len());
    }
}

impl std::fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("width", &self.canvas.width())
            .field("height", &self.canvas.height())
            .finish_non_exhaustive()
    }
}

fn create_canvas(document: &Document) -> Result<HtmlCanvasElement, VaporError> {
    document
        .create_element("canvas")
        .map_err(js_error)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| host_error("created element is not a canvas"))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, VaporError> {
    canvas
        .get_context("2d")
        .map_err(js_error)?
        .ok_or_else(|| host_error("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| host_error("context is not a CanvasRenderingContext2d"))
}

pub(super) fn js_error(err: JsValue) -> VaporError {
    host_error(&err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
