//! Per-frame update for VaporTextAnimator

use rand::Rng;
use web_time::Instant;

use super::{FrameStatus, VaporTextAnimator};
use crate::animation::{Phase, PhaseEvent};
use crate::particle::physics;
use crate::particle::sampling::{sample_text, SampleRequest};
use crate::surface::{Frame, Surface, Viewport};

impl<R: Rng> VaporTextAnimator<R> {
    /// Advance one display refresh and present the result on `surface`.
    ///
    /// Returns [`FrameStatus::Idle`] while hidden, and
    /// [`FrameStatus::Deferred`] when the surface is not ready yet; neither
    /// moves the phase machine forward.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, now: Instant) -> FrameStatus {
        if !self.visible {
            return FrameStatus::Idle;
        }
        let dt = self.clock.tick(now);

        if let Some(appearance) = self.appearance.poll_changed() {
            log::debug!("appearance changed to {appearance:?}");
            self.resample_pending = true;
        }

        let Some(viewport) = surface.viewport().filter(Viewport::has_area) else {
            return FrameStatus::Deferred;
        };
        if self.sampled_viewport != Some(viewport) {
            self.resample_pending = true;
        }
        if self.font_settle.fire(now) {
            log::debug!("font settled, resampling");
            self.resample_pending = true;
        }

        if (self.resample_pending || self.field.is_none()) && !self.resample(surface, viewport) {
            return FrameStatus::Deferred;
        }

        self.step(now, dt);

        // Advancing to the next string samples it straight away so the
        // fade-in starts from its own glyph positions.
        if self.resample_pending && !self.resample(surface, viewport) {
            return FrameStatus::Deferred;
        }
        self.pose();

        if let (Some(field), Some(layout)) = (&self.field, self.layout) {
            surface.present(&Frame {
                particles: field.particles(),
                layout,
            });
        }
        FrameStatus::Rendered
    }

    /// Run physics for the current phase and feed the frame to the machine.
    fn step(&mut self, now: Instant, dt: f32) {
        let mut swept_clear = false;
        if let Phase::Vaporizing { progress } = self.state.phase {
            if let Some(field) = self.field.take() {
                let progress = self.timings.advance_progress(progress, dt);
                let front = physics::sweep_front(field.bounds(), progress, self.params.direction);
                let (field, clear) =
                    physics::vaporize(field, front, dt, &self.params, &mut self.rng);
                self.field = Some(field);
                swept_clear = clear;
            }
        }
        self.apply(PhaseEvent::Frame {
            now,
            dt,
            swept_clear,
        });
    }

    /// Hold particles on their glyphs outside the sweep.
    fn pose(&mut self) {
        let fade = match self.state.phase {
            Phase::FadingIn { opacity } => opacity,
            Phase::Waiting { .. } => 1.0,
            Phase::Static | Phase::Vaporizing { .. } => return,
        };
        self.field = self.field.take().map(|f| physics::materialize(f, fade));
    }

    /// Sample the active string. On failure the previous field is kept and
    /// the resample stays pending.
    fn resample<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: Viewport) -> bool {
        let text_index = self.state.text_index;
        let request = SampleRequest {
            text: self.current_text(),
            text_index,
            font: &self.options.font,
            color: self.appearance.current().text_color(self.options.color),
            alignment: self.options.alignment,
        };
        let Some((field, layout)) = sample_text(surface, viewport, &request) else {
            log::debug!("surface not ready, deferring sample of text #{text_index}");
            return false;
        };

        self.field = Some(field);
        self.layout = Some(layout);
        self.sampled_viewport = Some(viewport);
        self.resample_pending = false;
        self.regenerations += 1;
        true
    }
}
