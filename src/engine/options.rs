//! Option and geometry changes for VaporTextAnimator

use rand::Rng;
use web_time::Instant;

use super::VaporTextAnimator;
use crate::animation::PhaseTimings;
use crate::options::Options;
use crate::particle::physics::VaporParams;

impl<R: Rng> VaporTextAnimator<R> {
    /// Replace options and schedule whatever the change requires.
    ///
    /// Anything that alters the rendered glyphs (texts, color, font,
    /// alignment) resamples on the next frame. A font family change also
    /// resamples once more after the settle delay, because a web font may
    /// still be loading. Sweep direction, spread, density and durations
    /// take effect from the next frame without resampling.
    pub fn set_options(&mut self, new: &Options, now: Instant) {
        let new = new.sanitized();
        let old = std::mem::replace(&mut self.options, new);

        if old.font.family != self.options.font.family {
            log::debug!(
                "font family '{}' -> '{}', settling",
                old.font.family,
                self.options.font.family
            );
            self.font_settle.arm(now);
        }
        if old.texts != self.options.texts
            || old.font != self.options.font
            || old.color != self.options.color
            || old.alignment != self.options.alignment
        {
            self.resample_pending = true;
        }
        if self.state.text_index >= self.options.texts.len() {
            self.state.text_index = 0;
            self.resample_pending = true;
        }
        self.apply_options();
    }

    /// Rebuild the derived physics and timing parameters.
    fn apply_options(&mut self) {
        self.params = VaporParams::from_options(&self.options);
        self.timings = PhaseTimings::from_options(&self.options.animation);
    }

    /// The host element changed size; resample against the new geometry on
    /// the next frame.
    pub fn notify_resize(&mut self) {
        self.resample_pending = true;
    }
}
