//! The particle text animator.
//!
//! [`VaporTextAnimator`] owns the configuration, the phase machine, the
//! particle field and the timers. A host calls [`frame`] once per display
//! refresh while [`is_visible`] is true, handing over a [`Surface`] each
//! time; everything else (visibility, option changes, resize notifications)
//! only flips state that the next frame acts on.
//!
//! [`frame`]: VaporTextAnimator::frame
//! [`is_visible`]: VaporTextAnimator::is_visible
//! [`Surface`]: crate::surface::Surface

mod frame;
mod options;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{transition, CycleState, Effect, Phase, PhaseEvent, PhaseTimings, SettleTimer};
use crate::appearance::{AppearanceSignal, AppearanceWatcher};
use crate::options::{Options, DEFAULT_TEXTS};
use crate::particle::physics::{self, VaporParams};
use crate::particle::sampling::CanvasLayout;
use crate::particle::{Particle, ParticleField};
use crate::surface::Viewport;
use crate::util::frame_timing::FrameClock;

/// Outcome of one [`VaporTextAnimator::frame`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Not visible: nothing was done and no further frames are wanted.
    Idle,
    /// The surface is not ready (unmounted, zero area, or rasterization
    /// failed); try again next frame.
    Deferred,
    /// Particles were advanced and presented.
    Rendered,
}

/// Cycles a sequence of strings through vaporize, fade-in and wait.
pub struct VaporTextAnimator<R = StdRng> {
    /// Sanitized configuration.
    options: Options,
    params: VaporParams,
    timings: PhaseTimings,
    state: CycleState,
    /// Particles for the active string; `None` until first sampled.
    field: Option<ParticleField>,
    layout: Option<CanvasLayout>,
    /// Viewport the current field was sampled against.
    sampled_viewport: Option<Viewport>,
    appearance: AppearanceWatcher,
    font_settle: SettleTimer,
    /// Resample before the next render.
    resample_pending: bool,
    clock: FrameClock,
    visible: bool,
    rng: R,
    /// Completed sampling passes.
    regenerations: u64,
}

impl VaporTextAnimator<StdRng> {
    /// Animator seeded from the OS random source.
    #[must_use]
    pub fn new(options: &Options, appearance: &AppearanceSignal) -> Self {
        Self::with_rng(options, appearance, StdRng::from_os_rng())
    }
}

impl<R: Rng> VaporTextAnimator<R> {
    /// Animator with an explicit random source (seeded in tests).
    pub fn with_rng(options: &Options, appearance: &AppearanceSignal, rng: R) -> Self {
        let options = options.sanitized();
        Self {
            params: VaporParams::from_options(&options),
            timings: PhaseTimings::from_options(&options.animation),
            options,
            state: CycleState::new(),
            field: None,
            layout: None,
            sampled_viewport: None,
            appearance: appearance.watch(),
            font_settle: SettleTimer::default(),
            resample_pending: true,
            clock: FrameClock::new(),
            visible: false,
            rng,
            regenerations: 0,
        }
    }

    /// Report whether the surface is inside the viewport.
    ///
    /// Hiding returns the machine to [`Phase::Static`] and cancels pending
    /// timers at once; showing again starts a fresh sweep from zero rather
    /// than resuming.
    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        let event = if visible {
            PhaseEvent::Shown
        } else {
            PhaseEvent::Hidden
        };
        self.apply(event);
    }

    /// Whether the host should keep scheduling frames.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current configuration (sanitized).
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Phase and active index.
    #[must_use]
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Index of the active string.
    #[must_use]
    pub fn text_index(&self) -> usize {
        self.state.text_index
    }

    /// The active string. An empty entry shows the first default text so
    /// the effect never renders blank.
    #[must_use]
    pub fn current_text(&self) -> &str {
        match self.options.texts.get(self.state.text_index) {
            Some(text) if !text.is_empty() => text,
            _ => DEFAULT_TEXTS[0],
        }
    }

    /// Current particles (empty before the first successful sample).
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        self.field.as_ref().map_or(&[], ParticleField::particles)
    }

    /// Current particle field, if sampled.
    #[must_use]
    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    /// Canvas geometry of the current field, if sampled.
    #[must_use]
    pub fn layout(&self) -> Option<CanvasLayout> {
        self.layout
    }

    /// Number of completed sampling passes.
    #[must_use]
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    /// Feed one event through the phase machine and carry out its effect.
    fn apply(&mut self, event: PhaseEvent) {
        let (next, effect) = transition(self.state, event, &self.timings, self.options.texts.len());
        if next.phase.name() != self.state.phase.name() {
            log::debug!(
                "phase {} -> {} (text #{})",
                self.state.phase.name(),
                next.phase.name(),
                next.text_index
            );
        }
        self.state = next;

        match effect {
            Some(Effect::Rewind) => {
                self.field = self.field.take().map(physics::rewind);
            }
            Some(Effect::Advance) => {
                self.resample_pending = true;
            }
            Some(Effect::Suspend) => {
                self.clock.reset();
                if self.font_settle.is_pending() {
                    self.font_settle.cancel();
                    self.resample_pending = true;
                }
            }
            None => {}
        }
    }
}

impl<R> std::fmt::Debug for VaporTextAnimator<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaporTextAnimator")
            .field("state", &self.state)
            .field("visible", &self.visible)
            .field("particles", &self.field.as_ref().map_or(0, ParticleField::len))
            .field("resample_pending", &self.resample_pending)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::animator;
    use super::*;

    #[test]
    fn starts_static_and_hidden() {
        let (anim, _) = animator(&Options::default());
        assert_eq!(anim.phase(), Phase::Static);
        assert!(!anim.is_visible());
        assert_eq!(anim.text_index(), 0);
        assert_eq!(anim.current_text(), "Next.js");
        assert!(anim.particles().is_empty());
    }

    #[test]
    fn visibility_drives_phase() {
        let (mut anim, _) = animator(&Options::default());
        anim.set_visible(true);
        assert_eq!(anim.phase(), Phase::Vaporizing { progress: 0.0 });
        anim.set_visible(true);
        assert_eq!(anim.phase(), Phase::Vaporizing { progress: 0.0 });
        anim.set_visible(false);
        assert_eq!(anim.phase(), Phase::Static);
    }

    #[test]
    fn empty_texts_use_defaults() {
        let opts = Options {
            texts: Vec::new(),
            ..Options::default()
        };
        let (anim, _) = animator(&opts);
        assert_eq!(anim.options().texts.len(), 2);
        assert_eq!(anim.current_text(), "Next.js");
    }

    #[test]
    fn huge_wait_is_capped() {
        use crate::options::MAX_PHASE_SECS;

        let mut opts = Options::default();
        opts.animation.wait_duration = 1e20;
        opts.animation.vaporize_duration = f32::MAX;
        let (anim, _) = animator(&opts);
        assert_eq!(anim.options().animation.wait_duration, MAX_PHASE_SECS);
        assert_eq!(anim.options().animation.vaporize_duration, MAX_PHASE_SECS);
    }

    #[test]
    fn debug_is_compact() {
        let (anim, _) = animator(&Options::default());
        let s = format!("{anim:?}");
        assert!(s.starts_with("VaporTextAnimator"));
        assert!(s.contains("particles: 0"));
    }
}
