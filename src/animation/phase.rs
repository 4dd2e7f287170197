//! Phase machine: `Static → Vaporizing → FadingIn → Waiting → Vaporizing …`.
//!
//! The whole cycle is one [`CycleState`] value. [`transition`] is the only
//! way it changes; it is pure, so the machine can be driven in tests
//! without any surface or particles. Side effects the caller must carry out
//! are returned as an [`Effect`].

use web_time::{Duration, Instant};

use crate::options::AnimationOptions;

/// Sweep progress is a percentage; the phase can end once it reaches this.
pub const FULL_SWEEP: f32 = 100.0;

/// Where in the cycle the animator is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Not animating: off-screen, or not yet started.
    Static,
    /// Sweep front crossing the text; `progress` is a percentage and may
    /// exceed 100 while the last particles finish fading.
    Vaporizing {
        /// Accumulated sweep progress, percent.
        progress: f32,
    },
    /// Next string materializing at its glyph positions.
    FadingIn {
        /// Accumulated fade, 0..=1 (may overshoot on the last frame).
        opacity: f32,
    },
    /// Holding the fully materialized string.
    Waiting {
        /// When the next sweep starts.
        until: Instant,
    },
}

impl Phase {
    /// Short lowercase name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Vaporizing { .. } => "vaporizing",
            Self::FadingIn { .. } => "fading_in",
            Self::Waiting { .. } => "waiting",
        }
    }

    /// Sweep progress clamped to 0..=100, if vaporizing.
    #[must_use]
    pub fn sweep_progress(&self) -> Option<f32> {
        match self {
            Self::Vaporizing { progress } => Some(progress.clamp(0.0, FULL_SWEEP)),
            _ => None,
        }
    }
}

/// Phase plus the index of the active string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleState {
    /// Current phase.
    pub phase: Phase,
    /// Index of the active string in the text sequence.
    pub text_index: usize,
}

impl CycleState {
    /// `Static` on the first string.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Static,
            text_index: 0,
        }
    }
}

impl Default for CycleState {
    fn default() -> Self {
        Self::new()
    }
}

/// Phase durations in the units the machine works in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTimings {
    /// Sweep duration, seconds.
    pub vaporize_secs: f32,
    /// Fade-in duration, seconds.
    pub fade_in_secs: f32,
    /// Hold before the next sweep.
    pub wait: Duration,
}

impl PhaseTimings {
    /// Timings from sanitized animation options.
    #[must_use]
    pub fn from_options(options: &AnimationOptions) -> Self {
        Self {
            vaporize_secs: options.vaporize_duration,
            fade_in_secs: options.fade_in_duration,
            wait: options.wait(),
        }
    }

    /// Sweep progress after `dt` more seconds.
    #[must_use]
    pub fn advance_progress(&self, progress: f32, dt: f32) -> f32 {
        progress + dt * FULL_SWEEP / self.vaporize_secs
    }

    /// Fade accumulator after `dt` more seconds.
    #[must_use]
    pub fn advance_fade(&self, opacity: f32, dt: f32) -> f32 {
        opacity + dt / self.fade_in_secs
    }
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self::from_options(&AnimationOptions::default())
    }
}

/// Input to the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseEvent {
    /// The surface entered the viewport.
    Shown,
    /// The surface left the viewport.
    Hidden,
    /// One animation frame.
    Frame {
        /// Frame timestamp.
        now: Instant,
        /// Seconds since the previous frame.
        dt: f32,
        /// Every particle has been swept and faded out this frame.
        swept_clear: bool,
    },
}

/// Work the caller owes the machine after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Put every particle back at rest for a fresh sweep.
    Rewind,
    /// The active string changed: sample it and materialize from zero.
    Advance,
    /// Stop scheduling frames and cancel pending timers.
    Suspend,
}

/// Apply `event` to `state`.
///
/// `text_count` is the length of the text sequence (treated as at least 1).
#[must_use]
pub fn transition(
    state: CycleState,
    event: PhaseEvent,
    timings: &PhaseTimings,
    text_count: usize,
) -> (CycleState, Option<Effect>) {
    let phase = state.phase;
    let at = |phase: Phase| CycleState { phase, ..state };

    match event {
        PhaseEvent::Hidden => (at(Phase::Static), Some(Effect::Suspend)),
        PhaseEvent::Shown => match phase {
            Phase::Static => (
                at(Phase::Vaporizing { progress: 0.0 }),
                Some(Effect::Rewind),
            ),
            _ => (state, None),
        },
        PhaseEvent::Frame {
            now,
            dt,
            swept_clear,
        } => match phase {
            Phase::Static => (state, None),
            Phase::Vaporizing { progress } => {
                let progress = timings.advance_progress(progress, dt);
                if progress >= FULL_SWEEP && swept_clear {
                    let next = CycleState {
                        phase: Phase::FadingIn { opacity: 0.0 },
                        text_index: (state.text_index + 1) % text_count.max(1),
                    };
                    (next, Some(Effect::Advance))
                } else {
                    (at(Phase::Vaporizing { progress }), None)
                }
            }
            Phase::FadingIn { opacity } => {
                let opacity = timings.advance_fade(opacity, dt);
                if opacity >= 1.0 {
                    (
                        at(Phase::Waiting {
                            until: now + timings.wait,
                        }),
                        None,
                    )
                } else {
                    (at(Phase::FadingIn { opacity }), None)
                }
            }
            Phase::Waiting { until } => {
                if now >= until {
                    (
                        at(Phase::Vaporizing { progress: 0.0 }),
                        Some(Effect::Rewind),
                    )
                } else {
                    (state, None)
                }
            }
        },
    }
}
