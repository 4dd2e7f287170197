use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Shortest phase duration accepted for the vaporize and fade-in phases.
const MIN_PHASE_SECS: f32 = 0.01;
/// Longest duration accepted for any phase.
pub const MAX_PHASE_SECS: f32 = 3600.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Per-phase durations, in seconds.
pub struct AnimationOptions {
    /// Time for the sweep front to cross the text.
    #[schemars(title = "Vaporize", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub vaporize_duration: f32,
    /// Time for the next string to fade in.
    #[schemars(title = "Fade In", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub fade_in_duration: f32,
    /// Hold time before the next sweep.
    #[schemars(title = "Wait", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub wait_duration: f32,
}

impl AnimationOptions {
    /// Hold duration between fade-in and the next sweep. Values outside
    /// `0..=MAX_PHASE_SECS` saturate; NaN counts as zero.
    #[must_use]
    pub fn wait(&self) -> Duration {
        let secs = if self.wait_duration.is_nan() {
            0.0
        } else {
            self.wait_duration.clamp(0.0, MAX_PHASE_SECS)
        };
        Duration::from_secs_f32(secs)
    }

    pub(crate) fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let phase = |v: f32, fallback: f32| {
            if v.is_finite() {
                v.clamp(MIN_PHASE_SECS, MAX_PHASE_SECS)
            } else {
                fallback
            }
        };
        Self {
            vaporize_duration: phase(self.vaporize_duration, defaults.vaporize_duration),
            fade_in_duration: phase(self.fade_in_duration, defaults.fade_in_duration),
            wait_duration: if self.wait_duration.is_finite() {
                self.wait_duration.clamp(0.0, MAX_PHASE_SECS)
            } else {
                defaults.wait_duration
            },
        }
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            vaporize_duration: 2.0,
            fade_in_duration: 1.0,
            wait_duration: 0.5,
        }
    }
}
