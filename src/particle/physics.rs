//! Sweep front, release, drift and fade.
//!
//! Every function here takes the [`ParticleField`] by value and hands the
//! next one back, so a regeneration pass can never observe a half-updated
//! collection.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::{Particle, ParticleField, TextBounds};
use crate::options::{Options, SweepDirection};

/// A swept particle at or below this opacity counts as gone.
pub const VAPORIZED_OPACITY: f32 = 0.01;

/// Drift fade per second at the reference vaporize duration.
const BASE_FADE_RATE: f32 = 0.25;
/// Vaporize duration, in seconds, at which drift fades at [`BASE_FADE_RATE`].
const REFERENCE_VAPORIZE_SECS: f32 = 2.0;
/// Pull back toward the origin per pixel of displacement.
const RESTORING_FORCE: f32 = 0.002;
/// Damping never drops below this factor.
const MIN_DAMPING: f32 = 0.95;
/// Horizontal and vertical integration scale; wider than tall reads as smoke.
const DRIFT_TIME_SCALE: Vec2 = Vec2::new(20.0, 10.0);

/// Parameters of one vaporize phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VaporParams {
    /// Dispersal magnitude (spread curve × multiplier).
    pub spread: f32,
    /// Configured vaporize duration in seconds.
    pub vaporize_secs: f32,
    /// Sweep direction.
    pub direction: SweepDirection,
    /// Fraction of swept particles that drift (0.3..=1.0).
    pub drift_fraction: f32,
}

impl VaporParams {
    /// Parameters derived from sanitized options.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            spread: options.spread_factor(),
            vaporize_secs: options.animation.vaporize_duration,
            direction: options.direction,
            drift_fraction: options.density_fraction(),
        }
    }

    /// Opacity lost per second by drifting particles. Shorter configured
    /// durations fade faster.
    #[must_use]
    pub fn drift_fade_rate(&self) -> f32 {
        BASE_FADE_RATE * (REFERENCE_VAPORIZE_SECS / self.vaporize_secs)
    }
}

/// Horizontal position of the sweep front at `progress` percent.
#[must_use]
pub fn sweep_front(bounds: TextBounds, progress: f32, direction: SweepDirection) -> f32 {
    let t = progress.clamp(0.0, 100.0) / 100.0;
    match direction {
        SweepDirection::LeftToRight => bounds.left + bounds.width * t,
        SweepDirection::RightToLeft => bounds.right - bounds.width * t,
    }
}

/// Whether the front has passed `origin_x`.
#[must_use]
pub fn is_swept(origin_x: f32, front: f32, direction: SweepDirection) -> bool {
    match direction {
        SweepDirection::LeftToRight => origin_x <= front,
        SweepDirection::RightToLeft => origin_x >= front,
    }
}

/// Advance one vaporize frame.
///
/// Returns the next field and whether every particle has been swept and
/// faded to [`VAPORIZED_OPACITY`] or below.
pub fn vaporize<R: Rng>(
    mut field: ParticleField,
    front: f32,
    dt: f32,
    params: &VaporParams,
    rng: &mut R,
) -> (ParticleField, bool) {
    let mut all_vaporized = true;

    for particle in &mut field.particles {
        if !is_swept(particle.origin.x, front, params.direction) {
            all_vaporized = false;
            continue;
        }

        if !particle.released {
            release(particle, params, rng);
        }

        if particle.fade_quickly {
            particle.opacity = (particle.opacity - dt).max(0.0);
        } else {
            drift(particle, dt, params, rng);
        }

        if particle.opacity > VAPORIZED_OPACITY {
            all_vaporized = false;
        }
    }

    (field, all_vaporized)
}

/// Give a freshly swept particle its heading and decide whether it drifts.
fn release<R: Rng>(particle: &mut Particle, params: &VaporParams, rng: &mut R) {
    particle.angle = rng.random_range(0.0..TAU);
    particle.speed = (rng.random::<f32>() + 0.5) * params.spread;
    particle.velocity = Vec2::from_angle(particle.angle) * particle.speed;
    particle.fade_quickly = rng.random::<f32>() > params.drift_fraction;
    particle.released = true;
}

fn drift<R: Rng>(particle: &mut Particle, dt: f32, params: &VaporParams, rng: &mut R) {
    let spread = params.spread;
    let to_origin = particle.origin - particle.position;
    let distance = to_origin.length();
    let damping = if spread > 0.0 {
        (1.0 - distance / (100.0 * spread)).max(MIN_DAMPING)
    } else {
        MIN_DAMPING
    };

    let jitter_scale = spread * 3.0;
    let jitter = Vec2::new(
        (rng.random::<f32>() - 0.5) * jitter_scale,
        (rng.random::<f32>() - 0.5) * jitter_scale,
    );
    particle.velocity = (particle.velocity + jitter + to_origin * RESTORING_FORCE) * damping;
    particle.velocity = particle.velocity.clamp_length_max(spread * 2.0);

    particle.position += particle.velocity * dt * DRIFT_TIME_SCALE;
    particle.opacity = (particle.opacity - dt * params.drift_fade_rate()).max(0.0);
}

/// Put every particle back on its origin at baseline opacity, unreleased.
#[must_use]
pub fn rewind(mut field: ParticleField) -> ParticleField {
    for p in &mut field.particles {
        p.position = p.origin;
        p.opacity = p.base_opacity;
        p.velocity = Vec2::ZERO;
        p.speed = 0.0;
        p.angle = 0.0;
        p.fade_quickly = false;
        p.released = false;
    }
    field
}

/// Snap every particle onto its origin and set its opacity to
/// `min(fade, 1) × baseline`.
#[must_use]
pub fn materialize(mut field: ParticleField, fade: f32) -> ParticleField {
    let fade = fade.clamp(0.0, 1.0);
    for p in &mut field.particles {
        p.position = p.origin;
        p.velocity = Vec2::ZERO;
        p.released = false;
        p.opacity = fade * p.base_opacity;
    }
    field
}
