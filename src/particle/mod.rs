//! Glyph particles and the owned collection they live in.
//!
//! A [`ParticleField`] is built in one piece by [`sampling`] and then moved
//! through [`physics`] by value every frame. Nothing holds a shared
//! reference to the particles across frames; regeneration replaces the whole
//! field.

pub mod physics;
pub mod sampling;

use glam::Vec2;

use crate::color::Rgb;
use crate::options::TextAlignment;

/// One sampled pixel of rendered glyph artwork.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current position in backing pixels.
    pub position: Vec2,
    /// Sample position; never changes after creation.
    origin: Vec2,
    /// Sampled color.
    pub color: Rgb,
    /// Current opacity.
    pub opacity: f32,
    /// Baseline opacity from the source alpha and sample density.
    base_opacity: f32,
    /// Current velocity.
    pub velocity: Vec2,
    /// Dispersal angle picked on release.
    pub angle: f32,
    /// Dispersal speed picked on release.
    pub speed: f32,
    /// Fades linearly in place instead of drifting.
    pub fade_quickly: bool,
    /// Passed by the sweep front during the current vaporize phase.
    pub released: bool,
}

impl Particle {
    /// Particle at rest on its origin, at full baseline opacity.
    #[must_use]
    pub fn new(origin: Vec2, color: Rgb, base_opacity: f32) -> Self {
        Self {
            position: origin,
            origin,
            color,
            opacity: base_opacity,
            base_opacity,
            velocity: Vec2::ZERO,
            angle: 0.0,
            speed: 0.0,
            fade_quickly: false,
            released: false,
        }
    }

    /// Where the particle was sampled.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Opacity the particle shows when fully materialized.
    #[must_use]
    pub fn base_opacity(&self) -> f32 {
        self.base_opacity
    }

    /// Whether the particle sits exactly on its origin.
    #[must_use]
    pub fn is_home(&self) -> bool {
        self.position == self.origin
    }
}

/// Horizontal extent of the rendered glyph run, in backing pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    /// Left edge.
    pub left: f32,
    /// Right edge.
    pub right: f32,
    /// `right - left`.
    pub width: f32,
}

impl TextBounds {
    /// Bounds of a run of `width` drawn at `anchor_x` with `alignment`.
    #[must_use]
    pub fn from_anchor(anchor_x: f32, width: f32, alignment: TextAlignment) -> Self {
        let left = match alignment {
            TextAlignment::Center => anchor_x - width / 2.0,
            TextAlignment::Left => anchor_x,
            TextAlignment::Right => anchor_x - width,
        };
        Self {
            left,
            right: left + width,
            width,
        }
    }

    /// Grow the bounds to cover every particle origin. Glyphs can ink past
    /// their measured advance; the sweep must still reach those pixels.
    #[must_use]
    pub fn covering(self, particles: &[Particle]) -> Self {
        let (left, right) = particles.iter().fold((self.left, self.right), |(l, r), p| {
            (l.min(p.origin.x), r.max(p.origin.x))
        });
        Self {
            left,
            right,
            width: right - left,
        }
    }
}

/// The particles for one string plus the bounds they were sampled within.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    pub(crate) particles: Vec<Particle>,
    bounds: TextBounds,
    text_index: usize,
}

impl ParticleField {
    /// Field for the string at `text_index`.
    #[must_use]
    pub fn new(particles: Vec<Particle>, bounds: TextBounds, text_index: usize) -> Self {
        Self {
            particles,
            bounds,
            text_index,
        }
    }

    /// All particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Glyph run extent.
    #[must_use]
    pub fn bounds(&self) -> TextBounds {
        self.bounds
    }

    /// Index of the string this field was sampled from.
    #[must_use]
    pub fn text_index(&self) -> usize {
        self.text_index
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field has no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_particle_rests_on_origin() {
        let p = Particle::new(Vec2::new(3.0, 4.0), Rgb::WHITE, 0.5);
        assert!(p.is_home());
        assert_eq!(p.opacity, 0.5);
        assert_eq!(p.base_opacity(), 0.5);
        assert!(!p.released);
    }

    #[test]
    fn bounds_follow_alignment() {
        let c = TextBounds::from_anchor(100.0, 40.0, TextAlignment::Center);
        assert_eq!((c.left, c.right, c.width), (80.0, 120.0, 40.0));

        let l = TextBounds::from_anchor(100.0, 40.0, TextAlignment::Left);
        assert_eq!((l.left, l.right), (100.0, 140.0));

        let r = TextBounds::from_anchor(100.0, 40.0, TextAlignment::Right);
        assert_eq!((r.left, r.right), (60.0, 100.0));
    }

    #[test]
    fn covering_widens_to_overhanging_origins() {
        let measured = TextBounds::from_anchor(100.0, 40.0, TextAlignment::Center);
        let particles = [
            Particle::new(Vec2::new(90.0, 0.0), Rgb::WHITE, 1.0),
            Particle::new(Vec2::new(123.0, 0.0), Rgb::WHITE, 1.0),
        ];
        let b = measured.covering(&particles);
        assert_eq!((b.left, b.right, b.width), (80.0, 123.0, 43.0));

        let inside = measured.covering(&particles[..1]);
        assert_eq!(inside, measured);
    }
}
