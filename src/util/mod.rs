//! Shared utilities for the particle effect.
//!
//! Helpers for frame timing, range remapping and the font-size to spread
//! lookup curve.

pub mod frame_timing;
pub mod remap;
pub mod spread;
