// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Particle text vaporization effect.
//!
//! Vaportext renders one string of a sequence as particles sampled from its
//! glyphs, sweeps a front across it so the particles drift away and fade,
//! then materializes the next string in place, holds it, and repeats for as
//! long as the effect is visible.
//!
//! # Key entry points
//!
//! - [`engine::VaporTextAnimator`] - the animator; call `frame` once per
//!   display refresh
//! - [`options::Options`] - runtime configuration (texts, font, color,
//!   spread, density, durations), with TOML presets
//! - [`surface::Surface`] - the rendering capability a host provides
//! - [`appearance::AppearanceSignal`] - injected light/dark mode
//!
//! # Architecture
//!
//! The cycle is a four-phase tagged enum advanced by a single pure
//! [`animation::transition`] function. Physics steps in
//! [`particle::physics`] take the [`particle::ParticleField`] by value and
//! return the next one, and resampling swaps in a whole new field between
//! frames. The core never touches a browser: with the `web` feature,
//! `surface::web` supplies a canvas surface and a `requestAnimationFrame`
//! host.

pub mod animation;
pub mod appearance;
pub mod color;
pub mod engine;
pub mod error;
pub mod options;
pub mod particle;
pub mod surface;
pub mod util;

pub use engine::{FrameStatus, VaporTextAnimator};
pub use error::VaporError;
pub use options::Options;
