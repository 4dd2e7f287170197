//! The four-phase vaporize cycle.
//!
//! [`phase`] holds the whole machine as one tagged value with a single pure
//! transition function; [`settle`] is the cancellable delay used before
//! resampling after a font family change.

pub mod phase;
pub mod settle;

pub use phase::{transition, CycleState, Effect, Phase, PhaseEvent, PhaseTimings};
pub use settle::SettleTimer;
