//! Light/dark display mode as an injected, observable value.
//!
//! The host owns an [`AppearanceSignal`] and writes to it whenever its own
//! theme detection fires (a class mutation on the document root, a media
//! query, a settings toggle). Each animator holds an [`AppearanceWatcher`]
//! and polls it once per frame, so the animator never inspects the
//! environment directly.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use crate::color::Rgb;

/// Display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    /// Light backgrounds; the configured text color is used.
    #[default]
    Light,
    /// Dark backgrounds; text is forced to white.
    Dark,
}

impl Appearance {
    /// Resolve the effective text color for this appearance.
    #[must_use]
    pub fn text_color(self, configured: Rgb) -> Rgb {
        match self {
            Self::Light => configured,
            Self::Dark => Rgb::WHITE,
        }
    }

    fn to_bits(self) -> u8 {
        match self {
            Self::Light => 0,
            Self::Dark => 1,
        }
    }

    fn from_bits(bits: u8) -> Self {
        if bits == 0 {
            Self::Light
        } else {
            Self::Dark
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    value: AtomicU8,
    generation: AtomicU64,
}

/// Writable side of the appearance value. Cheap to clone; all clones share
/// one value.
#[derive(Debug, Clone, Default)]
pub struct AppearanceSignal {
    shared: Arc<Shared>,
}

impl AppearanceSignal {
    /// Signal starting at `initial`.
    #[must_use]
    pub fn new(initial: Appearance) -> Self {
        let signal = Self::default();
        signal.shared.value.store(initial.to_bits(), Ordering::Release);
        signal
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> Appearance {
        Appearance::from_bits(self.shared.value.load(Ordering::Acquire))
    }

    /// Publish a new value. Watchers only see a change if the value differs.
    pub fn set(&self, appearance: Appearance) {
        let previous = self
            .shared
            .value
            .swap(appearance.to_bits(), Ordering::AcqRel);
        if previous != appearance.to_bits() {
            let _ = self.shared.generation.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// Subscribe a new watcher. The watcher starts in sync with the current
    /// value.
    #[must_use]
    pub fn watch(&self) -> AppearanceWatcher {
        AppearanceWatcher {
            seen: self.shared.generation.load(Ordering::Acquire),
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Read side of an [`AppearanceSignal`] that remembers what it last saw.
#[derive(Debug)]
pub struct AppearanceWatcher {
    shared: Arc<Shared>,
    seen: u64,
}

impl AppearanceWatcher {
    /// Current value without marking it seen.
    #[must_use]
    pub fn current(&self) -> Appearance {
        Appearance::from_bits(self.shared.value.load(Ordering::Acquire))
    }

    /// Returns the new value if it changed since the last poll.
    pub fn poll_changed(&mut self) -> Option<Appearance> {
        let generation = self.shared.generation.load(Ordering::Acquire);
        if generation == self.seen {
            return None;
        }
        self.seen = generation;
        Some(self.current())
    }
}
