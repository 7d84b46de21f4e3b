//! Output contract from the stage step loop.
//!
//! Events carry the semantic signals for one step; `Stage::step()` clears
//! them on entry, so adapters drain the returned `Outputs` before the next
//! step. Runtime configuration problems surface here as `Event::Error`
//! alongside a `log::warn!`, never as a panic.

use serde::{Deserialize, Serialize};

use crate::ids::AnimatorId;

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Event {
    /// An animator resolved a new active slot.
    SlotChanged {
        animator: AnimatorId,
        from: usize,
        to: usize,
    },
    /// A one-shot override started playing.
    OneShotStarted { animator: AnimatorId, slot: usize },
    /// A one-shot finished and the saved slot was restored.
    OneShotFinished {
        animator: AnimatorId,
        restored_slot: usize,
    },
    /// An external switch interrupted a one-shot; the override was dropped
    /// without restoring.
    OneShotInterrupted { animator: AnimatorId },
    /// Non-fatal configuration problem observed during a step.
    Error { message: String },
}

/// Outputs returned by `Stage::step()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
