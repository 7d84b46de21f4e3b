//! Immutable configuration records for animators and mirrors.
//!
//! Configuration is validated when the object is added to a stage; invalid
//! records fail construction instead of being clamped at run time.

use serde::{Deserialize, Serialize};

use crate::ids::ClipId;

/// Configuration for one animator: a fixed, ordered sequence of clip slots.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimatorConfig {
    /// Slot order is the public identity of each animation; slot 0 is the
    /// initial state.
    pub slots: Vec<ClipId>,
    /// Playback-rate multiplier propagated to every slot clip (> 0).
    pub speed: f32,
}

impl AnimatorConfig {
    pub fn new(slots: Vec<ClipId>) -> Self {
        Self { slots, speed: 1.0 }
    }
}

/// Configuration for one mirror binding: a source clip plus the dependents
/// slaved to it, and the attribute selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MirrorConfig {
    pub source: ClipId,
    pub dependents: Vec<ClipId>,
    pub mirror_frame: bool,
    pub mirror_flip: bool,
    pub mirror_color: bool,
    pub mirror_sort_order: bool,
    pub active: bool,
}

impl MirrorConfig {
    /// All attribute toggles default to on.
    pub fn new(source: ClipId, dependents: Vec<ClipId>) -> Self {
        Self {
            source,
            dependents,
            mirror_frame: true,
            mirror_flip: true,
            mirror_color: true,
            mirror_sort_order: true,
            active: true,
        }
    }
}
