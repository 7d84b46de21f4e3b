//! Error types for stage configuration.

use serde::{Deserialize, Serialize};

use crate::ids::ClipId;

/// Errors rejected at construction time.
///
/// Runtime conditions (dangling clip ids, out-of-range slots, render-kind
/// mismatches) are reported through [`crate::outputs::Event::Error`] and
/// `log::warn!` instead; they never abort the step loop.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ConfigError {
    /// Animator configured with an empty slot list
    #[error("animator slot list is empty")]
    NoSlots,

    /// Mirror configured with an empty dependent list
    #[error("mirror dependent list is empty")]
    NoDependents,

    /// A referenced clip id does not resolve
    #[error("unknown clip id: {id:?}")]
    UnknownClip { id: ClipId },

    /// A clip needs at least one frame
    #[error("clip frame count must be at least 1")]
    InvalidFrameCount,

    /// Frame rates and speed multipliers must be positive
    #[error("playback rate must be positive, got {rate}")]
    InvalidRate { rate: f32 },
}
