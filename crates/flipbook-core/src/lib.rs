//! Flipbook core (engine-agnostic)
//!
//! Building blocks for 2D cell animation control: a per-entity slot state
//! machine with one-shot/restore semantics ([`animator`]), an attribute
//! mirror that slaves dependent clips to a source clip ([`mirror`]), and an
//! explicit step loop that owns every object and runs the phases in a fixed
//! order ([`stage`]). No rendering, no scene graph; host adapters drain the
//! per-step [`outputs::Outputs`] and apply visible attributes themselves.

pub mod animator;
pub mod clip;
pub mod color;
pub mod config;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod mirror;
pub mod outputs;
pub mod stage;

// Re-exports for consumers (adapters)
pub use animator::Animator;
pub use clip::{Clip, ClipConfig, ClipStore, RenderKind};
pub use color::Rgba;
pub use config::{AnimatorConfig, MirrorConfig};
pub use error::ConfigError;
pub use ids::{AnimatorId, ClipId, MirrorId};
pub use inputs::{Command, Inputs};
pub use mirror::Mirror;
pub use outputs::{Event, Outputs};
pub use stage::Stage;
