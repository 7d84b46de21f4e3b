//! Opaque handles for stage-owned objects.
//!
//! The stage hands ids out densely in creation order and never reuses one,
//! so a handle that outlives its object simply stops resolving instead of
//! aliasing a newer object.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AnimatorId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MirrorId(pub u32);
