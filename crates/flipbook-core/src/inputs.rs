//! Input contract for the stage step loop.
//!
//! Commands batched by the host are applied in order at the start of
//! `Stage::step()`, before clip playback advances. Direct `Stage` method
//! calls between steps are equivalent.

use serde::{Deserialize, Serialize};

use crate::ids::{AnimatorId, MirrorId};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    #[serde(default)]
    pub commands: Vec<Command>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    SwitchTo {
        animator: AnimatorId,
        slot: usize,
        force: bool,
        one_shot: bool,
    },
    PlayOneShot {
        animator: AnimatorId,
        slot: usize,
        force: bool,
    },
    PauseCurrent {
        animator: AnimatorId,
    },
    ResumeCurrent {
        animator: AnimatorId,
    },
    SetSpeed {
        animator: AnimatorId,
        speed: f32,
    },
    SetMirrorActive {
        mirror: MirrorId,
        active: bool,
    },
}
