//! Animator state machine.
//!
//! Each animator owns a fixed sequence of clip slots for one entity, tracks
//! the active slot, and supports forced/conditional switching plus a
//! single-level one-shot override: play a clip to completion once, then
//! restore the slot that was active before. States are `Idle(k)` or
//! `OneShot(k)` over a saved `Idle(j)`; one-shots never nest.

use crate::clip::{Clip, ClipStore};
use crate::config::AnimatorConfig;
use crate::error::ConfigError;
use crate::ids::{AnimatorId, ClipId};
use crate::outputs::{Event, Outputs};

/// Saved state while a one-shot plays.
///
/// Set by exactly one operation (`play_one_shot`) and cleared by exactly one
/// condition inside `tick` (the watched clip finished, or was switched away
/// from).
#[derive(Clone, Copy, Debug)]
struct OverrideFrame {
    saved_slot: usize,
    watched: ClipId,
}

/// Result of an attempted slot switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SwitchOutcome {
    Switched,
    /// Idempotent no-op: already in the requested slot.
    Unchanged,
    /// Rejected configuration error; prior state retained.
    Rejected,
}

#[derive(Debug)]
pub struct Animator {
    id: AnimatorId,
    slots: Vec<ClipId>,
    current_slot: usize,
    override_frame: Option<OverrideFrame>,
}

impl Animator {
    /// Validates the config against the store, then takes over the slot
    /// clips: play-on-awake is disabled on all of them (the animator alone
    /// decides which clip runs) and only slot 0 starts active.
    pub fn new(
        id: AnimatorId,
        cfg: AnimatorConfig,
        clips: &mut ClipStore,
    ) -> Result<Self, ConfigError> {
        if cfg.slots.is_empty() {
            return Err(ConfigError::NoSlots);
        }
        if !(cfg.speed > 0.0) {
            return Err(ConfigError::InvalidRate { rate: cfg.speed });
        }
        for slot in &cfg.slots {
            if !clips.contains(*slot) {
                return Err(ConfigError::UnknownClip { id: *slot });
            }
        }
        for (i, slot) in cfg.slots.iter().enumerate() {
            if let Some(clip) = clips.get_mut(*slot) {
                clip.set_play_on_awake(false);
                clip.set_speed(cfg.speed);
                clip.set_active(i == 0);
            }
        }
        Ok(Self {
            id,
            slots: cfg.slots,
            current_slot: 0,
            override_frame: None,
        })
    }

    pub fn id(&self) -> AnimatorId {
        self.id
    }

    pub fn current_slot(&self) -> usize {
        self.current_slot
    }

    /// Clip id bound to the active slot.
    pub fn current_clip(&self) -> ClipId {
        self.slots[self.current_slot]
    }

    pub fn is_in_state(&self, slot: usize) -> bool {
        self.current_slot == slot
    }

    /// True while a one-shot override is in flight.
    pub fn one_shot_active(&self) -> bool {
        self.override_frame.is_some()
    }

    /// Switch the active slot.
    ///
    /// A non-forced switch to the current slot is a no-op. Out-of-range or
    /// unresolvable slots are reported configuration errors: the switch is
    /// abandoned and prior state retained. One-shot switches restart the
    /// target clip from frame 0; plain switches resume it without restarting.
    pub fn switch_to(
        &mut self,
        clips: &mut ClipStore,
        slot: usize,
        force: bool,
        one_shot: bool,
        out: &mut Outputs,
    ) {
        self.do_switch(clips, slot, force, one_shot, out);
    }

    fn do_switch(
        &mut self,
        clips: &mut ClipStore,
        slot: usize,
        force: bool,
        one_shot: bool,
        out: &mut Outputs,
    ) -> SwitchOutcome {
        if !force && slot == self.current_slot {
            return SwitchOutcome::Unchanged;
        }
        if slot >= self.slots.len() {
            self.report(
                out,
                format!(
                    "animator {:?}: slot {} out of range ({} slots)",
                    self.id,
                    slot,
                    self.slots.len()
                ),
            );
            return SwitchOutcome::Rejected;
        }
        let clip_id = self.slots[slot];
        if !clips.contains(clip_id) {
            self.report(
                out,
                format!(
                    "animator {:?}: slot {} clip {:?} does not resolve",
                    self.id, slot, clip_id
                ),
            );
            return SwitchOutcome::Rejected;
        }

        let from = self.current_slot;
        self.current_slot = slot;

        // Deactivate every other slot clip; only the resolved one runs.
        for candidate in &self.slots {
            if let Some(clip) = clips.get_mut(*candidate) {
                clip.set_active(*candidate == clip_id);
            }
        }
        if let Some(clip) = clips.get_mut(clip_id) {
            if one_shot {
                clip.play(Some(0), true);
            } else {
                clip.play(None, false);
            }
        }

        out.push_event(Event::SlotChanged {
            animator: self.id,
            from,
            to: slot,
        });
        SwitchOutcome::Switched
    }

    /// Play one slot to completion, then restore the slot active right now.
    ///
    /// While an override is in flight further one-shots are no-ops unless
    /// `force` is set; a forced one-shot replaces the override and saves the
    /// interrupted one-shot's slot instead.
    pub fn play_one_shot(&mut self, clips: &mut ClipStore, slot: usize, force: bool, out: &mut Outputs) {
        if !force && self.override_frame.is_some() {
            return;
        }
        if slot >= self.slots.len() {
            self.report(
                out,
                format!(
                    "animator {:?}: one-shot slot {} out of range ({} slots)",
                    self.id,
                    slot,
                    self.slots.len()
                ),
            );
            return;
        }
        let frame = OverrideFrame {
            saved_slot: self.current_slot,
            watched: self.slots[slot],
        };
        match self.do_switch(clips, slot, force, true, out) {
            // Unchanged covers a non-forced one-shot of the current slot:
            // the override still arms and unwinds when the clip finishes.
            SwitchOutcome::Switched | SwitchOutcome::Unchanged => {
                self.override_frame = Some(frame);
                out.push_event(Event::OneShotStarted {
                    animator: self.id,
                    slot,
                });
            }
            SwitchOutcome::Rejected => {}
        }
    }

    /// Per-step unwind check, run by the stage before mirrors.
    ///
    /// An external switch away from the watched clip drops the override
    /// without restoring (the explicit transition wins); completion of the
    /// watched clip restores the saved slot.
    pub fn tick(&mut self, clips: &mut ClipStore, out: &mut Outputs) {
        let Some(frame) = self.override_frame else {
            return;
        };

        let current = self.slots[self.current_slot];
        if frame.watched != current {
            self.override_frame = None;
            out.push_event(Event::OneShotInterrupted { animator: self.id });
            return;
        }

        let done = clips.get(current).map(Clip::is_done).unwrap_or(false);
        if done {
            self.override_frame = None;
            self.do_switch(clips, frame.saved_slot, false, false, out);
            out.push_event(Event::OneShotFinished {
                animator: self.id,
                restored_slot: frame.saved_slot,
            });
        }
    }

    /// Pause playback of the resolved current clip.
    pub fn pause_current(&mut self, clips: &mut ClipStore) {
        if let Some(clip) = clips.get_mut(self.current_clip()) {
            clip.pause();
        }
    }

    /// Resume playback of the resolved current clip (no restart).
    pub fn resume_current(&mut self, clips: &mut ClipStore) {
        if let Some(clip) = clips.get_mut(self.current_clip()) {
            clip.play(None, false);
        }
    }

    /// Propagate a new rate multiplier to every slot clip.
    pub fn set_speed(&mut self, clips: &mut ClipStore, speed: f32, out: &mut Outputs) {
        if !(speed > 0.0) {
            self.report(
                out,
                format!("animator {:?}: rejected non-positive speed {}", self.id, speed),
            );
            return;
        }
        for slot in &self.slots {
            if let Some(clip) = clips.get_mut(*slot) {
                clip.set_speed(speed);
            }
        }
    }

    fn report(&self, out: &mut Outputs, message: String) {
        log::warn!("{message}");
        out.push_event(Event::Error { message });
    }
}
