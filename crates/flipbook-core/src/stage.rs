//! Stage: explicit owner and scheduler for clips, animators, and mirrors.
//!
//! Replaces engine-driven per-frame dispatch and ambient singleton lookups
//! with one object that owns everything and steps it in a fixed phase order:
//!
//! 1. apply batched [`Inputs`] commands,
//! 2. advance clip playback,
//! 3. animator ticks (one-shot unwind),
//! 4. mirror steps.
//!
//! Animators always run before the mirrors that read their resolved state,
//! so mirrors observe the current step's attributes, never stale ones.
//! Everything is single-threaded and synchronous; no locking is needed.

use crate::animator::Animator;
use crate::clip::{Clip, ClipConfig, ClipStore};
use crate::config::{AnimatorConfig, MirrorConfig};
use crate::error::ConfigError;
use crate::ids::{AnimatorId, ClipId, MirrorId};
use crate::inputs::{Command, Inputs};
use crate::mirror::Mirror;
use crate::outputs::{Event, Outputs};

#[derive(Default, Debug)]
pub struct Stage {
    // Dense id counters; ids are never reused, so removed objects leave
    // dangling handles rather than aliased ones.
    next_clip: u32,
    next_animator: u32,
    next_mirror: u32,

    clips: ClipStore,
    animators: Vec<Animator>,
    mirrors: Vec<Mirror>,
    outputs: Outputs,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clip; fails on invalid frame count or rate.
    pub fn add_clip(&mut self, cfg: ClipConfig) -> Result<ClipId, ConfigError> {
        let clip = Clip::new(&cfg)?;
        let id = ClipId(self.next_clip);
        self.next_clip += 1;
        self.clips.insert(id, clip);
        Ok(id)
    }

    /// Drop a clip. Animator slots or mirror bindings that still reference
    /// it become dangling and are reported and skipped at step time.
    pub fn remove_clip(&mut self, id: ClipId) -> bool {
        self.clips.remove(id)
    }

    /// Register an animator over clips already owned by this stage.
    pub fn add_animator(&mut self, cfg: AnimatorConfig) -> Result<AnimatorId, ConfigError> {
        let id = AnimatorId(self.next_animator);
        let animator = Animator::new(id, cfg, &mut self.clips)?;
        self.next_animator += 1;
        self.animators.push(animator);
        Ok(id)
    }

    /// Register a mirror binding over clips already owned by this stage.
    pub fn add_mirror(&mut self, cfg: MirrorConfig) -> Result<MirrorId, ConfigError> {
        let id = MirrorId(self.next_mirror);
        let mirror = Mirror::new(id, cfg, &mut self.clips)?;
        self.next_mirror += 1;
        self.mirrors.push(mirror);
        Ok(id)
    }

    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.clips.get(id)
    }

    pub fn clip_mut(&mut self, id: ClipId) -> Option<&mut Clip> {
        self.clips.get_mut(id)
    }

    /// Events accumulated since the start of the last step. `step()` clears
    /// this on entry, so drain between steps.
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn switch_to(&mut self, animator: AnimatorId, slot: usize, force: bool, one_shot: bool) {
        self.with_animator(animator, |a, clips, out| {
            a.switch_to(clips, slot, force, one_shot, out)
        });
    }

    pub fn play_one_shot(&mut self, animator: AnimatorId, slot: usize, force: bool) {
        self.with_animator(animator, |a, clips, out| {
            a.play_one_shot(clips, slot, force, out)
        });
    }

    pub fn is_in_state(&self, animator: AnimatorId, slot: usize) -> bool {
        self.find_animator(animator)
            .map(|a| a.is_in_state(slot))
            .unwrap_or(false)
    }

    pub fn current_slot(&self, animator: AnimatorId) -> Option<usize> {
        self.find_animator(animator).map(Animator::current_slot)
    }

    pub fn current_clip(&self, animator: AnimatorId) -> Option<ClipId> {
        self.find_animator(animator).map(Animator::current_clip)
    }

    pub fn one_shot_active(&self, animator: AnimatorId) -> bool {
        self.find_animator(animator)
            .map(Animator::one_shot_active)
            .unwrap_or(false)
    }

    pub fn pause_current(&mut self, animator: AnimatorId) {
        self.with_animator(animator, |a, clips, _| a.pause_current(clips));
    }

    pub fn resume_current(&mut self, animator: AnimatorId) {
        self.with_animator(animator, |a, clips, _| a.resume_current(clips));
    }

    pub fn set_speed(&mut self, animator: AnimatorId, speed: f32) {
        self.with_animator(animator, |a, clips, out| a.set_speed(clips, speed, out));
    }

    pub fn set_mirror_active(&mut self, mirror: MirrorId, active: bool) {
        match self.mirrors.iter_mut().find(|m| m.id() == mirror) {
            Some(m) => m.set_active(active),
            None => {
                let message = format!("unknown mirror id: {mirror:?}");
                log::warn!("{message}");
                self.outputs.push_event(Event::Error { message });
            }
        }
    }

    /// Step the whole stage by `dt` seconds.
    pub fn step(&mut self, dt: f32, inputs: Inputs) -> &Outputs {
        self.outputs.clear();

        // 1) Commands.
        for cmd in inputs.commands {
            self.apply(cmd);
        }

        // 2) Clip playback.
        for clip in self.clips.iter_mut() {
            clip.advance(dt);
        }

        // 3) Animator ticks, before mirrors read the resolved state.
        for animator in &mut self.animators {
            animator.tick(&mut self.clips, &mut self.outputs);
        }

        // 4) Mirror steps.
        for mirror in &mut self.mirrors {
            mirror.step(&mut self.clips, &mut self.outputs);
        }

        &self.outputs
    }

    fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::SwitchTo {
                animator,
                slot,
                force,
                one_shot,
            } => self.switch_to(animator, slot, force, one_shot),
            Command::PlayOneShot {
                animator,
                slot,
                force,
            } => self.play_one_shot(animator, slot, force),
            Command::PauseCurrent { animator } => self.pause_current(animator),
            Command::ResumeCurrent { animator } => self.resume_current(animator),
            Command::SetSpeed { animator, speed } => self.set_speed(animator, speed),
            Command::SetMirrorActive { mirror, active } => self.set_mirror_active(mirror, active),
        }
    }

    fn find_animator(&self, id: AnimatorId) -> Option<&Animator> {
        self.animators.iter().find(|a| a.id() == id)
    }

    fn with_animator<F>(&mut self, id: AnimatorId, f: F)
    where
        F: FnOnce(&mut Animator, &mut ClipStore, &mut Outputs),
    {
        let Stage {
            animators,
            clips,
            outputs,
            ..
        } = self;
        match animators.iter_mut().find(|a| a.id() == id) {
            Some(animator) => f(animator, clips, outputs),
            None => {
                let message = format!("unknown animator id: {id:?}");
                log::warn!("{message}");
                outputs.push_event(Event::Error { message });
            }
        }
    }
}
