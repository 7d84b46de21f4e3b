//! Animation frame source: a flipbook clip with minimal frame-stepping
//! playback.
//!
//! The stage advances clips once per step; animators decide which clip of an
//! entity runs, and mirrors copy visible attributes between clips. A clip's
//! visible frame is `Option<u32>`: `None` means no sprite is shown.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::ConfigError;
use crate::ids::ClipId;

/// Render representation of a clip.
///
/// Color and sort-order copies are only valid between `Sprite` clips; mixing
/// representations is reported as a configuration error at mirror time.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RenderKind {
    Sprite,
    Mesh,
}

/// Immutable clip configuration, validated when the clip is added to a stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClipConfig {
    /// Number of frames in the flipbook sequence (>= 1).
    pub frame_count: u32,
    /// Playback rate in frames per second (> 0).
    pub fps: f32,
    pub looping: bool,
    /// Start playing frame 0 as soon as the clip exists.
    pub play_on_awake: bool,
    pub render: RenderKind,
    pub color: Rgba,
    pub sort_order: i32,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            frame_count: 1,
            fps: 12.0,
            looping: true,
            play_on_awake: true,
            render: RenderKind::Sprite,
            color: Rgba::WHITE,
            sort_order: 0,
        }
    }
}

/// One flipbook clip: playback clock plus the visible attributes a host
/// renderer would consume.
#[derive(Debug)]
pub struct Clip {
    frame_count: u32,
    fps: f32,
    speed: f32,
    looping: bool,
    play_on_awake: bool,
    render: RenderKind,

    active: bool,
    playing: bool,
    done: bool,
    frame: Option<u32>,
    clock: f32,

    flip_x: bool,
    flip_y: bool,
    color: Rgba,
    sort_order: i32,
}

impl Clip {
    pub fn new(cfg: &ClipConfig) -> Result<Self, ConfigError> {
        if cfg.frame_count == 0 {
            return Err(ConfigError::InvalidFrameCount);
        }
        if !(cfg.fps > 0.0) {
            return Err(ConfigError::InvalidRate { rate: cfg.fps });
        }
        Ok(Self {
            frame_count: cfg.frame_count,
            fps: cfg.fps,
            speed: 1.0,
            looping: cfg.looping,
            play_on_awake: cfg.play_on_awake,
            render: cfg.render,
            active: true,
            playing: cfg.play_on_awake,
            done: false,
            frame: if cfg.play_on_awake { Some(0) } else { None },
            clock: 0.0,
            flip_x: false,
            flip_y: false,
            color: cfg.color,
            sort_order: cfg.sort_order,
        })
    }

    /// Start or resume playback.
    ///
    /// With `restart` the clip jumps to `from` (or frame 0) and clears its
    /// completion flag; without it playback continues from the current frame.
    pub fn play(&mut self, from: Option<u32>, restart: bool) {
        if restart {
            let start = from.unwrap_or(0).min(self.frame_count - 1);
            self.frame = Some(start);
            self.clock = 0.0;
            self.done = false;
        } else if self.frame.is_none() {
            self.frame = Some(from.unwrap_or(0).min(self.frame_count - 1));
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Present a frame without touching the playback clock. Used by mirrors:
    /// the dependent is slaved, never independently timed.
    pub fn show_frame(&mut self, frame: u32) {
        self.frame = Some(frame.min(self.frame_count - 1));
    }

    /// Clear the visible frame (no sprite shown).
    pub fn hide(&mut self) {
        self.frame = None;
    }

    /// Frame-stepping playback, driven once per step by the stage.
    ///
    /// A non-looping clip that steps past its last frame holds that frame,
    /// stops, and raises the completion flag; a looping clip wraps. Whole
    /// frames are computed by division, so an arbitrarily large `dt` costs
    /// the same as a small one.
    pub fn advance(&mut self, dt: f32) {
        if !self.active || !self.playing || self.done {
            return;
        }
        let Some(frame) = self.frame else {
            return;
        };
        self.clock += dt * self.speed;
        let frame_time = 1.0 / self.fps;
        let steps = (self.clock / frame_time).floor();
        if steps < 1.0 {
            return;
        }
        self.clock -= steps * frame_time;

        // Saturating: a huge dt overshoots the u64 range long after it has
        // overshot every real clip length.
        let target = u64::from(frame).saturating_add(steps as u64);
        let count = u64::from(self.frame_count);
        if target < count {
            self.frame = Some(target as u32);
        } else if self.looping {
            self.frame = Some((target % count) as u32);
        } else {
            self.frame = Some(self.frame_count - 1);
            self.done = true;
            self.playing = false;
            self.clock = 0.0;
        }
    }

    pub fn frame(&self) -> Option<u32> {
        self.frame
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Completion signal: the sequence finished and is not looping.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn play_on_awake(&self) -> bool {
        self.play_on_awake
    }

    pub fn set_play_on_awake(&mut self, play_on_awake: bool) {
        self.play_on_awake = play_on_awake;
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn render(&self) -> RenderKind {
        self.render
    }

    pub fn flip_x(&self) -> bool {
        self.flip_x
    }

    pub fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }

    pub fn flip_y(&self) -> bool {
        self.flip_y
    }

    pub fn set_flip_y(&mut self, flip: bool) {
        self.flip_y = flip;
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, order: i32) {
        self.sort_order = order;
    }
}

/// Clip storage shared by animators and mirrors.
///
/// Ids stay stable for the stage's lifetime; a removed clip leaves dangling
/// references behind, which callers report and skip at step time.
#[derive(Default, Debug)]
pub struct ClipStore {
    items: Vec<(ClipId, Clip)>,
}

impl ClipStore {
    pub fn insert(&mut self, id: ClipId, clip: Clip) {
        self.items.push((id, clip));
    }

    pub fn remove(&mut self, id: ClipId) -> bool {
        let before = self.items.len();
        self.items.retain(|(cid, _)| *cid != id);
        self.items.len() != before
    }

    pub fn contains(&self, id: ClipId) -> bool {
        self.items.iter().any(|(cid, _)| *cid == id)
    }

    pub fn get(&self, id: ClipId) -> Option<&Clip> {
        self.items
            .iter()
            .find_map(|(cid, c)| if *cid == id { Some(c) } else { None })
    }

    pub fn get_mut(&mut self, id: ClipId) -> Option<&mut Clip> {
        self.items
            .iter_mut()
            .find_map(|(cid, c)| if *cid == id { Some(c) } else { None })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Clip> {
        self.items.iter_mut().map(|(_, c)| c)
    }
}
