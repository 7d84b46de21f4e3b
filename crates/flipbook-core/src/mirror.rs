//! Mirror synchronizer.
//!
//! Slaves dependent clips' visible attributes (frame, flip, color, sort
//! order) to one source clip every step. Dependents never advance on their
//! own: construction strips their autonomous playback, and the per-step copy
//! only reads the source and writes the dependents.

use crate::clip::{ClipStore, RenderKind};
use crate::config::MirrorConfig;
use crate::error::ConfigError;
use crate::ids::{ClipId, MirrorId};
use crate::outputs::{Event, Outputs};

#[derive(Debug)]
pub struct Mirror {
    id: MirrorId,
    source: ClipId,
    dependents: Vec<ClipId>,
    mirror_frame: bool,
    mirror_flip: bool,
    mirror_color: bool,
    mirror_sort_order: bool,
    active: bool,
}

impl Mirror {
    /// Validates the config and prepares every resolvable dependent for
    /// slaving: deactivated, play-on-awake off, looping off. A dependent id
    /// that does not resolve is a warning, not an error.
    pub fn new(id: MirrorId, cfg: MirrorConfig, clips: &mut ClipStore) -> Result<Self, ConfigError> {
        if cfg.dependents.is_empty() {
            return Err(ConfigError::NoDependents);
        }
        if !clips.contains(cfg.source) {
            return Err(ConfigError::UnknownClip { id: cfg.source });
        }
        for dep in &cfg.dependents {
            match clips.get_mut(*dep) {
                Some(clip) => {
                    clip.set_active(false);
                    clip.set_play_on_awake(false);
                    clip.set_looping(false);
                    clip.pause();
                }
                None => {
                    log::warn!("mirror {id:?}: dependent clip {dep:?} does not resolve");
                }
            }
        }
        Ok(Self {
            id,
            source: cfg.source,
            dependents: cfg.dependents,
            mirror_frame: cfg.mirror_frame,
            mirror_flip: cfg.mirror_flip,
            mirror_color: cfg.mirror_color,
            mirror_sort_order: cfg.mirror_sort_order,
            active: cfg.active,
        })
    }

    pub fn id(&self) -> MirrorId {
        self.id
    }

    /// The only runtime mutation a mirror supports.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Per-step attribute copy, run by the stage after animator ticks.
    ///
    /// A missing source is a latent configuration condition: the whole step
    /// is skipped with a warning. A missing dependent is skipped while the
    /// rest still update. Color and sort order only copy between sprite
    /// clips; a render-kind mismatch skips those two attributes for the
    /// offending dependent and reports an error event.
    pub fn step(&mut self, clips: &mut ClipStore, out: &mut Outputs) {
        if !self.active {
            return;
        }
        let Some(source) = clips.get(self.source) else {
            log::warn!(
                "mirror {:?}: source clip {:?} does not resolve",
                self.id,
                self.source
            );
            return;
        };

        // Snapshot the source first; dependents need the store mutably.
        let src_frame = source.frame();
        let src_flip_x = source.flip_x();
        let src_flip_y = source.flip_y();
        let src_color = source.color();
        let src_sort = source.sort_order();
        let src_render = source.render();

        for dep_id in &self.dependents {
            let Some(dep) = clips.get_mut(*dep_id) else {
                log::warn!(
                    "mirror {:?}: dependent clip {:?} does not resolve",
                    self.id,
                    dep_id
                );
                continue;
            };

            if self.mirror_frame {
                match src_frame {
                    Some(frame) => dep.show_frame(frame),
                    None => dep.hide(),
                }
            }

            if self.mirror_flip {
                dep.set_flip_x(src_flip_x);
                dep.set_flip_y(src_flip_y);
            }

            if (self.mirror_color || self.mirror_sort_order)
                && (src_render != RenderKind::Sprite || dep.render() != RenderKind::Sprite)
            {
                let message = format!(
                    "mirror {:?}: color/sort-order mirroring requires sprite clips on both sides \
                     (source {:?} is {:?}, dependent {:?} is {:?})",
                    self.id,
                    self.source,
                    src_render,
                    dep_id,
                    dep.render()
                );
                log::warn!("{message}");
                out.push_event(Event::Error { message });
                continue;
            }

            if self.mirror_color {
                dep.set_color(src_color);
            }
            if self.mirror_sort_order {
                dep.set_sort_order(src_sort);
            }
        }
    }
}
