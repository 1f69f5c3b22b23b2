//! Spritesheet-backed renderer with directional walk/stand animations

use ahash::AHashMap;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{FrameAnimation, SpriteRenderer};
use crate::actions::{ActionCallback, CallbackQueue};
use crate::tween::{RepeatCount, RepeatPolicy};

/// Direction a sprite is facing, used to pick `walk.<dir>` / `stand.<dir>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
    /// Towards the viewer (moving down the screen)
    #[default]
    Front,
    /// Away from the viewer (moving up the screen)
    Back,
}

impl Facing {
    /// Pick the facing for moving from `from` to `to` from the dominant axis.
    /// Y grows upwards, so moving up means walking away from the viewer.
    pub fn between(from: Vec2, to: Vec2) -> Self {
        let d = to - from;
        if d.x.abs() >= d.y.abs() {
            if d.x < 0.0 {
                Facing::Left
            } else {
                Facing::Right
            }
        } else if d.y > 0.0 {
            Facing::Back
        } else {
            Facing::Front
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Right => "right",
            Facing::Front => "front",
            Facing::Back => "back",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Facing::Left),
            "right" => Some(Facing::Right),
            "front" => Some(Facing::Front),
            "back" => Some(Facing::Back),
            _ => None,
        }
    }
}

/// One queued draw of the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetDraw {
    /// Frame cell (col, row) in the spritesheet
    pub cell: (u32, u32),
    pub position: Vec2,
    pub scale: f32,
    pub flip_x: bool,
}

/// Playback state of the animation currently shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Playback {
    id: String,
    frame: u16,
    frame_timer: f32,
    repeat: RepeatPolicy,
    count: RepeatCount,
    reversed: bool,
    flip_x: bool,
    finished: bool,
    callback: Option<ActionCallback>,
}

/// Renderer playing [`FrameAnimation`]s from a grid spritesheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetRenderer {
    /// Width of each frame in pixels
    frame_width: u32,
    /// Height of each frame in pixels
    frame_height: u32,
    animations: AHashMap<String, FrameAnimation>,
    current: Option<Playback>,
    facing: Facing,
}

impl SheetRenderer {
    pub fn new(frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            animations: AHashMap::new(),
            current: None,
            facing: Facing::default(),
        }
    }

    /// Register (or replace) an animation definition.
    ///
    /// Frame times below [`FrameAnimation::MIN_FRAME_TIME`] are raised to it;
    /// a non-finite frame time makes the animation a static frame.
    pub fn add_animation(&mut self, mut animation: FrameAnimation) {
        if !animation.frame_time.is_finite() {
            log::warn!("Animation '{}' has no usable frame time", animation.id);
            animation.frame_time = 0.0;
        } else if animation.frame_time > 0.0
            && animation.frame_time < FrameAnimation::MIN_FRAME_TIME
        {
            log::warn!(
                "Animation '{}' frame time {} raised to {}",
                animation.id,
                animation.frame_time,
                FrameAnimation::MIN_FRAME_TIME
            );
            animation.frame_time = FrameAnimation::MIN_FRAME_TIME;
        }
        self.animations.insert(animation.id.clone(), animation);
    }

    pub fn with_animation(mut self, animation: FrameAnimation) -> Self {
        self.add_animation(animation);
        self
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Current frame index within the playing animation.
    pub fn current_frame(&self) -> Option<u16> {
        self.current.as_ref().map(|p| p.frame)
    }

    /// True once a non-looping animation has shown its last frame.
    pub fn is_finished(&self) -> bool {
        self.current.as_ref().map_or(true, |p| p.finished)
    }

    /// Get the current frame's cell (col, row) in the spritesheet
    pub fn current_frame_coords(&self) -> Option<(u32, u32)> {
        let playback = self.current.as_ref()?;
        let anim = self.animations.get(&playback.id)?;
        Some((
            anim.start_col as u32 + playback.frame as u32,
            anim.row as u32,
        ))
    }

    /// Find the definition for `id`, falling back to the mirrored
    /// left/right variant drawn flipped.
    fn resolve(&self, id: &str) -> Option<(String, bool)> {
        if self.animations.contains_key(id) {
            return Some((id.to_string(), false));
        }
        let mirrored = if let Some(base) = id.strip_suffix(".left") {
            format!("{}.right", base)
        } else if let Some(base) = id.strip_suffix(".right") {
            format!("{}.left", base)
        } else {
            return None;
        };
        self.animations
            .contains_key(&mirrored)
            .then_some((mirrored, true))
    }

    /// Switch playback to `id`, handing the callback back if there is no such animation.
    fn switch_to(
        &mut self,
        id: &str,
        repeat: RepeatPolicy,
        count: RepeatCount,
        callback: Option<ActionCallback>,
    ) -> Result<(), Option<ActionCallback>> {
        let Some((resolved, flip_x)) = self.resolve(id) else {
            self.current = None;
            return Err(callback);
        };
        let Some(anim) = self.animations.get(&resolved) else {
            self.current = None;
            return Err(callback);
        };

        let (repeat, count) = if repeat == RepeatPolicy::FromAnimation {
            (anim.repeat, anim.count)
        } else {
            (repeat, count)
        };
        let reversed = repeat.starts_reversed();
        let frame = if reversed {
            anim.frame_count.saturating_sub(1)
        } else {
            0
        };

        self.current = Some(Playback {
            id: resolved,
            frame,
            frame_timer: 0.0,
            repeat,
            count,
            reversed,
            flip_x,
            finished: false,
            callback,
        });
        Ok(())
    }

    fn start_directional(&mut self, prefix: &str, repeat: RepeatPolicy, count: RepeatCount) {
        let id = format!("{}.{}", prefix, self.facing.name());
        if self.switch_to(&id, repeat, count, None).is_err() {
            log::warn!("No '{}' animation defined", id);
        }
    }
}

/// Drop whole loops of a repeating animation from `steps`, charging them to
/// the repeat count. Playback state is periodic over a loop, so at most two
/// loops are left to step through frame by frame.
fn skip_whole_loops(playback: &mut Playback, frame_count: u16, steps: u64) -> u64 {
    if !playback.repeat.repeats() {
        return steps;
    }
    // A yoyo loop runs there and back, wrapping twice
    let (period, wraps) = if playback.repeat == RepeatPolicy::Yoyo {
        (2 * u64::from(frame_count), 2)
    } else {
        (u64::from(frame_count), 1)
    };

    match &mut playback.count {
        RepeatCount::Infinite => steps % period,
        RepeatCount::Times(n) => {
            // Leave the last cycle to the stepping loop so it finishes there
            let skipped = (u64::from(*n).saturating_sub(1) / wraps).min(steps / period);
            *n -= (skipped * wraps) as u32;
            steps - skipped * period
        }
    }
}

impl SpriteRenderer for SheetRenderer {
    type Batch = Vec<SheetDraw>;

    fn current_animation(&self) -> Option<&FrameAnimation> {
        self.current
            .as_ref()
            .and_then(|p| self.animations.get(&p.id))
    }

    fn start_animation(
        &mut self,
        id: &str,
        repeat: RepeatPolicy,
        count: RepeatCount,
        callback: Option<ActionCallback>,
        callbacks: &mut CallbackQueue,
    ) {
        if let Err(callback) = self.switch_to(id, repeat, count, callback) {
            // Nothing will ever finish, so release whoever is waiting
            log::warn!("Frame animation '{}' not found", id);
            callbacks.push_opt(callback);
        }
    }

    fn width(&self) -> f32 {
        self.frame_width as f32
    }

    fn height(&self) -> f32 {
        self.frame_height as f32
    }

    fn update(&mut self, delta: f32, callbacks: &mut CallbackQueue) {
        if !delta.is_finite() || delta < 0.0 {
            return;
        }
        let Some(playback) = self.current.as_mut() else {
            return;
        };
        if playback.finished {
            return;
        }
        let Some(anim) = self.animations.get(&playback.id) else {
            return;
        };

        if anim.frame_time <= 0.0 || anim.frame_count <= 1 {
            // Static frame: a looping policy holds it, anything else is done
            if !playback.repeat.repeats() {
                playback.finished = true;
                callbacks.push_opt(playback.callback.take());
            }
            return;
        }

        playback.frame_timer += delta;
        let steps = (playback.frame_timer / anim.frame_time) as u64;
        playback.frame_timer %= anim.frame_time;
        let mut steps = skip_whole_loops(playback, anim.frame_count, steps);

        let last = anim.frame_count - 1;
        while steps > 0 && !playback.finished {
            steps -= 1;

            let at_end = if playback.reversed {
                playback.frame == 0
            } else {
                playback.frame >= last
            };

            if !at_end {
                if playback.reversed {
                    playback.frame -= 1;
                } else {
                    playback.frame += 1;
                }
                continue;
            }

            if playback.repeat.repeats() && playback.count.next_cycle() {
                if playback.repeat == RepeatPolicy::Yoyo {
                    playback.reversed = !playback.reversed;
                } else {
                    playback.frame = if playback.reversed { last } else { 0 };
                }
            } else {
                playback.finished = true;
                playback.frame_timer = 0.0;
                callbacks.push_opt(playback.callback.take());
            }
        }
    }

    fn draw(&self, batch: &mut Self::Batch, position: Vec2, scale: f32) {
        let (Some(cell), Some(playback)) = (self.current_frame_coords(), self.current.as_ref())
        else {
            return;
        };
        batch.push(SheetDraw {
            cell,
            position,
            scale,
            flip_x: playback.flip_x,
        });
    }

    fn look_at(&mut self, from: Vec2, to: Vec2) {
        self.facing = Facing::between(from, to);
        self.stand();
    }

    fn look_at_direction(&mut self, direction: &str) {
        match Facing::from_name(direction) {
            Some(facing) => {
                self.facing = facing;
                self.stand();
            }
            None => log::warn!("Unknown direction '{}'", direction),
        }
    }

    fn stand(&mut self) {
        self.start_directional("stand", RepeatPolicy::FromAnimation, RepeatCount::Times(1));
    }

    fn start_walk_animation(&mut self, from: Vec2, to: Vec2) {
        self.facing = Facing::between(from, to);
        self.start_directional("walk", RepeatPolicy::Repeat, RepeatCount::Infinite);
    }
}
