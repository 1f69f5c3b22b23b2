//! Renderer collaborator - owns frame animation definitions and playback

pub mod sprite;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actions::{ActionCallback, CallbackQueue};
use crate::tween::{RepeatCount, RepeatPolicy};

pub use sprite::{Facing, SheetDraw, SheetRenderer};

/// Definition of an animation sequence within a spritesheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAnimation {
    pub id: String,
    /// Row in the spritesheet
    pub row: u16,
    /// Starting column
    pub start_col: u16,
    /// Number of frames in this animation
    pub frame_count: u16,
    /// Duration of each frame in seconds
    pub frame_time: f32,
    /// Policy used when playback is started with `RepeatPolicy::FromAnimation`
    #[serde(default)]
    pub repeat: RepeatPolicy,
    #[serde(default)]
    pub count: RepeatCount,
    /// Sound played while the animation runs
    #[serde(default)]
    pub sound: Option<String>,
    /// Offset (asset units) applied to the actor when the animation starts
    #[serde(default)]
    pub in_offset: Option<Vec2>,
    /// Offset (asset units) applied to the actor when the animation is left
    #[serde(default)]
    pub out_offset: Option<Vec2>,
}

impl FrameAnimation {
    /// Shortest frame duration a renderer will step at, in seconds
    pub const MIN_FRAME_TIME: f32 = 0.001;

    pub fn new(
        id: impl Into<String>,
        row: u16,
        start_col: u16,
        frame_count: u16,
        frame_time: f32,
    ) -> Self {
        Self {
            id: id.into(),
            row,
            start_col,
            frame_count,
            frame_time,
            repeat: RepeatPolicy::Repeat,
            count: RepeatCount::Infinite,
            sound: None,
            in_offset: None,
            out_offset: None,
        }
    }

    pub fn with_repeat(mut self, repeat: RepeatPolicy, count: RepeatCount) -> Self {
        self.repeat = repeat;
        self.count = count;
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn with_offsets(mut self, in_offset: Option<Vec2>, out_offset: Option<Vec2>) -> Self {
        self.in_offset = in_offset;
        self.out_offset = out_offset;
        self
    }
}

/// What a sprite actor needs from whatever draws it.
///
/// Completion callbacks registered with `start_animation` must be pushed onto
/// the queue handed to `update`, never called directly.
pub trait SpriteRenderer {
    /// Render target the actor draws into
    type Batch;

    /// The animation currently playing, if any.
    fn current_animation(&self) -> Option<&FrameAnimation>;

    /// Switch to animation `id`. An unknown id leaves no current animation.
    fn start_animation(
        &mut self,
        id: &str,
        repeat: RepeatPolicy,
        count: RepeatCount,
        callback: Option<ActionCallback>,
        callbacks: &mut CallbackQueue,
    );

    /// Unscaled frame width in world units
    fn width(&self) -> f32;

    /// Unscaled frame height in world units
    fn height(&self) -> f32;

    fn update(&mut self, delta: f32, callbacks: &mut CallbackQueue);

    fn draw(&self, batch: &mut Self::Batch, position: Vec2, scale: f32);

    /// Face from `from` towards `to` using the standing animation.
    fn look_at(&mut self, from: Vec2, to: Vec2);

    /// Face a named direction using the standing animation.
    fn look_at_direction(&mut self, direction: &str);

    /// Stand still facing the current direction.
    fn stand(&mut self);

    /// Play the walk animation for moving from `from` to `to`.
    fn start_walk_animation(&mut self, from: Vec2, to: Vec2);
}
