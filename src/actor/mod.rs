//! Sprite actors - position, depth scale, animation and motion of one
//! visible entity in a scene.

mod persistence;
mod position;
mod transition;

use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actions::{ActionCallback, CallbackQueue};
use crate::audio::SoundPlayer;
use crate::error::{ActorError, Result};
use crate::geometry::Rect;
use crate::render::SpriteRenderer;
use crate::scene::{SceneId, SceneLookup};
use crate::tween::{DirectMove, PathFollow, RepeatCount, RepeatPolicy, Tween};

pub use persistence::SpriteActorRecord;

/// Unique identifier for actors in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct ActorId(u64);

static NEXT_ACTOR_ID: AtomicU64 = AtomicU64::new(1);

impl ActorId {
    /// Generate a new unique actor ID
    pub fn new() -> Self {
        ActorId(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Create an ActorId from a raw u64 (for deserialization)
    pub fn from_raw(id: u64) -> Self {
        // Update the counter if this ID is higher than current
        if let Some(next) = id.checked_add(1) {
            NEXT_ACTOR_ID.fetch_max(next, Ordering::Relaxed);
        }
        ActorId(id)
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<u64> for ActorId {
    fn from(id: u64) -> Self {
        ActorId::from_raw(id)
    }
}

impl From<ActorId> for u64 {
    fn from(id: ActorId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Actor({})", self.0)
    }
}

/// How the actor's scale follows the scene's depth data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepthType {
    /// Scale is left alone
    #[default]
    None,
    /// Scale is sampled from the scene's background depth map
    Map,
    /// Scale is interpolated between the scene's near and far values by height
    Vector,
}

/// Walking speed in world units per second. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct WalkingSpeed(f32);

impl WalkingSpeed {
    pub const DEFAULT: f32 = 700.0;

    pub fn new(speed: f32) -> Result<Self> {
        if speed > 0.0 && speed.is_finite() {
            Ok(WalkingSpeed(speed))
        } else {
            Err(ActorError::InvalidWalkingSpeed(speed))
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for WalkingSpeed {
    fn default() -> Self {
        WalkingSpeed(Self::DEFAULT)
    }
}

impl TryFrom<f32> for WalkingSpeed {
    type Error = ActorError;

    fn try_from(speed: f32) -> Result<Self> {
        WalkingSpeed::new(speed)
    }
}

impl From<WalkingSpeed> for f32 {
    fn from(speed: WalkingSpeed) -> Self {
        speed.0
    }
}

/// Collaborators an actor reaches during one call.
pub struct ActorContext<'a> {
    pub scenes: &'a mut dyn SceneLookup,
    pub audio: &'a mut dyn SoundPlayer,
    /// Completion callbacks raised during the call land here
    pub callbacks: &'a mut CallbackQueue,
    /// Assets-to-world ratio applied to animation offsets
    pub world_scale: f32,
}

impl<'a> ActorContext<'a> {
    pub fn new(
        scenes: &'a mut dyn SceneLookup,
        audio: &'a mut dyn SoundPlayer,
        callbacks: &'a mut CallbackQueue,
        world_scale: f32,
    ) -> Self {
        Self {
            scenes,
            audio,
            callbacks,
            world_scale,
        }
    }
}

/// A visible, movable actor drawn by a sprite renderer.
#[derive(Debug, Clone)]
pub struct SpriteActor<R> {
    id: ActorId,
    visible: bool,
    /// Optional bounding box override, relative to the position
    bbox: Option<Rect>,
    renderer: R,
    pos_tween: Option<Tween>,
    position: Vec2,
    scale: f32,
    depth_type: DepthType,
    scene: Option<SceneId>,
    walking_speed: WalkingSpeed,
}

impl<R: SpriteRenderer> SpriteActor<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            id: ActorId::new(),
            visible: true,
            bbox: None,
            renderer,
            pos_tween: None,
            position: Vec2::ZERO,
            scale: 1.0,
            depth_type: DepthType::None,
            scene: None,
            walking_speed: WalkingSpeed::default(),
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn set_renderer(&mut self, renderer: R) {
        self.renderer = renderer;
    }

    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    pub fn set_scene(&mut self, scene: Option<SceneId>) {
        self.scene = scene;
    }

    pub fn depth_type(&self) -> DepthType {
        self.depth_type
    }

    pub fn set_depth_type(&mut self, depth_type: DepthType) {
        self.depth_type = depth_type;
    }

    pub fn walking_speed(&self) -> WalkingSpeed {
        self.walking_speed
    }

    pub fn set_walking_speed(&mut self, speed: WalkingSpeed) {
        self.walking_speed = speed;
    }

    /// The motion task in flight, if any.
    pub fn tween(&self) -> Option<&Tween> {
        self.pos_tween.as_ref()
    }

    /// Drop the motion task in flight. Callbacks it already queued still fire.
    pub fn cancel_tween(&mut self) {
        self.pos_tween = None;
    }

    /// Advance renderer playback and the active tween by `delta` seconds.
    pub fn update(&mut self, delta: f32, ctx: &mut ActorContext<'_>) {
        if !delta.is_finite() || delta < 0.0 {
            log::warn!("{}: ignoring invalid tick delta {}", self.id, delta);
            return;
        }

        self.renderer.update(delta, ctx.callbacks);

        if let Some(mut tween) = self.pos_tween.take() {
            tween.update(self, delta, ctx);
            if tween.is_complete() {
                log::debug!("{}: tween complete at {:?}", self.id, self.position);
            } else {
                self.pos_tween = Some(tween);
            }
        }
    }

    /// Queue the current frame into `batch` if visible.
    pub fn draw(&self, batch: &mut R::Batch) {
        if self.visible {
            self.renderer.draw(batch, self.position, self.scale);
        }
    }

    /// Move linearly to `target` over `duration` seconds.
    pub fn start_pos_animation(
        &mut self,
        repeat: RepeatPolicy,
        count: RepeatCount,
        duration: f32,
        target: Vec2,
        callback: Option<ActionCallback>,
    ) {
        log::debug!(
            "{}: move {:?} -> {:?} in {:.2}s",
            self.id,
            self.position,
            target,
            duration
        );
        let tween = DirectMove::new(self.position, target, duration, repeat, count, callback);
        self.pos_tween = Some(tween.into());
    }

    /// Walk to `target` along the path the scene's background map resolves.
    ///
    /// Without a scene, a map or a non-empty path the actor stays put and the
    /// callback is queued straight away.
    pub fn goto(
        &mut self,
        target: Vec2,
        callback: Option<ActionCallback>,
        ctx: &mut ActorContext<'_>,
    ) {
        log::debug!("{}: GOTO {:.1},{:.1}", self.id, target.x, target.y);

        let waypoints = self
            .scene
            .and_then(|id| ctx.scenes.scene(id))
            .and_then(|scene| scene.background_map())
            .and_then(|map| map.find_path(self.position, target))
            .unwrap_or_default();

        if waypoints.is_empty() {
            // Still report arrival so waiting scripts resume
            ctx.callbacks.push_opt(callback);
            return;
        }

        if let Some(walk) = PathFollow::new(waypoints, self.walking_speed, callback) {
            walk.begin(self);
            self.pos_tween = Some(walk.into());
        }
    }

    pub fn look_at(&mut self, point: Vec2) {
        self.renderer.look_at(self.position, point);
    }

    pub fn look_at_direction(&mut self, direction: &str) {
        self.renderer.look_at_direction(direction);
    }

    pub fn stand(&mut self) {
        self.renderer.stand();
    }

    pub fn start_walk_animation(&mut self, from: Vec2, to: Vec2) {
        self.renderer.start_walk_animation(from, to);
    }
}

impl<R: SpriteRenderer> std::fmt::Display for SpriteActor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pos={:?} scale={:.3} bbox={}",
            self.id,
            self.position,
            self.scale,
            self.bbox()
        )
    }
}
