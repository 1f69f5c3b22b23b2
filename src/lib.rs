//! # Sprite actors
//!
//! Position, depth-illusion scaling, frame-animation transitions and tweened
//! motion for the visible, movable actors of a 2D adventure scene.
//!
//! Everything runs on the caller's tick: `update(delta)` mutates one actor,
//! and completion callbacks wait in a [`CallbackQueue`](actions::CallbackQueue)
//! until the driver drains it after all actors have updated.

pub mod actions;
pub mod actor;
pub mod audio;
pub mod error;
pub mod geometry;
pub mod render;
pub mod scene;
pub mod tween;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;

pub use actor::{ActorContext, ActorId, DepthType, SpriteActor, WalkingSpeed};
pub use error::ActorError;
