//! Straight-line position tween over a fixed duration

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{RepeatCount, RepeatPolicy, TweenCore};
use crate::actions::ActionCallback;
use crate::actor::{ActorContext, SpriteActor};
use crate::render::SpriteRenderer;

/// Moves the actor linearly from `start` to `target` over `duration` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectMove {
    start: Vec2,
    target: Vec2,
    pub(crate) core: TweenCore,
}

impl DirectMove {
    pub fn new(
        start: Vec2,
        target: Vec2,
        duration: f32,
        repeat: RepeatPolicy,
        count: RepeatCount,
        callback: Option<ActionCallback>,
    ) -> Self {
        Self {
            start,
            target,
            core: TweenCore::new(repeat, count, duration, callback),
        }
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub(crate) fn update<R: SpriteRenderer>(
        &mut self,
        actor: &mut SpriteActor<R>,
        delta: f32,
        ctx: &mut ActorContext<'_>,
    ) {
        if self.core.is_complete() {
            return;
        }

        let t = self.core.advance(delta);
        actor.set_position(self.start.lerp(self.target, t), &mut *ctx.scenes);

        if self.core.cycle_finished() {
            self.core.end_cycle(ctx.callbacks);
        }
    }
}
