//! Time-based motion tasks driving an actor's position.
//!
//! A [`Tween`] is a closed set of variants sharing a [`TweenCore`]. The actor
//! owns at most one and drops it the tick it completes. Completion callbacks
//! are pushed onto the [`CallbackQueue`](crate::actions::CallbackQueue),
//! never invoked from inside the update.

pub mod direct;
pub mod path;
mod repeat;

use serde::{Deserialize, Serialize};

use crate::actions::{ActionCallback, CallbackQueue};
use crate::actor::{ActorContext, SpriteActor};
use crate::render::SpriteRenderer;

pub use direct::DirectMove;
pub use path::PathFollow;
pub use repeat::{RepeatCount, RepeatPolicy};

/// State common to every tween variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweenCore {
    repeat: RepeatPolicy,
    count: RepeatCount,
    /// Seconds into the current cycle, never above `duration`
    elapsed: f32,
    /// Length of the current cycle in seconds
    duration: f32,
    reversed: bool,
    complete: bool,
    callback: Option<ActionCallback>,
}

impl TweenCore {
    pub fn new(
        repeat: RepeatPolicy,
        count: RepeatCount,
        duration: f32,
        callback: Option<ActionCallback>,
    ) -> Self {
        Self {
            repeat,
            count,
            elapsed: 0.0,
            // f32::max discards NaN
            duration: duration.max(0.0),
            reversed: repeat.starts_reversed(),
            complete: false,
            callback,
        }
    }

    pub fn repeat(&self) -> RepeatPolicy {
        self.repeat
    }

    pub fn remaining(&self) -> RepeatCount {
        self.count
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn callback(&self) -> Option<&ActionCallback> {
        self.callback.as_ref()
    }

    /// Advance the cycle clock, clamping at the cycle end.
    /// Returns the interpolation fraction with direction applied.
    fn advance(&mut self, delta: f32) -> f32 {
        self.elapsed = (self.elapsed + delta).min(self.duration);
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        };
        if self.reversed {
            1.0 - t
        } else {
            t
        }
    }

    fn cycle_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Start the next cycle if the policy and count allow it, otherwise finish.
    fn end_cycle(&mut self, callbacks: &mut CallbackQueue) {
        if self.repeat.repeats() && self.count.next_cycle() {
            self.elapsed = 0.0;
            if self.repeat == RepeatPolicy::Yoyo {
                self.reversed = !self.reversed;
            }
        } else {
            self.finish(callbacks);
        }
    }

    /// Mark complete and queue the callback. Idempotent.
    fn finish(&mut self, callbacks: &mut CallbackQueue) {
        if self.complete {
            return;
        }
        self.complete = true;
        callbacks.push_opt(self.callback.take());
    }
}

/// The motion task an actor is currently running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tween {
    DirectMove(DirectMove),
    PathFollow(PathFollow),
}

impl Tween {
    /// Advance the tween by `delta` seconds and apply the resulting position.
    pub fn update<R: SpriteRenderer>(
        &mut self,
        actor: &mut SpriteActor<R>,
        delta: f32,
        ctx: &mut ActorContext<'_>,
    ) {
        match self {
            Tween::DirectMove(t) => t.update(actor, delta, ctx),
            Tween::PathFollow(t) => t.update(actor, delta, ctx),
        }
    }

    pub fn core(&self) -> &TweenCore {
        match self {
            Tween::DirectMove(t) => &t.core,
            Tween::PathFollow(t) => &t.core,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.core().is_complete()
    }
}

impl From<DirectMove> for Tween {
    fn from(t: DirectMove) -> Self {
        Tween::DirectMove(t)
    }
}

impl From<PathFollow> for Tween {
    fn from(t: PathFollow) -> Self {
        Tween::PathFollow(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_clamps_to_duration() {
        let mut core = TweenCore::new(RepeatPolicy::PlayOnce, RepeatCount::Times(1), 1.0, None);
        let t = core.advance(5.0);
        assert_eq!(t, 1.0);
        assert_eq!(core.elapsed(), 1.0);
        assert!(core.cycle_finished());
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut core = TweenCore::new(RepeatPolicy::PlayOnce, RepeatCount::Times(1), 0.0, None);
        assert_eq!(core.advance(0.0), 1.0);
        assert!(core.cycle_finished());
    }

    #[test]
    fn test_yoyo_flips_direction() {
        let mut queue = CallbackQueue::new();
        let mut core = TweenCore::new(RepeatPolicy::Yoyo, RepeatCount::Times(2), 1.0, None);

        assert!((core.advance(0.25) - 0.25).abs() < 1e-6);
        core.advance(0.75);
        core.end_cycle(&mut queue);
        assert!(!core.is_complete());

        assert!((core.advance(0.25) - 0.75).abs() < 1e-6);
        core.advance(0.75);
        core.end_cycle(&mut queue);
        assert!(core.is_complete());
    }

    #[test]
    fn test_finish_queues_callback_once() {
        let mut queue = CallbackQueue::new();
        let mut core = TweenCore::new(
            RepeatPolicy::PlayOnce,
            RepeatCount::Times(1),
            1.0,
            Some(ActionCallback::new("done")),
        );
        core.finish(&mut queue);
        core.finish(&mut queue);
        assert_eq!(queue.len(), 1);
    }
}
