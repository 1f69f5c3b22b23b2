//! Waypoint-by-waypoint walking tween

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{RepeatCount, RepeatPolicy, TweenCore};
use crate::actions::ActionCallback;
use crate::actor::{ActorContext, SpriteActor, WalkingSpeed};
use crate::render::SpriteRenderer;

/// Walks the actor along a resolved path at a constant speed.
///
/// Each segment lasts `distance / walking_speed` seconds. Time left over at
/// the end of a segment carries into the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathFollow {
    waypoints: Vec<Vec2>,
    /// Duration of segment `i`, from `waypoints[i]` to `waypoints[i + 1]`
    durations: Vec<f32>,
    segment: usize,
    pub(crate) core: TweenCore,
}

impl PathFollow {
    /// Build a walk over `waypoints`. Returns `None` for an empty path.
    pub fn new(
        waypoints: Vec<Vec2>,
        speed: WalkingSpeed,
        callback: Option<ActionCallback>,
    ) -> Option<Self> {
        if waypoints.is_empty() {
            return None;
        }

        let durations: Vec<f32> = waypoints
            .windows(2)
            .map(|w| w[0].distance(w[1]) / speed.get())
            .collect();
        let first = durations.first().copied().unwrap_or(0.0);

        Some(Self {
            waypoints,
            durations,
            segment: 0,
            core: TweenCore::new(
                RepeatPolicy::PlayOnce,
                RepeatCount::Times(1),
                first,
                callback,
            ),
        })
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn segment_durations(&self) -> &[f32] {
        &self.durations
    }

    /// Index of the segment currently being walked.
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// Total walking time of the whole path in seconds.
    pub fn total_duration(&self) -> f32 {
        self.durations.iter().sum()
    }

    /// Switch the renderer to the walk animation for the current segment.
    pub(crate) fn begin<R: SpriteRenderer>(&self, actor: &mut SpriteActor<R>) {
        if let Some((from, to)) = self.current_segment() {
            actor.start_walk_animation(from, to);
        }
    }

    fn current_segment(&self) -> Option<(Vec2, Vec2)> {
        let from = *self.waypoints.get(self.segment)?;
        let to = *self.waypoints.get(self.segment + 1)?;
        Some((from, to))
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

        let mut elapsed = self.core.elapsed + delta;
        while let Some(&duration) = self.durations.get(self.segment) {
            if elapsed < duration {
                break;
            }
            elapsed -= duration;
            self.segment += 1;
            self.begin(actor);
        }

        match (self.current_segment(), self.durations.get(self.segment)) {
            (Some((from, to)), Some(&duration)) => {
                self.core.elapsed = elapsed;
                self.core.duration = duration;
                let t = if duration > 0.0 { elapsed / duration } else { 1.0 };
                actor.set_position(from.lerp(to, t), &mut *ctx.scenes);
            }
            _ => {
                // Past the last segment: snap to the final waypoint
                self.core.elapsed = self.core.duration;
                if let Some(&last) = self.waypoints.last() {
                    actor.set_position(last, &mut *ctx.scenes);
                }
                actor.stand();
                log::debug!("Walk finished after {} waypoints", self.waypoints.len());
                self.core.finish(ctx.callbacks);
            }
        }
    }
}
