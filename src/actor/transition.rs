//! Frame animation switching with linked sounds and position offsets

use super::{ActorContext, SpriteActor};
use crate::actions::ActionCallback;
use crate::render::SpriteRenderer;
use crate::tween::{RepeatCount, RepeatPolicy};

impl<R: SpriteRenderer> SpriteActor<R> {
    /// Start frame animation `id` with the policy it was authored with.
    pub fn start_frame_animation_default(
        &mut self,
        id: &str,
        callback: Option<ActionCallback>,
        ctx: &mut ActorContext<'_>,
    ) {
        self.start_frame_animation(
            id,
            RepeatPolicy::FromAnimation,
            RepeatCount::Times(1),
            callback,
            ctx,
        );
    }

    /// Switch the renderer to animation `id`.
    ///
    /// The outgoing animation's sound is stopped and its exit offset applied
    /// before the switch; the incoming animation's sound is started and its
    /// entry offset applied after it. Offsets are in asset units and are
    /// multiplied by the world scale. They move the stored position directly,
    /// without recomputing depth or moving the camera.
    pub fn start_frame_animation(
        &mut self,
        id: &str,
        repeat: RepeatPolicy,
        count: RepeatCount,
        callback: Option<ActionCallback>,
        ctx: &mut ActorContext<'_>,
    ) {
        if let Some(outgoing) = self.renderer.current_animation() {
            if let Some(sound) = &outgoing.sound {
                ctx.audio.stop(sound);
            }
            if let Some(offset) = outgoing.out_offset {
                self.position += offset * ctx.world_scale;
            }
        }

        log::debug!("{}: frame animation '{}' ({:?})", self.id, id, repeat);
        self.renderer
            .start_animation(id, repeat, count, callback, ctx.callbacks);

        if let Some(incoming) = self.renderer.current_animation() {
            if let Some(sound) = &incoming.sound {
                ctx.audio.play(sound);
            }
            if let Some(offset) = incoming.in_offset {
                self.position += offset * ctx.world_scale;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use glam::Vec2;

    use super::*;
    use crate::actions::CallbackQueue;
    use crate::audio::SoundPlayer;
    use crate::render::{FrameAnimation, SheetRenderer};
    use crate::scene::{SceneId, StageScene};

    #[derive(Default)]
    struct RecordingAudio {
        events: Vec<String>,
    }

    impl SoundPlayer for RecordingAudio {
        fn play(&mut self, sound: &str) {
            self.events.push(format!("play:{}", sound));
        }

        fn stop(&mut self, sound: &str) {
            self.events.push(format!("stop:{}", sound));
        }
    }

    fn renderer() -> SheetRenderer {
        SheetRenderer::new(16, 16)
            .with_animation(
                FrameAnimation::new("turn", 0, 0, 4, 0.1)
                    .with_sound("swish")
                    .with_offsets(None, Some(Vec2::new(5.0, 0.0))),
            )
            .with_animation(
                FrameAnimation::new("sit", 1, 0, 2, 0.1)
                    .with_sound("creak")
                    .with_offsets(Some(Vec2::new(-3.0, 0.0)), None),
            )
    }

    #[test]
    fn test_offsets_and_sounds_on_switch() {
        let mut scenes: HashMap<SceneId, StageScene> = HashMap::new();
        let mut audio = RecordingAudio::default();
        let mut queue = CallbackQueue::new();
        let mut ctx = ActorContext::new(&mut scenes, &mut audio, &mut queue, 2.0);

        let mut actor = SpriteActor::new(renderer());
        actor.start_frame_animation(
            "turn",
            RepeatPolicy::Repeat,
            RepeatCount::Infinite,
            None,
            &mut ctx,
        );
        assert_eq!(actor.position(), Vec2::ZERO);

        actor.start_frame_animation(
            "sit",
            RepeatPolicy::PlayOnce,
            RepeatCount::Times(1),
            None,
            &mut ctx,
        );
        assert_eq!(actor.position(), Vec2::new(4.0, 0.0));

        drop(ctx);
        assert_eq!(audio.events, vec!["play:swish", "stop:swish", "play:creak"]);
    }

    #[test]
    fn test_unknown_animation_skips_entry_effects() {
        let mut scenes: HashMap<SceneId, StageScene> = HashMap::new();
        let mut audio = RecordingAudio::default();
        let mut queue = CallbackQueue::new();
        let mut ctx = ActorContext::new(&mut scenes, &mut audio, &mut queue, 1.0);

        let mut actor = SpriteActor::new(renderer());
        actor.start_frame_animation_default("turn", None, &mut ctx);
        let callback = Some(ActionCallback::new("cb"));
        actor.start_frame_animation_default("missing", callback, &mut ctx);
        // Exit offset of "turn" still applies
        assert_eq!(actor.position(), Vec2::new(5.0, 0.0));
        assert!(actor.renderer().current_animation().is_none());

        // Nothing playing: no exit effects either
        actor.start_frame_animation_default("sit", None, &mut ctx);
        assert_eq!(actor.position(), Vec2::new(2.0, 0.0));

        drop(ctx);
        assert_eq!(audio.events, vec!["play:swish", "stop:swish", "play:creak"]);
        assert_eq!(queue.len(), 1);
    }
}
