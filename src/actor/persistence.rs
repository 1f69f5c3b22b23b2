//! Save/restore of actor state, resolution-independent on disk
//!
//! Positions are stored divided by the world scale so saves made at one
//! asset resolution load correctly at another.

use glam::Vec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ActorId, DepthType, SpriteActor, WalkingSpeed};
use crate::error::{ActorError, Result};
use crate::geometry::Rect;
use crate::render::SpriteRenderer;
use crate::tween::Tween;

/// Persisted form of a [`SpriteActor`], fields in write order.
///
/// `R` is the renderer state, opaque to the actor. Writing borrows it
/// (`SpriteActorRecord<&R>`), reading owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteActorRecord<R> {
    pub id: ActorId,
    pub visible: bool,
    pub bbox: Option<Rect>,
    pub scale: f32,
    /// Position divided by the world scale
    pub pos: Vec2,
    pub walking_speed: WalkingSpeed,
    pub pos_tween: Option<Tween>,
    pub depth_type: DepthType,
    pub renderer: R,
}

fn check_world_scale(world_scale: f32) -> Result<()> {
    if world_scale > 0.0 && world_scale.is_finite() {
        Ok(())
    } else {
        Err(ActorError::InvalidWorldScale(world_scale))
    }
}

impl<R: SpriteRenderer + Serialize> SpriteActor<R> {
    /// Snapshot the persisted fields, normalizing the position.
    pub fn to_record(&self, world_scale: f32) -> Result<SpriteActorRecord<&R>> {
        check_world_scale(world_scale)?;
        Ok(SpriteActorRecord {
            id: self.id,
            visible: self.visible,
            bbox: self.bbox,
            scale: self.scale,
            pos: self.position / world_scale,
            walking_speed: self.walking_speed,
            pos_tween: self.pos_tween.clone(),
            depth_type: self.depth_type,
            renderer: &self.renderer,
        })
    }

    /// Serialize to RON.
    pub fn save_ron(&self, world_scale: f32) -> Result<String> {
        let record = self.to_record(world_scale)?;
        let serialized = ron::ser::to_string_pretty(&record, Default::default())?;
        log::info!("[SAVE] {} ({} bytes)", self.id, serialized.len());
        Ok(serialized)
    }
}

impl<R: SpriteRenderer + DeserializeOwned> SpriteActor<R> {
    /// Rebuild an actor from a record, converting back to world units.
    ///
    /// The scene link is not persisted; callers set it and then call
    /// [`SpriteActor::refresh_position`] to recompute depth and camera.
    pub fn from_record(record: SpriteActorRecord<R>, world_scale: f32) -> Result<Self> {
        check_world_scale(world_scale)?;
        if !(record.scale > 0.0 && record.scale.is_finite()) {
            return Err(ActorError::InvalidScale(record.scale));
        }
        Ok(Self {
            id: record.id,
            visible: record.visible,
            bbox: record.bbox,
            renderer: record.renderer,
            pos_tween: record.pos_tween,
            position: record.pos * world_scale,
            scale: record.scale,
            depth_type: record.depth_type,
            scene: None,
            walking_speed: record.walking_speed,
        })
    }

    /// Deserialize from RON.
    pub fn load_ron(source: &str, world_scale: f32) -> Result<Self> {
        let record: SpriteActorRecord<R> = ron::from_str(source)?;
        let actor = Self::from_record(record, world_scale)?;
        log::info!("[LOAD] {} at {:?}", actor.id, actor.position);
        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{FrameAnimation, SheetRenderer};
    use crate::tween::{RepeatCount, RepeatPolicy};

    fn actor() -> SpriteActor<SheetRenderer> {
        let renderer = SheetRenderer::new(16, 32)
            .with_animation(FrameAnimation::new("stand.front", 0, 0, 1, 0.0));
        SpriteActor::new(renderer)
    }

    #[test]
    fn test_position_is_normalized_by_world_scale() {
        let mut actor = actor();
        actor.position = Vec2::new(320.0, 480.0);
        actor.set_scale(1.2).unwrap();

        let record = actor.to_record(2.0).unwrap();
        assert_eq!(record.pos, Vec2::new(160.0, 240.0));
        assert_eq!(record.scale, 1.2);
    }

    #[test]
    fn test_ron_roundtrip_restores_world_units() {
        let mut actor = actor();
        actor.position = Vec2::new(320.0, 480.0);
        actor.set_scale(1.2).unwrap();
        actor.set_depth_type(DepthType::Vector);
        actor.set_walking_speed(WalkingSpeed::new(250.0).unwrap());
        actor.start_pos_animation(
            RepeatPolicy::PlayOnce,
            RepeatCount::Times(1),
            2.0,
            Vec2::new(0.0, 480.0),
            None,
        );

        let saved = actor.save_ron(2.0).unwrap();
        let loaded: SpriteActor<SheetRenderer> = SpriteActor::load_ron(&saved, 2.0).unwrap();

        assert!((loaded.position() - Vec2::new(320.0, 480.0)).length() < 1e-4);
        assert_eq!(loaded.scale(), 1.2);
        assert_eq!(loaded.id(), actor.id());
        assert_eq!(loaded.depth_type(), DepthType::Vector);
        assert_eq!(loaded.walking_speed().get(), 250.0);
        assert_eq!(loaded.tween(), actor.tween());
        assert!(loaded.scene().is_none());
    }

    #[test]
    fn test_depth_type_names() {
        let saved = actor().save_ron(1.0).unwrap();
        assert!(saved.contains("depthType: NONE"));
        assert!(saved.contains("walkingSpeed: 700.0"));
    }

    #[test]
    fn test_invalid_walking_speed_is_rejected_on_load() {
        let saved = actor().save_ron(1.0).unwrap();
        let tampered = saved.replace("walkingSpeed: 700.0", "walkingSpeed: -1.0");
        assert!(SpriteActor::<SheetRenderer>::load_ron(&tampered, 1.0).is_err());
    }

    #[test]
    fn test_load_max_actor_id() {
        let actor = actor();
        let saved = actor.save_ron(1.0).unwrap();
        let tampered = saved.replace(
            &format!("id: {},", actor.id().raw()),
            &format!("id: {},", u64::MAX),
        );
        assert_ne!(saved, tampered);

        let loaded = SpriteActor::<SheetRenderer>::load_ron(&tampered, 1.0).unwrap();
        assert_eq!(loaded.id().raw(), u64::MAX);

        // Fresh ids keep counting from where they were
        let next = ActorId::new();
        assert!(next.raw() > actor.id().raw());
        assert_ne!(next.raw(), u64::MAX);
    }

    #[test]
    fn test_invalid_world_scale() {
        assert!(matches!(
            actor().save_ron(0.0),
            Err(ActorError::InvalidWorldScale(_))
        ));
    }
}
