//! Position, depth-derived scale and bounding box

use glam::Vec2;

use super::{DepthType, SpriteActor};
use crate::error::{ActorError, Result};
use crate::geometry::Rect;
use crate::render::SpriteRenderer;
use crate::scene::SceneLookup;

impl<R: SpriteRenderer> SpriteActor<R> {
    /// Current position (feet point) in world units.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the actor, then recompute depth scale and notify the camera.
    ///
    /// The position is stored even when the actor has no scene, or its scene
    /// cannot be found; only the scene effects are skipped.
    pub fn set_position(&mut self, position: Vec2, scenes: &mut dyn SceneLookup) {
        self.position = position;

        let Some(id) = self.scene else {
            return;
        };
        let Some(scene) = scenes.scene_mut(id) else {
            return;
        };

        match self.depth_type {
            DepthType::None => {}
            DepthType::Map => {
                if let Some(map) = scene.background_map() {
                    let depth = map.depth(position.x, position.y);
                    self.apply_depth_scale(depth);
                }
            }
            DepthType::Vector => {
                let height = scene.bounds().height;
                if let Some(s) = scene
                    .depth_vector()
                    .and_then(|v| v.scale_at(position.y, height))
                {
                    self.apply_depth_scale(s);
                }
            }
        }

        if scene.camera_follow_target() == Some(self.id) {
            scene.recenter_camera(position);
        }
    }

    /// Re-run scene effects for the stored position, e.g. after a load.
    pub fn refresh_position(&mut self, scenes: &mut dyn SceneLookup) {
        self.set_position(self.position, scenes);
    }

    // A zero sample means the map has no data there. Negative and NaN
    // samples are skipped as well so scale stays positive.
    fn apply_depth_scale(&mut self, depth: f32) {
        if depth > 0.0 && depth.is_finite() {
            self.scale = depth;
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) -> Result<()> {
        if scale > 0.0 && scale.is_finite() {
            self.scale = scale;
            Ok(())
        } else {
            Err(ActorError::InvalidScale(scale))
        }
    }

    /// Rendered width in world units
    pub fn width(&self) -> f32 {
        self.renderer.width() * self.scale
    }

    /// Rendered height in world units
    pub fn height(&self) -> f32 {
        self.renderer.height() * self.scale
    }

    /// Override the derived bounding box with one relative to the position.
    pub fn set_bbox(&mut self, bbox: Option<Rect>) {
        self.bbox = bbox;
    }

    /// World-space bounding box.
    ///
    /// An override box is offset by the position and its size scaled. Without
    /// one the box is the rendered sprite, centred horizontally on the feet.
    pub fn bbox(&self) -> Rect {
        match self.bbox {
            Some(b) => Rect::new(
                self.position.x + b.x,
                self.position.y + b.y,
                b.width * self.scale,
                b.height * self.scale,
            ),
            None => {
                let width = self.width();
                Rect::new(
                    self.position.x - width / 2.0,
                    self.position.y,
                    width,
                    self.height(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::render::SheetRenderer;
    use crate::scene::{DepthGrid, DepthVector, SceneId, StageScene};

    const SCENE: SceneId = SceneId(1);

    fn scenes(scene: StageScene) -> HashMap<SceneId, StageScene> {
        let mut scenes = HashMap::new();
        scenes.insert(SCENE, scene);
        scenes
    }

    fn stage() -> StageScene {
        StageScene::new(Rect::new(0.0, 0.0, 200.0, 100.0), Vec2::new(50.0, 50.0))
    }

    fn actor() -> SpriteActor<SheetRenderer> {
        let mut actor = SpriteActor::new(SheetRenderer::new(20, 40));
        actor.set_scene(Some(SCENE));
        actor
    }

    #[test]
    fn test_no_depth_keeps_scale() {
        let mut scenes = scenes(stage().with_depth_vector(DepthVector::new(0.5, 1.5)));
        let mut actor = actor();
        actor.set_scale(1.3).unwrap();

        for p in [Vec2::ZERO, Vec2::new(10.0, 50.0), Vec2::new(-20.0, 300.0)] {
            actor.set_position(p, &mut scenes);
            assert_eq!(actor.position(), p);
            assert_eq!(actor.scale(), 1.3);
        }
    }

    #[test]
    fn test_vector_depth() {
        let mut scenes = scenes(stage().with_depth_vector(DepthVector::new(0.5, 1.5)));
        let mut actor = actor();
        actor.set_depth_type(DepthType::Vector);

        actor.set_position(Vec2::new(10.0, 0.0), &mut scenes);
        assert!((actor.scale() - 0.5).abs() < 1e-6);
        actor.set_position(Vec2::new(10.0, 100.0), &mut scenes);
        assert!((actor.scale() - 1.5).abs() < 1e-6);
        actor.set_position(Vec2::new(10.0, 50.0), &mut scenes);
        assert!((actor.scale() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vector_depth_zero_keeps_previous_scale() {
        let mut scenes = scenes(stage().with_depth_vector(DepthVector::new(-1.0, 1.0)));
        let mut actor = actor();
        actor.set_depth_type(DepthType::Vector);

        actor.set_position(Vec2::new(0.0, 100.0), &mut scenes);
        assert!((actor.scale() - 1.0).abs() < 1e-6);
        actor.set_position(Vec2::new(0.0, 80.0), &mut scenes);
        assert!((actor.scale() - 0.6).abs() < 1e-5);
        // Halfway up the interpolation crosses zero
        actor.set_position(Vec2::new(0.0, 50.0), &mut scenes);
        assert!((actor.scale() - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_map_depth_skips_zero_samples() {
        let mut grid = DepthGrid::new(10.0, 20, 10);
        grid.set_depth(1, 1, 0.8);
        let mut scenes = scenes(stage().with_background(grid));
        let mut actor = actor();
        actor.set_depth_type(DepthType::Map);

        actor.set_position(Vec2::new(15.0, 15.0), &mut scenes);
        assert_eq!(actor.scale(), 0.8);

        actor.set_position(Vec2::new(55.0, 55.0), &mut scenes);
        assert_eq!(actor.scale(), 0.8);
        assert_eq!(actor.position(), Vec2::new(55.0, 55.0));
    }

    #[test]
    fn test_map_depth_skips_negative_and_nan_samples() {
        let mut grid = DepthGrid::new(10.0, 20, 10);
        grid.set_depth(1, 1, 0.8);
        grid.set_depth(2, 2, -0.5);
        grid.set_depth(3, 3, f32::NAN);
        let mut scenes = scenes(stage().with_background(grid));
        let mut actor = actor();
        actor.set_depth_type(DepthType::Map);

        actor.set_position(Vec2::new(15.0, 15.0), &mut scenes);
        assert_eq!(actor.scale(), 0.8);

        actor.set_position(Vec2::new(25.0, 25.0), &mut scenes);
        assert_eq!(actor.scale(), 0.8);
        assert_eq!(actor.position(), Vec2::new(25.0, 25.0));

        actor.set_position(Vec2::new(35.0, 35.0), &mut scenes);
        assert_eq!(actor.scale(), 0.8);
    }

    #[test]
    fn test_missing_scene_is_silent() {
        let mut scenes: HashMap<SceneId, StageScene> = HashMap::new();
        let mut actor = actor();
        actor.set_depth_type(DepthType::Vector);

        actor.set_position(Vec2::new(3.0, 4.0), &mut scenes);
        assert_eq!(actor.position(), Vec2::new(3.0, 4.0));
        assert_eq!(actor.scale(), 1.0);
    }

    #[test]
    fn test_camera_recenters_on_followed_actor() {
        let mut scene = stage();
        let mut actor = actor();
        scene.set_follow(Some(actor.id()));
        let mut scenes = scenes(scene);

        actor.set_position(Vec2::new(60.0, 40.0), &mut scenes);
        assert_eq!(scenes[&SCENE].camera().position(), Vec2::new(60.0, 40.0));
    }

    #[test]
    fn test_camera_ignores_other_actors() {
        let mut scene = stage();
        let before = scene.camera().position();
        scene.set_follow(Some(crate::actor::ActorId::new()));
        let mut scenes = scenes(scene);

        let mut actor = actor();
        actor.set_position(Vec2::new(60.0, 40.0), &mut scenes);
        assert_eq!(scenes[&SCENE].camera().position(), before);
    }

    #[test]
    fn test_derived_bbox() {
        let mut scenes: HashMap<SceneId, StageScene> = HashMap::new();
        let mut actor = actor();
        actor.set_scale(2.0).unwrap();
        actor.set_position(Vec2::new(100.0, 10.0), &mut scenes);

        assert_eq!(actor.bbox(), Rect::new(80.0, 10.0, 40.0, 80.0));
    }

    #[test]
    fn test_override_bbox() {
        let mut scenes: HashMap<SceneId, StageScene> = HashMap::new();
        let mut actor = actor();
        actor.set_bbox(Some(Rect::new(-5.0, 0.0, 10.0, 20.0)));
        actor.set_scale(0.5).unwrap();
        actor.set_position(Vec2::new(100.0, 10.0), &mut scenes);

        assert_eq!(actor.bbox(), Rect::new(95.0, 10.0, 5.0, 10.0));
    }

    #[test]
    fn test_set_scale_rejects_non_positive() {
        let mut actor = actor();
        assert!(actor.set_scale(0.0).is_err());
        assert!(actor.set_scale(-1.0).is_err());
        assert_eq!(actor.scale(), 1.0);
    }
}
