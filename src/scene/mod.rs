//! Scene collaborator - depth data, camera follow and path resolution
//!
//! Actors never own their scene. They keep a [`SceneId`] and resolve it
//! through a [`SceneLookup`] for the duration of a single call.

mod camera;
mod stage;

use std::collections::HashMap;
use std::hash::BuildHasher;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actor::ActorId;
use crate::geometry::Rect;

pub use camera::FollowCamera;
pub use stage::{DepthGrid, StageScene};

/// Identifier of a loaded scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(pub u32);

/// Scale at the bottom (`near`, y = 0) and top (`far`, y = height) of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthVector {
    pub near: f32,
    pub far: f32,
}

impl DepthVector {
    pub const fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    /// Interpolated scale at height `y` of a scene `height` units tall.
    /// Returns `None` when the scene has no usable height.
    pub fn scale_at(&self, y: f32, height: f32) -> Option<f32> {
        if height <= 0.0 || !height.is_finite() {
            return None;
        }
        Some((self.near + (self.far - self.near) * y / height).abs())
    }
}

/// Background map of a scene: per-point depth samples and walkable paths.
pub trait BackgroundMap {
    /// Depth (scale) sample at a world position. 0 means "no data".
    fn depth(&self, x: f32, y: f32) -> f32;

    /// Ordered waypoints from `from` to `to`, or `None` if unreachable.
    fn find_path(&self, from: Vec2, to: Vec2) -> Option<Vec<Vec2>>;
}

/// What an actor needs from the scene it lives in.
pub trait Scene {
    fn background_map(&self) -> Option<&dyn BackgroundMap>;

    fn depth_vector(&self) -> Option<DepthVector>;

    fn bounds(&self) -> Rect;

    /// The actor the camera is following, if any.
    fn camera_follow_target(&self) -> Option<ActorId>;

    fn recenter_camera(&mut self, focus: Vec2);
}

/// Resolves scene ids to live scenes.
pub trait SceneLookup {
    fn scene(&self, id: SceneId) -> Option<&dyn Scene>;

    fn scene_mut(&mut self, id: SceneId) -> Option<&mut dyn Scene>;
}

impl<S: Scene, H: BuildHasher> SceneLookup for HashMap<SceneId, S, H> {
    fn scene(&self, id: SceneId) -> Option<&dyn Scene> {
        self.get(&id).map(|s| s as &dyn Scene)
    }

    fn scene_mut(&mut self, id: SceneId) -> Option<&mut dyn Scene> {
        self.get_mut(&id).map(|s| s as &mut dyn Scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_vector_interpolation() {
        let v = DepthVector::new(0.5, 1.5);
        assert_eq!(v.scale_at(0.0, 100.0), Some(0.5));
        assert_eq!(v.scale_at(100.0, 100.0), Some(1.5));
        assert_eq!(v.scale_at(50.0, 100.0), Some(1.0));
    }

    #[test]
    fn test_depth_vector_takes_absolute_value() {
        let v = DepthVector::new(-1.0, -3.0);
        assert_eq!(v.scale_at(0.0, 10.0), Some(1.0));
    }

    #[test]
    fn test_depth_vector_without_height() {
        let v = DepthVector::new(0.5, 1.5);
        assert_eq!(v.scale_at(10.0, 0.0), None);
    }
}
