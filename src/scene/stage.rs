//! Self-contained scene with a gridded depth map

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{BackgroundMap, DepthVector, FollowCamera, Scene};
use crate::actor::ActorId;
use crate::geometry::Rect;

/// Depth samples on a regular grid starting at the world origin.
///
/// Paths are straight lines; any target inside the grid is reachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    /// Row-major, row 0 at y = 0
    samples: Vec<f32>,
}

impl DepthGrid {
    /// Grid of `cols` x `rows` cells, every sample 0 ("no data").
    pub fn new(cell_size: f32, cols: usize, rows: usize) -> Self {
        Self {
            cell_size: cell_size.max(f32::EPSILON),
            cols,
            rows,
            samples: vec![0.0; cols * rows],
        }
    }

    pub fn set_depth(&mut self, col: usize, row: usize, depth: f32) {
        if col < self.cols && row < self.rows {
            self.samples[row * self.cols + col] = depth;
        }
    }

    /// Fill every cell with `f(col, row)`.
    pub fn fill_with(&mut self, mut f: impl FnMut(usize, usize) -> f32) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                self.samples[row * self.cols + col] = f(col, row);
            }
        }
    }

    fn cell_of(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.cell_size) as usize;
        let row = (y / self.cell_size) as usize;
        (col < self.cols && row < self.rows).then_some((col, row))
    }
}

impl BackgroundMap for DepthGrid {
    fn depth(&self, x: f32, y: f32) -> f32 {
        self.cell_of(x, y)
            .map_or(0.0, |(col, row)| self.samples[row * self.cols + col])
    }

    fn find_path(&self, from: Vec2, to: Vec2) -> Option<Vec<Vec2>> {
        self.cell_of(to.x, to.y)?;
        if from == to {
            return Some(vec![to]);
        }
        Some(vec![from, to])
    }
}

/// A scene with optional depth data and a camera that can follow one actor.
#[derive(Debug, Clone)]
pub struct StageScene {
    bounds: Rect,
    depth_vector: Option<DepthVector>,
    background: Option<DepthGrid>,
    camera: FollowCamera,
    follow: Option<ActorId>,
}

impl StageScene {
    pub fn new(bounds: Rect, viewport: Vec2) -> Self {
        Self {
            bounds,
            depth_vector: None,
            background: None,
            camera: FollowCamera::new(bounds.center(), viewport),
            follow: None,
        }
    }

    pub fn with_depth_vector(mut self, depth: DepthVector) -> Self {
        self.depth_vector = Some(depth);
        self
    }

    pub fn with_background(mut self, background: DepthGrid) -> Self {
        self.background = Some(background);
        self
    }

    /// Make the camera follow `actor` (or nobody).
    pub fn set_follow(&mut self, actor: Option<ActorId>) {
        self.follow = actor;
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FollowCamera {
        &mut self.camera
    }

    pub fn update(&mut self, dt: f32) {
        self.camera.update(dt);
    }
}

impl Scene for StageScene {
    fn background_map(&self) -> Option<&dyn BackgroundMap> {
        self.background.as_ref().map(|b| b as &dyn BackgroundMap)
    }

    fn depth_vector(&self) -> Option<DepthVector> {
        self.depth_vector
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn camera_follow_target(&self) -> Option<ActorId> {
        self.follow
    }

    fn recenter_camera(&mut self, focus: Vec2) {
        self.camera.recenter_on(focus, self.bounds);
    }
}
