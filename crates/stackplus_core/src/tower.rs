//! The tower of stacked blocks
//!
//! Layers are kept in stacking order. Only the newest few stay visible; once
//! the cap is exceeded the oldest layer is dropped from the list (the round's
//! score still counts it).

use std::collections::VecDeque;

use stackplus_geom::{Extruder, Polygon2D, Prism, Transform};

/// Default number of layers kept for drawing
pub const DEFAULT_MAX_VISIBLE: usize = 7;

/// Yaw of the base block, in degrees
pub const BASE_THETA: f64 = 45.0;

/// One block: its footprint and the prism drawn for it
#[derive(Clone, Debug, PartialEq)]
pub struct TowerLayer {
    polygon: Polygon2D,
    prism: Prism,
}

impl TowerLayer {
    /// Extrude `polygon` into a block of height `depth`
    pub fn new(polygon: Polygon2D, extruder: &Extruder, depth: f64) -> Self {
        let prism = extruder.extrude(&polygon, depth);
        Self { polygon, prism }
    }

    pub fn polygon(&self) -> &Polygon2D {
        &self.polygon
    }

    pub fn prism(&self) -> &Prism {
        &self.prism
    }

    /// Whether this block has collapsed to nothing
    pub fn is_empty(&self) -> bool {
        self.prism.is_empty()
    }
}

/// A layer together with where to draw it
#[derive(Clone, Copy, Debug)]
pub struct LayerPose<'a> {
    pub layer: &'a TowerLayer,
    pub transform: Transform,
}

/// Base block plus the visible stacked layers, oldest first
#[derive(Clone, Debug)]
pub struct Tower {
    base: TowerLayer,
    layers: VecDeque<TowerLayer>,
    max_visible: usize,
}

impl Tower {
    pub fn new(base: TowerLayer, max_visible: usize) -> Self {
        Self {
            base,
            layers: VecDeque::with_capacity(max_visible + 1),
            max_visible: max_visible.max(1),
        }
    }

    pub fn base(&self) -> &TowerLayer {
        &self.base
    }

    /// Most recently stacked layer
    pub fn top(&self) -> Option<&TowerLayer> {
        self.layers.back()
    }

    pub fn layers(&self) -> impl Iterator<Item = &TowerLayer> {
        self.layers.iter()
    }

    /// Visible layer count (the base not included)
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Append a layer, dropping the oldest one past the visible cap
    pub fn push(&mut self, layer: TowerLayer) {
        self.layers.push_back(layer);
        while self.layers.len() > self.max_visible {
            self.layers.pop_front();
        }
    }

    /// Footprint a new block is stacked onto, in the plane of the falling block
    ///
    /// With no layers yet this is the base rotated to its drawn yaw; after
    /// that it is the top layer. Both sit one unit below the falling block.
    pub fn support_pose(&self) -> (&Polygon2D, Transform) {
        match self.top() {
            Some(top) => (top.polygon(), Transform::new(0.0, 0.0, -1.0, 0.0)),
            None => (self.base.polygon(), Transform::new(0.0, 0.0, -1.0, BASE_THETA)),
        }
    }

    /// Draw transforms: the base first, then each layer bottom to top
    ///
    /// The newest layer sits at `z = -1` so the falling block at `z = 0`
    /// lands right on it.
    pub fn layer_poses(&self) -> Vec<LayerPose<'_>> {
        let height = self.layers.len() as f64;
        let mut poses = Vec::with_capacity(self.layers.len() + 1);
        poses.push(LayerPose {
            layer: &self.base,
            transform: Transform::new(0.0, 0.0, -1.0 - height, BASE_THETA),
        });
        poses.extend(self.layers.iter().enumerate().map(|(i, layer)| LayerPose {
            layer,
            transform: Transform::translation(0.0, 0.0, i as f64 - height),
        }));
        poses
    }
}
