// Imports
use crate::shapes::Shapeable;
use crate::transform::Transformable;
use p2d::bounding_volume::Aabb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename = "circle")]
/// A circle, defined by its center and a committed edge point.
pub struct Circle {
    #[serde(rename = "center")]
    /// The center.
    pub center: na::Vector2<f64>,
    #[serde(rename = "edge")]
    /// The committed point on the circle edge.
    pub edge: na::Vector2<f64>,
}

impl Transformable for Circle {
    fn translate(&mut self, offset: na::Vector2<f64>) {
        self.center += offset;
        self.edge += offset;
    }
}

impl Shapeable for Circle {
    fn bounds(&self) -> Aabb {
        let radius = self.radius();
        Aabb::from_half_extents(self.center.into(), na::vector![radius, radius])
    }
}

impl Circle {
    /// A new circle from its center and a point on its edge.
    pub fn new(center: na::Vector2<f64>, edge: na::Vector2<f64>) -> Self {
        Self { center, edge }
    }

    /// The radius.
    pub fn radius(&self) -> f64 {
        (self.edge - self.center).magnitude()
    }
}
