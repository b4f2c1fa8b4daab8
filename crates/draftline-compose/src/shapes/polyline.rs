// Imports
use crate::shapes::Shapeable;
use crate::transform::Transformable;
use p2d::bounding_volume::Aabb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename = "polyline")]
/// A Polyline. An open multi-segment chain.
pub struct Polyline {
    /// The polyline start
    #[serde(rename = "start")]
    pub start: na::Vector2<f64>,
    /// The polyline path
    #[serde(rename = "path")]
    pub path: Vec<na::Vector2<f64>>,
}

impl Transformable for Polyline {
    fn translate(&mut self, offset: na::Vector2<f64>) {
        self.start += offset;
        for p in &mut self.path {
            *p += offset;
        }
    }
}

impl Shapeable for Polyline {
    fn bounds(&self) -> Aabb {
        let mut bounds = Aabb::new(self.start.into(), self.start.into());
        for p in &self.path {
            bounds.take_point((*p).into());
        }
        bounds
    }
}

impl Polyline {
    /// All committed points, the start included.
    pub fn points(&self) -> Vec<na::Vector2<f64>> {
        std::iter::once(self.start)
            .chain(self.path.iter().copied())
            .collect()
    }
}
