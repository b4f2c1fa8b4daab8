// Imports
use crate::shapes::Shapeable;
use crate::transform::Transformable;
use p2d::bounding_volume::Aabb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename = "polygon")]
/// A Polygon. A closed multi-segment chain, the closing edge from the last path point back to the
/// start is implicit.
pub struct Polygon {
    /// The polygon start
    #[serde(rename = "start")]
    pub start: na::Vector2<f64>,
    /// The polygon path
    #[serde(rename = "path")]
    pub path: Vec<na::Vector2<f64>>,
}

impl Transformable for Polygon {
    fn translate(&mut self, offset: na::Vector2<f64>) {
        self.start += offset;
        for p in &mut self.path {
            *p += offset;
        }
    }
}

impl Shapeable for Polygon {
    fn bounds(&self) -> Aabb {
        let mut bounds = Aabb::new(self.start.into(), self.start.into());
        for p in &self.path {
            bounds.take_point((*p).into());
        }
        bounds
    }
}

impl Polygon {
    /// All committed points, the start included. The start doubles as the closing vertex.
    pub fn points(&self) -> Vec<na::Vector2<f64>> {
        std::iter::once(self.start)
            .chain(self.path.iter().copied())
            .collect()
    }
}
