// Imports
use crate::ext::AabbExt;
use crate::shapes::Shapeable;
use crate::transform::Transformable;
use p2d::bounding_volume::Aabb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename = "line")]
/// A line.
pub struct Line {
    #[serde(rename = "start")]
    /// Start coordinate.
    pub start: na::Vector2<f64>,
    #[serde(rename = "end")]
    /// End coordinate.
    pub end: na::Vector2<f64>,
}

impl Transformable for Line {
    fn translate(&mut self, offset: na::Vector2<f64>) {
        self.start += offset;
        self.end += offset;
    }
}

impl Shapeable for Line {
    fn bounds(&self) -> Aabb {
        AabbExt::new_positive(self.start.into(), self.end.into())
    }
}

impl Line {
    /// A new line.
    pub fn new(start: na::Vector2<f64>, end: na::Vector2<f64>) -> Self {
        Self { start, end }
    }

    /// The length of the line.
    pub fn length(&self) -> f64 {
        (self.end - self.start).magnitude()
    }
}
