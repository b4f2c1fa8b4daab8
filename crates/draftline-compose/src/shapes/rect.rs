// Imports
use crate::ext::AabbExt;
use crate::shapes::{Line, Shapeable};
use crate::transform::Transformable;
use p2d::bounding_volume::Aabb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename = "rect")]
/// An axis-aligned rectangle, stored as its four corner vertices.
pub struct Rect {
    #[serde(rename = "vertices")]
    /// The corner vertices in commit order: anchor, horizontally adjacent, opposite,
    /// vertically adjacent.
    pub vertices: [na::Vector2<f64>; 4],
}

impl Transformable for Rect {
    fn translate(&mut self, offset: na::Vector2<f64>) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }
}

impl Shapeable for Rect {
    fn bounds(&self) -> Aabb {
        AabbExt::new_positive(self.vertices[0].into(), self.vertices[2].into())
    }
}

impl Rect {
    /// Construct from corners across from each other.
    ///
    /// The first corner is the anchor and stays the first vertex.
    pub fn from_corners(first: na::Vector2<f64>, second: na::Vector2<f64>) -> Self {
        Self {
            vertices: [
                first,
                na::vector![second[0], first[1]],
                second,
                na::vector![first[0], second[1]],
            ],
        }
    }

    /// The four sides as lines, in vertex order.
    pub fn outline_lines(&self) -> [Line; 4] {
        [
            Line::new(self.vertices[0], self.vertices[1]),
            Line::new(self.vertices[1], self.vertices[2]),
            Line::new(self.vertices[2], self.vertices[3]),
            Line::new(self.vertices[3], self.vertices[0]),
        ]
    }

    /// The area of the rectangle.
    pub fn area(&self) -> f64 {
        let extents = self.bounds().extents();
        extents[0] * extents[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_corners_vertex_order() {
        let rect = Rect::from_corners(na::vector![0.0, 0.0], na::vector![10.0, 10.0]);
        assert_relative_eq!(rect.vertices[0], na::vector![0.0, 0.0]);
        assert_relative_eq!(rect.vertices[1], na::vector![10.0, 0.0]);
        assert_relative_eq!(rect.vertices[2], na::vector![10.0, 10.0]);
        assert_relative_eq!(rect.vertices[3], na::vector![0.0, 10.0]);
    }
}
