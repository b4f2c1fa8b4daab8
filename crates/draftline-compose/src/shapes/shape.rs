// Imports
use crate::shapes::{Circle, Line, Polygon, Polyline, Rect, Shapeable};
use crate::transform::Transformable;
use p2d::bounding_volume::Aabb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "shape")]
/// A committed shape.
pub enum Shape {
    #[serde(rename = "line")]
    /// A line shape.
    Line(Line),
    #[serde(rename = "rect")]
    /// A rectangle shape.
    Rect(Rect),
    #[serde(rename = "circle")]
    /// A circle shape.
    Circle(Circle),
    #[serde(rename = "polyline")]
    /// A polyline shape.
    Polyline(Polyline),
    #[serde(rename = "polygon")]
    /// A polygon shape.
    Polygon(Polygon),
}

impl Default for Shape {
    fn default() -> Self {
        Self::Line(Line::default())
    }
}

impl Transformable for Shape {
    fn translate(&mut self, offset: na::Vector2<f64>) {
        match self {
            Self::Line(line) => line.translate(offset),
            Self::Rect(rect) => rect.translate(offset),
            Self::Circle(circle) => circle.translate(offset),
            Self::Polyline(polyline) => polyline.translate(offset),
            Self::Polygon(polygon) => polygon.translate(offset),
        }
    }
}

impl Shape {
    /// Whether the shape has zero size (zero length resp. zero area).
    ///
    /// The builders already refuse degenerate commits, consumers reject zero-size shapes once more
    /// before storing them.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Line(line) => line.length() == 0.0,
            Self::Rect(rect) => rect.area() == 0.0,
            Self::Circle(circle) => circle.radius() == 0.0,
            Self::Polyline(polyline) => {
                polyline.path.iter().all(|p| *p == polyline.start)
            }
            Self::Polygon(polygon) => polygon.path.iter().all(|p| *p == polygon.start),
        }
    }
}

impl Shapeable for Shape {
    fn bounds(&self) -> Aabb {
        match self {
            Self::Line(line) => line.bounds(),
            Self::Rect(rect) => rect.bounds(),
            Self::Circle(circle) => circle.bounds(),
            Self::Polyline(polyline) => polyline.bounds(),
            Self::Polygon(polygon) => polygon.bounds(),
        }
    }
}
