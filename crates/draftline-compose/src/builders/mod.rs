// Modules
/// Buildable trait.
pub mod buildable;
mod circlebuilder;
mod linebuilder;
mod polylinebuilder;
mod rectbuilder;

// Re-exports
pub use circlebuilder::CircleBuilder;
pub use linebuilder::LineBuilder;
pub use polylinebuilder::PolylineBuilder;
pub use rectbuilder::RectBuilder;

// Imports
use crate::element::Element;
use crate::Shape;
use buildable::{Buildable, BuilderCreator};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename = "shape_builder_type")]
/// A choice for a shape builder type
pub enum ShapeBuilderType {
    /// A line builder
    #[serde(rename = "line")]
    #[default]
    Line = 0,
    /// A rectangle builder
    #[serde(rename = "rect")]
    Rect,
    /// A circle builder
    #[serde(rename = "circle")]
    Circle,
    /// A polyline builder
    #[serde(rename = "polyline")]
    Polyline,
}

/// Create and start a new builder of the given type.
pub fn new_builder(
    builder_type: ShapeBuilderType,
    element: Element,
    now: Instant,
) -> Box<dyn Buildable<Emit = Shape>> {
    match builder_type {
        ShapeBuilderType::Line => Box::new(LineBuilder::start(element, now)),
        ShapeBuilderType::Rect => Box::new(RectBuilder::start(element, now)),
        ShapeBuilderType::Circle => Box::new(CircleBuilder::start(element, now)),
        ShapeBuilderType::Polyline => Box::new(PolylineBuilder::start(element, now)),
    }
}
