#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![allow(clippy::single_match)]

//! the draftline-compose crate provides draftline with building blocks for turning pointer input
//! into committed shapes: input events, geometric constraints and shape builders.

// Modules
/// module for shape builders
pub mod builders;
/// geometric constraints
pub mod constraints;
/// module for input elements
pub mod element;
/// Event result.
pub mod eventresult;
/// module for extension traits for foreign types
pub mod ext;
/// module for pen events
pub mod penevent;
/// module for shapes
pub mod shapes;
/// module for transformation
pub mod transform;

// Re-exports
pub use constraints::Constraints;
pub use element::Element;
pub use eventresult::EventResult;
pub use penevent::PenEvent;
pub use shapes::Shape;

// Renames
extern crate nalgebra as na;
extern crate parry2d_f64 as p2d;
