#![warn(missing_debug_implementations)]
#![allow(clippy::single_match)]

//! The draftline-engine crate is the stateful core of draftline. It holds the element store, the
//! drawing and drag tools, the constraint key tracker and the snap resolution adapter.
//!
//! The main entry point is the [Engine] struct.

// Modules
pub mod engine;
pub mod error;
pub mod keytracker;
pub mod snap;
pub mod store;
pub mod tools;
pub mod widgetflags;

// Re-exports
pub use engine::Engine;
pub use error::RecoverableEngineError;
pub use keytracker::ConstraintKeyTracker;
pub use store::ElementStore;
pub use widgetflags::WidgetFlags;

// Renames
extern crate nalgebra as na;
extern crate parry2d_f64 as p2d;
