// Imports
use super::ShapeBuilderType;
use crate::element::Element;
use crate::{Constraints, EventResult, PenEvent};
use p2d::bounding_volume::Aabb;
use std::time::Instant;

#[derive(Debug, Clone)]
/// Builder progress.
pub enum BuilderProgress<T> {
    /// In progress.
    InProgress,
    /// Done building.
    ///
    /// An empty vec means the build was cancelled and nothing is emitted.
    Finished(Vec<T>),
}

/// An in-progress, uncommitted shape definition.
///
/// A snapshot of the builder state, handed to the rendering collaborator every frame for visual
/// feedback. The candidate is preview-only and never persisted until a commit event fires.
#[derive(Debug, Clone)]
pub struct ShapeDraft {
    /// The builder type producing this draft.
    pub builder_type: ShapeBuilderType,
    /// The committed points, in placement order.
    pub points: Vec<na::Vector2<f64>>,
    /// The current constrained preview candidate.
    pub candidate: Option<na::Vector2<f64>>,
}

impl ShapeDraft {
    /// Bounds of the committed points and the candidate.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut points = self.points.iter().chain(self.candidate.iter());
        let first = points.next()?;
        let mut bounds = Aabb::new((*first).into(), (*first).into());
        for p in points {
            bounds.take_point((*p).into());
        }
        Some(bounds)
    }
}

/// Creator of a builder.
pub trait BuilderCreator {
    /// Start the builder.
    fn start(element: Element, now: Instant) -> Self;
}

/// Types that are builders.
///
/// They receive pen events, and return the associated `Emit` type.
/// They are drawn while building and are finite state machines.
///
/// The event positions a builder receives have already passed the upstream snap resolution stage.
/// The builders apply the geometric constraint as the final transformation and never re-run snap
/// resolution on the constrained position.
pub trait Buildable: std::fmt::Debug {
    /// The type that is emitted by the builder.
    type Emit: std::fmt::Debug;

    /// Handle a pen event.
    ///
    /// Returns the builder progress.
    fn handle_event(
        &mut self,
        event: PenEvent,
        now: Instant,
        constraints: Constraints,
    ) -> EventResult<BuilderProgress<Self::Emit>>;

    /// Set or clear the numeric distance override for the current candidate segment.
    ///
    /// Builders whose candidate is not an anchor-to-cursor segment ignore it.
    fn set_distance_override(&mut self, _distance: Option<f64>) {}

    /// The current draft state.
    fn draft(&self) -> ShapeDraft;

    /// Bounds of the current draft.
    fn bounds(&self) -> Option<Aabb> {
        self.draft().bounds()
    }
}
