// Imports
use super::buildable::{Buildable, BuilderCreator, BuilderProgress, ShapeDraft};
use super::ShapeBuilderType;
use crate::constraints::override_distance;
use crate::element::Element;
use crate::eventresult::EventPropagation;
use crate::penevent::PenEvent;
use crate::shapes::Circle;
use crate::{Constraints, EventResult, Shape};
use std::time::Instant;

/// Circle builder.
#[derive(Debug, Clone)]
pub struct CircleBuilder {
    /// Start position. The circle center.
    start: na::Vector2<f64>,
    /// Current position of the edge point.
    current: na::Vector2<f64>,
    /// Numeric override for the radius.
    distance_override: Option<f64>,
}

impl BuilderCreator for CircleBuilder {
    fn start(element: Element, _now: Instant) -> Self {
        Self {
            start: element.pos,
            current: element.pos,
            distance_override: None,
        }
    }
}

impl Buildable for CircleBuilder {
    type Emit = Shape;

    fn handle_event(
        &mut self,
        event: PenEvent,
        _now: Instant,
        constraints: Constraints,
    ) -> EventResult<BuilderProgress<Self::Emit>> {
        let progress = match event {
            PenEvent::Down { element, .. } | PenEvent::Proximity { element, .. } => {
                self.current = self.constrain_edge(element.pos, constraints);
                BuilderProgress::InProgress
            }
            PenEvent::Up { element, .. } => {
                self.current = self.constrain_edge(element.pos, constraints);

                if self.state_as_circle().radius() == 0.0 {
                    // refuse a zero-radius commit, stay placing
                    tracing::debug!(
                        "Refusing to finish circle builder with zero radius, center: {:?}",
                        self.start
                    );
                    BuilderProgress::InProgress
                } else {
                    BuilderProgress::Finished(vec![Shape::Circle(self.state_as_circle())])
                }
            }
            PenEvent::Cancel => BuilderProgress::Finished(vec![]),
            _ => BuilderProgress::InProgress,
        };

        EventResult {
            handled: true,
            propagate: EventPropagation::Stop,
            progress,
        }
    }

    fn set_distance_override(&mut self, distance: Option<f64>) {
        self.distance_override = distance;
    }

    fn draft(&self) -> ShapeDraft {
        ShapeDraft {
            builder_type: ShapeBuilderType::Circle,
            points: vec![self.start],
            candidate: Some(self.current),
        }
    }
}

impl CircleBuilder {
    /// The current state as a circle.
    pub fn state_as_circle(&self) -> Circle {
        Circle::new(self.start, self.current)
    }

    // The constraint is applied to the already snapped position, the distance override last.
    fn constrain_edge(
        &self,
        pos: na::Vector2<f64>,
        constraints: Constraints,
    ) -> na::Vector2<f64> {
        let constrained = constraints.constrain_angle(self.start, pos);
        match self.distance_override {
            Some(distance) => override_distance(self.start, constrained, distance),
            None => constrained,
        }
    }
}
