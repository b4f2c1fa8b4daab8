// Imports
use super::buildable::{Buildable, BuilderCreator, BuilderProgress, ShapeDraft};
use super::ShapeBuilderType;
use crate::constraints::override_distance;
use crate::element::Element;
use crate::eventresult::EventPropagation;
use crate::penevent::PenEvent;
use crate::shapes::Line;
use crate::{Constraints, EventResult, Shape};
use std::time::Instant;

/// Line builder. The single-segment mode, multi-segment continuation is handled by the
/// [super::PolylineBuilder].
#[derive(Debug, Clone)]
pub struct LineBuilder {
    /// Start position.
    start: na::Vector2<f64>,
    /// Current position.
    current: na::Vector2<f64>,
    /// Numeric override for the segment length.
    distance_override: Option<f64>,
}

impl BuilderCreator for LineBuilder {
    fn start(element: Element, _now: Instant) -> Self {
        Self {
            start: element.pos,
            current: element.pos,
            distance_override: None,
        }
    }
}

impl Buildable for LineBuilder {
    type Emit = Shape;

    fn handle_event(
        &mut self,
        event: PenEvent,
        _now: Instant,
        constraints: Constraints,
    ) -> EventResult<BuilderProgress<Self::Emit>> {
        let progress = match event {
            PenEvent::Down { element, .. } | PenEvent::Proximity { element, .. } => {
                self.current = self.constrain_end(element.pos, constraints);
                BuilderProgress::InProgress
            }
            PenEvent::Up { element, .. } => {
                self.current = self.constrain_end(element.pos, constraints);

                if self.state_as_line().length() == 0.0 {
                    // refuse a zero-length commit, stay placing
                    tracing::debug!(
                        "Refusing to finish line builder with zero length, start: {:?}",
                        self.start
                    );
                    BuilderProgress::InProgress
                } else {
                    BuilderProgress::Finished(vec![Shape::Line(self.state_as_line())])
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
            builder_type: ShapeBuilderType::Line,
            points: vec![self.start],
            candidate: Some(self.current),
        }
    }
}

impl LineBuilder {
    /// The current state as a line.
    pub fn state_as_line(&self) -> Line {
        Line::new(self.start, self.current)
    }

    // The constraint is applied to the already snapped position, the distance override last.
    fn constrain_end(&self, pos: na::Vector2<f64>, constraints: Constraints) -> na::Vector2<f64> {
        let constrained = constraints.constrain_angle(self.start, pos);
        match self.distance_override {
            Some(distance) => override_distance(self.start, constrained, distance),
            None => constrained,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unconstrained_commit() {
        let mut builder = LineBuilder::start(Element::new(na::vector![1.0, 2.0]), Instant::now());
        let progress = builder
            .handle_event(
                PenEvent::Up {
                    element: Element::new(na::vector![5.0, 6.0]),
                    modifier_keys: Default::default(),
                },
                Instant::now(),
                Constraints::default(),
            )
            .progress;

        match progress {
            BuilderProgress::Finished(shapes) => match shapes.as_slice() {
                [Shape::Line(line)] => {
                    assert_relative_eq!(line.start, na::vector![1.0, 2.0]);
                    assert_relative_eq!(line.end, na::vector![5.0, 6.0]);
                }
                _ => panic!("builder should have emitted a single line"),
            },
            _ => panic!("builder should have finished"),
        }
    }

    #[test]
    fn constrained_preview_snaps_to_diagonal() {
        let mut builder = LineBuilder::start(Element::new(na::vector![0.0, 0.0]), Instant::now());
        builder.handle_event(
            PenEvent::Down {
                element: Element::new(na::vector![10.0, 9.0]),
                modifier_keys: Default::default(),
            },
            Instant::now(),
            Constraints::new_w_enabled(true),
        );

        let candidate = builder.draft().candidate.unwrap();
        let angle_deg = candidate[1].atan2(candidate[0]).to_degrees();
        assert_relative_eq!(angle_deg, 45.0, epsilon = 1e-6);
        assert_relative_eq!(
            candidate.magnitude(),
            na::vector![10.0, 9.0].magnitude(),
            epsilon = 1e-6
        );
    }
}
