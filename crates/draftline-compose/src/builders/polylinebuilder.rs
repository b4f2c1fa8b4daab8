// Imports
use super::buildable::{Buildable, BuilderCreator, BuilderProgress, ShapeDraft};
use super::ShapeBuilderType;
use crate::constraints::override_distance;
use crate::element::Element;
use crate::eventresult::EventPropagation;
use crate::penevent::{KeyboardKey, PenEvent, PenState};
use crate::shapes::{Polygon, Polyline};
use crate::{Constraints, EventResult, Shape};
use std::time::Instant;

/// Polyline builder.
///
/// Also the multi-segment continuation mode of the line tool: every commit re-anchors at the
/// just-committed point. Committing within the closing threshold of the first point with at least
/// three points placed closes the chain into a polygon.
#[derive(Debug, Clone)]
pub struct PolylineBuilder {
    /// Start position.
    start: na::Vector2<f64>,
    /// Position of the next/current path segment.
    current: na::Vector2<f64>,
    /// Path.
    path: Vec<na::Vector2<f64>>,
    /// Pen state.
    pen_state: PenState,
    /// Numeric override for the current segment length.
    distance_override: Option<f64>,
}

impl BuilderCreator for PolylineBuilder {
    fn start(element: Element, _now: Instant) -> Self {
        Self {
            start: element.pos,
            current: element.pos,
            path: Vec::new(),
            pen_state: PenState::Down,
            distance_override: None,
        }
    }
}

impl Buildable for PolylineBuilder {
    type Emit = Shape;

    fn handle_event(
        &mut self,
        event: PenEvent,
        _now: Instant,
        constraints: Constraints,
    ) -> EventResult<BuilderProgress<Self::Emit>> {
        let progress = match event {
            PenEvent::Down { element, .. } => {
                self.pen_state = PenState::Down;
                self.current = self.constrain_candidate(element.pos, constraints);
                BuilderProgress::InProgress
            }
            PenEvent::Up { element, .. } => {
                if self.pen_state == PenState::Down {
                    self.pen_state = PenState::Up;
                    self.current = self.constrain_candidate(element.pos, constraints);

                    // the closing test runs before the candidate is appended
                    if self.pos_in_closing_range(self.current) && self.points_placed() >= 3 {
                        return EventResult {
                            handled: true,
                            propagate: EventPropagation::Stop,
                            progress: BuilderProgress::Finished(vec![Shape::Polygon(
                                self.state_as_polygon(),
                            )]),
                        };
                    }

                    if self.current == self.last_anchor() {
                        // a zero-length segment does not re-anchor
                        tracing::debug!(
                            "Skipping zero-length polyline segment at {:?}",
                            self.current
                        );
                    } else {
                        self.path.push(self.current);
                    }
                }
                BuilderProgress::InProgress
            }
            PenEvent::Proximity { element, .. } => {
                self.pen_state = PenState::Proximity;
                self.current = self.constrain_candidate(element.pos, constraints);
                BuilderProgress::InProgress
            }
            PenEvent::KeyPressed { keyboard_key, .. } => match keyboard_key {
                KeyboardKey::CarriageReturn | KeyboardKey::Linefeed => {
                    if self.points_placed() >= 2 {
                        BuilderProgress::Finished(vec![Shape::Polyline(self.state_as_polyline())])
                    } else {
                        // a single point is no chain yet, stay placing
                        tracing::debug!(
                            "Refusing to finish polyline builder with a single placed point"
                        );
                        BuilderProgress::InProgress
                    }
                }
                KeyboardKey::Escape => BuilderProgress::Finished(vec![]),
                _ => BuilderProgress::InProgress,
            },
            PenEvent::Cancel => BuilderProgress::Finished(vec![]),
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
        let mut points = vec![self.start];
        points.extend(self.path.iter().copied());

        ShapeDraft {
            builder_type: ShapeBuilderType::Polyline,
            points,
            candidate: Some(self.current),
        }
    }
}

impl PolylineBuilder {
    /// Committing within this distance of the first point closes the chain.
    const CLOSING_THRESHOLD_DIST: f64 = 8.0;

    /// The current state as an open polyline.
    pub fn state_as_polyline(&self) -> Polyline {
        Polyline {
            start: self.start,
            path: self.path.clone(),
        }
    }

    /// The current state as a closed polygon. The first point is reused as the closing vertex.
    pub fn state_as_polygon(&self) -> Polygon {
        Polygon {
            start: self.start,
            path: self.path.clone(),
        }
    }

    /// The number of committed points, the candidate excluded.
    pub fn points_placed(&self) -> usize {
        self.path.len() + 1
    }

    fn last_anchor(&self) -> na::Vector2<f64> {
        self.path.last().copied().unwrap_or(self.start)
    }

    fn pos_in_closing_range(&self, pos: na::Vector2<f64>) -> bool {
        (pos - self.start).magnitude() < Self::CLOSING_THRESHOLD_DIST
    }

    // The constraint is applied to the already snapped position, the distance override last.
    fn constrain_candidate(
        &self,
        pos: na::Vector2<f64>,
        constraints: Constraints,
    ) -> na::Vector2<f64> {
        let anchor = self.last_anchor();
        let constrained = constraints.constrain_angle(anchor, pos);
        match self.distance_override {
            Some(distance) => override_distance(anchor, constrained, distance),
            None => constrained,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn click(builder: &mut PolylineBuilder, pos: na::Vector2<f64>) -> BuilderProgress<Shape> {
        let constraints = Constraints::default();
        builder.handle_event(
            PenEvent::Down {
                element: Element::new(pos),
                modifier_keys: Default::default(),
            },
            Instant::now(),
            constraints,
        );
        builder
            .handle_event(
                PenEvent::Up {
                    element: Element::new(pos),
                    modifier_keys: Default::default(),
                },
                Instant::now(),
                constraints,
            )
            .progress
    }

    #[test]
    fn commits_reanchor_at_committed_point() {
        let mut builder =
            PolylineBuilder::start(Element::new(na::vector![0.0, 0.0]), Instant::now());
        click(&mut builder, na::vector![5.0, 0.0]);
        click(&mut builder, na::vector![5.0, 5.0]);

        assert_eq!(builder.points_placed(), 3);
        assert_relative_eq!(builder.last_anchor(), na::vector![5.0, 5.0]);
    }

    #[test]
    fn closing_commit_finishes_as_polygon() {
        // points (0,0), (5,0), (5,5) placed, candidate (0.2,0.1) within the closing threshold
        let mut builder =
            PolylineBuilder::start(Element::new(na::vector![0.0, 0.0]), Instant::now());
        click(&mut builder, na::vector![5.0, 0.0]);
        click(&mut builder, na::vector![5.0, 5.0]);
        let progress = click(&mut builder, na::vector![0.2, 0.1]);

        let polygon = match progress {
            BuilderProgress::Finished(shapes) => match shapes.into_iter().next() {
                Some(Shape::Polygon(polygon)) => polygon,
                _ => panic!("builder should have emitted a polygon"),
            },
            _ => panic!("builder should have finished"),
        };

        // the candidate is discarded, the first point doubles as the closing vertex
        assert_eq!(polygon.points().len(), 3);
        assert_relative_eq!(polygon.start, na::vector![0.0, 0.0]);
        assert_relative_eq!(polygon.path[0], na::vector![5.0, 0.0]);
        assert_relative_eq!(polygon.path[1], na::vector![5.0, 5.0]);
    }

    #[test]
    fn near_start_commit_with_two_points_appends() {
        let mut builder =
            PolylineBuilder::start(Element::new(na::vector![0.0, 0.0]), Instant::now());
        click(&mut builder, na::vector![5.0, 0.0]);
        let progress = click(&mut builder, na::vector![0.2, 0.1]);

        assert!(matches!(progress, BuilderProgress::InProgress));
        assert_eq!(builder.points_placed(), 3);
    }

    #[test]
    fn return_key_finishes_open_polyline() {
        let mut builder =
            PolylineBuilder::start(Element::new(na::vector![0.0, 0.0]), Instant::now());
        click(&mut builder, na::vector![20.0, 0.0]);
        click(&mut builder, na::vector![20.0, 20.0]);

        let progress = builder
            .handle_event(
                PenEvent::KeyPressed {
                    keyboard_key: KeyboardKey::CarriageReturn,
                    modifier_keys: Default::default(),
                },
                Instant::now(),
                Constraints::default(),
            )
            .progress;

        match progress {
            BuilderProgress::Finished(shapes) => match shapes.as_slice() {
                [Shape::Polyline(polyline)] => assert_eq!(polyline.points().len(), 3),
                _ => panic!("builder should have emitted a polyline"),
            },
            _ => panic!("builder should have finished"),
        }
    }

    #[test]
    fn return_key_with_single_point_is_refused() {
        let mut builder =
            PolylineBuilder::start(Element::new(na::vector![0.0, 0.0]), Instant::now());
        let progress = builder
            .handle_event(
                PenEvent::KeyPressed {
                    keyboard_key: KeyboardKey::CarriageReturn,
                    modifier_keys: Default::default(),
                },
                Instant::now(),
                Constraints::default(),
            )
            .progress;

        assert!(matches!(progress, BuilderProgress::InProgress));
    }

    #[test]
    fn cancel_discards_all_points() {
        let mut builder =
            PolylineBuilder::start(Element::new(na::vector![0.0, 0.0]), Instant::now());
        click(&mut builder, na::vector![5.0, 0.0]);
        let progress = builder
            .handle_event(PenEvent::Cancel, Instant::now(), Constraints::default())
            .progress;

        assert!(matches!(progress, BuilderProgress::Finished(shapes) if shapes.is_empty()));
    }
}
