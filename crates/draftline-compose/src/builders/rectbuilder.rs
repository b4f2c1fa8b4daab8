// Imports
use super::buildable::{Buildable, BuilderCreator, BuilderProgress, ShapeDraft};
use super::ShapeBuilderType;
use crate::element::Element;
use crate::eventresult::EventPropagation;
use crate::penevent::PenEvent;
use crate::shapes::Rect;
use crate::{Constraints, EventResult, Shape};
use std::time::Instant;

/// Rectangle builder.
#[derive(Debug, Clone)]
pub struct RectBuilder {
    /// Start position. The anchor corner.
    start: na::Vector2<f64>,
    /// Current position.
    current: na::Vector2<f64>,
}

impl BuilderCreator for RectBuilder {
    fn start(element: Element, _now: Instant) -> Self {
        Self {
            start: element.pos,
            current: element.pos,
        }
    }
}

impl Buildable for RectBuilder {
    type Emit = Shape;

    fn handle_event(
        &mut self,
        event: PenEvent,
        _now: Instant,
        constraints: Constraints,
    ) -> EventResult<BuilderProgress<Self::Emit>> {
        let progress = match event {
            PenEvent::Down { element, .. } | PenEvent::Proximity { element, .. } => {
                self.current = constraints.constrain_square(self.start, element.pos);
                BuilderProgress::InProgress
            }
            PenEvent::Up { element, .. } => {
                self.current = constraints.constrain_square(self.start, element.pos);

                if self.is_degenerate() {
                    // refuse a zero-area commit, stay placing
                    tracing::debug!(
                        "Refusing to finish rect builder with degenerate extents, start: {:?}, current: {:?}",
                        self.start,
                        self.current
                    );
                    BuilderProgress::InProgress
                } else {
                    BuilderProgress::Finished(vec![Shape::Rect(self.state_as_rect())])
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

    fn draft(&self) -> ShapeDraft {
        ShapeDraft {
            builder_type: ShapeBuilderType::Rect,
            points: vec![self.start],
            candidate: Some(self.current),
        }
    }
}

impl RectBuilder {
    /// The current state as a rectangle.
    pub fn state_as_rect(&self) -> Rect {
        Rect::from_corners(self.start, self.current)
    }

    fn is_degenerate(&self) -> bool {
        self.current[0] == self.start[0] || self.current[1] == self.start[1]
    }
}
