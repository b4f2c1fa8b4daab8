// Imports
use super::{ToolBehaviour, ToolStyle};
use crate::engine::EngineViewMut;
use crate::error::RecoverableEngineError;
use crate::snap::SnapResolve;
use crate::WidgetFlags;
use draftline_compose::builders::buildable::{Buildable, BuilderProgress, ShapeDraft};
use draftline_compose::builders::new_builder;
use draftline_compose::element::Element;
use draftline_compose::eventresult::EventPropagation;
use draftline_compose::penevent::{KeyboardKey, PenEvent, PenProgress};
use draftline_compose::{EventResult, Shape};
use std::time::Instant;

#[derive(Debug)]
enum ShaperState {
    Idle,
    BuildShape {
        builder: Box<dyn Buildable<Emit = Shape>>,
    },
}

/// The shaper tool.
///
/// Owns the current drawing session and composes the mandatory input pipeline: every positional
/// event is resolved through the snap stage first, the builder applies the geometric constraint
/// as the final transformation.
#[derive(Debug)]
pub struct ShaperTool {
    state: ShaperState,
}

impl Default for ShaperTool {
    fn default() -> Self {
        Self {
            state: ShaperState::Idle,
        }
    }
}

impl ToolBehaviour for ShaperTool {
    fn style(&self) -> ToolStyle {
        ToolStyle::Shaper
    }

    fn handle_event(
        &mut self,
        event: PenEvent,
        now: Instant,
        engine_view: &mut EngineViewMut,
    ) -> (EventResult<PenProgress>, WidgetFlags) {
        let mut widget_flags = WidgetFlags::default();

        // snap resolution runs first and exactly once, it is never re-run on a constrained
        // position
        let event = resolve_event_pos(event, engine_view.snapper);

        let progress = match (&mut self.state, event) {
            (ShaperState::Idle, PenEvent::Down { element, .. }) => {
                self.state = ShaperState::BuildShape {
                    builder: new_builder(engine_view.config.builder_type, element, now),
                };
                widget_flags.redraw = true;

                PenProgress::InProgress
            }
            (ShaperState::Idle, _) => PenProgress::Idle,
            (ShaperState::BuildShape { .. }, PenEvent::Cancel) => {
                self.state = ShaperState::Idle;
                widget_flags.redraw = true;

                PenProgress::Finished
            }
            (ShaperState::BuildShape { builder }, event) => {
                let mut progress = match builder
                    .handle_event(event.clone(), now, engine_view.constraints)
                    .progress
                {
                    BuilderProgress::InProgress => PenProgress::InProgress,
                    BuilderProgress::Finished(shapes) => {
                        for shape in shapes {
                            if shape.is_degenerate() {
                                tracing::warn!(
                                    "Not inserting finished shape into the store, Err: {}",
                                    RecoverableEngineError::DegenerateShape
                                );
                                continue;
                            }
                            engine_view.store.insert_shape(shape);
                            widget_flags.store_modified = true;
                        }
                        self.state = ShaperState::Idle;

                        PenProgress::Finished
                    }
                };

                // When esc is pressed, reset the state
                if let PenEvent::KeyPressed {
                    keyboard_key,
                    modifier_keys,
                } = event
                {
                    if keyboard_key == KeyboardKey::Escape && modifier_keys.is_empty() {
                        self.state = ShaperState::Idle;
                        progress = PenProgress::Finished;
                    }
                }
                widget_flags.redraw = true;

                progress
            }
        };

        (
            EventResult {
                handled: progress != PenProgress::Idle,
                propagate: EventPropagation::Stop,
                progress,
            },
            widget_flags,
        )
    }
}

impl ShaperTool {
    /// The current shape draft, for the rendering collaborator.
    pub fn draft(&self) -> Option<ShapeDraft> {
        match &self.state {
            ShaperState::Idle => None,
            ShaperState::BuildShape { builder } => Some(builder.draft()),
        }
    }

    /// Set or clear the numeric distance override on the current drawing session.
    pub fn set_distance_override(&mut self, distance: Option<f64>) {
        if let ShaperState::BuildShape { builder } = &mut self.state {
            builder.set_distance_override(distance);
        }
    }
}

// The mandatory pipeline stage order for every preview and commit point:
// raw cursor -> snap resolution -> geometric constraint.
fn resolve_event_pos(event: PenEvent, snapper: &dyn SnapResolve) -> PenEvent {
    match event {
        PenEvent::Down {
            element,
            modifier_keys,
        } => PenEvent::Down {
            element: Element::new(snapper.resolve(element.pos)),
            modifier_keys,
        },
        PenEvent::Up {
            element,
            modifier_keys,
        } => PenEvent::Up {
            element: Element::new(snapper.resolve(element.pos)),
            modifier_keys,
        },
        PenEvent::Proximity {
            element,
            modifier_keys,
        } => PenEvent::Proximity {
            element: Element::new(snapper.resolve(element.pos)),
            modifier_keys,
        },
        other => other,
    }
}
