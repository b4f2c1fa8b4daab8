// Imports
use crate::keytracker::ConstraintKeyTracker;
use crate::snap::{NoSnap, SnapResolve};
use crate::store::{ElementKey, ElementStore};
use crate::tools::{Tool, ToolBehaviour, ToolStyle};
use crate::WidgetFlags;
use draftline_compose::builders::buildable::ShapeDraft;
use draftline_compose::builders::ShapeBuilderType;
use draftline_compose::penevent::{ModifierKey, PenEvent, PenProgress};
use draftline_compose::{Constraints, EventResult};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// The engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename = "engine_config")]
pub struct EngineConfig {
    /// The constraint tuning.
    ///
    /// The enabled flag is overwritten per event with the key tracker state.
    #[serde(rename = "constraints")]
    pub constraints: Constraints,
    /// The shape builder type for new drawing sessions.
    #[serde(rename = "builder_type")]
    pub builder_type: ShapeBuilderType,
}

/// A mutable view into the engine, excluding the tools.
#[derive(Debug)]
pub struct EngineViewMut<'a> {
    /// The element store.
    pub store: &'a mut ElementStore,
    /// The snap resolution stage.
    pub snapper: &'a dyn SnapResolve,
    /// The constraints for the current event.
    pub constraints: Constraints,
    /// The engine config.
    pub config: &'a EngineConfig,
    /// The current selection.
    pub selection: &'a [ElementKey],
}

/// The engine.
///
/// Single-threaded and event-driven. All mutation occurs synchronously inside the input event
/// handlers or the per-frame motion pump, nothing here blocks or performs I/O.
#[derive(Debug)]
pub struct Engine {
    /// The element store.
    pub store: ElementStore,
    /// The engine config.
    pub config: EngineConfig,
    tool: Tool,
    key_tracker: ConstraintKeyTracker,
    snapper: Box<dyn SnapResolve>,
    selection: Vec<ElementKey>,
    /// The latest queued pointer motion event. Coalescing is a pacing optimization only, the
    /// pump always observes the latest cursor sample.
    pending_motion: Option<PenEvent>,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            store: ElementStore::default(),
            config: EngineConfig::default(),
            tool: Tool::default(),
            key_tracker: ConstraintKeyTracker::default(),
            snapper: Box::new(NoSnap),
            selection: Vec::new(),
            pending_motion: None,
        }
    }
}

impl Engine {
    /// The current tool style.
    pub fn tool_style(&self) -> ToolStyle {
        self.tool.style()
    }

    /// Change the current tool style.
    ///
    /// Cancels the session of the previous tool.
    pub fn change_tool_style(&mut self, style: ToolStyle, now: Instant) -> WidgetFlags {
        if style == self.tool.style() {
            return WidgetFlags::default();
        }
        let (_, mut widget_flags) = self.handle_pen_event(PenEvent::Cancel, now);
        self.tool = Tool::new_from_style(style);
        self.key_tracker.reset();
        widget_flags.refresh_ui = true;
        widget_flags
    }

    /// Replace the snap resolution stage.
    pub fn set_snapper(&mut self, snapper: Box<dyn SnapResolve>) {
        self.snapper = snapper;
    }

    /// Set the selection the translate tool operates on.
    pub fn set_selection(&mut self, keys: Vec<ElementKey>) {
        self.selection = keys;
    }

    /// Whether the constrain modifier is currently active.
    pub fn constraint_active(&self) -> bool {
        self.key_tracker.is_active()
    }

    /// Handle a pen event, routing it to the current tool.
    pub fn handle_pen_event(
        &mut self,
        event: PenEvent,
        now: Instant,
    ) -> (EventResult<PenProgress>, WidgetFlags) {
        // direct events supersede queued motion
        self.pending_motion = None;

        let mut engine_view = EngineViewMut {
            store: &mut self.store,
            snapper: &*self.snapper,
            constraints: self.key_tracker.constraints(self.config.constraints),
            config: &self.config,
            selection: &self.selection,
        };
        let (event_result, widget_flags) = self.tool.handle_event(event, now, &mut engine_view);

        if event_result.progress == PenProgress::Finished {
            // a session ending releases the constraint flag, for any reason it ends
            self.key_tracker.reset();
        }

        (event_result, widget_flags)
    }

    /// Handle a modifier key press at application window scope.
    pub fn handle_modifier_key_down(&mut self, key: ModifierKey) {
        self.key_tracker.key_down(key);
    }

    /// Handle a modifier key release at application window scope.
    pub fn handle_modifier_key_up(&mut self, key: ModifierKey) {
        if let Err(e) = self.key_tracker.key_up(key) {
            tracing::debug!("Recovered the modifier key state, Err: {e}");
        }
    }

    /// Handle the application window losing focus.
    ///
    /// Cancels any in-flight drawing or drag session and force-releases the constraint flag,
    /// synchronously.
    pub fn handle_focus_lost(&mut self, now: Instant) -> WidgetFlags {
        self.pending_motion = None;
        let (_, mut widget_flags) = self.handle_pen_event(PenEvent::Cancel, now);
        self.key_tracker.reset();
        widget_flags.redraw = true;
        widget_flags
    }

    /// Queue a pointer motion event for the next frame pump, keeping only the latest sample.
    ///
    /// Only `Down` and `Proximity` events are motion, all other events must be handled directly
    /// with [Engine::handle_pen_event] and are ignored here.
    pub fn queue_motion(&mut self, event: PenEvent) {
        match event {
            PenEvent::Down { .. } | PenEvent::Proximity { .. } => {
                self.pending_motion = Some(event)
            }
            _ => {
                tracing::debug!("Ignoring a queued non-motion pen event");
            }
        }
    }

    /// Process the latest queued pointer motion event, if any.
    ///
    /// Intended to be called once per rendered frame.
    pub fn pump_motion(
        &mut self,
        now: Instant,
    ) -> Option<(EventResult<PenProgress>, WidgetFlags)> {
        let event = self.pending_motion.take()?;
        Some(self.handle_pen_event(event, now))
    }

    /// The current shape draft of the shaper tool, for the rendering collaborator.
    pub fn draft(&self) -> Option<ShapeDraft> {
        match &self.tool {
            Tool::Shaper(shaper) => shaper.draft(),
            Tool::Translate(_) => None,
        }
    }

    /// Set or clear the numeric distance override on the current drawing session.
    pub fn set_distance_override(&mut self, distance: Option<f64>) {
        if let Tool::Shaper(shaper) = &mut self.tool {
            shaper.set_distance_override(distance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snap::GridSnap;
    use approx::assert_relative_eq;
    use draftline_compose::constraints::square_constraint;
    use draftline_compose::element::Element;
    use draftline_compose::shapes::{Rect, Shapeable};
    use draftline_compose::Shape;

    fn pen_down(pos: na::Vector2<f64>) -> PenEvent {
        PenEvent::Down {
            element: Element::new(pos),
            modifier_keys: Default::default(),
        }
    }

    fn pen_up(pos: na::Vector2<f64>) -> PenEvent {
        PenEvent::Up {
            element: Element::new(pos),
            modifier_keys: Default::default(),
        }
    }

    #[test]
    fn snap_resolution_runs_before_the_constraint() {
        let mut engine = Engine::default();
        engine.config.builder_type = ShapeBuilderType::Rect;
        engine.set_snapper(Box::new(GridSnap::new(10.0)));
        engine.handle_modifier_key_down(ModifierKey::KeyboardShift);

        let now = Instant::now();
        let _ = engine.handle_pen_event(pen_down(na::vector![1.0, 2.0]), now);
        let _ = engine.handle_pen_event(pen_down(na::vector![23.0, 14.0]), now);

        // the constraint acts on the snapped position, never the other way around
        let snapped = GridSnap::new(10.0).resolve(na::vector![23.0, 14.0]);
        let expected = square_constraint(na::vector![0.0, 0.0], snapped);

        let candidate = engine.draft().unwrap().candidate.unwrap();
        assert_relative_eq!(candidate, expected);
        assert_relative_eq!(candidate, na::vector![20.0, 20.0]);
    }

    #[test]
    fn motion_pump_observes_only_the_latest_sample() {
        let mut engine = Engine::default();
        engine.config.builder_type = ShapeBuilderType::Line;

        let now = Instant::now();
        let _ = engine.handle_pen_event(pen_down(na::vector![0.0, 0.0]), now);

        engine.queue_motion(pen_down(na::vector![3.0, 3.0]));
        engine.queue_motion(pen_down(na::vector![8.0, 4.0]));
        assert!(engine.pump_motion(now).is_some());

        let candidate = engine.draft().unwrap().candidate.unwrap();
        assert_relative_eq!(candidate, na::vector![8.0, 4.0]);

        // the queue is drained
        assert!(engine.pump_motion(now).is_none());
    }

    #[test]
    fn focus_loss_cancels_draft_and_releases_constraint() {
        let mut engine = Engine::default();
        engine.config.builder_type = ShapeBuilderType::Rect;
        engine.handle_modifier_key_down(ModifierKey::KeyboardShift);

        let now = Instant::now();
        let _ = engine.handle_pen_event(pen_down(na::vector![0.0, 0.0]), now);
        assert!(engine.draft().is_some());

        let _ = engine.handle_focus_lost(now);
        assert!(engine.draft().is_none());
        assert!(!engine.constraint_active());
        // nothing was committed
        assert!(engine.store.is_empty());
    }

    #[test]
    fn finished_session_releases_the_constraint_flag() {
        let mut engine = Engine::default();
        engine.config.builder_type = ShapeBuilderType::Rect;
        engine.handle_modifier_key_down(ModifierKey::KeyboardShift);

        let now = Instant::now();
        let _ = engine.handle_pen_event(pen_down(na::vector![0.0, 0.0]), now);
        let _ = engine.handle_pen_event(pen_up(na::vector![10.0, 5.0]), now);

        assert_eq!(engine.store.len(), 1);
        // even with the key physically held, a finished session resets the flag
        assert!(!engine.constraint_active());
    }

    #[test]
    fn drag_through_events_locks_to_axis() {
        let mut engine = Engine::default();
        let key = engine.store.insert_shape(Shape::Rect(Rect::from_corners(
            na::vector![0.0, 0.0],
            na::vector![10.0, 10.0],
        )));

        let now = Instant::now();
        let _ = engine.change_tool_style(ToolStyle::Translate, now);
        engine.handle_modifier_key_down(ModifierKey::KeyboardShift);

        let _ = engine.handle_pen_event(pen_down(na::vector![5.0, 5.0]), now);
        let _ = engine.handle_pen_event(pen_down(na::vector![15.0, 15.0]), now);
        let (result, _) = engine.handle_pen_event(pen_up(na::vector![15.0, 15.0]), now);

        assert_eq!(result.progress, PenProgress::Finished);
        assert_relative_eq!(
            engine.store.shape_ref(key).unwrap().pos(),
            na::vector![10.0, 0.0]
        );
    }
}
