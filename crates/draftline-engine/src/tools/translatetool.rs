// Imports
use super::{ToolBehaviour, ToolStyle};
use crate::engine::EngineViewMut;
use crate::error::RecoverableEngineError;
use crate::store::{ElementKey, ElementStore};
use crate::WidgetFlags;
use draftline_compose::eventresult::EventPropagation;
use draftline_compose::penevent::{KeyboardKey, PenEvent, PenProgress};
use draftline_compose::transform::Transformable;
use draftline_compose::{Constraints, EventResult, Shape};
use std::time::Instant;

#[derive(Debug, Clone)]
enum TranslateState {
    Idle,
    /// An active drag session.
    ///
    /// The snapshot exclusively owns a copy of every target's original shape, captured at begin
    /// and released at commit resp. cancel.
    Translate {
        start_pos: na::Vector2<f64>,
        snapshot: Vec<(ElementKey, Shape)>,
    },
}

/// The translate tool.
///
/// Owns the current drag session. Targets are re-positioned fresh from the begin snapshot on
/// every update, offsets never compound across calls.
#[derive(Debug, Clone)]
pub struct TranslateTool {
    state: TranslateState,
}

impl Default for TranslateTool {
    fn default() -> Self {
        Self {
            state: TranslateState::Idle,
        }
    }
}

impl ToolBehaviour for TranslateTool {
    fn style(&self) -> ToolStyle {
        ToolStyle::Translate
    }

    fn handle_event(
        &mut self,
        event: PenEvent,
        _now: Instant,
        engine_view: &mut EngineViewMut,
    ) -> (EventResult<PenProgress>, WidgetFlags) {
        let mut widget_flags = WidgetFlags::default();

        let progress = match event {
            PenEvent::Down { element, .. } => match &self.state {
                TranslateState::Idle => {
                    let targets = self.targets_at(element.pos, engine_view);
                    if targets.is_empty() {
                        PenProgress::Idle
                    } else {
                        self.begin(&targets, element.pos, engine_view.store);
                        widget_flags.redraw = true;

                        PenProgress::InProgress
                    }
                }
                TranslateState::Translate { .. } => {
                    widget_flags |=
                        self.update(element.pos, engine_view.store, engine_view.constraints);

                    PenProgress::InProgress
                }
            },
            PenEvent::Up { element, .. } => match &self.state {
                TranslateState::Idle => PenProgress::Idle,
                TranslateState::Translate { .. } => {
                    widget_flags |=
                        self.update(element.pos, engine_view.store, engine_view.constraints);
                    widget_flags |= self.end(true, engine_view.store);

                    PenProgress::Finished
                }
            },
            PenEvent::Proximity { .. } => match &self.state {
                TranslateState::Idle => PenProgress::Idle,
                TranslateState::Translate { .. } => PenProgress::InProgress,
            },
            PenEvent::KeyPressed { keyboard_key, .. } => match (&self.state, keyboard_key) {
                (TranslateState::Translate { .. }, KeyboardKey::Escape) => {
                    widget_flags |= self.end(false, engine_view.store);

                    PenProgress::Finished
                }
                (TranslateState::Translate { .. }, _) => PenProgress::InProgress,
                (TranslateState::Idle, _) => PenProgress::Idle,
            },
            PenEvent::Cancel => match &self.state {
                TranslateState::Idle => PenProgress::Idle,
                TranslateState::Translate { .. } => {
                    widget_flags |= self.end(false, engine_view.store);

                    PenProgress::Finished
                }
            },
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

impl TranslateTool {
    /// Whether a drag session is active.
    pub fn active(&self) -> bool {
        matches!(self.state, TranslateState::Translate { .. })
    }

    /// Begin a drag session over the given targets.
    ///
    /// Captures a snapshot of every target's original shape. Targets without a store entry are
    /// not part of the session, an entirely empty target set refuses to activate.
    pub fn begin(
        &mut self,
        targets: &[ElementKey],
        start_pos: na::Vector2<f64>,
        store: &ElementStore,
    ) {
        let snapshot = targets
            .iter()
            .filter_map(|&key| store.shape_ref(key).map(|shape| (key, shape.clone())))
            .collect::<Vec<(ElementKey, Shape)>>();

        if snapshot.is_empty() {
            return;
        }
        self.state = TranslateState::Translate {
            start_pos,
            snapshot,
        };
    }

    /// Update the active drag session with the current cursor position.
    ///
    /// The offset is re-derived from the start position and the axis lock is re-evaluated on
    /// every call, so toggling the constrain modifier mid-drag takes effect on the very next
    /// cursor sample. Every unlocked target is re-positioned fresh from its snapshot with the
    /// identical offset. Targets that vanished from the store are dropped from the session,
    /// the drag continues for the remainder.
    pub fn update(
        &mut self,
        current_pos: na::Vector2<f64>,
        store: &mut ElementStore,
        constraints: Constraints,
    ) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();
        let TranslateState::Translate {
            start_pos,
            snapshot,
        } = &mut self.state
        else {
            return widget_flags;
        };

        let offset = constraints.constrain_axis_lock(current_pos - *start_pos);

        snapshot.retain(|&(key, _)| {
            let present = store.contains(key);
            if !present {
                tracing::warn!(
                    "Dropping drag target, Err: {}",
                    RecoverableEngineError::DragTargetMissing
                );
            }
            present
        });

        for (key, origin) in snapshot.iter() {
            if store.locked(*key) {
                continue;
            }
            let mut shape = origin.clone();
            shape.translate(offset);
            store.set_shape(*key, shape);
        }

        widget_flags.redraw = true;
        widget_flags.store_modified = true;
        widget_flags
    }

    /// End the active drag session.
    ///
    /// Commit finalizes the positions already applied to the store. Cancel restores every
    /// surviving target to its exact snapshot value. The snapshot is released either way.
    pub fn end(&mut self, commit: bool, store: &mut ElementStore) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();

        if let TranslateState::Translate { snapshot, .. } =
            std::mem::replace(&mut self.state, TranslateState::Idle)
        {
            if !commit {
                for (key, origin) in snapshot {
                    if store.contains(key) {
                        store.set_shape(key, origin);
                    }
                }
            }
            widget_flags.redraw = true;
            widget_flags.store_modified = true;
        }
        widget_flags
    }

    // The targets for a pointer down at the given position. A down inside the selection bounds
    // drags the whole selection, otherwise the topmost hit element.
    fn targets_at(
        &self,
        pos: na::Vector2<f64>,
        engine_view: &EngineViewMut,
    ) -> Vec<ElementKey> {
        if !engine_view.selection.is_empty() {
            let in_selection = engine_view
                .store
                .bounds_for_elements(engine_view.selection)
                .map(|bounds| bounds.contains_local_point(&pos.into()))
                .unwrap_or(false);
            if in_selection {
                return engine_view.selection.to_vec();
            }
        }

        engine_view
            .store
            .keys_at_pos(pos)
            .pop()
            .map(|key| vec![key])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftline_compose::shapes::{Line, Rect, Shapeable};

    fn rect_at(origin: na::Vector2<f64>) -> Shape {
        Shape::Rect(Rect::from_corners(origin, origin + na::vector![10.0, 10.0]))
    }

    fn shape_pos(store: &ElementStore, key: ElementKey) -> na::Vector2<f64> {
        store.shape_ref(key).unwrap().pos()
    }

    #[test]
    fn constrained_offset_locks_to_axis() {
        // drag offset (10,10) with the constraint active locks to (10,0)
        let mut store = ElementStore::default();
        let key = store.insert_shape(rect_at(na::vector![0.0, 0.0]));

        let mut tool = TranslateTool::default();
        tool.begin(&[key], na::vector![5.0, 5.0], &store);
        let _ = tool.update(
            na::vector![15.0, 15.0],
            &mut store,
            Constraints::new_w_enabled(true),
        );

        assert_eq!(shape_pos(&store, key), na::vector![10.0, 0.0]);
    }

    #[test]
    fn cancel_restores_snapshot_exactly() {
        let mut store = ElementStore::default();
        let key = store.insert_shape(Shape::Line(Line::new(
            na::vector![0.1, 0.2],
            na::vector![5.3, 0.7],
        )));
        let original = store.shape_ref(key).unwrap().clone();

        let mut tool = TranslateTool::default();
        tool.begin(&[key], na::vector![1.0, 1.0], &store);
        for i in 0..100 {
            let _ = tool.update(
                na::vector![1.0 + i as f64 * 0.37, 1.0 - i as f64 * 0.11],
                &mut store,
                Constraints::default(),
            );
        }
        let _ = tool.end(false, &mut store);

        match (store.shape_ref(key).unwrap(), &original) {
            (Shape::Line(restored), Shape::Line(original)) => {
                assert_eq!(restored.start, original.start);
                assert_eq!(restored.end, original.end);
            }
            _ => panic!("expected lines"),
        }
        assert!(!tool.active());
    }

    #[test]
    fn updates_never_compound() {
        let mut store = ElementStore::default();
        let key = store.insert_shape(rect_at(na::vector![0.0, 0.0]));

        let mut tool = TranslateTool::default();
        tool.begin(&[key], na::vector![0.0, 0.0], &store);
        for _ in 0..50 {
            let _ = tool.update(na::vector![7.0, 3.0], &mut store, Constraints::default());
        }

        assert_eq!(shape_pos(&store, key), na::vector![7.0, 3.0]);
    }

    #[test]
    fn multi_target_drag_preserves_relative_spacing() {
        let mut store = ElementStore::default();
        let first = store.insert_shape(rect_at(na::vector![0.0, 0.0]));
        let second = store.insert_shape(rect_at(na::vector![40.0, 0.0]));

        let mut tool = TranslateTool::default();
        tool.begin(&[first, second], na::vector![0.0, 0.0], &store);
        let _ = tool.update(na::vector![3.0, 9.0], &mut store, Constraints::default());

        assert_eq!(shape_pos(&store, first), na::vector![3.0, 9.0]);
        assert_eq!(shape_pos(&store, second), na::vector![43.0, 9.0]);
    }

    #[test]
    fn locked_targets_hold_while_siblings_move() {
        let mut store = ElementStore::default();
        let locked = store.insert_shape(rect_at(na::vector![0.0, 0.0]));
        let unlocked = store.insert_shape(rect_at(na::vector![40.0, 0.0]));
        store.set_locked(locked, true);

        let mut tool = TranslateTool::default();
        tool.begin(&[locked, unlocked], na::vector![0.0, 0.0], &store);
        let _ = tool.update(na::vector![5.0, 5.0], &mut store, Constraints::default());

        assert_eq!(shape_pos(&store, locked), na::vector![0.0, 0.0]);
        assert_eq!(shape_pos(&store, unlocked), na::vector![45.0, 5.0]);

        // unlocking mid-session is honored on the next update
        store.set_locked(locked, false);
        let _ = tool.update(na::vector![5.0, 5.0], &mut store, Constraints::default());
        assert_eq!(shape_pos(&store, locked), na::vector![5.0, 5.0]);
    }

    #[test]
    fn missing_targets_are_dropped_drag_continues() {
        let mut store = ElementStore::default();
        let vanishing = store.insert_shape(rect_at(na::vector![0.0, 0.0]));
        let surviving = store.insert_shape(rect_at(na::vector![40.0, 0.0]));

        let mut tool = TranslateTool::default();
        tool.begin(&[vanishing, surviving], na::vector![0.0, 0.0], &store);
        store.remove(vanishing);

        let _ = tool.update(na::vector![5.0, 0.0], &mut store, Constraints::default());
        assert_eq!(shape_pos(&store, surviving), na::vector![45.0, 0.0]);

        let _ = tool.end(false, &mut store);
        assert_eq!(shape_pos(&store, surviving), na::vector![40.0, 0.0]);
    }

    #[test]
    fn toggling_constraint_mid_drag_applies_next_update() {
        let mut store = ElementStore::default();
        let key = store.insert_shape(rect_at(na::vector![0.0, 0.0]));

        let mut tool = TranslateTool::default();
        tool.begin(&[key], na::vector![0.0, 0.0], &store);

        let _ = tool.update(
            na::vector![10.0, 10.0],
            &mut store,
            Constraints::new_w_enabled(true),
        );
        assert_eq!(shape_pos(&store, key), na::vector![10.0, 0.0]);

        // releasing the modifier unlocks the very next sample
        let _ = tool.update(
            na::vector![10.0, 10.0],
            &mut store,
            Constraints::new_w_enabled(false),
        );
        assert_eq!(shape_pos(&store, key), na::vector![10.0, 10.0]);
    }

    #[test]
    fn begin_with_unknown_targets_refuses() {
        let mut store = ElementStore::default();
        let key = store.insert_shape(rect_at(na::vector![0.0, 0.0]));
        store.remove(key);

        let mut tool = TranslateTool::default();
        tool.begin(&[key], na::vector![0.0, 0.0], &store);
        assert!(!tool.active());
    }
}
