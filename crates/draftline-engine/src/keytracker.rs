// Imports
use crate::error::RecoverableEngineError;
use draftline_compose::penevent::ModifierKey;
use draftline_compose::Constraints;

/// Tracks the constrain modifier key at application window scope.
///
/// The single writer of the constraint flag. Both the drawing and the drag sessions read the flag
/// through the [Constraints] value assembled per event, all on the one event-loop thread.
///
/// The flag is forcibly reset on window focus loss and whenever a drawing or drag session ends for
/// any reason, so a constrained state can not survive a lost key-up event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintKeyTracker {
    active: bool,
}

impl ConstraintKeyTracker {
    /// The modifier key that activates the geometric constraints.
    pub const CONSTRAIN_MODIFIER: ModifierKey = ModifierKey::KeyboardShift;

    /// Handle a modifier key press. Other keys than the constrain modifier are ignored.
    pub fn key_down(&mut self, key: ModifierKey) {
        if key == Self::CONSTRAIN_MODIFIER {
            self.active = true;
        }
    }

    /// Handle a modifier key release.
    ///
    /// A release without a matching press is reported as
    /// [RecoverableEngineError::InvalidModifierState]. The flag is false afterwards either way.
    pub fn key_up(&mut self, key: ModifierKey) -> Result<(), RecoverableEngineError> {
        if key != Self::CONSTRAIN_MODIFIER {
            return Ok(());
        }
        let was_active = self.active;
        self.active = false;

        if was_active {
            Ok(())
        } else {
            Err(RecoverableEngineError::InvalidModifierState)
        }
    }

    /// Force the flag to inactive.
    pub fn reset(&mut self) {
        self.active = false;
    }

    /// Whether the constrain modifier is currently held.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Assemble the constraints value handed into the sessions, from the given tuning.
    pub fn constraints(&self, tuning: Constraints) -> Constraints {
        Constraints {
            enabled: self.active,
            ..tuning
        }
    }
}
