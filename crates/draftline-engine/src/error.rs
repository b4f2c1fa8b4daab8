// Imports
use thiserror::Error;

/// Recoverable engine errors.
///
/// None of these are fatal to the user. Every occurrence is recovered or silently normalized
/// locally, surfacing a message is the responsibility of the surrounding UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecoverableEngineError {
    /// A zero-length or zero-area shape reached a commit.
    #[error("degenerate zero-size shape, the commit was refused")]
    DegenerateShape,
    /// A modifier key up was observed without a matching key down, e.g. after a focus loss.
    #[error("modifier key up without a matching key down, the constraint flag was force-reset")]
    InvalidModifierState,
    /// A targeted element vanished from the element store mid-drag.
    #[error("drag target vanished from the element store, it was dropped from the target set")]
    DragTargetMissing,
}
