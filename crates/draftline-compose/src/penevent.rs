// Imports
use crate::element::Element;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A Pen Event.
///
/// Note that there is no "motion" event, because we want the events to be entirely stateless.
/// Motion events already encode state as they would only be valid if they are preceded by a down event.
/// As a result, multiple down events are emitted while the pointer is pressed down and being moved.
/// This should be handled accordingly by the state machines which receive the events.
#[derive(Debug, Clone)]
pub enum PenEvent {
    /// A pen down event. Is repeatedly emitted while the pointer is pressed down and moved.
    Down {
        /// The element for the down event.
        element: Element,
        /// Modifier keys pressed during the event.
        modifier_keys: HashSet<ModifierKey>,
    },
    /// A pen up event. Commits the current candidate.
    Up {
        /// The element for the up event.
        element: Element,
        /// Modifier keys pressed during the event.
        modifier_keys: HashSet<ModifierKey>,
    },
    /// A proximity event. Is repeatedly emitted while the pointer hovers and is moved.
    Proximity {
        /// The element for the proximity event.
        element: Element,
        /// Modifier keys pressed during the event.
        modifier_keys: HashSet<ModifierKey>,
    },
    /// A keyboard key pressed event.
    KeyPressed {
        /// the key
        keyboard_key: KeyboardKey,
        /// Modifier keys pressed during the event.
        modifier_keys: HashSet<ModifierKey>,
    },
    /// Cancel event when the pointer vanishes unexpected.
    ///
    /// Should finish all current actions and reset all state.
    Cancel,
}

/// A key on the keyboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyboardKey {
    /// A Unicode character.
    ///
    /// Expects that control characters are already converted and filtered out with the method
    /// [KeyboardKey::filter_convert_unicode_control_chars].
    Unicode(char),
    /// Line feed.
    Linefeed,
    /// Carriage return.
    CarriageReturn,
    /// Escape.
    Escape,
    /// Delete.
    Delete,
    /// Backspace.
    BackSpace,
    /// Unsupported Key.
    Unsupported,
}

impl KeyboardKey {
    /// Filter and convert unicode control characters to a fitting variant,
    /// or if unsupported [KeyboardKey::Unsupported].
    pub fn filter_convert_unicode_control_chars(self) -> Self {
        match self {
            key @ Self::Unicode(keychar) => {
                if keychar.is_control() {
                    match keychar as u32 {
                        0x08 => Self::BackSpace,
                        0x0a => Self::Linefeed,
                        0x0d => Self::CarriageReturn,
                        0x1b => Self::Escape,
                        0x7f => Self::Delete,
                        _ => Self::Unsupported,
                    }
                } else {
                    key
                }
            }
            other => other,
        }
    }
}

/// A modifier key.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename = "modifier_key")]
pub enum ModifierKey {
    /// Shift. The constrain modifier.
    #[serde(rename = "keyboard_shift")]
    KeyboardShift,
    /// Ctrl.
    #[serde(rename = "keyboard_ctrl")]
    KeyboardCtrl,
    /// Alt.
    #[serde(rename = "keyboard_alt")]
    KeyboardAlt,
}

/// The current pen state. Used wherever there is internal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PenState {
    /// Up.
    Up,
    /// Proximity.
    Proximity,
    /// Down.
    Down,
}

/// The pen progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PenProgress {
    /// In idle state.
    Idle,
    /// In progress state.
    InProgress,
    /// Pen is finished.
    Finished,
}
