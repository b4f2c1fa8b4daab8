// Imports
use serde::{Deserialize, Serialize};

/// A pointer input element.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "element")]
pub struct Element {
    #[serde(rename = "pos")]
    /// The position of the element.
    pub pos: na::Vector2<f64>,
}

impl Default for Element {
    fn default() -> Self {
        Self::new(na::vector![0.0, 0.0])
    }
}

impl Element {
    /// A new element from a position.
    pub fn new(pos: na::Vector2<f64>) -> Self {
        Self { pos }
    }
}
