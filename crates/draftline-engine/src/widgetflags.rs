/// Flags returned to the UI widget that holds the engine.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WidgetFlags {
    /// Needs surface redrawing.
    pub redraw: bool,
    /// Refresh the UI with the engine state.
    pub refresh_ui: bool,
    /// Whether the store was modified, i.e. new elements inserted, moved, etc. .
    pub store_modified: bool,
}

impl Default for WidgetFlags {
    fn default() -> Self {
        Self {
            redraw: false,
            refresh_ui: false,
            store_modified: false,
        }
    }
}

impl WidgetFlags {
    /// Merge with another WidgetFlags struct, prioritizing other for conflicting values.
    pub fn merge(&mut self, other: Self) {
        self.redraw |= other.redraw;
        self.refresh_ui |= other.refresh_ui;
        self.store_modified |= other.store_modified;
    }
}

impl std::ops::BitOr for WidgetFlags {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self::Output {
        self.merge(rhs);
        self
    }
}

impl std::ops::BitOrAssign for WidgetFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.merge(rhs);
    }
}
