// Modules
pub mod shapertool;
pub mod translatetool;

// Re-exports
pub use shapertool::ShaperTool;
pub use translatetool::TranslateTool;

// Imports
use crate::engine::EngineViewMut;
use crate::WidgetFlags;
use draftline_compose::penevent::{PenEvent, PenProgress};
use draftline_compose::EventResult;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A choice for a tool style.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename = "tool_style")]
pub enum ToolStyle {
    /// The shaper tool, drawing new shapes.
    #[serde(rename = "shaper")]
    #[default]
    Shaper,
    /// The translate tool, moving existing elements.
    #[serde(rename = "translate")]
    Translate,
}

/// Types that are tools.
pub trait ToolBehaviour {
    /// The tool style.
    fn style(&self) -> ToolStyle;

    /// Handle a pen event.
    fn handle_event(
        &mut self,
        event: PenEvent,
        now: Instant,
        engine_view: &mut EngineViewMut,
    ) -> (EventResult<PenProgress>, WidgetFlags);
}

/// The current tool.
#[derive(Debug)]
pub enum Tool {
    /// The shaper tool.
    Shaper(ShaperTool),
    /// The translate tool.
    Translate(TranslateTool),
}

impl Default for Tool {
    fn default() -> Self {
        Self::Shaper(ShaperTool::default())
    }
}

impl Tool {
    /// A new tool of the given style.
    pub fn new_from_style(style: ToolStyle) -> Self {
        match style {
            ToolStyle::Shaper => Self::Shaper(ShaperTool::default()),
            ToolStyle::Translate => Self::Translate(TranslateTool::default()),
        }
    }
}

impl ToolBehaviour for Tool {
    fn style(&self) -> ToolStyle {
        match self {
            Self::Shaper(shaper) => shaper.style(),
            Self::Translate(translate) => translate.style(),
        }
    }

    fn handle_event(
        &mut self,
        event: PenEvent,
        now: Instant,
        engine_view: &mut EngineViewMut,
    ) -> (EventResult<PenProgress>, WidgetFlags) {
        match self {
            Self::Shaper(shaper) => shaper.handle_event(event, now, engine_view),
            Self::Translate(translate) => translate.handle_event(event, now, engine_view),
        }
    }
}
