//! Render tree types
//!
//! The renderer never fails. Everything that can go wrong with a single
//! widget is a [`SlotState`] variant of that widget's slot; the only
//! page-level state is [`DashboardContent::Empty`].

use dash_roles::LayoutMode;
use dash_widget::{WidgetFrame, WidgetId, WidgetSize};
use serde::Serialize;

use crate::grid::GridSpan;

/// Placeholder shown while a widget loads
///
/// Carries the widget's effective size so the grid does not reflow when the
/// widget becomes ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Skeleton {
    /// Effective size
    pub size: WidgetSize,

    /// Grid span
    pub span: GridSpan,
}

/// State of one widget slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotState {
    /// Implementation still loading
    Loading {
        /// Size-matched placeholder
        skeleton: Skeleton,
    },

    /// Rendered successfully
    Ready {
        /// Widget output
        frame: WidgetFrame,
    },

    /// Placement id has no registry entry (configuration error)
    NotRegistered,

    /// Implementation failed to load
    LoadFailed {
        /// Underlying error
        message: String,
    },

    /// View failed while rendering
    RenderFailed {
        /// Underlying error
        message: String,
    },
}

impl SlotState {
    /// Check if still loading
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Check if rendered
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Check if this slot shows a placeholder for a problem
    #[inline]
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            Self::NotRegistered | Self::LoadFailed { .. } | Self::RenderFailed { .. }
        )
    }

    /// Fault message, if any
    #[must_use]
    pub fn fault_message(&self) -> Option<&str> {
        match self {
            Self::LoadFailed { message } | Self::RenderFailed { message } => Some(message),
            Self::NotRegistered => Some("widget not registered"),
            Self::Loading { .. } | Self::Ready { .. } => None,
        }
    }
}

/// One placement's cell in the dashboard grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSlot {
    /// Position in placement order
    pub index: usize,

    /// Placement id (may be unregistered)
    pub id: WidgetId,

    /// Effective size
    pub size: WidgetSize,

    /// Grid span for the effective size
    pub span: GridSpan,

    /// Current state
    #[serde(flatten)]
    pub state: SlotState,
}

impl WidgetSlot {
    /// Frame if ready
    #[must_use]
    pub fn frame(&self) -> Option<&WidgetFrame> {
        match &self.state {
            SlotState::Ready { frame } => Some(frame),
            _ => None,
        }
    }
}

/// State change of one slot, emitted as widgets settle
#[derive(Debug, Clone, PartialEq)]
pub struct SlotUpdate {
    /// Slot index
    pub index: usize,

    /// Widget id
    pub id: WidgetId,

    /// New state
    pub state: SlotState,
}

/// Dashboard body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardContent {
    /// No widgets are configured for the role
    Empty,

    /// Widget grid in placement order
    Grid {
        /// Slots
        slots: Vec<WidgetSlot>,
    },
}

/// Rendered dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Layout mode
    pub layout: LayoutMode,

    /// Body
    pub content: DashboardContent,
}

impl DashboardView {
    /// View for a role without widgets
    #[inline]
    #[must_use]
    pub fn empty(layout: LayoutMode) -> Self {
        Self {
            layout,
            content: DashboardContent::Empty,
        }
    }

    /// Check for the explicit "no widgets configured" state
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.content, DashboardContent::Empty)
    }

    /// Slots in placement order (none when empty)
    #[must_use]
    pub fn slots(&self) -> &[WidgetSlot] {
        match &self.content {
            DashboardContent::Empty => &[],
            DashboardContent::Grid { slots } => slots,
        }
    }

    /// First slot for a widget id
    #[must_use]
    pub fn slot(&self, id: &str) -> Option<&WidgetSlot> {
        self.slots().iter().find(|slot| slot.id.as_str() == id)
    }

    /// Apply a slot update
    ///
    /// Updates for unknown indices or mismatched ids are ignored.
    pub fn apply(&mut self, update: SlotUpdate) {
        if let DashboardContent::Grid { slots } = &mut self.content {
            if let Some(slot) = slots.get_mut(update.index) {
                if slot.id == update.id {
                    slot.state = update.state;
                }
            }
        }
    }

    /// Check if no slot is still loading
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.slots().iter().all(|slot| !slot.state.is_loading())
    }

    /// Number of ready slots
    #[must_use]
    pub fn ready_count(&self) -> usize {
        self.slots().iter().filter(|slot| slot.state.is_ready()).count()
    }

    /// Number of slots showing a fault placeholder
    #[must_use]
    pub fn fault_count(&self) -> usize {
        self.slots().iter().filter(|slot| slot.state.is_fault()).count()
    }
}
