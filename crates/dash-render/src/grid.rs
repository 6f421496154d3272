//! Size → grid span mapping

use dash_roles::LayoutMode;
use dash_widget::WidgetSize;
use serde::Serialize;

/// Number of grid tracks a widget occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridSpan {
    /// Tracks occupied
    pub span: u8,

    /// Tracks in the layout
    pub of: u8,
}

impl GridSpan {
    /// Span of a size within a layout
    ///
    /// | size   | 1-col | 2-col | 3-col | dashboard |
    /// |--------|-------|-------|-------|-----------|
    /// | small  | 1     | 1     | 1     | 3         |
    /// | medium | 1     | 1     | 1     | 6         |
    /// | large  | 1     | 2     | 2     | 8         |
    /// | full   | 1     | 2     | 3     | 12        |
    #[must_use]
    pub fn for_size(size: WidgetSize, layout: LayoutMode) -> Self {
        let of = layout.columns();
        let span = match (layout, size) {
            (LayoutMode::OneColumn, _)
            | (LayoutMode::TwoColumn | LayoutMode::ThreeColumn, WidgetSize::Small | WidgetSize::Medium) => 1,
            (LayoutMode::TwoColumn | LayoutMode::ThreeColumn, WidgetSize::Large) => 2,
            (LayoutMode::TwoColumn | LayoutMode::ThreeColumn, WidgetSize::Full) => of,
            (LayoutMode::Dashboard, WidgetSize::Small) => 3,
            (LayoutMode::Dashboard, WidgetSize::Medium) => 6,
            (LayoutMode::Dashboard, WidgetSize::Large) => 8,
            (LayoutMode::Dashboard, WidgetSize::Full) => 12,
        };
        Self { span, of }
    }

    /// Check if the widget fills its row
    #[inline]
    #[must_use]
    pub fn is_full_row(self) -> bool {
        self.span == self.of
    }

    /// Class name for the grid cell (e.g. `span-6-of-12`)
    #[must_use]
    pub fn class_name(self) -> String {
        format!("span-{}-of-{}", self.span, self.of)
    }
}
