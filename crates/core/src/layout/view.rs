//! Read-rendering of a layout tree through the view-model assembler.

use serde::Serialize;
use vitrine_shared::Locale;

use crate::content::{ContentView, ViewContext};

use super::types::{BlockKind, Layout};

/// A rendered block: its behavior tag plus the locale projection.
#[derive(Debug, Clone, Serialize)]
pub struct BlockView {
    /// Rendering behavior.
    pub kind: BlockKind,
    /// The block's projection for the requested locale.
    pub content: ContentView,
}

/// A rendered column.
#[derive(Debug, Clone, Serialize)]
pub struct ColView {
    /// Grid width, 1..=12.
    pub size: u8,
    /// Blocks in position order.
    pub blocks: Vec<BlockView>,
}

/// A rendered zone.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneView {
    /// Columns in position order.
    pub cols: Vec<ColView>,
}

/// A fully rendered layout.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutView {
    /// Zones in position order.
    pub zones: Vec<ZoneView>,
}

/// Renders a layout for one locale. Every block projection goes through
/// the request's view context, so repeated blocks are assembled once.
#[must_use]
pub fn layout_view(context: &mut ViewContext, layout: &Layout, locale: &Locale) -> LayoutView {
    LayoutView {
        zones: layout
            .zones
            .iter()
            .map(|zone| ZoneView {
                cols: zone
                    .cols
                    .iter()
                    .map(|col| ColView {
                        size: col.size,
                        blocks: col
                            .blocks
                            .iter()
                            .map(|block| BlockView {
                                kind: block.kind.clone(),
                                content: (*context.view(block, locale)).clone(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}
