//! Layout/Zone/Col/Block page-composition tree.
//!
//! A page's visual composition is a tree: a Layout has ordered Zones, a
//! Zone has ordered Cols, a Col has ordered Blocks. The tree is assembled
//! in the admin office and read-rendered per front-office request through
//! the view-model assembler.

mod types;
mod view;

pub use types::{Block, BlockKind, Col, Layout, Zone};
pub use view::{layout_view, BlockView, ColView, LayoutView, ZoneView};
