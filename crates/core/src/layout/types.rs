//! Composition tree types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitrine_shared::types::{BlockId, LayoutId};
use vitrine_shared::Locale;

use crate::content::{ContentKind, Intl, IntlSet, Localized, MediaRef};
use crate::ordering::{append, remove_and_reflow, Positioned};

/// Rendering behavior of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Rich-text block.
    Text,
    /// Single media block.
    Media,
    /// Media slider/carousel.
    Slider,
    /// Newscast listing block.
    Newscast,
    /// Template-defined block type.
    Custom(String),
}

/// A leaf of the composition tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Persisted id. Unsaved blocks are never cached by the assembler.
    pub id: Option<BlockId>,
    /// Rendering behavior.
    pub kind: BlockKind,
    /// 1-based position among siblings.
    pub position: u32,
    /// Translation records.
    pub intls: IntlSet,
    /// Media references, all locales mixed.
    pub media: Vec<MediaRef>,
}

impl Block {
    /// Creates an unsaved block. Position is assigned on insertion.
    #[must_use]
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: None,
            kind,
            position: 0,
            intls: IntlSet::new(),
            media: Vec::new(),
        }
    }

    /// Marks the block as persisted under a fresh id.
    #[must_use]
    pub fn persisted(mut self) -> Self {
        self.id = Some(BlockId::new());
        self
    }
}

impl Positioned for Block {
    fn position(&self) -> u32 {
        self.position
    }
    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

impl Localized for Block {
    fn content_id(&self) -> Option<Uuid> {
        self.id.map(BlockId::into_inner)
    }

    fn content_kind(&self) -> ContentKind {
        ContentKind::Block
    }

    fn intl(&self, locale: &Locale) -> Option<&Intl> {
        self.intls.get(locale)
    }

    fn media(&self, locale: &Locale) -> Vec<MediaRef> {
        self.media
            .iter()
            .filter(|m| &m.locale == locale)
            .cloned()
            .collect()
    }
}

/// A column inside a zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Col {
    /// Grid width, 1..=12.
    pub size: u8,
    /// 1-based position among siblings.
    pub position: u32,
    /// Ordered blocks.
    pub blocks: Vec<Block>,
}

impl Col {
    /// Creates an empty column of the given grid width.
    #[must_use]
    pub fn new(size: u8) -> Self {
        Self {
            size,
            position: 0,
            blocks: Vec::new(),
        }
    }

    /// Appends a block at the end of the column.
    pub fn append_block(&mut self, block: Block) {
        append(&mut self.blocks, block);
    }

    /// Removes a block and reflows the survivors. Returns the removed
    /// block.
    pub fn remove_block(&mut self, id: BlockId) -> Option<Block> {
        remove_and_reflow(&mut self.blocks, |b| b.id == Some(id))
    }
}

impl Positioned for Col {
    fn position(&self) -> u32 {
        self.position
    }
    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

/// A horizontal band of the layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// 1-based position among siblings.
    pub position: u32,
    /// Ordered columns.
    pub cols: Vec<Col>,
}

impl Zone {
    /// Creates an empty zone.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: 0,
            cols: Vec::new(),
        }
    }

    /// Appends a column at the end of the zone.
    pub fn append_col(&mut self, col: Col) {
        append(&mut self.cols, col);
    }
}

impl Default for Zone {
    fn default() -> Self {
        Self::new()
    }
}

impl Positioned for Zone {
    fn position(&self) -> u32 {
        self.position
    }
    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

/// A page's full composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    /// Unique identifier.
    pub id: LayoutId,
    /// Admin-facing name.
    pub name: String,
    /// Ordered zones.
    pub zones: Vec<Zone>,
}

impl Layout {
    /// Creates an empty layout.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: LayoutId::new(),
            name: name.into(),
            zones: Vec::new(),
        }
    }

    /// Appends a zone at the end of the layout.
    pub fn append_zone(&mut self, zone: Zone) {
        append(&mut self.zones, zone);
    }

    /// Removes the first block with the given id anywhere in the tree,
    /// reflowing its siblings.
    pub fn remove_block(&mut self, id: BlockId) -> Option<Block> {
        self.zones
            .iter_mut()
            .flat_map(|z| z.cols.iter_mut())
            .find_map(|col| col.remove_block(id))
    }
}
