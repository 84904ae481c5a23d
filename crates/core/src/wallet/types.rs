//! Wallet entity types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vitrine_shared::types::{
    CategoryId, CategoryTypeId, OperationId, SubCategoryId, WalletId, WebsiteId,
};

use crate::ordering::{append, Positioned};

/// Top level of the classification tree (e.g. "Expenses", "Income").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryType {
    /// Unique identifier.
    pub id: CategoryTypeId,
    /// Display name.
    pub name: String,
    /// 1-based position among siblings.
    pub position: u32,
    /// Ordered child categories.
    pub categories: Vec<Category>,
}

impl CategoryType {
    /// Creates an empty category type. Position is assigned on insertion.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryTypeId::new(),
            name: name.into(),
            position: 0,
            categories: Vec::new(),
        }
    }

    /// Appends a category at the end of this type.
    pub fn append_category(&mut self, category: Category) {
        append(&mut self.categories, category);
    }
}

impl Positioned for CategoryType {
    fn position(&self) -> u32 {
        self.position
    }
    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

/// Middle level of the classification tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// 1-based position among siblings.
    pub position: u32,
    /// Ordered child subcategories.
    pub subcategories: Vec<SubCategory>,
}

impl Category {
    /// Creates an empty category. Position is assigned on insertion.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            position: 0,
            subcategories: Vec::new(),
        }
    }

    /// Appends a subcategory at the end of this category.
    pub fn append_subcategory(&mut self, subcategory: SubCategory) {
        append(&mut self.subcategories, subcategory);
    }
}

impl Positioned for Category {
    fn position(&self) -> u32 {
        self.position
    }
    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

/// Leaf level of the classification tree; operations reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubCategory {
    /// Unique identifier.
    pub id: SubCategoryId,
    /// Display name.
    pub name: String,
    /// 1-based position among siblings.
    pub position: u32,
}

impl SubCategory {
    /// Creates a subcategory. Position is assigned on insertion.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SubCategoryId::new(),
            name: name.into(),
            position: 0,
        }
    }
}

impl Positioned for SubCategory {
    fn position(&self) -> u32 {
        self.position
    }
    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

/// A wallet: the operations of one website, classified by subcategory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique identifier.
    pub id: WalletId,
    /// Owning website.
    pub website_id: WebsiteId,
    /// Display name.
    pub name: String,
    /// Recorded operations, unordered.
    pub operations: Vec<Operation>,
}

impl Wallet {
    /// Creates an empty wallet.
    #[must_use]
    pub fn new(website_id: WebsiteId, name: impl Into<String>) -> Self {
        Self {
            id: WalletId::new(),
            website_id,
            name: name.into(),
            operations: Vec::new(),
        }
    }
}

/// A single dated amount classified under a subcategory. Negative amounts
/// are expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Unique identifier.
    pub id: OperationId,
    /// Classification leaf.
    pub subcategory_id: SubCategoryId,
    /// Operator-facing label.
    pub label: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Value date.
    pub date: NaiveDate,
}

impl Operation {
    /// Creates an operation.
    #[must_use]
    pub fn new(
        subcategory_id: SubCategoryId,
        label: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: OperationId::new(),
            subcategory_id,
            label: label.into(),
            amount,
            date,
        }
    }
}
