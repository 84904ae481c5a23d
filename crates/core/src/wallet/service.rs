//! Wallet business logic: cascading deletion and balances.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use vitrine_shared::types::{CategoryId, SubCategoryId};

use crate::ordering::remove_and_reflow;

use super::types::{Category, CategoryType, Operation, Wallet};

/// Wallet service for classification and balance logic.
pub struct WalletService;

impl WalletService {
    /// Deletes a category from its type, cascading to its subcategories
    /// and their operations in the given wallets. Surviving sibling
    /// categories are reflowed to contiguous positions.
    ///
    /// Returns the removed category, or `None` when the id is unknown.
    pub fn delete_category(
        category_type: &mut CategoryType,
        wallets: &mut [Wallet],
        id: CategoryId,
    ) -> Option<Category> {
        let removed = remove_and_reflow(&mut category_type.categories, |c| c.id == id)?;

        for subcategory in &removed.subcategories {
            Self::purge_operations(wallets, subcategory.id);
        }

        Some(removed)
    }

    /// Deletes a subcategory from its category, cascading to its
    /// operations in the given wallets. Surviving siblings are reflowed.
    pub fn delete_subcategory(
        category: &mut Category,
        wallets: &mut [Wallet],
        id: SubCategoryId,
    ) -> Option<()> {
        remove_and_reflow(&mut category.subcategories, |s| s.id == id)?;
        Self::purge_operations(wallets, id);
        Some(())
    }

    /// Removes every operation referencing the subcategory.
    fn purge_operations(wallets: &mut [Wallet], subcategory_id: SubCategoryId) {
        for wallet in wallets {
            wallet
                .operations
                .retain(|o| o.subcategory_id != subcategory_id);
        }
    }

    /// Signed sum of every operation in the wallet.
    #[must_use]
    pub fn balance(wallet: &Wallet) -> Decimal {
        wallet.operations.iter().map(|o| o.amount).sum()
    }

    /// Signed sum of the operations under one subcategory.
    #[must_use]
    pub fn subcategory_balance(wallet: &Wallet, subcategory_id: SubCategoryId) -> Decimal {
        wallet
            .operations
            .iter()
            .filter(|o| o.subcategory_id == subcategory_id)
            .map(|o| o.amount)
            .sum()
    }

    /// Operations dated inside the given month, in value-date order.
    #[must_use]
    pub fn operations_in_month(wallet: &Wallet, year: i32, month: u32) -> Vec<Operation> {
        let mut operations: Vec<Operation> = wallet
            .operations
            .iter()
            .filter(|o| o.date.year() == year && o.date.month() == month)
            .cloned()
            .collect();
        operations.sort_by_key(|o| o.date);
        operations
    }

    /// Signed sum of the operations dated inside the given month.
    #[must_use]
    pub fn month_balance(wallet: &Wallet, year: i32, month: u32) -> Decimal {
        wallet
            .operations
            .iter()
            .filter(|o| o.date.year() == year && o.date.month() == month)
            .map(|o| o.amount)
            .sum()
    }

    /// First day of the month of `date`, a helper for month filters.
    #[must_use]
    pub fn month_start(date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(date)
    }
}
