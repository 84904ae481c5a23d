//! Position-ordered sibling helpers.
//!
//! Layout zones/cols/blocks and wallet classification levels all keep an
//! explicit `position` starting at 1 and contiguous across siblings.
//! Removal reflows the survivors so the invariant holds.

/// Anything carrying a sibling position.
pub trait Positioned {
    /// Current 1-based position.
    fn position(&self) -> u32;
    /// Overwrites the position.
    fn set_position(&mut self, position: u32);
}

/// Renumbers items 1..=n in their current position order (stable for
/// equal positions).
pub fn reflow<T: Positioned>(items: &mut [T]) {
    items.sort_by_key(Positioned::position);
    for (index, item) in items.iter_mut().enumerate() {
        item.set_position(u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1));
    }
}

/// Appends an item at the end of the sibling list.
pub fn append<T: Positioned>(items: &mut Vec<T>, mut item: T) {
    item.set_position(u32::try_from(items.len()).unwrap_or(u32::MAX).saturating_add(1));
    items.push(item);
}

/// Removes the first item matching the predicate and reflows the
/// survivors to stay contiguous from 1, preserving relative order.
/// Returns the removed item.
pub fn remove_and_reflow<T, F>(items: &mut Vec<T>, predicate: F) -> Option<T>
where
    T: Positioned,
    F: FnMut(&T) -> bool,
{
    let index = items.iter().position(predicate)?;
    let removed = items.remove(index);
    reflow(items);
    Some(removed)
}
