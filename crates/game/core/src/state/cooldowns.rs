//! Per-item cooldown countdowns.

use std::collections::BTreeMap;

use crate::env::ItemId;

/// Remaining cooldown seconds per item id.
///
/// Only items with a nonzero cooldown ever appear here.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldowns {
    remaining: BTreeMap<ItemId, f64>,
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks an item as ready, clearing any running cooldown.
    pub fn register(&mut self, item: ItemId) {
        self.remaining.insert(item, 0.0);
    }

    /// Puts an item on cooldown for `seconds`.
    pub fn set(&mut self, item: ItemId, seconds: f64) {
        self.remaining.insert(item, seconds.max(0.0));
    }

    /// Counts every running cooldown down by `dt`, flooring at 0.
    pub fn tick(&mut self, dt: f64) {
        for remaining in self.remaining.values_mut().filter(|r| **r > 0.0) {
            *remaining = (*remaining - dt).max(0.0);
        }
    }

    pub fn remaining(&self, item: ItemId) -> f64 {
        self.remaining.get(&item).copied().unwrap_or(0.0)
    }

    pub fn is_ready(&self, item: ItemId) -> bool {
        self.remaining(item) <= 0.0
    }

    /// Makes every tracked item ready again.
    pub fn reset_all(&mut self) {
        self.remaining.values_mut().for_each(|r| *r = 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, f64)> + '_ {
        self.remaining.iter().map(|(id, secs)| (*id, *secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untracked_items_are_ready() {
        let cooldowns = Cooldowns::new();
        assert!(cooldowns.is_ready(ItemId(9)));
    }

    #[test]
    fn tick_floors_at_zero() {
        let mut cooldowns = Cooldowns::new();
        cooldowns.set(ItemId(1), 0.25);
        cooldowns.tick(0.1);
        assert!(!cooldowns.is_ready(ItemId(1)));
        assert!((cooldowns.remaining(ItemId(1)) - 0.15).abs() < 1e-9);

        cooldowns.tick(1.0);
        assert!(cooldowns.is_ready(ItemId(1)));
        assert_eq!(cooldowns.remaining(ItemId(1)), 0.0);
    }

    #[test]
    fn register_and_reset_make_items_ready() {
        let mut cooldowns = Cooldowns::new();
        cooldowns.set(ItemId(4), 3.0);
        cooldowns.register(ItemId(4));
        assert!(cooldowns.is_ready(ItemId(4)));

        cooldowns.set(ItemId(4), 3.0);
        cooldowns.set(ItemId(5), 1.0);
        cooldowns.reset_all();
        assert!(cooldowns.is_ready(ItemId(4)));
        assert!(cooldowns.is_ready(ItemId(5)));
        assert_eq!(cooldowns.iter().count(), 2);
    }
}
