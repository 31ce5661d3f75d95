//! Equipment slots.

use crate::env::ItemDefinition;

/// Eight equipment slots, numbered 1 through 8 in data files.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::Display,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    Head = 1,
    Chest = 2,
    Legs = 3,
    Feet = 4,
    #[strum(to_string = "Off-Hand")]
    OffHand = 5,
    #[strum(to_string = "Main-Hand")]
    MainHand = 6,
    Neck = 7,
    Ring = 8,
}

impl Slot {
    /// Slot from its 1-based number.
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Head),
            2 => Some(Self::Chest),
            3 => Some(Self::Legs),
            4 => Some(Self::Feet),
            5 => Some(Self::OffHand),
            6 => Some(Self::MainHand),
            7 => Some(Self::Neck),
            8 => Some(Self::Ring),
            _ => None,
        }
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Accessory slots whose item actions are gated by cooldowns.
    pub const fn is_accessory(self) -> bool {
        matches!(self, Self::Neck | Self::Ring)
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize - 1
    }
}

/// Items currently worn, one owned copy per slot.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    slots: [Option<ItemDefinition>; <Slot as strum::EnumCount>::COUNT],
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&ItemDefinition> {
        self.slots[slot.index()].as_ref()
    }

    /// Places `item` into `slot`, returning whatever was there.
    pub fn put(&mut self, slot: Slot, item: ItemDefinition) -> Option<ItemDefinition> {
        self.slots[slot.index()].replace(item)
    }

    pub fn take(&mut self, slot: Slot) -> Option<ItemDefinition> {
        self.slots[slot.index()].take()
    }

    /// Equipped items in slot order.
    pub fn items(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.slots.iter().flatten()
    }

    /// `(slot, item)` pairs for every slot, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Option<&ItemDefinition>)> {
        use strum::IntoEnumIterator;
        Slot::iter().map(|slot| (slot, self.get(slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip() {
        for n in 1..=8 {
            let slot = Slot::from_number(n).unwrap();
            assert_eq!(slot.number(), n);
        }
        assert_eq!(Slot::from_number(0), None);
        assert_eq!(Slot::from_number(9), None);
    }

    #[test]
    fn display_names_use_hyphens() {
        assert_eq!(Slot::OffHand.to_string(), "Off-Hand");
        assert_eq!(Slot::MainHand.to_string(), "Main-Hand");
        assert_eq!(Slot::Ring.to_string(), "Ring");
    }

    #[test]
    fn put_replaces_previous_item() {
        let mut equipment = Equipment::empty();
        let sword = ItemDefinition::new(1, "Sword", Slot::MainHand);
        let axe = ItemDefinition::new(2, "Axe", Slot::MainHand);

        assert!(equipment.put(Slot::MainHand, sword.clone()).is_none());
        assert_eq!(equipment.put(Slot::MainHand, axe), Some(sword));
        assert_eq!(equipment.items().count(), 1);
        assert_eq!(equipment.get(Slot::MainHand).map(|i| i.name.as_str()), Some("Axe"));
    }
}
