//! Victory rewards: experience and loot.
//!
//! Rolling is pure; offering the drop to the player and saving the result
//! belong to the caller.

use crate::config::CombatConfig;
use crate::env::{ItemDefinition, ItemOracle, NpcTemplate, RngOracle};
use crate::state::Entity;

/// An item dropped by a defeated opponent.
#[derive(Clone, Debug, PartialEq)]
pub struct LootDrop {
    pub item: ItemDefinition,
    /// False when the player fails the item's requirement; such drops are
    /// discarded.
    pub equippable: bool,
}

/// Adds the opponent's XP yield to the player, returning the amount gained.
pub fn award_experience(player: &mut Entity, npc: &NpcTemplate) -> u32 {
    player.xp += u64::from(npc.xp_yield);
    npc.xp_yield
}

/// Picks one of the opponent's loot entries by weight.
///
/// Entry `i` is chosen with weight [`CombatConfig::LOOT_WEIGHTS`]`[i]`.
/// An empty entry or an id the item table does not know means no drop.
pub fn roll_loot<I, R>(
    player: &Entity,
    npc: &NpcTemplate,
    items: &I,
    rng: &R,
    seed: u64,
) -> Option<LootDrop>
where
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    let index = rng.weighted_index(seed, &CombatConfig::LOOT_WEIGHTS)?;
    let id = npc.loot.get(index).copied().flatten()?;
    let item = items.item(id)?.clone();
    let equippable = player.can_equip(&item);
    Some(LootDrop { item, equippable })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Catalog, CharacterTemplate, ItemId};
    use crate::state::Slot;
    use crate::stats::Attribute;

    /// Returns `value` for every seed, so `weighted_index` picks
    /// `value % 100` along the cumulative weights.
    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            [],
            [
                ItemDefinition::new(1, "Cap", Slot::Head),
                ItemDefinition::new(2, "Tunic", Slot::Chest),
                ItemDefinition::new(5, "Crown", Slot::Head).with_requirement(Attribute::Int, 50),
            ],
        )
    }

    fn npc() -> NpcTemplate {
        let mut npc = NpcTemplate {
            xp_yield: 25,
            ..NpcTemplate::default()
        };
        npc.loot.push(Some(ItemId(1)));
        npc.loot.push(Some(ItemId(2)));
        npc.loot.push(None);
        npc.loot.push(Some(ItemId(77)));
        npc.loot.push(Some(ItemId(5)));
        npc
    }

    fn hero() -> Entity {
        Entity::player(&CharacterTemplate::default(), &catalog())
    }

    #[test]
    fn experience_accumulates() {
        let mut hero = hero();
        hero.xp = 10;
        assert_eq!(award_experience(&mut hero, &npc()), 25);
        assert_eq!(hero.xp, 35);
    }

    #[test]
    fn weights_select_entries() {
        let hero = hero();
        let (npc, catalog) = (npc(), catalog());

        let first = roll_loot(&hero, &npc, &catalog, &Fixed(0), 0).unwrap();
        assert_eq!(first.item.name, "Cap");
        assert!(first.equippable);

        let second = roll_loot(&hero, &npc, &catalog, &Fixed(45), 0).unwrap();
        assert_eq!(second.item.name, "Tunic");
    }

    #[test]
    fn empty_or_unknown_entries_drop_nothing() {
        let hero = hero();
        let (npc, catalog) = (npc(), catalog());

        assert!(roll_loot(&hero, &npc, &catalog, &Fixed(75), 0).is_none());
        assert!(roll_loot(&hero, &npc, &catalog, &Fixed(95), 0).is_none());
        assert!(roll_loot(&hero, &NpcTemplate::default(), &catalog, &Fixed(0), 0).is_none());
    }

    #[test]
    fn unmet_requirement_marks_drop_unequippable() {
        let hero = hero();
        let (npc, catalog) = (npc(), catalog());

        let crown = roll_loot(&hero, &npc, &catalog, &Fixed(99), 0).unwrap();
        assert_eq!(crown.item.name, "Crown");
        assert!(!crown.equippable);
    }
}
