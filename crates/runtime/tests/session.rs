use arena_core::{
    Attribute, AttributeSet, Catalog, CharacterTemplate, CombatOutcome, CombatState,
    DamageTotals, Entity, ItemDefinition, ItemId, NpcTemplate, Side, Slot,
};
use arena_runtime::{
    AlwaysEquip, InMemoryLeaderboard, InMemorySaveRepo, LeaderboardRepository, LootPrompt,
    SaveRepository, Session,
};

struct Decline;

impl LootPrompt for Decline {
    fn offer(&mut self, _offered: &ItemDefinition, _current: Option<&ItemDefinition>) -> bool {
        false
    }
}

fn catalog() -> Catalog {
    Catalog::new(
        [],
        [
            ItemDefinition::new(1, "Cap", Slot::Head).with_bonus(Attribute::Sta, 2),
            ItemDefinition::new(2, "Hood", Slot::Head),
            ItemDefinition::new(3, "Crown", Slot::Head).with_requirement(Attribute::Int, 50),
        ],
    )
}

/// An NPC whose every loot entry is the same item.
fn npc(loot: u32) -> NpcTemplate {
    let mut npc = NpcTemplate {
        name: "Rat".to_owned(),
        xp_yield: 15,
        ..NpcTemplate::default()
    };
    for _ in 0..5 {
        npc.loot.push(Some(ItemId(loot)));
    }
    npc
}

fn hero(catalog: &Catalog) -> Entity {
    let mut template = CharacterTemplate {
        name: "Hero".to_owned(),
        attributes: AttributeSet::from_pairs([(Attribute::Sta, 4)]),
        ..CharacterTemplate::default()
    };
    template.equipment.insert(Slot::Head, ItemId(2));
    Entity::player(&template, catalog)
}

fn outcome(state: CombatState) -> CombatOutcome {
    CombatOutcome {
        state,
        winner: state.winner().unwrap_or(Side::Opponent),
        forfeited_by: (state == CombatState::Forfeited).then_some(Side::Player),
        player: DamageTotals {
            dealt: 100.0,
            taken: 12.0,
        },
        opponent: DamageTotals {
            dealt: 12.0,
            taken: 100.0,
        },
        duration: 12.3456,
    }
}

fn session() -> Session {
    Session::new(
        Box::new(InMemorySaveRepo::new()),
        Box::new(InMemoryLeaderboard::new()),
        99,
    )
}

#[test]
fn victory_awards_loot_saves_and_records() {
    let catalog = catalog();
    let mut session = session();
    let mut player = hero(&catalog);
    let opponent = Entity::opponent(&npc(1));

    let lines = session.conclude(
        &outcome(CombatState::PlayerWon),
        1,
        &mut player,
        &opponent,
        &catalog,
        &mut AlwaysEquip,
    );

    assert_eq!(lines[0], "Hero defeated Rat!");
    assert_eq!(lines[1], "Gained 15 XP. Total XP: 15");
    assert_eq!(lines[2], "Rat dropped: Cap (Slot: Head)!");
    assert_eq!(lines[3], "Equipped Cap.");
    assert_eq!(lines[4], "Character Hero saved (ID: 1).");
    assert_eq!(lines[5], "Hero recorded to leaderboard.");

    assert_eq!(player.save_id, Some(1));
    assert_eq!(player.equipment.get(Slot::Head).map(|i| i.id), Some(ItemId(1)));

    let saved = session.saves().get(1).unwrap().unwrap();
    assert_eq!(saved.xp, 15);
    assert_eq!(saved.equipment.get(&Slot::Head), Some(&ItemId(1)));

    let entries = session.leaderboard().entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kills, 1);
    assert_eq!(entries[0].duration, 12.35);
    assert_eq!(entries[0].items[&Slot::Head], "Cap");
    assert_eq!(entries[0].items[&Slot::Ring], "None");
}

#[test]
fn declined_and_unmet_drops_keep_current_item() {
    let catalog = catalog();
    let mut session = session();

    let mut player = hero(&catalog);
    let lines = session.conclude(
        &outcome(CombatState::PlayerWon),
        1,
        &mut player,
        &Entity::opponent(&npc(1)),
        &catalog,
        &mut Decline,
    );
    assert!(lines.contains(&"Kept Hood instead of Cap.".to_owned()));

    let mut player = hero(&catalog);
    let lines = session.conclude(
        &outcome(CombatState::PlayerWon),
        2,
        &mut player,
        &Entity::opponent(&npc(3)),
        &catalog,
        &mut AlwaysEquip,
    );
    assert!(lines.contains(
        &"You don't meet requirements for Crown (INT ≥ 50). It is discarded.".to_owned()
    ));
    assert_eq!(player.equipment.get(Slot::Head).map(|i| i.id), Some(ItemId(2)));
}

#[test]
fn unknown_loot_drops_nothing() {
    let catalog = catalog();
    let mut session = session();
    let mut player = hero(&catalog);

    let lines = session.conclude(
        &outcome(CombatState::PlayerWon),
        1,
        &mut player,
        &Entity::opponent(&npc(404)),
        &catalog,
        &mut AlwaysEquip,
    );
    assert!(lines.contains(&"No valid loot dropped.".to_owned()));
}

#[test]
fn any_loss_deletes_the_save() {
    let catalog = catalog();
    let mut session = session();
    let opponent = Entity::opponent(&npc(1));

    for (state, seed) in [(CombatState::Forfeited, 1), (CombatState::OpponentWon, 2)] {
        let mut loser = hero(&catalog);
        let save_id = session.saves().upsert(&loser.to_template()).unwrap();
        loser.save_id = Some(save_id);

        let lines = session.conclude(
            &outcome(state),
            seed,
            &mut loser,
            &opponent,
            &catalog,
            &mut AlwaysEquip,
        );

        assert_eq!(
            lines,
            vec![
                "Hero recorded to leaderboard.".to_owned(),
                format!("Player Hero (SaveID: {save_id}) removed from saves after loss."),
            ]
        );
        assert!(session.saves().get(save_id).unwrap().is_none());
        assert_eq!(loser.save_id, None);
    }
    assert_eq!(session.leaderboard().entries().unwrap().len(), 2);
}

#[test]
fn fight_seeds_differ_within_a_session() {
    let mut session = session();
    let first = session.next_fight_seed();
    let second = session.next_fight_seed();
    assert_ne!(first, second);
}
