//! Menu flow around fights: pick a character, pick an opponent, fight,
//! settle, repeat.

use anyhow::Result;
use arena_content::ContentBundle;
use arena_core::{
    Combat, CombatOutcome, CombatState, Entity, GameEnv, ItemDefinition, NpcTemplate, PcgRng,
};
use arena_runtime::{CombatDriver, LootPrompt, RuntimeConfig, Session};

use crate::hud::TerminalHud;
use crate::input::KeyboardInput;
use crate::menu::{Menu, show_message};
use crate::terminal::Tui;

const AFTER_FIGHT: [&str; 3] = ["Fight Again (Same Character)", "Change Character", "Exit Game"];

/// The interactive client.
pub struct App {
    content: ContentBundle,
    session: Session,
    driver: CombatDriver,
}

impl App {
    pub fn new(config: &RuntimeConfig, content: ContentBundle, session: Session) -> Self {
        Self {
            content,
            session,
            driver: CombatDriver::new(config.tick),
        }
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<()> {
        loop {
            let Some(mut player) = self.select_character(terminal)? else {
                tracing::info!("No character selected, exiting");
                return Ok(());
            };

            loop {
                let Some(npc) = self.select_opponent(terminal)? else {
                    break;
                };
                player = self.fight(terminal, player, &npc).await?;

                let choice = Menu::new(
                    "What would you like to do next?",
                    AFTER_FIGHT.iter().map(|s| (*s).to_owned()).collect(),
                )
                .run(terminal)?;
                match choice {
                    Some(0) => player.reset_for_rematch(),
                    Some(1) => break,
                    _ => {
                        tracing::info!("Player exited");
                        return Ok(());
                    }
                }
            }
        }
    }

    fn select_character(&self, terminal: &mut Tui) -> Result<Option<Entity>> {
        loop {
            let source = Menu::new(
                "Choose a character source",
                vec!["Default characters".to_owned(), "Saved characters".to_owned()],
            )
            .run(terminal)?;

            let templates = match source {
                Some(0) => self.content.characters.clone(),
                Some(1) => {
                    let saved = self.session.saves().list()?;
                    if saved.is_empty() {
                        show_message(terminal, "Saved characters", &["No saved characters yet.".to_owned()])?;
                        continue;
                    }
                    saved
                }
                _ => return Ok(None),
            };

            let names = templates
                .iter()
                .map(|t| match t.save_id {
                    Some(id) => format!("{} (ID {}, Lv {}, XP {})", t.name, id, t.level, t.xp),
                    None => format!("{} (Lv {})", t.name, t.level),
                })
                .collect();
            if let Some(index) = Menu::new("Choose your character", names).run(terminal)?
                && let Some(template) = templates.get(index)
            {
                tracing::info!(character = %template.name, save_id = ?template.save_id, "Character selected");
                return Ok(Some(Entity::player(template, &self.content.catalog)));
            }
        }
    }

    fn select_opponent(&self, terminal: &mut Tui) -> Result<Option<NpcTemplate>> {
        let names = self
            .content
            .npcs
            .iter()
            .map(|npc| format!("{} (Lv {}, HP {})", npc.name, npc.level, npc.hp))
            .collect();
        let choice = Menu::new("Choose your opponent", names).run(terminal)?;
        Ok(choice.and_then(|index| self.content.npcs.get(index).cloned()))
    }

    async fn fight(&mut self, terminal: &mut Tui, player: Entity, npc: &NpcTemplate) -> Result<Entity> {
        let seed = self.session.next_fight_seed();
        let rng = PcgRng;
        let env = GameEnv::from_catalog(&self.content.catalog, &rng);

        let mut combat = Combat::new(player, Entity::opponent(npc), self.content.config.clone(), seed);
        let outcome = {
            let mut hud = TerminalHud::new(terminal);
            self.driver
                .run(&mut combat, &env, &mut KeyboardInput, &mut hud)
                .await?
        };

        let (mut player, opponent, log) = combat.into_parts();
        let mut prompt = EquipPrompt { terminal };
        let settled = self.session.conclude(
            &outcome,
            seed,
            &mut player,
            &opponent,
            &self.content.catalog,
            &mut prompt,
        );
        for line in &settled {
            tracing::info!(target: "arena::session", "{line}");
        }

        let mut lines: Vec<String> = log.iter().map(ToString::to_string).collect();
        lines.push(String::new());
        lines.push(headline(&outcome, &opponent.name));
        lines.extend(settled);
        show_message(prompt.terminal, "--- COMBAT END ---", &lines)?;

        Ok(player)
    }
}

fn headline(outcome: &CombatOutcome, opponent: &str) -> String {
    match outcome.state {
        CombatState::PlayerWon => format!("Congratulations! You defeated {opponent}."),
        CombatState::Forfeited => format!("You forfeited the match against {opponent}."),
        CombatState::OpponentWon | CombatState::Active => "You have been defeated.".to_owned(),
    }
}

/// Yes/No equip menu shown when loot drops.
struct EquipPrompt<'a> {
    terminal: &'a mut Tui,
}

impl LootPrompt for EquipPrompt<'_> {
    fn offer(&mut self, offered: &ItemDefinition, current: Option<&ItemDefinition>) -> bool {
        let mut details = vec![
            format!("Do you want to equip {} (Slot {})?", offered.name, offered.slot),
            format!("It will replace: {}.", current.map_or("Nothing", |c| c.name.as_str())),
            format!("New item bonuses: {}", bonuses(offered)),
        ];
        if let Some(current) = current {
            details.push(format!("Old item bonuses: {}", bonuses(current)));
        }

        let menu = Menu::new("Equip it?", vec!["Yes".to_owned(), "No".to_owned()])
            .with_details(details);
        match menu.run(self.terminal) {
            Ok(choice) => choice == Some(0),
            Err(e) => {
                tracing::warn!("Equip prompt failed: {}", e);
                false
            }
        }
    }
}

fn bonuses(item: &ItemDefinition) -> String {
    if item.bonuses.is_empty() {
        return "none".to_owned();
    }
    item.bonuses
        .iter()
        .map(|b| format!("{} {:+}", b.attribute, b.amount))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{Attribute, DamageTotals, Side, Slot};

    fn outcome(state: CombatState) -> CombatOutcome {
        CombatOutcome {
            state,
            winner: state.winner().unwrap_or(Side::Opponent),
            forfeited_by: None,
            player: DamageTotals::default(),
            opponent: DamageTotals::default(),
            duration: 1.0,
        }
    }

    #[test]
    fn headlines_per_ending() {
        assert_eq!(
            headline(&outcome(CombatState::PlayerWon), "Rat"),
            "Congratulations! You defeated Rat."
        );
        assert_eq!(
            headline(&outcome(CombatState::Forfeited), "Rat"),
            "You forfeited the match against Rat."
        );
        assert_eq!(
            headline(&outcome(CombatState::OpponentWon), "Rat"),
            "You have been defeated."
        );
    }

    #[test]
    fn bonus_summary() {
        let sword = ItemDefinition::new(1, "Sword", Slot::MainHand)
            .with_bonus(Attribute::Str, 3)
            .with_bonus(Attribute::Dex, -1);
        assert_eq!(bonuses(&sword), "STR +3, DEX -1");
        assert_eq!(bonuses(&ItemDefinition::new(2, "Rag", Slot::Chest)), "none");
    }
}
