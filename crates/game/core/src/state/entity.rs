//! Combatants.
//!
//! An [`Entity`] is one side of a duel. Players derive their stats from
//! attributes and gear; opponents take fixed stats from their template and
//! only let effects move their attack speed.

use crate::action::{ActionId, ActionKey};
use crate::config::CombatConfig;
use crate::env::{CharacterTemplate, ItemDefinition, ItemOracle, NpcTemplate};
use crate::state::{Cooldowns, EffectStack, EquipError, Equipment, Slot};
use crate::stats::{AttributeSet, CombatStats, DerivedStat, Stat, fill_seconds};

/// Which side an entity fights on, with the side-specific action selector.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Fires whatever the last pressed key selects.
    Player { queued: ActionKey },
    /// Fires its template's action sequence in order.
    Opponent {
        template: Box<NpcTemplate>,
        turn: usize,
    },
}

/// One combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub name: String,
    pub role: Role,
    /// Attributes as loaded; only load and level-up change these.
    pub base: AttributeSet,
    /// Attributes after equipment and effects, clamped.
    pub attributes: AttributeSet,
    pub equipment: Equipment,
    pub stats: CombatStats,
    pub hp: f64,
    /// Attack bar progress, 0 to 100.
    pub bar: f64,
    /// Seconds to fill the attack bar.
    pub fill_seconds: f64,
    pub effects: EffectStack,
    pub cooldowns: Cooldowns,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub level: u32,
    pub xp: u64,
    pub save_id: Option<u32>,
}

impl Entity {
    /// Builds a player from a character template.
    ///
    /// Slot ids the item oracle cannot resolve are skipped. The player starts
    /// at full HP with the default melee attack queued.
    pub fn player<I>(template: &CharacterTemplate, items: &I) -> Self
    where
        I: ItemOracle + ?Sized,
    {
        let mut entity = Self {
            name: template.name.clone(),
            role: Role::Player {
                queued: ActionKey::Melee,
            },
            base: template.attributes,
            attributes: template.attributes,
            equipment: Equipment::empty(),
            stats: CombatStats::default(),
            hp: 0.0,
            bar: 0.0,
            fill_seconds: CombatConfig::SLOWEST_FILL_SECONDS,
            effects: EffectStack::new(),
            cooldowns: Cooldowns::new(),
            damage_dealt: 0.0,
            damage_taken: 0.0,
            level: template.level,
            xp: template.xp,
            save_id: template.save_id,
        };

        for (&slot, &id) in &template.equipment {
            if let Some(item) = items.item(id) {
                entity.place(slot, item.clone());
            }
        }

        entity.recompute();
        entity.hp = entity.max_hp();
        entity
    }

    /// Builds an opponent with the template's fixed stats.
    pub fn opponent(template: &NpcTemplate) -> Self {
        let mut stats = CombatStats {
            max_hp: template.hp,
            atk_pw: template.atk_pw,
            atk_sp: template.atk_sp,
            mgc_pw: template.mgc_pw,
            block: template.block,
            dodge: template.dodge,
            armor: template.armor,
            mgc_rs: template.mgc_rs,
            crits: template.crits,
        };
        stats.clamp();

        Self {
            name: template.name.clone(),
            role: Role::Opponent {
                template: Box::new(template.clone()),
                turn: 0,
            },
            base: AttributeSet::zeroed(),
            attributes: AttributeSet::zeroed(),
            equipment: Equipment::empty(),
            stats,
            hp: f64::from(stats.max_hp),
            bar: 0.0,
            fill_seconds: fill_seconds(stats.atk_sp),
            effects: EffectStack::new(),
            cooldowns: Cooldowns::new(),
            damage_dealt: 0.0,
            damage_taken: 0.0,
            level: template.level,
            xp: 0,
            save_id: None,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player { .. })
    }

    pub fn max_hp(&self) -> f64 {
        f64::from(self.stats.max_hp)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0.0
    }

    /// Raises HP by up to `amount`, returning how much was actually restored.
    pub fn restore_hp(&mut self, amount: f64) -> f64 {
        let restored = amount.min(self.max_hp() - self.hp).max(0.0);
        self.hp += restored;
        restored
    }

    /// Lowers HP by up to `amount`, returning how much was actually lost.
    ///
    /// Does not touch the damage-taken counter; callers decide whether the
    /// loss counts as damage.
    pub fn drain_hp(&mut self, amount: f64) -> f64 {
        let drained = amount.min(self.hp).max(0.0);
        self.hp -= drained;
        drained
    }

    pub fn npc_template(&self) -> Option<&NpcTemplate> {
        match &self.role {
            Role::Opponent { template, .. } => Some(template.as_ref()),
            Role::Player { .. } => None,
        }
    }

    /// Re-derives effective attributes, combat stats and fill time.
    ///
    /// Pure function of base attributes, equipment and active effects, so
    /// calling it twice changes nothing. Current HP only rises by the amount
    /// max HP rose, and is always clamped to the new max.
    pub fn recompute(&mut self) {
        let base_speed = match &self.role {
            Role::Player { .. } => None,
            Role::Opponent { template, .. } => Some(template.atk_sp),
        };
        let Some(base_speed) = base_speed else {
            self.recompute_player();
            return;
        };

        let shift: i32 = self
            .effects
            .stat_deltas()
            .filter(|d| d.stat == Stat::Derived(DerivedStat::AtkSp))
            .map(|d| d.amount)
            .sum();
        self.stats.atk_sp = (base_speed + shift).max(1);
        self.fill_seconds = fill_seconds(self.stats.atk_sp);
    }

    fn recompute_player(&mut self) {
        let mut attributes = self.base;
        for bonus in self.equipment.items().flat_map(|item| item.bonuses.iter()) {
            attributes.add(bonus.attribute, bonus.amount);
        }
        for delta in self.effects.stat_deltas() {
            if let Stat::Attribute(attribute) = delta.stat {
                attributes.add(attribute, delta.amount);
            }
        }
        attributes.clamp_minimums();

        // derived-stat deltas only move opponents
        let mut stats = CombatStats::from_attributes(&attributes);
        stats.clamp();

        let gained = stats.max_hp - self.stats.max_hp;
        self.attributes = attributes;
        self.stats = stats;
        self.fill_seconds = fill_seconds(stats.atk_sp);

        if gained > 0 {
            self.hp += f64::from(gained);
        }
        self.hp = self.hp.clamp(0.0, self.max_hp());
    }

    /// Action the given key would fire right now.
    ///
    /// Slot keys resolve to the equipped item's granted action. Accessory
    /// items still cooling down resolve to nothing.
    pub fn action_for_key(&self, key: ActionKey) -> Option<ActionId> {
        match key {
            ActionKey::Melee => Some(CombatConfig::DEFAULT_MELEE_ACTION),
            ActionKey::Magic => Some(CombatConfig::DEFAULT_MAGIC_ACTION),
            _ => {
                let item = self.equipment.get(key.slot()?)?;
                let action = item.action?;
                if item.slot.is_accessory() && !self.cooldowns.is_ready(item.id) {
                    return None;
                }
                Some(action)
            }
        }
    }

    /// Currently queued key, for players.
    pub fn queued_key(&self) -> Option<ActionKey> {
        match self.role {
            Role::Player { queued } => Some(queued),
            Role::Opponent { .. } => None,
        }
    }

    /// Opponent's next sequence entry as `(1-based position, action)`.
    pub fn next_sequence_action(&self) -> Option<(usize, Option<ActionId>)> {
        match &self.role {
            Role::Opponent { template, turn } => Some((
                NpcTemplate::sequence_position(*turn) + 1,
                template.action_at(*turn),
            )),
            Role::Player { .. } => None,
        }
    }

    /// Moves an opponent on to its next sequence entry.
    pub fn advance_sequence(&mut self) {
        if let Role::Opponent { turn, .. } = &mut self.role {
            *turn += 1;
        }
    }

    /// Replaces the queued key; ignored for opponents.
    pub fn queue(&mut self, key: ActionKey) {
        if let Role::Player { queued } = &mut self.role {
            *queued = key;
        }
    }

    pub fn can_equip(&self, item: &ItemDefinition) -> bool {
        item.requirement
            .is_none_or(|requirement| requirement.is_met_by(&self.attributes))
    }

    /// Equips `item` into its own slot after checking its requirement.
    ///
    /// # Errors
    ///
    /// Returns `EquipError::RequirementNotMet` if the effective attribute is
    /// below the item's threshold.
    pub fn try_equip(&mut self, item: ItemDefinition) -> Result<Option<ItemDefinition>, EquipError> {
        match item.requirement {
            Some(requirement) if !requirement.is_met_by(&self.attributes) => {
                Err(EquipError::RequirementNotMet {
                    actual: self.attributes.get(requirement.attribute),
                    item: item.name,
                    attribute: requirement.attribute,
                    minimum: requirement.minimum,
                })
            }
            _ => Ok(self.equip(item)),
        }
    }

    /// Equips `item` into its own slot, returning the replaced item.
    pub fn equip(&mut self, item: ItemDefinition) -> Option<ItemDefinition> {
        let previous = self.place(item.slot, item);
        self.recompute();
        previous
    }

    pub fn unequip(&mut self, slot: Slot) -> Option<ItemDefinition> {
        let removed = self.equipment.take(slot);
        self.recompute();
        removed
    }

    fn place(&mut self, slot: Slot, item: ItemDefinition) -> Option<ItemDefinition> {
        if item.slot.is_accessory() && item.has_cooldown() {
            self.cooldowns.register(item.id);
        }
        self.equipment.put(slot, item)
    }

    /// Prepares a player for another fight against a fresh opponent.
    pub fn reset_for_rematch(&mut self) {
        self.hp = self.max_hp();
        self.bar = 0.0;
        self.effects.clear();
        self.cooldowns.reset_all();
        self.recompute();
    }

    /// The persistent part of a player: name, base attributes, worn item
    /// ids and progression. Fight state is dropped.
    pub fn to_template(&self) -> CharacterTemplate {
        CharacterTemplate {
            name: self.name.clone(),
            attributes: self.base,
            equipment: self
                .equipment
                .iter()
                .filter_map(|(slot, item)| item.map(|item| (slot, item.id)))
                .collect(),
            level: self.level,
            xp: self.xp,
            save_id: self.save_id,
        }
    }
}
