//! Derived Stats - Layer 2 of the stat system.
//!
//! Combat stats derived from effective attributes. Player stats are
//! recomputed from attributes; NPC stats come straight from their template.
//!
//! Components: MaxHP, AtkPw, AtkSp, MgcPw, Block, Dodge, Armor, MgcRs, Crits

use super::attributes::{Attribute, AttributeSet};

/// Derived stat names an effect may target.
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
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DerivedStat {
    AtkPw,
    AtkSp,
    MgcPw,
    Block,
    Dodge,
    Armor,
    MgcRs,
    Crits,
}

/// Derived combat statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub max_hp: i32,
    /// Physical attack power (damage scaling)
    pub atk_pw: i32,
    /// Attack speed (bar fill rate), never below 1
    pub atk_sp: i32,
    /// Magic power (magic damage scaling)
    pub mgc_pw: i32,
    /// Block (random physical mitigation ceiling)
    pub block: i32,
    /// Dodge (chance to avoid an action entirely)
    pub dodge: i32,
    /// Armor (flat physical mitigation)
    pub armor: i32,
    /// Magic resist (random magic mitigation ceiling)
    pub mgc_rs: i32,
    /// Crit (critical hit chance)
    pub crits: i32,
}

impl CombatStats {
    /// Compute player stats from effective attributes.
    ///
    /// Base formulas (weights are fixed design constants):
    /// - MaxHP: 50 + 5·STA + 2·STR + 2·WIL + FOR + FOC + BLS
    /// - AtkPw: 2·STR + AGI + DEX + BAL
    /// - AtkSp: 2·AGI + DEX + WIL + FOC
    /// - MgcPw: 2·INT + MAN + ARC + WIL
    /// - Block: STR + FOR + INT + BAL + WIL
    /// - Dodge: FOC + AGI + DEX + BAL + PSY
    /// - Armor: STR + FOR + STA + AGI + BLS
    /// - MgcRs: PSY + BLS + WIL + MAN + FOR
    /// - Crits: 3·HIT + ARC + FOC
    pub fn from_attributes(attrs: &AttributeSet) -> Self {
        use Attribute::*;
        let a = |attribute| attrs.get(attribute);

        Self {
            max_hp: 50 + 5 * a(Sta) + 2 * a(Str) + 2 * a(Wil) + a(For) + a(Foc) + a(Bls),
            atk_pw: 2 * a(Str) + a(Agi) + a(Dex) + a(Bal),
            atk_sp: 2 * a(Agi) + a(Dex) + a(Wil) + a(Foc),
            mgc_pw: 2 * a(Int) + a(Man) + a(Arc) + a(Wil),
            block: a(Str) + a(For) + a(Int) + a(Bal) + a(Wil),
            dodge: a(Foc) + a(Agi) + a(Dex) + a(Bal) + a(Psy),
            armor: a(Str) + a(For) + a(Sta) + a(Agi) + a(Bls),
            mgc_rs: a(Psy) + a(Bls) + a(Wil) + a(Man) + a(For),
            crits: 3 * a(Hit) + a(Arc) + a(Foc),
        }
    }

    pub fn get(&self, stat: DerivedStat) -> i32 {
        match stat {
            DerivedStat::AtkPw => self.atk_pw,
            DerivedStat::AtkSp => self.atk_sp,
            DerivedStat::MgcPw => self.mgc_pw,
            DerivedStat::Block => self.block,
            DerivedStat::Dodge => self.dodge,
            DerivedStat::Armor => self.armor,
            DerivedStat::MgcRs => self.mgc_rs,
            DerivedStat::Crits => self.crits,
        }
    }

    /// Every stat ≥ 0, attack speed ≥ 1.
    pub fn clamp(&mut self) {
        self.max_hp = self.max_hp.max(0);
        self.atk_pw = self.atk_pw.max(0);
        self.mgc_pw = self.mgc_pw.max(0);
        self.block = self.block.max(0);
        self.dodge = self.dodge.max(0);
        self.armor = self.armor.max(0);
        self.mgc_rs = self.mgc_rs.max(0);
        self.crits = self.crits.max(0);
        self.atk_sp = self.atk_sp.max(1);
    }
}
