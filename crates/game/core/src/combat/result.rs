//! Attack resolution results.

/// Damage numbers from one landed attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    pub critical: bool,
    /// Damage after crit, before mitigation.
    pub raw: f64,
    /// Mitigation fraction in `[0, mitigation_cap]`.
    pub mitigation: f64,
    /// HP actually removed from the target.
    pub dealt: f64,
}

/// How an attack attempt ended.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// The action id had no definition; nothing happened.
    UnknownAction,
    /// The action only affects its user.
    SelfOnly,
    /// The target dodged; no damage and no debuff.
    Dodged,
    /// The action reached the target. `None` for debuff-only actions.
    Landed(Option<DamageRoll>),
}

/// Outcome plus the log lines produced along the way, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct AttackReport {
    pub outcome: AttackOutcome,
    pub lines: Vec<String>,
}

impl AttackReport {
    pub(crate) fn new(outcome: AttackOutcome) -> Self {
        Self {
            outcome,
            lines: Vec::new(),
        }
    }

    /// Records a line, skipping empty ones.
    pub(crate) fn push(&mut self, line: String) {
        if !line.is_empty() {
            self.lines.push(line);
        }
    }

    pub fn damage_dealt(&self) -> f64 {
        match self.outcome {
            AttackOutcome::Landed(Some(roll)) => roll.dealt,
            _ => 0.0,
        }
    }
}
