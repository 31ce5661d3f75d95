//! Combat state machine and terminal results.

/// Combat lifecycle. Every state but `Active` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatState {
    #[default]
    Active,
    PlayerWon,
    OpponentWon,
    Forfeited,
}

impl CombatState {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }

    pub const fn winner(self) -> Option<Side> {
        match self {
            Self::Active => None,
            Self::PlayerWon => Some(Side::Player),
            Self::OpponentWon | Self::Forfeited => Some(Side::Opponent),
        }
    }
}

/// One side of the duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Opponent,
}

/// Session damage totals for one side.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageTotals {
    pub dealt: f64,
    pub taken: f64,
}

/// Result handed to persistence and display once combat ends.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatOutcome {
    pub state: CombatState,
    pub winner: Side,
    /// Only the player can forfeit.
    pub forfeited_by: Option<Side>,
    pub player: DamageTotals,
    pub opponent: DamageTotals,
    /// Combat seconds from start to the terminal transition.
    pub duration: f64,
}

impl CombatOutcome {
    pub fn player_won(&self) -> bool {
        self.winner == Side::Player
    }
}
