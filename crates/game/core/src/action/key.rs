//! Player key bindings.
//!
//! The player never picks an action id directly. Each key selects either a
//! default attack or whatever the item in a given slot grants, and the
//! choice is resolved when the attack bar fills.

use crate::state::Slot;

/// Action selectors available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKey {
    /// `a`: default melee attack.
    Melee,
    /// `s`: default magic attack.
    Magic,
    /// `z`: main-hand item action.
    MainHand,
    /// `x`: off-hand item action.
    OffHand,
    /// `d`: neck item action.
    Neck,
    /// `c`: ring item action.
    Ring,
}

impl ActionKey {
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'a' => Some(Self::Melee),
            's' => Some(Self::Magic),
            'z' => Some(Self::MainHand),
            'x' => Some(Self::OffHand),
            'd' => Some(Self::Neck),
            'c' => Some(Self::Ring),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Melee => 'a',
            Self::Magic => 's',
            Self::MainHand => 'z',
            Self::OffHand => 'x',
            Self::Neck => 'd',
            Self::Ring => 'c',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Melee => "Basic Melee",
            Self::Magic => "Basic Magic",
            Self::MainHand => "Main-Hand Action (Slot 6)",
            Self::OffHand => "Off-Hand Action (Slot 5)",
            Self::Neck => "Neck Action (Slot 7)",
            Self::Ring => "Ring Action (Slot 8)",
        }
    }

    /// Equipment slot whose granted action this key fires.
    pub const fn slot(self) -> Option<Slot> {
        match self {
            Self::Melee | Self::Magic => None,
            Self::MainHand => Some(Slot::MainHand),
            Self::OffHand => Some(Slot::OffHand),
            Self::Neck => Some(Slot::Neck),
            Self::Ring => Some(Slot::Ring),
        }
    }
}

/// Input accepted by the combat loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Replace the queued action selector.
    Queue(ActionKey),
    /// Give up the fight.
    Forfeit,
}

impl PlayerCommand {
    pub const FORFEIT_KEY: char = 'q';

    /// Maps a raw key press; unrecognized keys yield `None`.
    pub fn from_char(ch: char) -> Option<Self> {
        if ch == Self::FORFEIT_KEY {
            return Some(Self::Forfeit);
        }
        ActionKey::from_char(ch).map(Self::Queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn keys_round_trip_through_chars() {
        for key in ActionKey::iter() {
            assert_eq!(ActionKey::from_char(key.as_char()), Some(key));
        }
    }

    #[test]
    fn slot_keys_map_to_equipment() {
        assert_eq!(ActionKey::MainHand.slot(), Some(Slot::MainHand));
        assert_eq!(ActionKey::Ring.slot(), Some(Slot::Ring));
        assert_eq!(ActionKey::Melee.slot(), None);
    }

    #[test]
    fn commands_from_keys() {
        assert_eq!(PlayerCommand::from_char('q'), Some(PlayerCommand::Forfeit));
        assert_eq!(
            PlayerCommand::from_char('z'),
            Some(PlayerCommand::Queue(ActionKey::MainHand))
        );
        assert_eq!(PlayerCommand::from_char('w'), None);
        assert_eq!(PlayerCommand::from_char('A'), None);
    }
}
