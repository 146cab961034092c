use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Stable seat-independent player identifier. Survives across hands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a player is still contesting the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Active,
    Folded,
}

/// Closed set of AI playing styles. The parameter table lives in the AI crate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayingStyle {
    TightAggressive,
    LooseAggressive,
    TightPassive,
    LoosePassive,
    Maniac,
    Rock,
    CallingStation,
    Shark,
}

impl PlayingStyle {
    pub const ALL: [PlayingStyle; 8] = [
        PlayingStyle::TightAggressive,
        PlayingStyle::LooseAggressive,
        PlayingStyle::TightPassive,
        PlayingStyle::LoosePassive,
        PlayingStyle::Maniac,
        PlayingStyle::Rock,
        PlayingStyle::CallingStation,
        PlayingStyle::Shark,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlayingStyle::TightAggressive => "tight-aggressive",
            PlayingStyle::LooseAggressive => "loose-aggressive",
            PlayingStyle::TightPassive => "tight-passive",
            PlayingStyle::LoosePassive => "loose-passive",
            PlayingStyle::Maniac => "maniac",
            PlayingStyle::Rock => "rock",
            PlayingStyle::CallingStation => "calling-station",
            PlayingStyle::Shark => "shark",
        }
    }
}

/// Button and blind markers for the current hand.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatRoles {
    pub dealer: bool,
    pub small_blind: bool,
    pub big_blind: bool,
}

/// An action a player asks the betting engine to apply.
///
/// `Raise` carries the total amount the player's round contribution is
/// raised *to*. With nothing outstanding it opens the betting (a bet).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Raise(u32),
}

/// A seated player. Owned by the table's [`crate::game::GameState`]; other
/// components read it through the state and never keep a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    stack: u32,
    hole_cards: Option<[Card; 2]>,
    status: PlayerStatus,
    eliminated: bool,
    human: bool,
    style: Option<PlayingStyle>,
    roles: SeatRoles,
    /// Chips committed in the current betting round, blinds included.
    round_bet: u32,
    /// Chips committed over the whole hand.
    contributed: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: u32) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            hole_cards: None,
            status: PlayerStatus::Active,
            eliminated: false,
            human: false,
            style: None,
            roles: SeatRoles::default(),
            round_bet: 0,
            contributed: 0,
        }
    }

    pub fn human(id: PlayerId, name: impl Into<String>, stack: u32) -> Self {
        Self {
            human: true,
            ..Self::new(id, name, stack)
        }
    }

    pub fn with_style(mut self, style: PlayingStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole_cards
    }
    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }
    pub fn is_human(&self) -> bool {
        self.human
    }
    pub fn style(&self) -> Option<PlayingStyle> {
        self.style
    }
    pub fn roles(&self) -> SeatRoles {
        self.roles
    }
    pub fn round_bet(&self) -> u32 {
        self.round_bet
    }
    pub fn contributed(&self) -> u32 {
        self.contributed
    }

    /// Still holding cards in this hand.
    pub fn in_hand(&self) -> bool {
        self.status == PlayerStatus::Active && !self.eliminated
    }

    /// In the hand with no chips behind: takes no further betting actions.
    pub fn is_all_in(&self) -> bool {
        self.in_hand() && self.stack == 0
    }

    /// In the hand and able to take a betting action.
    pub fn can_act(&self) -> bool {
        self.in_hand() && self.stack > 0
    }

    pub fn give_cards(&mut self, cards: [Card; 2]) {
        self.hole_cards = Some(cards);
    }

    pub fn clear_cards(&mut self) {
        self.hole_cards = None;
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Move `amount` from the stack into this round's commitment.
    pub(crate) fn commit(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.stack {
            return Err(GameError::InsufficientStack {
                needed: amount,
                stack: self.stack,
            });
        }
        self.stack -= amount;
        self.round_bet += amount;
        self.contributed += amount;
        Ok(())
    }

    pub(crate) fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }

    pub(crate) fn set_roles(&mut self, roles: SeatRoles) {
        self.roles = roles;
    }

    pub(crate) fn reset_round(&mut self) {
        self.round_bet = 0;
    }

    /// Clear per-hand state. Eliminated players stay folded.
    pub(crate) fn reset_for_hand(&mut self) {
        self.hole_cards = None;
        self.round_bet = 0;
        self.contributed = 0;
        self.roles = SeatRoles::default();
        self.status = if self.eliminated {
            PlayerStatus::Folded
        } else {
            PlayerStatus::Active
        };
    }

    /// Marks a busted player out of the game. Returns true when it changed.
    pub(crate) fn eliminate_if_busted(&mut self) -> bool {
        if self.stack == 0 && !self.eliminated {
            self.eliminated = true;
            self.status = PlayerStatus::Folded;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_moves_chips_and_rejects_overbet() {
        let mut p = Player::new(PlayerId(1), "Ann", 500);
        p.commit(200).unwrap();
        assert_eq!(p.stack(), 300);
        assert_eq!(p.round_bet(), 200);
        assert_eq!(p.contributed(), 200);
        assert_eq!(
            p.commit(301),
            Err(GameError::InsufficientStack {
                needed: 301,
                stack: 300
            })
        );
        assert_eq!(p.stack(), 300);
        p.commit(300).unwrap();
        assert!(p.is_all_in());
        assert!(!p.can_act());
    }

    #[test]
    fn busted_player_is_eliminated_once() {
        let mut p = Player::new(PlayerId(2), "Bo", 0);
        assert!(p.eliminate_if_busted());
        assert!(!p.eliminate_if_busted());
        assert!(!p.in_hand());
        p.reset_for_hand();
        assert_eq!(p.status(), PlayerStatus::Folded);
    }
}
