use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::GameState;

/// Table position relative to the button.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    SmallBlind,
    BigBlind,
    Early,
    Middle,
    Late,
    Dealer,
}

impl Position {
    /// Button and late seats, where loose play is rewarded.
    pub fn is_late(self) -> bool {
        matches!(self, Position::Late | Position::Dealer)
    }

    pub fn description(self) -> &'static str {
        match self {
            Position::SmallBlind => "Small Blind (acts first postflop)",
            Position::BigBlind => "Big Blind",
            Position::Early => "Early position",
            Position::Middle => "Middle position",
            Position::Late => "Late position",
            Position::Dealer => "Dealer (Button, acts last postflop)",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::SmallBlind => "small_blind",
            Position::BigBlind => "big_blind",
            Position::Early => "early",
            Position::Middle => "middle",
            Position::Late => "late",
            Position::Dealer => "dealer",
        };
        f.write_str(s)
    }
}

/// Classify a seat by how many seats it sits after the button among
/// `players` seated players.
pub fn position_from_offset(seats_after_dealer: usize, players: usize) -> Position {
    if players <= 2 {
        // heads-up: the button posts the small blind
        return if seats_after_dealer == 0 {
            Position::SmallBlind
        } else {
            Position::BigBlind
        };
    }
    match seats_after_dealer {
        0 => return Position::Dealer,
        1 => return Position::SmallBlind,
        2 => return Position::BigBlind,
        _ => {}
    }
    if players <= 5 {
        return if seats_after_dealer == players - 1 {
            Position::Late
        } else {
            Position::Middle
        };
    }
    match seats_after_dealer {
        3 | 4 => Position::Early,
        5 | 6 if players >= 8 => Position::Middle,
        _ => Position::Late,
    }
}

pub fn position_of(state: &GameState, seat: usize) -> Position {
    position_from_offset(state.seats_after_dealer(seat), state.live_seat_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heads_up_button_is_small_blind() {
        assert_eq!(position_from_offset(0, 2), Position::SmallBlind);
        assert_eq!(position_from_offset(1, 2), Position::BigBlind);
    }

    #[test]
    fn full_ring_positions() {
        let got: Vec<Position> = (0..9).map(|s| position_from_offset(s, 9)).collect();
        assert_eq!(
            got,
            vec![
                Position::Dealer,
                Position::SmallBlind,
                Position::BigBlind,
                Position::Early,
                Position::Early,
                Position::Middle,
                Position::Middle,
                Position::Late,
                Position::Late,
            ]
        );
        assert_eq!(position_from_offset(5, 6), Position::Late);
        assert_eq!(position_from_offset(3, 5), Position::Middle);
        assert_eq!(position_from_offset(4, 5), Position::Late);
        assert!(Position::Dealer.is_late());
        assert!(!Position::Early.is_late());
    }
}
