use holdem_engine::cards::Card;
use holdem_engine::game::{ActionKind, GameState, Phase};
use holdem_engine::player::{Player, PlayerId};
use holdem_engine::position::{position_of, Position};
use holdem_engine::rules::{legal_actions, LegalActions};

use crate::sizing::SizingInput;

/// The facts a decider needs about one seat at one moment.
#[derive(Debug, Clone)]
pub struct DecisionContext {
    pub player_id: PlayerId,
    pub hole: [Card; 2],
    pub board: Vec<Card>,
    pub phase: Phase,
    pub position: Position,
    pub legal: LegalActions,
    pub pot: u32,
    pub current_bet: u32,
    pub big_blind: u32,
    pub stack: u32,
    /// Someone else raised this round (or bet, after the flop).
    pub facing_aggression: bool,
    pub callers: u32,
}

impl DecisionContext {
    /// `None` when the player holds no cards or is not seated.
    pub fn capture(player: &Player, state: &GameState) -> Option<Self> {
        let hole = player.hole_cards()?;
        let seat = state.seat_of(player.id())?;
        let legal = legal_actions(state, player.id()).ok()?;
        let preflop = state.phase == Phase::Preflop;
        let actions = &state.betting.actions;
        let facing_aggression = actions.iter().any(|a| {
            a.player_id != player.id()
                && (a.kind == ActionKind::Raise || (!preflop && a.kind == ActionKind::Bet))
        });
        let callers = actions.iter().filter(|a| a.kind == ActionKind::Call).count() as u32;
        Some(Self {
            player_id: player.id(),
            hole,
            board: state.community_cards.clone(),
            phase: state.phase,
            position: position_of(state, seat),
            legal,
            pot: state.pot_total,
            current_bet: state.betting.current_bet,
            big_blind: state.config.big_blind,
            stack: player.stack(),
            facing_aggression,
            callers,
        })
    }

    pub fn to_call(&self) -> u32 {
        self.legal.to_call
    }

    /// Pot-to-call ratio; infinite when nothing is owed.
    pub fn pot_odds(&self) -> f64 {
        if self.legal.to_call == 0 {
            f64::INFINITY
        } else {
            self.pot as f64 / self.legal.to_call as f64
        }
    }

    pub fn sizing(&self) -> SizingInput {
        SizingInput {
            pot: self.pot,
            stack: self.stack,
            all_in_to: self.legal.max_raise_to,
            big_blind: self.big_blind,
        }
    }

    /// Turn a postflop bet size into a raise-to amount.
    pub fn bet_to(&self, size: u32) -> u32 {
        self.current_bet + size
    }
}
