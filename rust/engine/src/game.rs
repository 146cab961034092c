use std::collections::BTreeMap;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::hand::{HandCategory, RankedHand};
use crate::player::{Player, PlayerId, PlayingStyle};
use crate::pot::Pot;

/// Stage of the current hand. Walks forward monotonically within a hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    PreDeal,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    HandComplete,
}

impl Phase {
    /// Phases in which players take betting actions.
    pub fn is_betting(self) -> bool {
        matches!(self, Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River)
    }

    /// Community cards on the board once this phase has been dealt.
    pub fn board_len(self) -> usize {
        match self {
            Phase::PreDeal | Phase::Preflop => 0,
            Phase::Flop => 3,
            Phase::Turn => 4,
            Phase::River | Phase::Showdown | Phase::HandComplete => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::PreDeal => "Pre-deal",
            Phase::Preflop => "Preflop (before the flop)",
            Phase::Flop => "Flop (3 community cards dealt)",
            Phase::Turn => "Turn (4th community card dealt)",
            Phase::River => "River (all 5 community cards dealt)",
            Phase::Showdown => "Showdown",
            Phase::HandComplete => "Hand complete",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

/// One entry of the current round's append-only action log.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BettingAction {
    pub player_id: PlayerId,
    pub kind: ActionKind,
    /// Chips added by this action; `None` for fold and check.
    pub amount: Option<u32>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BettingState {
    pub current_actor: Option<usize>,
    /// Round contribution every live player must match.
    pub current_bet: u32,
    pub last_raiser: Option<usize>,
    pub actions: Vec<BettingAction>,
    /// Bumped by every bet or raise, complete or not.
    pub(crate) aggression_level: u32,
    /// `aggression_level` of the last bet or raise that met the minimum.
    pub(crate) full_raise_level: u32,
    /// Aggression level at which each player last acted this round.
    pub(crate) acted: BTreeMap<PlayerId, u32>,
}

impl BettingState {
    pub fn new_round(current_bet: u32) -> Self {
        Self {
            current_bet,
            ..Self::default()
        }
    }

    /// Acted since the most recent bet or raise.
    pub fn has_acted_since_aggression(&self, id: PlayerId) -> bool {
        self.acted.get(&id) == Some(&self.aggression_level)
    }

    /// Whether `id` may still raise: false once they have acted since the last
    /// full raise and only short all-in raises followed.
    pub fn raise_reopened_for(&self, id: PlayerId) -> bool {
        self.acted
            .get(&id)
            .is_none_or(|&level| level < self.full_raise_level)
    }

    pub(crate) fn record(&mut self, player_id: PlayerId, kind: ActionKind, amount: Option<u32>) {
        self.actions.push(BettingAction {
            player_id,
            kind,
            amount,
        });
        self.acted.insert(player_id, self.aggression_level);
    }
}

/// Chips paid to specific players out of one pot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PotAward {
    pub amount: u32,
    pub eligible: Vec<PlayerId>,
    pub shares: Vec<(PlayerId, u32)>,
    /// Winning hand when the pot was contested at showdown.
    pub hand: Option<RankedHand>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RevealedHand {
    pub player_id: PlayerId,
    pub cards: [Card; 2],
    pub hand: RankedHand,
}

/// Display record written once by `end_hand`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandResult {
    /// Winners of the main pot, in award order.
    pub winners: Vec<PlayerId>,
    pub winner_names: Vec<String>,
    /// `None` when the hand ended without a showdown.
    pub winning_category: Option<HandCategory>,
    pub description: Option<String>,
    pub awards: Vec<PotAward>,
    pub revealed: Vec<RevealedHand>,
}

/// Authoritative table state. Transition functions take it by reference and
/// return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub config: TableConfig,
    pub players: Vec<Player>,
    pub deck: Deck,
    pub community_cards: Vec<Card>,
    pub pot_total: u32,
    /// Live partition of `pot_total` into main and side pots.
    pub side_pots: Vec<Pot>,
    pub phase: Phase,
    pub betting: BettingState,
    pub dealer_index: usize,
    pub hand_number: u64,
    pub hand_result: Option<HandResult>,
}

impl GameState {
    pub fn new(config: TableConfig, players: Vec<Player>) -> Self {
        Self {
            config,
            players,
            deck: Deck::ordered(),
            community_cards: Vec::with_capacity(5),
            pot_total: 0,
            side_pots: Vec::new(),
            phase: Phase::PreDeal,
            betting: BettingState::default(),
            dealer_index: 0,
            hand_number: 0,
            hand_result: None,
        }
    }

    /// One human seat ("You", id 1) followed by AI seats up to the table size,
    /// each with a randomly chosen style.
    pub fn new_table<R: Rng + ?Sized>(config: TableConfig, rng: &mut R) -> Self {
        let mut players = vec![Player::human(PlayerId(1), "You", config.starting_stack)];
        for id in 2..=config.table_size as u32 {
            players.push(new_ai_player(PlayerId(id), config.starting_stack, rng));
        }
        Self::new(config, players)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    pub fn current_actor(&self) -> Option<&Player> {
        self.betting.current_actor.and_then(|i| self.players.get(i))
    }

    pub fn is_ai_turn(&self) -> bool {
        self.current_actor().is_some_and(|p| !p.is_human())
    }

    pub fn is_human_turn(&self) -> bool {
        self.current_actor().is_some_and(|p| p.is_human())
    }

    /// Players still holding cards (all-in included).
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.in_hand())
    }

    pub fn live_seat_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_eliminated()).count()
    }

    /// Sum of stacks and pot. Constant across every transition of a hand.
    pub fn chip_total(&self) -> u64 {
        self.players.iter().map(|p| p.stack() as u64).sum::<u64>() + self.pot_total as u64
    }

    /// Cards in the deck, in hands and on the board. Always 52 once dealt.
    pub fn card_count(&self) -> usize {
        let held = self
            .players
            .iter()
            .filter(|p| p.hole_cards().is_some())
            .count()
            * 2;
        self.deck.remaining() + held + self.community_cards.len()
    }

    /// Chips `id` still owes to match the current bet.
    pub fn to_call(&self, id: PlayerId) -> u32 {
        self.player(id)
            .map(|p| self.betting.current_bet.saturating_sub(p.round_bet()))
            .unwrap_or(0)
    }

    /// First seat strictly after `from` (wrapping, `from` itself last)
    /// satisfying `pred`.
    pub fn next_seat_where(&self, from: usize, pred: impl Fn(&Player) -> bool) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|step| (from + step) % n)
            .find(|&i| pred(&self.players[i]))
    }

    pub(crate) fn next_actor_after(&self, from: usize) -> Option<usize> {
        self.next_seat_where(from, Player::can_act)
    }

    /// Seats clockwise from the dealer, counting only non-eliminated players.
    pub fn seats_after_dealer(&self, seat: usize) -> usize {
        let n = self.players.len();
        (1..=n)
            .map(|step| (self.dealer_index + step) % n)
            .filter(|&i| !self.players[i].is_eliminated())
            .position(|i| i == seat)
            .map(|p| (p + 1) % self.live_seat_count().max(1))
            .unwrap_or(0)
    }
}

pub(crate) fn new_ai_player<R: Rng + ?Sized>(id: PlayerId, stack: u32, rng: &mut R) -> Player {
    let style = *PlayingStyle::ALL
        .choose(rng)
        .unwrap_or(&PlayingStyle::TightAggressive);
    Player::new(id, format!("Player {id}"), stack).with_style(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn new_table_seats_one_human_and_styled_ai() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let gs = GameState::new_table(TableConfig::default(), &mut rng);
        assert_eq!(gs.players.len(), 9);
        assert!(gs.players[0].is_human());
        assert!(gs.players[1..].iter().all(|p| p.style().is_some() && !p.is_human()));
        assert_eq!(gs.chip_total(), 9 * 2_500);
        assert_eq!(gs.phase, Phase::PreDeal);
    }

    #[test]
    fn seats_after_dealer_skips_eliminated() {
        let cfg = TableConfig::default();
        let players = (1..=4)
            .map(|i| Player::new(PlayerId(i), format!("P{i}"), 100))
            .collect();
        let mut gs = GameState::new(cfg, players);
        gs.dealer_index = 0;
        assert_eq!(gs.seats_after_dealer(0), 0);
        assert_eq!(gs.seats_after_dealer(1), 1);
        assert_eq!(gs.seats_after_dealer(3), 3);
        gs.players[1] = Player::new(PlayerId(2), "P2", 0);
        gs.players[1].eliminate_if_busted();
        assert_eq!(gs.seats_after_dealer(2), 1);
        assert_eq!(gs.seats_after_dealer(3), 2);
        assert_eq!(gs.seats_after_dealer(0), 0);
    }

    #[test]
    fn reopen_tracking_follows_full_raises() {
        let mut b = BettingState::new_round(50);
        let (a, c) = (PlayerId(1), PlayerId(2));
        assert!(b.raise_reopened_for(a));
        b.aggression_level = 1;
        b.full_raise_level = 1;
        b.record(a, ActionKind::Raise, Some(100));
        assert!(!b.raise_reopened_for(a));
        assert!(b.raise_reopened_for(c));
        // short all-in: aggression moves, full raise level does not
        b.aggression_level = 2;
        b.record(c, ActionKind::Raise, Some(130));
        assert!(!b.raise_reopened_for(a));
        assert!(!b.has_acted_since_aggression(a));
        assert!(b.has_acted_since_aggression(c));
    }
}
