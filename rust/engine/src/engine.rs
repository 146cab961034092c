use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::betting::{apply_action, is_round_closed};
use crate::config::TableConfig;
use crate::errors::GameError;
use crate::game::{GameState, Phase};
use crate::lifecycle::{progress_phase, start_new_hand};
use crate::player::{Player, PlayerAction, PlayerId};

/// Seed used when the configuration does not name one.
pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Owns the table state and the random streams that drive it.
///
/// Shuffles and AI choices draw from separate ChaCha20 streams of the same
/// seed, so a replay with the same seed and the same human actions deals the
/// same cards regardless of how many random numbers the AI consumed.
///
/// # Examples
///
/// ```
/// use holdem_engine::config::TableConfig;
/// use holdem_engine::engine::Engine;
/// use holdem_engine::game::Phase;
///
/// let cfg = TableConfig { seed: Some(42), table_size: 3, ..TableConfig::default() };
/// let mut engine = Engine::new(cfg);
/// engine.start_hand().unwrap();
/// assert_eq!(engine.state().phase, Phase::Preflop);
/// assert_eq!(engine.state().pot_total, 75);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
    deck_rng: ChaCha20Rng,
    ai_rng: ChaCha20Rng,
}

impl Engine {
    /// A fresh table seating the human and AI opponents.
    pub fn new(config: TableConfig) -> Self {
        let (mut deck_rng, ai_rng) = streams(config.seed);
        let state = GameState::new_table(config, &mut deck_rng);
        Self {
            state,
            deck_rng,
            ai_rng,
        }
    }

    /// Drive an existing roster, e.g. a custom table.
    pub fn with_players(config: TableConfig, players: Vec<Player>) -> Self {
        let (deck_rng, ai_rng) = streams(config.seed);
        Self {
            state: GameState::new(config, players),
            deck_rng,
            ai_rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &TableConfig {
        &self.state.config
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn is_hand_complete(&self) -> bool {
        self.state.phase == Phase::HandComplete
    }

    pub fn current_actor(&self) -> Option<&Player> {
        self.state.current_actor()
    }

    pub fn start_hand(&mut self) -> Result<(), GameError> {
        let next = start_new_hand(&self.state, &mut self.deck_rng)?;
        self.state = next;
        self.advance()
    }

    /// Apply one action, then deal streets for as long as no one can act.
    pub fn act(&mut self, id: PlayerId, action: PlayerAction) -> Result<(), GameError> {
        let next = apply_action(&self.state, id, action)?;
        self.state = next;
        self.advance()
    }

    /// Let `decide` choose for whoever is due to act and apply the choice.
    /// Returns the applied action, or `None` when nobody is due.
    pub fn step_with<F>(&mut self, decide: F) -> Result<Option<(PlayerId, PlayerAction)>, GameError>
    where
        F: FnOnce(&Player, &GameState, &mut ChaCha20Rng) -> PlayerAction,
    {
        let Some(actor) = self.state.current_actor() else {
            return Ok(None);
        };
        let id = actor.id();
        let action = decide(actor, &self.state, &mut self.ai_rng);
        self.act(id, action)?;
        Ok(Some((id, action)))
    }

    fn advance(&mut self) -> Result<(), GameError> {
        while self.state.phase.is_betting() && is_round_closed(&self.state) {
            let next = progress_phase(&self.state)?;
            debug!(from = ?self.state.phase, to = ?next.phase, "phase advanced");
            self.state = next;
        }
        Ok(())
    }
}

fn streams(seed: Option<u64>) -> (ChaCha20Rng, ChaCha20Rng) {
    let seed = seed.unwrap_or(DEFAULT_SEED);
    let deck = ChaCha20Rng::seed_from_u64(seed);
    let mut ai = ChaCha20Rng::seed_from_u64(seed);
    ai.set_stream(1);
    (deck, ai)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heads_up(seed: u64) -> Engine {
        let cfg = TableConfig {
            seed: Some(seed),
            table_size: 2,
            ..TableConfig::default()
        };
        let players = vec![
            Player::new(PlayerId(1), "A", 1_000),
            Player::new(PlayerId(2), "B", 1_000),
        ];
        Engine::with_players(cfg, players)
    }

    #[test]
    fn checked_down_hand_reaches_completion() {
        let mut e = heads_up(11);
        e.start_hand().unwrap();
        e.act(PlayerId(1), PlayerAction::Call).unwrap();
        e.act(PlayerId(2), PlayerAction::Check).unwrap();
        for _ in 0..3 {
            assert_eq!(e.state().betting.current_actor, Some(1));
            e.act(PlayerId(2), PlayerAction::Check).unwrap();
            e.act(PlayerId(1), PlayerAction::Check).unwrap();
        }
        assert!(e.is_hand_complete());
        assert_eq!(e.state().chip_total(), 2_000);
        assert!(e.state().hand_result.is_some());
    }

    #[test]
    fn all_in_call_runs_out_the_board() {
        let mut e = heads_up(12);
        e.start_hand().unwrap();
        e.act(PlayerId(1), PlayerAction::Raise(1_000)).unwrap();
        e.act(PlayerId(2), PlayerAction::Call).unwrap();
        assert!(e.is_hand_complete());
        let result = e.state().hand_result.clone().unwrap();
        assert_eq!(result.revealed.len(), 2);
        assert_eq!(e.state().chip_total(), 2_000);
    }

    #[test]
    fn same_seed_deals_same_cards() {
        let mut a = heads_up(99);
        let mut b = heads_up(99);
        a.start_hand().unwrap();
        b.start_hand().unwrap();
        assert_eq!(a.state().players[0].hole_cards(), b.state().players[0].hole_cards());
        assert_eq!(a.state().deck, b.state().deck);
    }

    #[test]
    fn step_with_uses_the_due_player() {
        let mut e = heads_up(5);
        e.start_hand().unwrap();
        let applied = e.step_with(|p, _, _| {
            assert_eq!(p.id(), PlayerId(1));
            PlayerAction::Fold
        });
        assert_eq!(applied, Ok(Some((PlayerId(1), PlayerAction::Fold))));
        assert!(e.is_hand_complete());
        assert_eq!(e.step_with(|_, _, _| PlayerAction::Check), Ok(None));
        assert_eq!(e.state().players[1].stack(), 1_025);
    }
}
