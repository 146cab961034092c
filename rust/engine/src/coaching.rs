//! Read-only view of the table from one seat, rendered for an external
//! advisor. The advisor itself is opaque text-in, text-out.

use std::fmt::Write as _;

use serde::Serialize;
use thiserror::Error;

use crate::game::{ActionKind, BettingAction, GameState, Phase};
use crate::player::PlayerId;
use crate::position::position_of;

const RECENT_ACTIONS: usize = 5;

#[derive(Debug, Error)]
pub enum CoachingError {
    #[error("coach unavailable: {0}")]
    Unavailable(String),
    #[error("player {0} is not seated")]
    UnknownPlayer(PlayerId),
}

/// Turns a rendered situation into advice.
pub trait CoachingService {
    fn advise(&self, context: &str) -> Result<String, CoachingError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct OpponentSummary {
    pub name: String,
    pub stack: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachingSnapshot {
    pub phase: Phase,
    pub phase_label: String,
    pub hero_cards: Option<[String; 2]>,
    pub board: Vec<String>,
    pub pot: u32,
    pub current_bet: u32,
    pub cost_to_call: u32,
    pub pot_odds: Option<String>,
    pub stack: u32,
    pub position: String,
    pub opponents: Vec<OpponentSummary>,
    pub recent_actions: Vec<String>,
}

impl CoachingSnapshot {
    pub fn capture(state: &GameState, hero: PlayerId) -> Result<Self, CoachingError> {
        let seat = state.seat_of(hero).ok_or(CoachingError::UnknownPlayer(hero))?;
        let player = &state.players[seat];
        let cost_to_call = state.to_call(hero).min(player.stack());
        let pot_odds = (cost_to_call > 0).then(|| {
            let ratio = state.pot_total as f64 / cost_to_call as f64;
            format!("{ratio:.1}:1")
        });
        let opponents = state
            .active_players()
            .filter(|p| p.id() != hero)
            .map(|p| OpponentSummary {
                name: p.name().to_string(),
                stack: p.stack(),
            })
            .collect();
        let skip = state.betting.actions.len().saturating_sub(RECENT_ACTIONS);
        let recent_actions = state.betting.actions[skip..]
            .iter()
            .map(|a| describe_action(state, a))
            .collect();

        Ok(Self {
            phase: state.phase,
            phase_label: state.phase.label().to_string(),
            hero_cards: player
                .hole_cards()
                .map(|[a, b]| [a.long_name(), b.long_name()]),
            board: state.community_cards.iter().map(|c| c.long_name()).collect(),
            pot: state.pot_total,
            current_bet: state.betting.current_bet,
            cost_to_call,
            pot_odds,
            stack: player.stack(),
            position: position_of(state, seat).description().to_string(),
            opponents,
            recent_actions,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::from("CURRENT GAME SITUATION\n\n");
        let _ = writeln!(out, "Game Phase: {}", self.phase_label);
        match &self.hero_cards {
            Some([a, b]) => {
                let _ = writeln!(out, "Your Hand: {a} and {b}");
            }
            None => out.push_str("Your Hand: (cards not dealt yet)\n"),
        }
        if self.board.is_empty() {
            out.push_str("Community Cards: None dealt yet\n");
        } else {
            let _ = writeln!(out, "Community Cards: {}", self.board.join(", "));
        }

        out.push_str("\nPOT & BETTING\n");
        let _ = writeln!(out, "- Current Pot: {} chips", self.pot);
        let _ = writeln!(out, "- Current Bet: {} chips", self.current_bet);
        match &self.pot_odds {
            Some(odds) => {
                let _ = writeln!(out, "- Cost to Call: {} chips", self.cost_to_call);
                let _ = writeln!(out, "- Pot Odds: {odds}");
            }
            None => {
                out.push_str("- Cost to Call: 0 chips (you can check)\n");
                out.push_str("- Pot Odds: N/A\n");
            }
        }

        out.push_str("\nYOUR SITUATION\n");
        let _ = writeln!(out, "- Your Chip Stack: {} chips", self.stack);
        let _ = writeln!(out, "- Your Position: {}", self.position);

        out.push_str("\nOPPONENTS\n");
        let _ = writeln!(out, "- Active Opponents: {}", self.opponents.len());
        for o in &self.opponents {
            let _ = writeln!(out, "  - {}: {} chips", o.name, o.stack);
        }

        if !self.recent_actions.is_empty() {
            out.push_str("\nRECENT ACTIONS THIS ROUND\n");
            let _ = writeln!(out, "{}", self.recent_actions.join(", "));
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn describe_action(state: &GameState, a: &BettingAction) -> String {
    let name = state
        .player(a.player_id)
        .map(|p| p.name().to_string())
        .unwrap_or_else(|| format!("Player {}", a.player_id));
    let chips = a.amount.unwrap_or(0);
    match a.kind {
        ActionKind::Fold => format!("{name} folded"),
        ActionKind::Check => format!("{name} checked"),
        ActionKind::Call => format!("{name} called {chips}"),
        ActionKind::Bet => format!("{name} bet {chips}"),
        ActionKind::Raise => format!("{name} raised, putting in {chips}"),
    }
}

/// Whether to volunteer advice: only on the human's own turn during a
/// betting street, once per turn.
pub fn should_trigger_coaching(state: &GameState, already_coached: bool) -> bool {
    !already_coached && state.phase.is_betting() && state.is_human_turn()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::betting::raise;
    use crate::config::TableConfig;
    use crate::lifecycle::start_new_hand;
    use crate::player::Player;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    struct Canned;

    impl CoachingService for Canned {
        fn advise(&self, context: &str) -> Result<String, CoachingError> {
            if context.contains("Pot Odds") {
                Ok("Fold.".into())
            } else {
                Err(CoachingError::Unavailable("empty context".into()))
            }
        }
    }

    fn hand() -> GameState {
        let players = vec![
            Player::new(PlayerId(1), "Ann", 1_000),
            Player::human(PlayerId(2), "You", 1_000),
            Player::new(PlayerId(3), "Cy", 1_000),
        ];
        // a human seat tops the roster up to table_size
        let cfg = TableConfig {
            table_size: 3,
            ..TableConfig::default()
        };
        let gs = GameState::new(cfg, players);
        start_new_hand(&gs, &mut ChaCha20Rng::seed_from_u64(21)).unwrap()
    }

    /// The player due to act opens to 150.
    fn open_to_150(gs: &GameState) -> GameState {
        let opener = gs.current_actor().map(Player::id).unwrap();
        assert_eq!(opener, PlayerId(1));
        raise(gs, opener, 150).unwrap()
    }

    #[test]
    fn snapshot_reports_cost_and_pot_odds() {
        // Ann is on the button and opens to 150; You sit in the small blind
        let gs = open_to_150(&hand());
        assert_eq!(gs.players.len(), 3);
        let snap = CoachingSnapshot::capture(&gs, PlayerId(2)).unwrap();
        assert_eq!(snap.pot, 225);
        assert_eq!(snap.cost_to_call, 125);
        assert_eq!(snap.pot_odds.as_deref(), Some("1.8:1"));
        assert_eq!(snap.opponents.len(), 2);
        assert_eq!(snap.recent_actions, vec!["Ann raised, putting in 150".to_string()]);
        let text = snap.render();
        assert!(text.contains("Game Phase: Preflop (before the flop)"));
        assert!(text.contains("Small Blind"));
        assert_eq!(Canned.advise(&text).unwrap(), "Fold.");
        assert!(snap.to_json().unwrap().contains("\"cost_to_call\": 125"));
    }

    #[test]
    fn coaching_triggers_only_on_human_turn() {
        let gs = hand();
        assert!(!should_trigger_coaching(&gs, false));
        let gs = open_to_150(&gs);
        assert!(should_trigger_coaching(&gs, false));
        assert!(!should_trigger_coaching(&gs, true));
    }
}
