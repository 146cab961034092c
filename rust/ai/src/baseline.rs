//! Unstyled default AI.
//!
//! Used for AI seats that carry no [`PlayingStyle`](holdem_engine::player::PlayingStyle).
//! Plays a fixed rule set over hand tier, position and pot odds.

use holdem_engine::game::{GameState, Phase};
use holdem_engine::player::{Player, PlayerAction};
use holdem_engine::position::Position;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::context::DecisionContext;
use crate::legalize::{legalize, Intent};
use crate::sizing::{default_bet, default_preflop_raise};
use crate::strength::{
    adjust_tier_for_position, hand_tier, postflop_strength, HandTier, PostflopStrength,
};
use crate::AIOpponent;

/// Fixed-frequency rule-based opponent.
///
/// **Preflop:** strong hands raise most of the time, playable hands open
/// from late position and call cheaply in late or middle position, weak
/// hands fold. **Postflop:** monsters always bet or raise, strong hands bet
/// and mostly raise, medium hands call with a price, weak hands need a very
/// good price.
///
/// # Example
///
/// ```rust
/// use holdem_ai::baseline::BaselineAI;
/// use holdem_ai::AIOpponent;
///
/// let ai = BaselineAI::new();
/// assert_eq!(ai.name(), "BaselineAI");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }

    fn preflop(ctx: &DecisionContext, rng: &mut dyn RngCore) -> Intent {
        let tier = hand_tier(ctx.hole[0], ctx.hole[1]);
        let adjusted = adjust_tier_for_position(tier, ctx.position);
        let late = ctx.position.is_late();
        let raise = |rng: &mut dyn RngCore| {
            Intent::RaiseTo(default_preflop_raise(tier, ctx.current_bet, &ctx.sizing(), rng))
        };

        if ctx.to_call() == 0 {
            return match adjusted {
                HandTier::Strong if chance(rng, 0.85) => raise(rng),
                HandTier::Playable if late && chance(rng, 0.40) => raise(rng),
                _ => Intent::Check,
            };
        }
        match adjusted {
            HandTier::Strong => {
                let p = if ctx.facing_aggression { 0.70 } else { 0.80 };
                if chance(rng, p) {
                    raise(rng)
                } else {
                    Intent::Call
                }
            }
            HandTier::Playable if ctx.facing_aggression => Intent::Fold,
            HandTier::Playable if late && chance(rng, 0.70) => Intent::Call,
            HandTier::Playable if ctx.position == Position::Middle && chance(rng, 0.50) => {
                Intent::Call
            }
            _ => Intent::Fold,
        }
    }

    fn postflop(ctx: &DecisionContext, rng: &mut dyn RngCore) -> Intent {
        let strength = postflop_strength(ctx.hole, &ctx.board);
        let sizing = ctx.sizing();
        let pot = ctx.pot as f64;
        let to_call = ctx.to_call() as f64;

        if ctx.to_call() == 0 {
            let bet = match strength {
                PostflopStrength::Monster => true,
                PostflopStrength::Strong => chance(rng, 0.80),
                PostflopStrength::Medium => chance(rng, 0.50),
                PostflopStrength::Weak => chance(rng, 0.10),
                PostflopStrength::Trash => false,
            };
            if !bet {
                return Intent::Check;
            }
            let bluff = strength == PostflopStrength::Weak;
            return Intent::RaiseTo(ctx.bet_to(default_bet(strength, bluff, &sizing, rng)));
        }

        match strength {
            PostflopStrength::Monster => {
                Intent::RaiseTo(ctx.bet_to(default_bet(strength, false, &sizing, rng)))
            }
            PostflopStrength::Strong => {
                if to_call > pot * 0.75 || !chance(rng, 0.60) {
                    Intent::Call
                } else {
                    Intent::RaiseTo(ctx.bet_to(default_bet(strength, false, &sizing, rng)))
                }
            }
            PostflopStrength::Medium if ctx.pot_odds() > 3.0 || to_call < pot * 0.50 => {
                Intent::Call
            }
            PostflopStrength::Weak if ctx.pot_odds() > 6.0 && to_call < pot * 0.25 => {
                Intent::Call
            }
            _ => Intent::Fold,
        }
    }
}

impl AIOpponent for BaselineAI {
    fn decide(&self, player: &Player, state: &GameState, rng: &mut dyn RngCore) -> PlayerAction {
        let Some(ctx) = DecisionContext::capture(player, state) else {
            return PlayerAction::Fold;
        };
        let intent = if ctx.phase == Phase::Preflop {
            Self::preflop(&ctx, rng)
        } else {
            Self::postflop(&ctx, rng)
        };
        let action = legalize(ctx.player_id, intent, &ctx.legal);
        debug!(player = %ctx.player_id, ?intent, ?action, "baseline decision");
        action
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}

pub(crate) fn chance(rng: &mut dyn RngCore, p: f64) -> bool {
    rng.random::<f64>() < p
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::{Card, Rank, Suit};
    use holdem_engine::config::TableConfig;
    use holdem_engine::lifecycle::start_new_hand;
    use holdem_engine::player::PlayerId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn never_checks_into_a_bet() {
        let players = (1..=4)
            .map(|i| Player::new(PlayerId(i), format!("P{i}"), 2_000))
            .collect();
        let gs = GameState::new(TableConfig::default(), players);
        let mut rng = ChaCha20Rng::seed_from_u64(31);
        for seed in 0..200u64 {
            let hand = start_new_hand(&gs, &mut ChaCha20Rng::seed_from_u64(seed)).unwrap();
            let actor = hand.current_actor().unwrap();
            let action = BaselineAI::new().decide(actor, &hand, &mut rng);
            assert_ne!(action, PlayerAction::Check);
            if let PlayerAction::Raise(to) = action {
                assert!(to >= 100 && to <= 2_000);
            }
        }
    }

    #[test]
    fn monster_always_bets_when_checked_to() {
        let ctx = DecisionContext {
            player_id: PlayerId(1),
            hole: [Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts)],
            board: vec![
                Card::new(Rank::Ace, Suit::Clubs),
                Card::new(Rank::King, Suit::Hearts),
                Card::new(Rank::King, Suit::Clubs),
            ],
            phase: Phase::Flop,
            position: Position::Late,
            legal: holdem_engine::rules::LegalActions {
                to_call: 0,
                can_check: true,
                call_amount: 0,
                can_raise: true,
                min_raise_to: 50,
                max_raise_to: 1_000,
            },
            pot: 300,
            current_bet: 0,
            big_blind: 50,
            stack: 1_000,
            facing_aggression: false,
            callers: 0,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..20 {
            let intent = BaselineAI::postflop(&ctx, &mut rng);
            assert!(matches!(intent, Intent::RaiseTo(to) if to >= 50));
        }
    }
}
