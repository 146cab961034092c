//! Style-aware decisions driven by a [`StyleProfile`].

use holdem_engine::game::{GameState, Phase};
use holdem_engine::player::{Player, PlayerAction, PlayingStyle};
use holdem_engine::position::Position;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::baseline::chance;
use crate::context::DecisionContext;
use crate::legalize::{legalize, Intent};
use crate::sizing::{style_bet, style_preflop_raise};
use crate::strength::{
    adjust_tier_for_position, hand_tier, postflop_strength, HandTier, PostflopStrength,
};
use crate::styles::{profile, StyleProfile};
use crate::AIOpponent;

#[derive(Debug, Clone, Copy)]
pub struct StyleAI {
    style: PlayingStyle,
}

impl StyleAI {
    pub fn new(style: PlayingStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> PlayingStyle {
        self.style
    }

    fn profile(&self) -> &'static StyleProfile {
        profile(self.style)
    }

    /// Voluntarily enter the pot with probability `min(score, 2 * vpip)`.
    fn should_play(
        &self,
        tier: HandTier,
        position: Position,
        raised: bool,
        rng: &mut dyn RngCore,
    ) -> bool {
        let mut score: f64 = match tier {
            HandTier::Strong => 0.95,
            HandTier::Playable => 0.50,
            HandTier::Weak => 0.10,
        };
        if position.is_late() {
            score *= 1.3;
        } else if position == Position::Early {
            score *= 0.7;
        }
        if raised {
            score *= 0.5;
        }
        rng.random::<f64>() < score.min(self.profile().vpip * 2.0)
    }

    fn preflop(&self, ctx: &DecisionContext, rng: &mut dyn RngCore) -> Intent {
        let p = self.profile();
        let tier = adjust_tier_for_position(hand_tier(ctx.hole[0], ctx.hole[1]), ctx.position);
        let raise = |rng: &mut dyn RngCore| {
            let to = style_preflop_raise(
                self.style,
                p,
                tier,
                ctx.current_bet,
                ctx.callers,
                &ctx.sizing(),
                rng,
            );
            if to <= ctx.current_bet {
                Intent::Call
            } else {
                Intent::RaiseTo(to)
            }
        };

        if !self.should_play(tier, ctx.position, ctx.facing_aggression, rng) {
            return if ctx.to_call() == 0 {
                Intent::Check
            } else {
                Intent::Fold
            };
        }

        if ctx.to_call() == 0 {
            let open = chance(rng, p.pfr / p.vpip);
            return if open || (tier == HandTier::Strong && chance(rng, 0.85)) {
                raise(rng)
            } else {
                Intent::Check
            };
        }

        let pot_odds = ctx.pot_odds();
        match tier {
            HandTier::Strong if p.aggression > 2.5 && chance(rng, 0.70) => raise(rng),
            HandTier::Strong => Intent::Call,
            HandTier::Playable => {
                if self.style == PlayingStyle::CallingStation && chance(rng, 0.80) {
                    Intent::Call
                } else if ctx.position.is_late() && pot_odds > 2.0 {
                    Intent::Call
                } else if p.vpip > 0.30 && chance(rng, 0.60) {
                    Intent::Call
                } else {
                    Intent::Fold
                }
            }
            HandTier::Weak if self.style == PlayingStyle::CallingStation && pot_odds > 4.0 => {
                Intent::Call
            }
            HandTier::Weak => Intent::Fold,
        }
    }

    fn postflop(&self, ctx: &DecisionContext, rng: &mut dyn RngCore) -> Intent {
        let p = self.profile();
        let strength = postflop_strength(ctx.hole, &ctx.board);
        let sizing = ctx.sizing();
        let pot = ctx.pot as f64;
        let to_call = ctx.to_call() as f64;
        let pot_odds = ctx.pot_odds();
        let station = self.style == PlayingStyle::CallingStation;
        let bet = |strength, bluff, rng: &mut dyn RngCore| {
            Intent::RaiseTo(ctx.bet_to(style_bet(self.style, p, strength, bluff, &sizing, rng)))
        };

        if ctx.to_call() == 0 {
            let go = match strength {
                PostflopStrength::Monster => chance(rng, 0.90),
                PostflopStrength::Strong => chance(rng, 0.75),
                PostflopStrength::Medium => chance(rng, p.aggression / 5.0),
                PostflopStrength::Weak => chance(rng, p.bluff_frequency),
                PostflopStrength::Trash => false,
            };
            if !go {
                return Intent::Check;
            }
            let bluff = strength <= PostflopStrength::Weak;
            return bet(strength, bluff, rng);
        }

        match strength {
            PostflopStrength::Monster if chance(rng, p.aggression / 5.0) => {
                bet(strength, false, rng)
            }
            PostflopStrength::Monster => Intent::Call,
            PostflopStrength::Strong => {
                if to_call > pot {
                    if station || chance(rng, p.call_down_frequency) {
                        Intent::Call
                    } else {
                        Intent::Fold
                    }
                } else if p.aggression > 2.5 && chance(rng, 0.50) {
                    bet(strength, false, rng)
                } else {
                    Intent::Call
                }
            }
            PostflopStrength::Medium => {
                if station && chance(rng, 0.75) {
                    Intent::Call
                } else if pot_odds > 3.0 || to_call < pot * 0.50 {
                    Intent::Call
                } else if chance(rng, p.fold_to_bet) {
                    Intent::Fold
                } else {
                    Intent::Call
                }
            }
            PostflopStrength::Weak if station && pot_odds > 4.0 => Intent::Call,
            PostflopStrength::Weak if pot_odds > 8.0 && to_call < pot * 0.20 => Intent::Call,
            _ => Intent::Fold,
        }
    }
}

impl AIOpponent for StyleAI {
    fn decide(&self, player: &Player, state: &GameState, rng: &mut dyn RngCore) -> PlayerAction {
        let Some(ctx) = DecisionContext::capture(player, state) else {
            return PlayerAction::Fold;
        };
        let intent = if ctx.phase == Phase::Preflop {
            self.preflop(&ctx, rng)
        } else {
            self.postflop(&ctx, rng)
        };
        let action = legalize(ctx.player_id, intent, &ctx.legal);
        debug!(
            player = %ctx.player_id,
            style = self.style.name(),
            ?intent,
            ?action,
            "styled decision"
        );
        action
    }

    fn name(&self) -> &str {
        self.style.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::{Card, Rank, Suit};
    use holdem_engine::player::PlayerId;
    use holdem_engine::rules::LegalActions;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn flop_ctx(hole: [Card; 2], to_call: u32) -> DecisionContext {
        DecisionContext {
            player_id: PlayerId(2),
            hole,
            board: vec![
                Card::new(Rank::Queen, Suit::Hearts),
                Card::new(Rank::Seven, Suit::Clubs),
                Card::new(Rank::Two, Suit::Diamonds),
            ],
            phase: Phase::Flop,
            position: Position::Middle,
            legal: LegalActions {
                to_call,
                can_check: to_call == 0,
                call_amount: to_call,
                can_raise: true,
                min_raise_to: to_call + 50,
                max_raise_to: 2_000,
            },
            pot: 400,
            current_bet: to_call,
            big_blind: 50,
            stack: 2_000,
            facing_aggression: to_call > 0,
            callers: 0,
        }
    }

    #[test]
    fn trash_never_bets_and_folds_to_big_bets() {
        let hole = [Card::new(Rank::Four, Suit::Spades), Card::new(Rank::Three, Suit::Hearts)];
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        for style in PlayingStyle::ALL {
            let ai = StyleAI::new(style);
            for _ in 0..30 {
                assert_eq!(ai.postflop(&flop_ctx(hole, 0), &mut rng), Intent::Check);
                assert_eq!(ai.postflop(&flop_ctx(hole, 300), &mut rng), Intent::Fold);
            }
        }
    }

    #[test]
    fn calling_station_calls_down_more_than_rock() {
        // top pair, jack kicker, facing more than half the pot
        let hole = [Card::new(Rank::Queen, Suit::Spades), Card::new(Rank::Jack, Suit::Hearts)];
        let ctx = flop_ctx(hole, 250);
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let calls = |ai: StyleAI, rng: &mut ChaCha20Rng| {
            (0..400)
                .filter(|_| ai.postflop(&ctx, rng) == Intent::Call)
                .count()
        };
        let station = calls(StyleAI::new(PlayingStyle::CallingStation), &mut rng);
        let rock = calls(StyleAI::new(PlayingStyle::Rock), &mut rng);
        assert!(station > rock, "station {station} rock {rock}");
    }
}
