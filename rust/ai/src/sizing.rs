//! Bet and raise sizing. Every function returns an intended amount; the
//! legality clamp in [`crate::legalize`] has the final word.

use holdem_engine::player::PlayingStyle;
use rand::{Rng, RngCore};

use crate::strength::{HandTier, PostflopStrength};
use crate::styles::StyleProfile;

/// Inputs shared by every sizing rule.
#[derive(Debug, Clone, Copy)]
pub struct SizingInput {
    pub pot: u32,
    /// Chips behind; caps a bet size.
    pub stack: u32,
    /// Round contribution if the player moves all-in; caps a raise-to.
    pub all_in_to: u32,
    pub big_blind: u32,
}

fn finish(raw: f64, input: &SizingInput) -> u32 {
    (raw.floor() as u32).max(input.big_blind).min(input.stack)
}

/// Style-aware postflop bet as a share of the pot, randomised by ±15%.
pub fn style_bet(
    style: PlayingStyle,
    profile: &StyleProfile,
    strength: PostflopStrength,
    bluff: bool,
    input: &SizingInput,
    rng: &mut dyn RngCore,
) -> u32 {
    let span = profile.max_bet_pct - profile.min_bet_pct;
    let pct = if bluff {
        if style == PlayingStyle::Maniac {
            rng.random_range(0.70..1.20)
        } else {
            profile.min_bet_pct + rng.random_range(0.0..0.20)
        }
    } else {
        match strength {
            PostflopStrength::Monster => profile.min_bet_pct + span * 0.8,
            PostflopStrength::Strong => profile.min_bet_pct + span * 0.6,
            PostflopStrength::Medium => profile.min_bet_pct + span * 0.4,
            PostflopStrength::Weak => profile.min_bet_pct,
            PostflopStrength::Trash => 0.50,
        }
    };
    let jitter = rng.random_range(0.85..1.15);
    finish(input.pot as f64 * pct * jitter, input)
}

/// Style-aware preflop raise-to amount. Opening raises are a multiple of the
/// big blind plus one blind per caller; facing a raise the hand either
/// three-bets or returns `current_bet` (a flat call).
pub fn style_preflop_raise(
    style: PlayingStyle,
    profile: &StyleProfile,
    tier: HandTier,
    current_bet: u32,
    callers: u32,
    input: &SizingInput,
    rng: &mut dyn RngCore,
) -> u32 {
    let bb = input.big_blind as f64;
    let size = if current_bet == 0 || current_bet == input.big_blind {
        let multiple = match style {
            PlayingStyle::Maniac => rng.random_range(4.0..7.0),
            PlayingStyle::Rock | PlayingStyle::TightPassive => rng.random_range(2.5..3.0),
            _ => rng.random_range(2.5..4.0),
        };
        bb * multiple + callers as f64 * bb
    } else {
        let three_bet = rng.random::<f64>() < profile.three_bet_frequency;
        if !(three_bet || tier == HandTier::Strong) {
            return current_bet;
        }
        if style == PlayingStyle::Maniac {
            current_bet as f64 * rng.random_range(3.5..5.0)
        } else {
            current_bet as f64 * 3.0
        }
    };
    (size.floor() as u32).min(input.all_in_to)
}

/// Unstyled postflop bet: a pot fraction by strength, randomised by ±20%.
pub fn default_bet(
    strength: PostflopStrength,
    bluff: bool,
    input: &SizingInput,
    rng: &mut dyn RngCore,
) -> u32 {
    let pct = if bluff {
        rng.random_range(0.40..0.50)
    } else {
        match strength {
            PostflopStrength::Monster | PostflopStrength::Strong => rng.random_range(0.60..0.75),
            PostflopStrength::Medium => rng.random_range(0.50..0.60),
            PostflopStrength::Weak => rng.random_range(0.40..0.50),
            PostflopStrength::Trash => 0.45,
        }
    };
    let jitter = rng.random_range(0.80..1.20);
    finish(input.pot as f64 * pct * jitter, input)
}

/// Unstyled preflop raise-to: 3x (strong) or 2x (otherwise) the big blind,
/// randomised by ±20%, at least a minimum raise over `current_bet`.
pub fn default_preflop_raise(
    tier: HandTier,
    current_bet: u32,
    input: &SizingInput,
    rng: &mut dyn RngCore,
) -> u32 {
    let multiple = if tier == HandTier::Strong { 3.0 } else { 2.0 };
    let jitter = rng.random_range(0.80..1.20);
    let mut to = (input.big_blind as f64 * multiple * jitter).floor() as u32;
    if current_bet > 0 {
        to = to.max(current_bet + input.big_blind);
    }
    to.min(input.all_in_to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::profile;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn bets_respect_floor_and_stack() {
        let mut rng = ChaCha20Rng::seed_from_u64(17);
        let input = SizingInput {
            pot: 40,
            stack: 900,
            all_in_to: 900,
            big_blind: 50,
        };
        for style in PlayingStyle::ALL {
            for _ in 0..50 {
                let b = style_bet(
                    style,
                    profile(style),
                    PostflopStrength::Strong,
                    false,
                    &input,
                    &mut rng,
                );
                assert!((50..=900).contains(&b));
            }
        }
        let short = SizingInput {
            stack: 30,
            all_in_to: 30,
            ..input
        };
        assert_eq!(default_bet(PostflopStrength::Monster, false, &short, &mut rng), 30);
    }

    #[test]
    fn maniac_opens_bigger_than_rock() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let input = SizingInput {
            pot: 75,
            stack: 10_000,
            all_in_to: 10_000,
            big_blind: 50,
        };
        for _ in 0..100 {
            let maniac = style_preflop_raise(
                PlayingStyle::Maniac,
                profile(PlayingStyle::Maniac),
                HandTier::Playable,
                50,
                0,
                &input,
                &mut rng,
            );
            let rock = style_preflop_raise(
                PlayingStyle::Rock,
                profile(PlayingStyle::Rock),
                HandTier::Playable,
                50,
                0,
                &input,
                &mut rng,
            );
            assert!((200..350).contains(&maniac));
            assert!((125..150).contains(&rock));
        }
    }

    #[test]
    fn callers_add_a_blind_each() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let input = SizingInput {
            pot: 175,
            stack: 10_000,
            all_in_to: 10_000,
            big_blind: 50,
        };
        let to = style_preflop_raise(
            PlayingStyle::Rock,
            profile(PlayingStyle::Rock),
            HandTier::Strong,
            50,
            2,
            &input,
            &mut rng,
        );
        assert!((225..250).contains(&to));
    }

    #[test]
    fn blind_reraise_counts_chips_already_posted() {
        // big blind: 50 posted, 100 behind, facing an open to 120
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let input = SizingInput {
            pot: 170,
            stack: 100,
            all_in_to: 150,
            big_blind: 50,
        };
        for _ in 0..20 {
            let to = style_preflop_raise(
                PlayingStyle::Maniac,
                profile(PlayingStyle::Maniac),
                HandTier::Strong,
                120,
                0,
                &input,
                &mut rng,
            );
            assert_eq!(to, 150);
            assert_eq!(default_preflop_raise(HandTier::Strong, 120, &input, &mut rng), 150);
        }
    }
}
