//! Per-style tendencies, keyed by the closed [`PlayingStyle`] enum.

use holdem_engine::player::PlayingStyle;

/// Tendencies of one playing style. Frequencies are probabilities in 0..=1,
/// bet sizes are fractions of the pot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleProfile {
    /// Share of hands voluntarily played.
    pub vpip: f64,
    /// Share of hands raised preflop.
    pub pfr: f64,
    /// Bets and raises per call.
    pub aggression: f64,
    pub bluff_frequency: f64,
    pub call_down_frequency: f64,
    pub min_bet_pct: f64,
    pub max_bet_pct: f64,
    pub three_bet_frequency: f64,
    pub fold_to_bet: f64,
}

const TIGHT_AGGRESSIVE: StyleProfile = StyleProfile {
    vpip: 0.20,
    pfr: 0.15,
    aggression: 3.0,
    bluff_frequency: 0.15,
    call_down_frequency: 0.30,
    min_bet_pct: 0.50,
    max_bet_pct: 0.75,
    three_bet_frequency: 0.08,
    fold_to_bet: 0.60,
};

const LOOSE_AGGRESSIVE: StyleProfile = StyleProfile {
    vpip: 0.35,
    pfr: 0.25,
    aggression: 3.5,
    bluff_frequency: 0.25,
    call_down_frequency: 0.40,
    min_bet_pct: 0.60,
    max_bet_pct: 1.00,
    three_bet_frequency: 0.12,
    fold_to_bet: 0.50,
};

const TIGHT_PASSIVE: StyleProfile = StyleProfile {
    vpip: 0.18,
    pfr: 0.08,
    aggression: 1.5,
    bluff_frequency: 0.05,
    call_down_frequency: 0.50,
    min_bet_pct: 0.40,
    max_bet_pct: 0.60,
    three_bet_frequency: 0.03,
    fold_to_bet: 0.70,
};

const LOOSE_PASSIVE: StyleProfile = StyleProfile {
    vpip: 0.40,
    pfr: 0.10,
    aggression: 1.2,
    bluff_frequency: 0.08,
    call_down_frequency: 0.65,
    min_bet_pct: 0.35,
    max_bet_pct: 0.55,
    three_bet_frequency: 0.04,
    fold_to_bet: 0.55,
};

const MANIAC: StyleProfile = StyleProfile {
    vpip: 0.50,
    pfr: 0.40,
    aggression: 5.0,
    bluff_frequency: 0.40,
    call_down_frequency: 0.35,
    min_bet_pct: 0.75,
    // overbets
    max_bet_pct: 2.00,
    three_bet_frequency: 0.25,
    fold_to_bet: 0.30,
};

const ROCK: StyleProfile = StyleProfile {
    vpip: 0.12,
    pfr: 0.10,
    aggression: 2.5,
    bluff_frequency: 0.02,
    call_down_frequency: 0.20,
    min_bet_pct: 0.50,
    max_bet_pct: 0.70,
    three_bet_frequency: 0.05,
    fold_to_bet: 0.75,
};

const CALLING_STATION: StyleProfile = StyleProfile {
    vpip: 0.45,
    pfr: 0.08,
    aggression: 0.8,
    bluff_frequency: 0.03,
    call_down_frequency: 0.80,
    min_bet_pct: 0.30,
    max_bet_pct: 0.50,
    three_bet_frequency: 0.02,
    fold_to_bet: 0.35,
};

const SHARK: StyleProfile = StyleProfile {
    vpip: 0.25,
    pfr: 0.18,
    aggression: 2.8,
    bluff_frequency: 0.18,
    call_down_frequency: 0.35,
    min_bet_pct: 0.50,
    max_bet_pct: 0.85,
    three_bet_frequency: 0.10,
    fold_to_bet: 0.58,
};

pub fn profile(style: PlayingStyle) -> &'static StyleProfile {
    match style {
        PlayingStyle::TightAggressive => &TIGHT_AGGRESSIVE,
        PlayingStyle::LooseAggressive => &LOOSE_AGGRESSIVE,
        PlayingStyle::TightPassive => &TIGHT_PASSIVE,
        PlayingStyle::LoosePassive => &LOOSE_PASSIVE,
        PlayingStyle::Maniac => &MANIAC,
        PlayingStyle::Rock => &ROCK,
        PlayingStyle::CallingStation => &CALLING_STATION,
        PlayingStyle::Shark => &SHARK,
    }
}

/// Parse the kebab-case style name used in configuration and logs.
pub fn style_from_name(name: &str) -> Option<PlayingStyle> {
    PlayingStyle::ALL.into_iter().find(|s| s.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_profile_is_well_formed() {
        for style in PlayingStyle::ALL {
            let p = profile(style);
            assert!(p.pfr <= p.vpip, "{}", style.name());
            assert!(p.min_bet_pct < p.max_bet_pct, "{}", style.name());
            for f in [p.vpip, p.bluff_frequency, p.call_down_frequency, p.fold_to_bet] {
                assert!((0.0..=1.0).contains(&f));
            }
        }
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(style_from_name("calling-station"), Some(PlayingStyle::CallingStation));
        assert_eq!(style_from_name("nit"), None);
    }
}
