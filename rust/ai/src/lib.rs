//! # holdem-ai: AI opponents for Texas Hold'em
//!
//! Maps a seat's cards, position, style and the betting state to a legal
//! [`PlayerAction`]. Every random choice is drawn from an injected generator,
//! so a seeded run is reproducible.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait defining the decision interface
//! - [`styled`] - Style-aware decider driven by the [`styles`] table
//! - [`baseline`] - Unstyled default decider
//! - [`driver`] - Plays AI seats on an [`Engine`](holdem_engine::engine::Engine)
//! - [`decide`] - Entry point choosing the decider for a seat
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::decide;
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::engine::Engine;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let cfg = TableConfig { seed: Some(7), table_size: 4, ..TableConfig::default() };
//! let mut engine = Engine::new(cfg);
//! engine.start_hand().unwrap();
//!
//! let actor = engine.current_actor().unwrap();
//! let mut rng = ChaCha20Rng::seed_from_u64(1);
//! let action = decide(actor, engine.state(), &mut rng);
//! println!("{} chose {:?}", actor.name(), action);
//! ```

use holdem_engine::game::GameState;
use holdem_engine::player::{Player, PlayerAction};
use rand::RngCore;

pub mod baseline;
pub mod context;
pub mod driver;
pub mod legalize;
pub mod sizing;
pub mod strength;
pub mod styled;
pub mod styles;

/// Decision interface shared by every AI opponent.
///
/// Implementations must return an action the betting engine accepts for
/// `player` in `state`.
///
/// # Example Implementation
///
/// ```rust
/// use holdem_ai::AIOpponent;
/// use holdem_engine::game::GameState;
/// use holdem_engine::player::{Player, PlayerAction};
/// use rand::RngCore;
///
/// struct AlwaysPassive;
///
/// impl AIOpponent for AlwaysPassive {
///     fn decide(
///         &self,
///         player: &Player,
///         state: &GameState,
///         _rng: &mut dyn RngCore,
///     ) -> PlayerAction {
///         if state.to_call(player.id()) == 0 {
///             PlayerAction::Check
///         } else {
///             PlayerAction::Call
///         }
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysPassive"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Choose an action for `player`. Never blocks; any thinking delay is the
    /// caller's concern.
    fn decide(&self, player: &Player, state: &GameState, rng: &mut dyn RngCore) -> PlayerAction;

    /// Identifier used in logs.
    fn name(&self) -> &str;
}

/// Factory for AI opponents by name: `"baseline"` or a style name such as
/// `"tight-aggressive"`.
///
/// # Example
///
/// ```rust
/// use holdem_ai::create_ai;
///
/// assert_eq!(create_ai("baseline").unwrap().name(), "BaselineAI");
/// assert_eq!(create_ai("maniac").unwrap().name(), "maniac");
/// assert!(create_ai("nit").is_none());
/// ```
pub fn create_ai(kind: &str) -> Option<Box<dyn AIOpponent>> {
    if kind == "baseline" {
        return Some(Box::new(baseline::BaselineAI::new()));
    }
    styles::style_from_name(kind).map(|s| Box::new(styled::StyleAI::new(s)) as Box<dyn AIOpponent>)
}

/// The decider for a seat: its style if it has one, the baseline otherwise.
pub fn ai_for(player: &Player) -> Box<dyn AIOpponent> {
    match player.style() {
        Some(style) => Box::new(styled::StyleAI::new(style)),
        None => Box::new(baseline::BaselineAI::new()),
    }
}

/// Decide for `player` with the decider its seat calls for.
pub fn decide(player: &Player, state: &GameState, rng: &mut dyn RngCore) -> PlayerAction {
    ai_for(player).decide(player, state, rng)
}
