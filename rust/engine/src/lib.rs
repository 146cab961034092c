//! # holdem-engine: No-Limit Texas Hold'em Table Engine
//!
//! A deterministic multi-seat Hold'em engine: one human seat against AI
//! opponents, blinds, betting rounds, side pots and showdowns. Every
//! transition is a pure function from one [`game::GameState`] to the next,
//! with randomness injected by the caller.
//!
//! ## Core Modules
//!
//! - [`cards`] - Suit, rank and card types
//! - [`deck`] - 52-card deck with injected shuffling
//! - [`hand`] - Best-of-seven hand evaluation and comparison
//! - [`player`] - Seated players, styles and actions
//! - [`rules`] - Action legality and the legal action window
//! - [`betting`] - Fold / check / call / raise and round closure
//! - [`pot`] - Main and side pot partitioning
//! - [`lifecycle`] - Starting hands, dealing streets and settling pots
//! - [`engine`] - Orchestrator owning state and seeded random streams
//! - [`position`] - Table positions relative to the button
//! - [`coaching`] - Situation snapshots for an external advisor
//! - [`config`] - Layered table configuration
//! - [`logging`] - Tracing subscriber setup and test capture
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_engine::hand::{evaluate, HandCategory};
//!
//! let hole = [Card::new(Rank::Ace, Suit::Hearts), Card::new(Rank::King, Suit::Hearts)];
//! let board = [
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Ten, Suit::Hearts),
//!     Card::new(Rank::Two, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//! ];
//! assert_eq!(evaluate(&hole, &board).category, HandCategory::RoyalFlush);
//! ```
//!
//! ## Playing a Hand
//!
//! ```rust
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::engine::Engine;
//! use holdem_engine::player::{Player, PlayerAction, PlayerId};
//!
//! let cfg = TableConfig { seed: Some(7), table_size: 2, ..TableConfig::default() };
//! let players = vec![
//!     Player::new(PlayerId(1), "Ann", 1_000),
//!     Player::new(PlayerId(2), "Bo", 1_000),
//! ];
//! let mut engine = Engine::with_players(cfg, players);
//! engine.start_hand().unwrap();
//! engine.act(PlayerId(1), PlayerAction::Fold).unwrap();
//! assert!(engine.is_hand_complete());
//! assert_eq!(engine.state().chip_total(), 2_000);
//! ```

pub mod betting;
pub mod cards;
pub mod coaching;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod lifecycle;
pub mod logging;
pub mod player;
pub mod position;
pub mod pot;
pub mod rules;
