use thiserror::Error;

use crate::player::PlayerId;

/// Rejections raised by the betting engine and the hand lifecycle.
///
/// Every variant is a recoverable caller mistake: the state passed in is
/// left untouched when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cannot check: {to_call} chips outstanding")]
    IllegalCheck { to_call: u32 },
    #[error("Nothing to call: current bet already matched")]
    NothingToCall,
    #[error("Raise to {to} is below the minimum of {minimum}")]
    BelowMinimumRaise { to: u32, minimum: u32 },
    #[error("Insufficient stack: {needed} chips needed, {stack} available")]
    InsufficientStack { needed: u32, stack: u32 },
    #[error("Cannot draw from an empty deck")]
    EmptyDeck,
    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("It's not player {0}'s turn")]
    NotPlayersTurn(PlayerId),
    #[error("Player {0} already folded")]
    PlayerAlreadyFolded(PlayerId),
    #[error("Player {0} is all-in and cannot act")]
    PlayerAllIn(PlayerId),
    #[error("Player {0} cannot re-raise: action was not reopened")]
    RaiseNotReopened(PlayerId),
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Betting round is still open")]
    BettingRoundOpen,
    #[error("At least two players with chips are required")]
    NotEnoughPlayers,
}
