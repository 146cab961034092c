use serde::Serialize;

use crate::errors::GameError;
use crate::game::GameState;
use crate::player::{PlayerAction as A, PlayerId};

/// Everything needed to judge one player's next action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionContext {
    pub player_id: PlayerId,
    pub stack: u32,
    /// Chips the player already put in this round.
    pub round_bet: u32,
    pub current_bet: u32,
    pub big_blind: u32,
    /// False once the player has acted and only short all-in raises followed.
    pub can_reraise: bool,
}

impl ActionContext {
    pub fn for_player(state: &GameState, id: PlayerId) -> Result<Self, GameError> {
        let p = state.player(id).ok_or(GameError::PlayerNotFound(id))?;
        Ok(Self {
            player_id: id,
            stack: p.stack(),
            round_bet: p.round_bet(),
            current_bet: state.betting.current_bet,
            big_blind: state.config.big_blind,
            can_reraise: state.betting.raise_reopened_for(id),
        })
    }

    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.round_bet)
    }

    /// Largest reachable round contribution (all-in).
    pub fn max_raise_to(&self) -> u32 {
        self.round_bet + self.stack
    }

    /// Smallest complete bet or raise.
    pub fn min_raise_to(&self) -> u32 {
        if self.current_bet == 0 {
            self.big_blind
        } else {
            self.current_bet + self.big_blind
        }
    }
}

/// What the player may legally do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegalActions {
    pub to_call: u32,
    pub can_check: bool,
    /// Chips a call would add; below `to_call` when the call puts the player all-in.
    pub call_amount: u32,
    pub can_raise: bool,
    /// Lowest legal raise-to. Equals `max_raise_to` when only a short all-in remains.
    pub min_raise_to: u32,
    pub max_raise_to: u32,
}

impl LegalActions {
    pub fn from_context(ctx: &ActionContext) -> Self {
        let to_call = ctx.to_call();
        let max_raise_to = ctx.max_raise_to();
        Self {
            to_call,
            can_check: to_call == 0,
            call_amount: to_call.min(ctx.stack),
            can_raise: ctx.can_reraise && max_raise_to > ctx.current_bet,
            min_raise_to: ctx.min_raise_to().min(max_raise_to),
            max_raise_to,
        }
    }

    /// Clamp a desired raise-to into the legal window.
    pub fn clamp_raise_to(&self, desired: u32) -> u32 {
        desired.clamp(self.min_raise_to, self.max_raise_to)
    }
}

pub fn legal_actions(state: &GameState, id: PlayerId) -> Result<LegalActions, GameError> {
    ActionContext::for_player(state, id).map(|ctx| LegalActions::from_context(&ctx))
}

/// A legal action resolved to the chips it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips added; less than the amount owed for an all-in call.
    Call(u32),
    /// Bet or raise to `to`, adding `added` chips. `full` is false for a
    /// short all-in that does not reopen the action.
    Raise { to: u32, added: u32, full: bool },
}

/// Validates a player action against the betting rules and stack size.
///
/// # Errors
///
/// - [`GameError::IllegalCheck`] when checking with chips outstanding
/// - [`GameError::NothingToCall`] when calling a matched bet
/// - [`GameError::BelowMinimumRaise`] for a raise short of the minimum that is not all-in
/// - [`GameError::InsufficientStack`] for a raise beyond the stack
/// - [`GameError::RaiseNotReopened`] when the action was not reopened for this player
///
/// # Examples
///
/// ```
/// use holdem_engine::player::{PlayerAction, PlayerId};
/// use holdem_engine::rules::{validate_action, ActionContext, ValidatedAction};
///
/// let ctx = ActionContext {
///     player_id: PlayerId(1),
///     stack: 80,
///     round_bet: 50,
///     current_bet: 100,
///     big_blind: 50,
///     can_reraise: true,
/// };
/// // 130 is below the 150 minimum but it is the whole stack
/// assert_eq!(
///     validate_action(&ctx, PlayerAction::Raise(130)),
///     Ok(ValidatedAction::Raise { to: 130, added: 80, full: false })
/// );
/// assert_eq!(validate_action(&ctx, PlayerAction::Call), Ok(ValidatedAction::Call(50)));
/// ```
pub fn validate_action(ctx: &ActionContext, action: A) -> Result<ValidatedAction, GameError> {
    let to_call = ctx.to_call();
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::IllegalCheck { to_call })
            }
        }
        A::Call => {
            if to_call == 0 {
                Err(GameError::NothingToCall)
            } else {
                Ok(ValidatedAction::Call(to_call.min(ctx.stack)))
            }
        }
        A::Raise(to) => {
            let minimum = ctx.min_raise_to();
            if to <= ctx.current_bet {
                return Err(GameError::BelowMinimumRaise { to, minimum });
            }
            if !ctx.can_reraise {
                return Err(GameError::RaiseNotReopened(ctx.player_id));
            }
            let needed = to.saturating_sub(ctx.round_bet);
            if needed > ctx.stack {
                return Err(GameError::InsufficientStack {
                    needed,
                    stack: ctx.stack,
                });
            }
            let all_in = needed == ctx.stack;
            if to < minimum && !all_in {
                return Err(GameError::BelowMinimumRaise { to, minimum });
            }
            Ok(ValidatedAction::Raise {
                to,
                added: needed,
                full: to >= minimum,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(stack: u32, round_bet: u32, current_bet: u32) -> ActionContext {
        ActionContext {
            player_id: PlayerId(7),
            stack,
            round_bet,
            current_bet,
            big_blind: 50,
            can_reraise: true,
        }
    }

    #[test]
    fn check_and_call_depend_on_outstanding_chips() {
        assert_eq!(
            validate_action(&ctx(500, 0, 50), A::Check),
            Err(GameError::IllegalCheck { to_call: 50 })
        );
        assert_eq!(
            validate_action(&ctx(500, 50, 50), A::Call),
            Err(GameError::NothingToCall)
        );
        assert_eq!(
            validate_action(&ctx(30, 0, 50), A::Call),
            Ok(ValidatedAction::Call(30))
        );
    }

    #[test]
    fn opening_bet_minimum_is_big_blind() {
        assert_eq!(
            validate_action(&ctx(500, 0, 0), A::Raise(40)),
            Err(GameError::BelowMinimumRaise {
                to: 40,
                minimum: 50
            })
        );
        assert_eq!(
            validate_action(&ctx(500, 0, 0), A::Raise(50)),
            Ok(ValidatedAction::Raise {
                to: 50,
                added: 50,
                full: true
            })
        );
    }

    #[test]
    fn raise_beyond_stack_is_rejected() {
        assert_eq!(
            validate_action(&ctx(100, 0, 50), A::Raise(200)),
            Err(GameError::InsufficientStack {
                needed: 200,
                stack: 100
            })
        );
    }

    #[test]
    fn closed_action_rejects_raise_but_allows_call() {
        let mut c = ctx(1_000, 100, 130);
        c.can_reraise = false;
        assert_eq!(
            validate_action(&c, A::Raise(300)),
            Err(GameError::RaiseNotReopened(PlayerId(7)))
        );
        assert_eq!(validate_action(&c, A::Call), Ok(ValidatedAction::Call(30)));
    }

    #[test]
    fn legal_window_collapses_to_all_in_for_short_stacks() {
        let legal = LegalActions::from_context(&ctx(60, 0, 50));
        assert_eq!(legal.to_call, 50);
        assert!(!legal.can_check);
        assert!(legal.can_raise);
        assert_eq!(legal.min_raise_to, 60);
        assert_eq!(legal.max_raise_to, 60);
        assert_eq!(legal.clamp_raise_to(400), 60);

        let covered = LegalActions::from_context(&ctx(40, 0, 50));
        assert!(!covered.can_raise);
        assert_eq!(covered.call_amount, 40);
    }
}
