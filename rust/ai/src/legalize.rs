use holdem_engine::player::{PlayerAction, PlayerId};
use holdem_engine::rules::LegalActions;
use tracing::warn;

/// What a decider wants to do, before legality is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Fold,
    Check,
    Call,
    /// Total round contribution to raise to.
    RaiseTo(u32),
}

/// Map an intent onto an action the betting engine accepts: no check facing
/// a bet, no raise beyond the stack and no short raise unless all-in.
pub fn legalize(player: PlayerId, intent: Intent, legal: &LegalActions) -> PlayerAction {
    let passive = if legal.can_check {
        PlayerAction::Check
    } else {
        PlayerAction::Call
    };
    match intent {
        // folding for free gives nothing away
        Intent::Fold if legal.can_check => PlayerAction::Check,
        Intent::Fold => PlayerAction::Fold,
        Intent::Check if legal.can_check => PlayerAction::Check,
        Intent::Check => {
            warn!(player = %player, to_call = legal.to_call, "check facing a bet; folding");
            PlayerAction::Fold
        }
        Intent::Call => passive,
        Intent::RaiseTo(_) if !legal.can_raise => passive,
        Intent::RaiseTo(desired) => {
            let to = legal.clamp_raise_to(desired);
            if to != desired {
                warn!(
                    player = %player,
                    desired,
                    to,
                    min = legal.min_raise_to,
                    max = legal.max_raise_to,
                    "raise clamped into legal range"
                );
            }
            PlayerAction::Raise(to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(to_call: u32, stack: u32, round_bet: u32, current_bet: u32) -> LegalActions {
        let max = round_bet + stack;
        LegalActions {
            to_call,
            can_check: to_call == 0,
            call_amount: to_call.min(stack),
            can_raise: max > current_bet,
            min_raise_to: (current_bet + 50).min(max),
            max_raise_to: max,
        }
    }

    #[test]
    fn check_and_fold_follow_the_outstanding_bet() {
        let id = PlayerId(4);
        assert_eq!(legalize(id, Intent::Check, &window(50, 500, 0, 50)), PlayerAction::Fold);
        assert_eq!(legalize(id, Intent::Fold, &window(0, 500, 0, 0)), PlayerAction::Check);
        assert_eq!(legalize(id, Intent::Call, &window(0, 500, 0, 0)), PlayerAction::Check);
    }

    #[test]
    fn raises_are_clamped_to_the_window() {
        let id = PlayerId(4);
        let w = window(100, 1_000, 0, 100);
        assert_eq!(legalize(id, Intent::RaiseTo(120), &w), PlayerAction::Raise(150));
        assert_eq!(legalize(id, Intent::RaiseTo(5_000), &w), PlayerAction::Raise(1_000));
        let covered = window(100, 80, 0, 100);
        assert_eq!(legalize(id, Intent::RaiseTo(300), &covered), PlayerAction::Call);
    }
}
