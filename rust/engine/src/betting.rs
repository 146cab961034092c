//! Betting actions as pure transitions: each takes the current state and
//! returns the next one or a typed rejection, leaving the input untouched.

use tracing::debug;

use crate::errors::GameError;
use crate::game::{ActionKind, GameState, Phase};
use crate::player::{PlayerAction, PlayerId};
use crate::pot::{compute_pots, contributions};
use crate::rules::{validate_action, ActionContext, ValidatedAction};

pub fn fold(state: &GameState, id: PlayerId) -> Result<GameState, GameError> {
    apply_action(state, id, PlayerAction::Fold)
}

pub fn check(state: &GameState, id: PlayerId) -> Result<GameState, GameError> {
    apply_action(state, id, PlayerAction::Check)
}

pub fn call(state: &GameState, id: PlayerId) -> Result<GameState, GameError> {
    apply_action(state, id, PlayerAction::Call)
}

/// Bet or raise so the player's round contribution becomes `to`.
pub fn raise(state: &GameState, id: PlayerId, to: u32) -> Result<GameState, GameError> {
    apply_action(state, id, PlayerAction::Raise(to))
}

pub fn apply_action(
    state: &GameState,
    id: PlayerId,
    action: PlayerAction,
) -> Result<GameState, GameError> {
    let seat = acting_seat(state, id)?;
    let ctx = ActionContext::for_player(state, id)?;
    let validated = validate_action(&ctx, action)?;

    let mut next = state.clone();
    let was_open = next.betting.current_bet > 0;
    match validated {
        ValidatedAction::Fold => {
            next.players[seat].fold();
            next.betting.record(id, ActionKind::Fold, None);
        }
        ValidatedAction::Check => {
            next.betting.record(id, ActionKind::Check, None);
        }
        ValidatedAction::Call(added) => {
            next.players[seat].commit(added)?;
            next.pot_total += added;
            next.betting.record(id, ActionKind::Call, Some(added));
        }
        ValidatedAction::Raise { to, added, full } => {
            next.players[seat].commit(added)?;
            next.pot_total += added;
            let b = &mut next.betting;
            b.current_bet = to;
            b.last_raiser = Some(seat);
            b.aggression_level += 1;
            if full {
                b.full_raise_level = b.aggression_level;
            }
            let kind = if was_open {
                ActionKind::Raise
            } else {
                ActionKind::Bet
            };
            b.record(id, kind, Some(added));
        }
    }

    next.side_pots = compute_pots(&contributions(&next.players));
    next.betting.current_actor = if is_round_closed(&next) {
        None
    } else {
        next.next_actor_after(seat)
    };
    debug!(
        player = %id,
        action = ?validated,
        pot = next.pot_total,
        current_bet = next.betting.current_bet,
        next_actor = ?next.betting.current_actor,
        "betting action applied"
    );
    Ok(next)
}

/// The round is over when at most one player holds cards, or when every
/// player still able to act has matched the current bet and acted since the
/// last bet or raise. A lone player facing no outstanding bet needs no turn.
pub fn is_round_closed(state: &GameState) -> bool {
    if state.active_players().count() <= 1 {
        return true;
    }
    let current_bet = state.betting.current_bet;
    let actors: Vec<_> = state.players.iter().filter(|p| p.can_act()).collect();
    match actors.as_slice() {
        [] => true,
        [only] if only.round_bet() >= current_bet => true,
        _ => actors.iter().all(|p| {
            p.round_bet() >= current_bet && state.betting.has_acted_since_aggression(p.id())
        }),
    }
}

fn acting_seat(state: &GameState, id: PlayerId) -> Result<usize, GameError> {
    match state.phase {
        Phase::PreDeal => return Err(GameError::NoHandInProgress),
        Phase::Showdown | Phase::HandComplete => return Err(GameError::HandAlreadyComplete),
        _ => {}
    }
    let seat = state.seat_of(id).ok_or(GameError::PlayerNotFound(id))?;
    let p = &state.players[seat];
    if !p.in_hand() {
        return Err(GameError::PlayerAlreadyFolded(id));
    }
    if p.is_all_in() {
        return Err(GameError::PlayerAllIn(id));
    }
    if state.betting.current_actor != Some(seat) {
        return Err(GameError::NotPlayersTurn(id));
    }
    Ok(seat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::lifecycle::start_new_hand;
    use crate::player::Player;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn heads_up(stacks: [u32; 2]) -> GameState {
        let players = vec![
            Player::new(PlayerId(1), "A", stacks[0]),
            Player::new(PlayerId(2), "B", stacks[1]),
        ];
        let gs = GameState::new(TableConfig::default(), players);
        start_new_hand(&gs, &mut ChaCha20Rng::seed_from_u64(1)).unwrap()
    }

    #[test]
    fn rejected_action_leaves_state_untouched() {
        let gs = heads_up([1_000, 1_000]);
        // seat 0 is the button and acts first preflop
        assert_eq!(
            check(&gs, PlayerId(1)),
            Err(GameError::IllegalCheck { to_call: 25 })
        );
        assert_eq!(
            call(&gs, PlayerId(2)),
            Err(GameError::NotPlayersTurn(PlayerId(2)))
        );
        assert_eq!(
            raise(&gs, PlayerId(1), 2_000),
            Err(GameError::InsufficientStack {
                needed: 1_975,
                stack: 975
            })
        );
        assert_eq!(gs.betting.current_actor, Some(0));
        assert_eq!(gs.pot_total, 75);
    }

    #[test]
    fn big_blind_keeps_its_option() {
        let gs = heads_up([1_000, 1_000]);
        let gs = call(&gs, PlayerId(1)).unwrap();
        assert!(!is_round_closed(&gs));
        assert_eq!(gs.betting.current_actor, Some(1));
        let gs = check(&gs, PlayerId(2)).unwrap();
        assert!(is_round_closed(&gs));
        assert_eq!(gs.betting.current_actor, None);
        assert_eq!(gs.pot_total, 100);
    }

    #[test]
    fn preflop_raise_is_logged_as_raise() {
        let gs = heads_up([1_000, 1_000]);
        let gs = raise(&gs, PlayerId(1), 150).unwrap();
        assert_eq!(gs.betting.actions.last().map(|a| a.kind), Some(ActionKind::Raise));
        assert_eq!(gs.betting.last_raiser, Some(0));
        assert_eq!(gs.betting.current_bet, 150);
    }

    #[test]
    fn fold_to_one_player_closes_round() {
        let gs = heads_up([1_000, 1_000]);
        let gs = fold(&gs, PlayerId(1)).unwrap();
        assert!(is_round_closed(&gs));
        assert_eq!(gs.betting.current_actor, None);
        assert_eq!(gs.active_players().count(), 1);
    }
}
