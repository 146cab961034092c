//! Hand lifecycle: deal in, walk the streets, award the pots.

use rand::Rng;
use tracing::{debug, info};

use crate::betting::is_round_closed;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{
    new_ai_player, BettingState, GameState, HandResult, Phase, PotAward, RevealedHand,
};
use crate::hand::{compare_hands, evaluate, RankedHand};
use crate::player::{Player, PlayerId, SeatRoles};
use crate::pot::{compute_pots, contributions, split_pot};

fn seated(p: &Player) -> bool {
    !p.is_eliminated()
}

fn next_seated(state: &GameState, from: usize) -> Result<usize, GameError> {
    state
        .next_seat_where(from, seated)
        .ok_or(GameError::NotEnoughPlayers)
}

/// Rotate the button, refill AI seats, post blinds and deal hole cards.
pub fn start_new_hand<R: Rng + ?Sized>(
    state: &GameState,
    rng: &mut R,
) -> Result<GameState, GameError> {
    if state.phase.is_betting() || state.phase == Phase::Showdown {
        return Err(GameError::HandInProgress);
    }
    let mut next = state.clone();
    for p in next.players.iter_mut() {
        p.eliminate_if_busted();
    }
    top_up_roster(&mut next, rng);
    if next.live_seat_count() < 2 {
        return Err(GameError::NotEnoughPlayers);
    }

    for p in next.players.iter_mut() {
        p.reset_for_hand();
    }
    next.community_cards.clear();
    next.pot_total = 0;
    next.hand_result = None;
    next.deck = Deck::new_shuffled(rng);

    let dealer = if next.hand_number == 0 && seated(&next.players[0]) {
        0
    } else {
        next_seated(&next, next.dealer_index)?
    };
    next.dealer_index = dealer;
    let (sb, bb) = if next.live_seat_count() == 2 {
        let other = next_seated(&next, dealer)?;
        (dealer, other)
    } else {
        let sb = next_seated(&next, dealer)?;
        let bb = next_seated(&next, sb)?;
        (sb, bb)
    };
    for (i, p) in next.players.iter_mut().enumerate() {
        p.set_roles(SeatRoles {
            dealer: i == dealer,
            small_blind: i == sb,
            big_blind: i == bb,
        });
    }
    let (small, big) = (next.config.small_blind, next.config.big_blind);
    post_blind(&mut next, sb, small)?;
    post_blind(&mut next, bb, big)?;

    // one card at a time, starting left of the button
    let n = next.players.len();
    let order: Vec<usize> = (1..=n)
        .map(|step| (dealer + step) % n)
        .filter(|&i| seated(&next.players[i]))
        .collect();
    let first = next.deck.draw_n(order.len())?;
    let second = next.deck.draw_n(order.len())?;
    for (k, &seat) in order.iter().enumerate() {
        next.players[seat].give_cards([first[k], second[k]]);
    }

    next.betting = BettingState::new_round(big);
    next.betting.last_raiser = Some(bb);
    next.phase = Phase::Preflop;
    next.hand_number += 1;
    next.side_pots = compute_pots(&contributions(&next.players));
    next.betting.current_actor = if is_round_closed(&next) {
        None
    } else {
        next.next_actor_after(bb)
    };

    info!(
        hand = next.hand_number,
        dealer = %next.players[dealer].id(),
        players = order.len(),
        pot = next.pot_total,
        "hand started"
    );
    Ok(next)
}

/// Deal the next street once the betting round has closed. With at most one
/// player left, or after the river, the hand is settled instead.
pub fn progress_phase(state: &GameState) -> Result<GameState, GameError> {
    match state.phase {
        Phase::PreDeal => return Err(GameError::NoHandInProgress),
        Phase::HandComplete => return Err(GameError::HandAlreadyComplete),
        _ => {}
    }
    if state.active_players().count() <= 1 {
        return end_hand(state);
    }
    if !is_round_closed(state) {
        return Err(GameError::BettingRoundOpen);
    }

    let (phase, deal) = match state.phase {
        Phase::Preflop => (Phase::Flop, 3),
        Phase::Flop => (Phase::Turn, 1),
        Phase::Turn => (Phase::River, 1),
        Phase::River | Phase::Showdown => {
            let mut at_showdown = state.clone();
            at_showdown.phase = Phase::Showdown;
            return end_hand(&at_showdown);
        }
        Phase::PreDeal | Phase::HandComplete => return Err(GameError::NoHandInProgress),
    };

    let mut next = state.clone();
    let cards = next.deck.draw_n(deal)?;
    next.community_cards.extend(cards);
    next.phase = phase;
    for p in next.players.iter_mut() {
        p.reset_round();
    }
    next.betting = BettingState::new_round(0);
    next.betting.current_actor = if is_round_closed(&next) {
        None
    } else {
        next.next_actor_after(next.dealer_index)
    };
    debug!(
        phase = ?next.phase,
        board = next.community_cards.len(),
        first_actor = ?next.betting.current_actor,
        "street dealt"
    );
    Ok(next)
}

/// Settle every pot, mark busted players eliminated and record the result.
pub fn end_hand(state: &GameState) -> Result<GameState, GameError> {
    match state.phase {
        Phase::PreDeal => return Err(GameError::NoHandInProgress),
        Phase::HandComplete => return Err(GameError::HandAlreadyComplete),
        _ => {}
    }
    let mut next = state.clone();
    let survivors: Vec<usize> = (0..next.players.len())
        .filter(|&i| next.players[i].in_hand())
        .collect();

    let result = if let [only] = survivors.as_slice() {
        let amount = next.pot_total;
        let id = next.players[*only].id();
        next.players[*only].add_chips(amount);
        HandResult {
            winners: vec![id],
            winner_names: vec![next.players[*only].name().to_string()],
            winning_category: None,
            description: None,
            awards: vec![PotAward {
                amount,
                eligible: vec![id],
                shares: vec![(id, amount)],
                hand: None,
            }],
            revealed: Vec::new(),
        }
    } else {
        showdown(&mut next)
    };

    next.pot_total = 0;
    next.side_pots.clear();
    next.betting.current_actor = None;
    for p in next.players.iter_mut() {
        p.clear_cards();
        p.reset_round();
        if p.eliminate_if_busted() {
            info!(player = %p.id(), "player eliminated");
        }
    }
    next.phase = Phase::HandComplete;
    info!(
        hand = next.hand_number,
        winners = ?result.winner_names,
        category = ?result.winning_category,
        "hand complete"
    );
    next.hand_result = Some(result);
    Ok(next)
}

fn showdown(state: &mut GameState) -> HandResult {
    let board = state.community_cards.clone();
    let revealed: Vec<RevealedHand> = state
        .players
        .iter()
        .filter(|p| p.in_hand())
        .filter_map(|p| {
            let cards = p.hole_cards()?;
            Some(RevealedHand {
                player_id: p.id(),
                cards,
                hand: evaluate(&cards, &board),
            })
        })
        .collect();
    let hand_of = |id: PlayerId| revealed.iter().find(|r| r.player_id == id).map(|r| r.hand);

    let mut awards = Vec::new();
    for pot in compute_pots(&contributions(&state.players)) {
        let contenders: Vec<(PlayerId, RankedHand)> = pot
            .eligible
            .iter()
            .filter_map(|&id| hand_of(id).map(|h| (id, h)))
            .collect();
        let best = contenders
            .iter()
            .map(|(_, h)| *h)
            .max_by(compare_hands);
        let mut winners: Vec<PlayerId> = match best {
            Some(best) => contenders
                .iter()
                .filter(|(_, h)| compare_hands(h, &best).is_eq())
                .map(|(id, _)| *id)
                .collect(),
            // no eligible hand: shared by everyone who reached showdown
            None => revealed.iter().map(|r| r.player_id).collect(),
        };
        order_from_dealer_left(state, &mut winners);
        let shares = split_pot(pot.amount, &winners);
        for &(id, chips) in &shares {
            if let Some(seat) = state.seat_of(id) {
                state.players[seat].add_chips(chips);
            }
        }
        awards.push(PotAward {
            amount: pot.amount,
            eligible: pot.eligible,
            shares,
            hand: best,
        });
    }

    let main = awards.first();
    let winners: Vec<PlayerId> = main
        .map(|a| a.shares.iter().map(|(id, _)| *id).collect())
        .unwrap_or_default();
    let winner_names = winners
        .iter()
        .filter_map(|&id| state.player(id).map(|p| p.name().to_string()))
        .collect();
    let best = main.and_then(|a| a.hand);
    HandResult {
        winners,
        winner_names,
        winning_category: best.map(|h| h.category),
        description: best.map(|h| h.describe()),
        awards,
        revealed,
    }
}

fn order_from_dealer_left(state: &GameState, ids: &mut [PlayerId]) {
    let n = state.players.len();
    let dealer = state.dealer_index;
    ids.sort_by_key(|&id| {
        state
            .seat_of(id)
            .map(|seat| (seat + n - dealer - 1) % n)
            .unwrap_or(n)
    });
}

fn post_blind(state: &mut GameState, seat: usize, blind: u32) -> Result<(), GameError> {
    let amount = blind.min(state.players[seat].stack());
    state.players[seat].commit(amount)?;
    state.pot_total += amount;
    Ok(())
}

/// Refill vacated AI seats in place, then add seats up to the table size.
/// Only tables with a human seat are topped up.
fn top_up_roster<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if !state.players.iter().any(Player::is_human) {
        return;
    }
    let stack = state.config.starting_stack;
    let target = state.config.table_size;
    let mut next_id = state.players.iter().map(|p| p.id().0).max().unwrap_or(0) + 1;
    for seat in 0..state.players.len() {
        let p = &state.players[seat];
        if p.is_eliminated() && !p.is_human() {
            state.players[seat] = new_ai_player(PlayerId(next_id), stack, rng);
            next_id += 1;
        }
    }
    while state.players.len() < target {
        state.players.push(new_ai_player(PlayerId(next_id), stack, rng));
        next_id += 1;
    }
}
