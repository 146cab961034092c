//! Turn driver: lets AI seats act on an [`Engine`] until a human is due or
//! the hand ends.
//!
//! The driver never sleeps. A caller that wants the table's thinking delay
//! waits [`TableConfig::thinking_delay`](holdem_engine::config::TableConfig::thinking_delay)
//! before each call to [`step_ai`].

use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::game::GameState;
use holdem_engine::player::{Player, PlayerAction, PlayerId};
use tracing::debug;

use crate::ai_for;

/// Apply one AI decision if an AI seat is due. Returns what was applied.
pub fn step_ai(engine: &mut Engine) -> Result<Option<(PlayerId, PlayerAction)>, GameError> {
    if !engine.state().is_ai_turn() {
        return Ok(None);
    }
    engine.step_with(|player, state, rng| {
        let ai = ai_for(player);
        let action = ai.decide(player, state, rng);
        debug!(player = %player.id(), ai = ai.name(), ?action, "ai acted");
        action
    })
}

/// Play AI seats until a human must act or nobody is due.
pub fn run_ai_turns(engine: &mut Engine) -> Result<Vec<(PlayerId, PlayerAction)>, GameError> {
    let mut applied = Vec::new();
    while let Some(step) = step_ai(engine)? {
        applied.push(step);
    }
    Ok(applied)
}

/// Start a hand and play it to completion, asking `human` whenever a human
/// seat is due. Returns every applied action in order.
pub fn play_hand<F>(
    engine: &mut Engine,
    mut human: F,
) -> Result<Vec<(PlayerId, PlayerAction)>, GameError>
where
    F: FnMut(&Player, &GameState) -> PlayerAction,
{
    engine.start_hand()?;
    let mut applied = Vec::new();
    while !engine.is_hand_complete() {
        let step = if engine.state().is_human_turn() {
            engine.step_with(|player, state, _| human(player, state))?
        } else {
            step_ai(engine)?
        };
        match step {
            Some(step) => applied.push(step),
            None => break,
        }
    }
    Ok(applied)
}
