//! Main and side pot partitioning.
//!
//! Pots are derived from each player's whole-hand contribution, layered at
//! the distinct contribution levels of players still in the hand. Folded
//! chips fill the layers they reach but never make their owner eligible.

use serde::{Deserialize, Serialize};

use crate::player::{Player, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    /// Players who can win this pot, in seat order.
    pub eligible: Vec<PlayerId>,
}

/// One player's total commitment to the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub player_id: PlayerId,
    pub amount: u32,
    /// Still holding cards (active or all-in).
    pub live: bool,
}

pub fn contributions(players: &[Player]) -> Vec<Contribution> {
    players
        .iter()
        .filter(|p| p.contributed() > 0 || p.in_hand())
        .map(|p| Contribution {
            player_id: p.id(),
            amount: p.contributed(),
            live: p.in_hand(),
        })
        .collect()
}

/// Partition contributions into a main pot followed by side pots.
///
/// Amounts always sum to the total contributed. Chips folded players put in
/// above the highest live level join the last pot.
pub fn compute_pots(entries: &[Contribution]) -> Vec<Pot> {
    let mut caps: Vec<u32> = entries
        .iter()
        .filter(|e| e.live && e.amount > 0)
        .map(|e| e.amount)
        .collect();
    caps.sort_unstable();
    caps.dedup();

    let mut remaining: Vec<u32> = entries.iter().map(|e| e.amount).collect();
    let mut pots: Vec<Pot> = Vec::with_capacity(caps.len());
    let mut prev = 0u32;
    for cap in caps {
        let layer = cap - prev;
        let mut amount = 0u32;
        for r in remaining.iter_mut() {
            let take = (*r).min(layer);
            *r -= take;
            amount += take;
        }
        let eligible = entries
            .iter()
            .filter(|e| e.live && e.amount >= cap)
            .map(|e| e.player_id)
            .collect();
        if amount > 0 {
            pots.push(Pot { amount, eligible });
        }
        prev = cap;
    }

    let leftover: u32 = remaining.iter().sum();
    if leftover > 0 {
        match pots.last_mut() {
            Some(last) => last.amount += leftover,
            None => pots.push(Pot {
                amount: leftover,
                eligible: Vec::new(),
            }),
        }
    }
    pots
}

/// Split `amount` evenly; odd chips go one each to the first winners, so
/// callers pass winners ordered from the seat left of the dealer.
pub fn split_pot(amount: u32, winners: &[PlayerId]) -> Vec<(PlayerId, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u32;
    let share = amount / n;
    let odd = (amount % n) as usize;
    winners
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, share + u32::from(i < odd)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(id: u32, amount: u32) -> Contribution {
        Contribution {
            player_id: PlayerId(id),
            amount,
            live: true,
        }
    }

    fn folded(id: u32, amount: u32) -> Contribution {
        Contribution {
            live: false,
            ..live(id, amount)
        }
    }

    #[test]
    fn short_all_in_creates_side_pot() {
        let pots = compute_pots(&[live(1, 50), live(2, 200), live(3, 200)]);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 150);
        assert_eq!(pots[0].eligible, vec![PlayerId(1), PlayerId(2), PlayerId(3)]);
        assert_eq!(pots[1].amount, 300);
        assert_eq!(pots[1].eligible, vec![PlayerId(2), PlayerId(3)]);
    }

    #[test]
    fn equal_contributions_make_one_pot() {
        let pots = compute_pots(&[live(1, 100), folded(2, 25), live(3, 100)]);
        assert_eq!(
            pots,
            vec![Pot {
                amount: 225,
                eligible: vec![PlayerId(1), PlayerId(3)]
            }]
        );
    }

    #[test]
    fn folded_overage_joins_last_pot() {
        // 2 bet 300 then folded to a shove it could not see through
        let pots = compute_pots(&[live(1, 100), folded(2, 300), live(3, 200)]);
        let total: u32 = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, 600);
        assert_eq!(pots[0].amount, 300);
        assert_eq!(pots[1].amount, 300);
        assert_eq!(pots[1].eligible, vec![PlayerId(3)]);
    }

    #[test]
    fn split_gives_odd_chips_in_order() {
        let ids = [PlayerId(4), PlayerId(9), PlayerId(2)];
        assert_eq!(
            split_pot(101, &ids),
            vec![(PlayerId(4), 34), (PlayerId(9), 34), (PlayerId(2), 33)]
        );
        assert!(split_pot(100, &[]).is_empty());
    }
}
