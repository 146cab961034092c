//! Coarse hand-strength buckets the deciders reason with.

use holdem_engine::cards::{Card, Rank};
use holdem_engine::hand::{evaluate, HandCategory};
use holdem_engine::position::Position;

/// Preflop starting-hand tier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum HandTier {
    Weak,
    Playable,
    Strong,
}

/// Made-hand strength once the board is out, draws included.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum PostflopStrength {
    Trash,
    Weak,
    Medium,
    Strong,
    Monster,
}

/// Strong: TT+, AJs+, KJs+, AKo. Playable: other pairs, suited aces,
/// suited connectors and one-gappers, suited broadway, offsuit QT+.
pub fn hand_tier(a: Card, b: Card) -> HandTier {
    let (hi, lo) = if a.rank >= b.rank {
        (a.rank, b.rank)
    } else {
        (b.rank, a.rank)
    };
    let pair = hi == lo;
    let suited = a.suit == b.suit;
    let gap = hi.value() - lo.value();

    if pair && hi >= Rank::Ten {
        return HandTier::Strong;
    }
    if suited && matches!(hi, Rank::Ace | Rank::King) && lo >= Rank::Jack {
        return HandTier::Strong;
    }
    if hi == Rank::Ace && lo == Rank::King {
        return HandTier::Strong;
    }

    if pair {
        return HandTier::Playable;
    }
    if suited && (hi == Rank::Ace || gap == 1 || gap == 2 || hi >= Rank::Ten) {
        return HandTier::Playable;
    }
    if hi >= Rank::Queen && lo >= Rank::Ten {
        return HandTier::Playable;
    }
    HandTier::Weak
}

/// Early seats demote marginal hands.
pub fn adjust_tier_for_position(tier: HandTier, position: Position) -> HandTier {
    match (tier, position) {
        (HandTier::Playable, Position::Early) => HandTier::Weak,
        _ => tier,
    }
}

pub fn postflop_strength(hole: [Card; 2], board: &[Card]) -> PostflopStrength {
    if board.is_empty() {
        return match hand_tier(hole[0], hole[1]) {
            HandTier::Strong => PostflopStrength::Strong,
            HandTier::Playable => PostflopStrength::Medium,
            HandTier::Weak => PostflopStrength::Weak,
        };
    }
    let made = evaluate(&hole, board);
    match made.category {
        c if c >= HandCategory::FullHouse => PostflopStrength::Monster,
        c if c >= HandCategory::ThreeOfAKind => PostflopStrength::Strong,
        HandCategory::TwoPair => PostflopStrength::Medium,
        HandCategory::OnePair => pair_strength(hole, board, made.kickers[0], made.kickers[1]),
        _ => drawing_strength(hole, board),
    }
}

fn pair_strength(hole: [Card; 2], board: &[Card], pair: u8, kicker: u8) -> PostflopStrength {
    let top_board = board.iter().map(|c| c.rank.value()).max().unwrap_or(0);
    if hole[0].rank == hole[1].rank {
        return if pair >= Rank::Jack.value() {
            PostflopStrength::Strong
        } else if pair > top_board {
            PostflopStrength::Medium
        } else {
            PostflopStrength::Weak
        };
    }
    if pair >= top_board && kicker >= Rank::Jack.value() {
        PostflopStrength::Medium
    } else {
        PostflopStrength::Weak
    }
}

fn drawing_strength(hole: [Card; 2], board: &[Card]) -> PostflopStrength {
    let cards: Vec<Card> = hole.iter().chain(board).copied().collect();
    if has_flush_draw(&cards) || has_straight_draw(&cards) {
        return PostflopStrength::Medium;
    }
    if hole.iter().any(|c| c.rank >= Rank::King) {
        return PostflopStrength::Weak;
    }
    PostflopStrength::Trash
}

/// Exactly four cards of one suit.
pub fn has_flush_draw(cards: &[Card]) -> bool {
    let mut counts = [0u8; 4];
    for c in cards {
        counts[c.suit as usize] += 1;
    }
    counts.contains(&4)
}

/// Four distinct ranks within a five-rank window (open-ended or gutshot).
/// The ace also counts low.
pub fn has_straight_draw(cards: &[Card]) -> bool {
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    if ranks.contains(&Rank::Ace.value()) {
        ranks.push(1);
    }
    ranks.sort_unstable();
    ranks.dedup();
    ranks.windows(4).any(|w| w[3] - w[0] <= 4)
}
