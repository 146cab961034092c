use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

/// Hand categories, weakest first. The derived order is the ranking order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Totally ordered hand value: category first, then tiebreak ranks high to
/// low. Unused kicker slots are zero, so the derived ordering is exact.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RankedHand {
    pub category: HandCategory,
    pub kickers: [u8; 5],
}

impl RankedHand {
    /// Short human description, e.g. "Flush, Ace high" or "Pair of Kings".
    pub fn describe(&self) -> String {
        let name = |v: u8| Rank::from_value(v).map(Rank::name).unwrap_or("?");
        let plural = |v: u8| Rank::from_value(v).map_or_else(|| "?".to_string(), Rank::plural);
        let k = self.kickers;
        match self.category {
            HandCategory::RoyalFlush => "Royal Flush".to_string(),
            HandCategory::StraightFlush => format!("Straight Flush, {} high", name(k[0])),
            HandCategory::FourOfAKind => format!("Four of a Kind, {}", plural(k[0])),
            HandCategory::FullHouse => {
                format!("Full House, {} over {}", plural(k[0]), plural(k[1]))
            }
            HandCategory::Flush => format!("Flush, {} high", name(k[0])),
            HandCategory::Straight => format!("Straight, {} high", name(k[0])),
            HandCategory::ThreeOfAKind => format!("Three of a Kind, {}", plural(k[0])),
            HandCategory::TwoPair => {
                format!("Two Pair, {} and {}", plural(k[0]), plural(k[1]))
            }
            HandCategory::OnePair => format!("Pair of {}", plural(k[0])),
            HandCategory::HighCard => format!("High Card, {}", name(k[0])),
        }
    }
}

/// Rank the best five-card hand available from two hole cards plus up to
/// five community cards.
///
/// # Panics
///
/// Panics when more than five community cards are supplied or a card
/// appears twice. Both indicate a broken dealing invariant upstream.
pub fn evaluate(hole: &[Card; 2], community: &[Card]) -> RankedHand {
    assert!(
        community.len() <= 5,
        "at most 5 community cards, got {}",
        community.len()
    );
    let mut cards = Vec::with_capacity(7);
    cards.extend_from_slice(hole);
    cards.extend_from_slice(community);
    evaluate_cards(&cards)
}

/// Rank an arbitrary set of 2..=7 distinct cards.
pub fn evaluate_cards(cards: &[Card]) -> RankedHand {
    assert!(
        (2..=7).contains(&cards.len()),
        "expected 2..=7 cards, got {}",
        cards.len()
    );
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_counts = [0u8; 4];
    let mut by_suit_mask = [0u16; 4];
    let mut rank_mask = 0u16;
    let mut seen = 0u64;
    for &c in cards {
        let r = c.rank.value();
        let s = suit_index(c.suit);
        let bit = 1u64 << (s * 16 + r as usize);
        assert!(seen & bit == 0, "duplicate card {c}");
        seen |= bit;
        rank_counts[r as usize] += 1;
        suit_counts[s] += 1;
        by_suit_mask[s] |= 1 << r;
        rank_mask |= 1 << r;
    }

    let flush_suit = suit_counts.iter().position(|&n| n >= 5);

    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(by_suit_mask[s]) {
            let category = if high == Rank::Ace.value() {
                HandCategory::RoyalFlush
            } else {
                HandCategory::StraightFlush
            };
            return RankedHand {
                category,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return RankedHand {
            category: HandCategory::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return RankedHand {
            category: HandCategory::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    if let Some(s) = flush_suit {
        let ranks = ranks_from_mask(by_suit_mask[s]);
        let mut k = [0u8; 5];
        k.copy_from_slice(&ranks[..5]);
        return RankedHand {
            category: HandCategory::Flush,
            kickers: k,
        };
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return RankedHand {
            category: HandCategory::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    let (trips, pairs, singles) = classify_multiples(&rank_counts);
    if let Some(&t) = trips.first() {
        let mut k = [t, 0, 0, 0, 0];
        fill_kickers(&mut k[1..3], &singles);
        return RankedHand {
            category: HandCategory::ThreeOfAKind,
            kickers: k,
        };
    }
    if pairs.len() >= 2 {
        // A third pair can play as the kicker.
        let mut rest: Vec<u8> = pairs[2..].to_vec();
        rest.extend_from_slice(&singles);
        rest.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [pairs[0], pairs[1], 0, 0, 0];
        fill_kickers(&mut k[2..3], &rest);
        return RankedHand {
            category: HandCategory::TwoPair,
            kickers: k,
        };
    }
    if let Some(&p) = pairs.first() {
        let mut k = [p, 0, 0, 0, 0];
        fill_kickers(&mut k[1..4], &singles);
        return RankedHand {
            category: HandCategory::OnePair,
            kickers: k,
        };
    }

    let mut k = [0u8; 5];
    fill_kickers(&mut k, &singles);
    RankedHand {
        category: HandCategory::HighCard,
        kickers: k,
    }
}

pub fn compare_hands(a: &RankedHand, b: &RankedHand) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

fn fill_kickers(slots: &mut [u8], ranks_desc: &[u8]) {
    for (slot, &r) in slots.iter_mut().zip(ranks_desc) {
        *slot = r;
    }
}

fn ranks_from_mask(mask: u16) -> Vec<u8> {
    (2..=14u8).rev().filter(|r| mask & (1 << r) != 0).collect()
}

/// Highest straight in a rank bitmask; the wheel (A-2-3-4-5) reports 5.
fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low.
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    for high in (5..=14u8).rev() {
        let window = 0b1_1111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    let &t = trips.first()?;
    // A second set of trips plays as the pair.
    let best_pair = trips.get(1).copied().into_iter().chain(pairs).max()?;
    Some((t, best_pair))
}

/// Trips, pairs and singles, each sorted high to low.
fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}
