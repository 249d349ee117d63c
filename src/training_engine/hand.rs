use serde::{Deserialize, Serialize};

use crate::training_engine::models::{Card, Rank};

/// Totals derived from a sequence of cards. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandValue {
    /// Every ace counted as 1.
    pub hard: u32,
    /// One ace counted as 11 when that does not bust, otherwise `hard`.
    pub soft: u32,
    pub best: u32,
    pub is_soft: bool,
    pub is_blackjack: bool,
    pub is_bust: bool,
}

/// Base value of a rank, aces low.
pub fn card_value(rank: Rank) -> u32 {
    match rank {
        Rank::Ace   => 1,
        Rank::Two   => 2,
        Rank::Three => 3,
        Rank::Four  => 4,
        Rank::Five  => 5,
        Rank::Six   => 6,
        Rank::Seven => 7,
        Rank::Eight => 8,
        Rank::Nine  => 9,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
    }
}

/// Evaluate hard, soft and best totals for `cards`.
///
/// At most one ace can ever count as 11 (two would make 22), so a single
/// +10 on the all-aces-low total covers every soft hand.
pub fn evaluate_hand(cards: &[Card]) -> HandValue {
    if cards.is_empty() {
        return HandValue::default();
    }

    let hard: u32 = cards.iter().map(|c| card_value(c.rank)).sum();
    let has_ace = cards.iter().any(|c| c.rank == Rank::Ace);

    let (soft, raw_soft) = if has_ace && hard + 10 <= 21 {
        (hard + 10, true)
    } else {
        (hard, false)
    };

    let best = if soft <= 21 { soft } else { hard };
    let is_bust = best > 21;

    HandValue {
        hard,
        soft,
        best,
        is_soft: raw_soft && !is_bust,
        is_blackjack: cards.len() == 2 && best == 21,
        is_bust,
    }
}

/// Display label for a hand value.
///
/// `"Blackjack!"`, `"Bust (26)"`, `"7/17"` for a soft hand, otherwise the
/// best total.
pub fn format_hand_value(value: &HandValue) -> String {
    if value.is_blackjack {
        return "Blackjack!".to_string();
    }
    if value.is_bust {
        return format!("Bust ({})", value.hard);
    }
    if value.is_soft && value.soft != value.hard {
        return format!("{}/{}", value.hard, value.soft);
    }
    value.best.to_string()
}

// ---------------------------------------------------------------------------
// Hand state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackjackHand {
    pub cards: Vec<Card>,
    pub bet: Option<u32>,
    pub is_doubled_down: bool,
    pub is_split: bool,
    pub is_standing: bool,
}

impl BlackjackHand {
    pub fn value(&self) -> HandValue {
        evaluate_hand(&self.cards)
    }

    /// A copy of this hand with `card` appended.
    pub fn with_card(&self, card: Card) -> BlackjackHand {
        let mut next = self.clone();
        next.cards.push(card);
        next
    }
}

/// An empty hand, optionally carrying a bet.
pub fn create_hand(bet: Option<u32>) -> BlackjackHand {
    BlackjackHand { bet, ..BlackjackHand::default() }
}

pub fn add_card_to_hand(hand: &BlackjackHand, card: Card) -> BlackjackHand {
    hand.with_card(card)
}

/// Exactly two cards of the same rank. A king and a queen do not split.
pub fn can_split(hand: &BlackjackHand) -> bool {
    match hand.cards.as_slice() {
        [a, b] => a.rank == b.rank,
        _ => false,
    }
}

pub fn can_double_down(hand: &BlackjackHand) -> bool {
    hand.cards.len() == 2 && !hand.is_doubled_down
}

/// Dealer up-card is an ace (insurance would be offered).
pub fn dealer_shows_ace(up_card: &Card) -> bool {
    up_card.rank == Rank::Ace
}
