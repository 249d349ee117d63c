//! # blackjack_count_drill
//!
//! An offline engine for drilling blackjack card counting.
//!
//! The crate deals cards from a multi-deck shoe one at a time, values the
//! resulting hand, and keeps the running and true count under a pluggable
//! counting system. A headless drill session strings these together into the
//! "watch a hand, then name its count" exercise; rendering is left to the
//! caller.
//!
//! ## How it works
//!
//! 1. Build a [`Shoe`] from a [`ShoeConfig`] and an `Rng`. Dealing returns a
//!    new shoe value and leaves the old one untouched; an empty shoe reports
//!    [`DealOutcome::Exhausted`] rather than failing.
//! 2. Append dealt cards to a [`BlackjackHand`] and call [`evaluate_hand`] for
//!    hard, soft and best totals.
//! 3. Feed the cards to [`running_count`] with any [`CountingSystem`] (only
//!    [`HiLo`] ships today) and normalise with [`true_count`].
//!
//! ## Quick start
//!
//! ```rust
//! use blackjack_count_drill::{
//!     evaluate_hand, running_count, true_count, DealOutcome, HiLo, Shoe, ShoeConfig,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut shoe = Shoe::new(ShoeConfig::default(), &mut rng).unwrap();
//!
//! let mut hand = Vec::new();
//! while evaluate_hand(&hand).best < 17 {
//!     match shoe.deal() {
//!         DealOutcome::Dealt { card, shoe: next } => {
//!             hand.push(card);
//!             shoe = next;
//!         }
//!         DealOutcome::Exhausted => break,
//!     }
//! }
//!
//! let count = running_count(&hand, &HiLo);
//! println!("count {count}, true {}", true_count(count, shoe.decks_remaining()));
//! ```
//!
//! For the full drill flow see [`SingleHandDrill`] and
//! [`to_client_state`].

pub mod client_adapter;
pub mod training_engine;

// Convenience re-exports so callers can use `blackjack_count_drill::Shoe`
// directly without reaching into `training_engine::`.
pub use client_adapter::to_client_state;
pub use training_engine::{
    add_card_to_hand, can_double_down, can_split, card_value, count_overlay, create_hand,
    dealer_shows_ace, evaluate_hand, find_system, format_hand_value, running_count, systems,
    true_count, BlackjackHand, Card, CardId, CountOverlay, CountingSystem, DealOutcome,
    DealStep, DifficultyLevel, DrillConfig, DrillError, DrillPhase, DrillStats, Feedback,
    HandValue, HiLo, OverlayIntensity, OverlaySettings, Rank, Scaffolding, Shoe, ShoeConfig,
    ShoeError, SingleHandDrill, Suit, SystemSummary, TotalAnswer,
};
