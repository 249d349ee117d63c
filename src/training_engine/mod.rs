//! Core engine: cards, shoe, hand evaluation, counting and the drill session.
//!
//! ## Module overview
//!
//! | Module     | Purpose |
//! |------------|---------|
//! | `models`   | Card primitives (suit, rank, identity) and difficulty levels |
//! | `shoe`     | Multi-deck shoe: Fisher-Yates shuffle, dealing, penetration, reshuffle |
//! | `hand`     | Hard/soft/best totals, bust and blackjack, hand helpers and eligibility checks |
//! | `counting` | Counting-system trait, Hi-Lo, running/true count, overlay classification |
//! | `drill`    | Headless single-hand counting drill built on the modules above |
//! | `error`    | Error types for shoe construction and drill sessions |
//!
//! Everything except `drill` is pure: functions take values and return new
//! ones, and the only randomness comes from the `Rng` a caller passes in.

pub mod counting;
pub mod drill;
pub mod error;
pub mod hand;
pub mod models;
pub mod shoe;

// Re-export the public API surface so callers can use
// `training_engine::Shoe` without reaching into sub-modules.
pub use counting::{
    count_overlay, find_system, running_count, systems, true_count, CountOverlay,
    CountingSystem, HiLo, SystemSummary,
};
pub use drill::{
    DealStep, DrillConfig, DrillPhase, DrillStats, Feedback, OverlayIntensity,
    OverlaySettings, Scaffolding, SingleHandDrill, TotalAnswer,
};
pub use error::{DrillError, ShoeError};
pub use hand::{
    add_card_to_hand, can_double_down, can_split, card_value, create_hand,
    dealer_shows_ace, evaluate_hand, format_hand_value, BlackjackHand, HandValue,
};
pub use models::{Card, CardId, DifficultyLevel, Rank, Suit};
pub use shoe::{DealOutcome, Shoe, ShoeConfig};
