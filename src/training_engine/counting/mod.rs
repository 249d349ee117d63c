//! Card-counting systems and count arithmetic.
//!
//! A system only maps a rank to its tag; the running and true count functions
//! work for any [`CountingSystem`], so adding a system never touches them.

pub mod hi_lo;

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::training_engine::models::{Card, DifficultyLevel, Rank};

pub use hi_lo::HiLo;

/// A named strategy assigning a signed count value to each rank.
pub trait CountingSystem: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn is_premium(&self) -> bool;
    fn difficulty(&self) -> DifficultyLevel;
    fn count_value(&self, rank: Rank) -> i32;

    fn summary(&self) -> SystemSummary {
        SystemSummary {
            id: self.id().to_string(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            is_premium: self.is_premium(),
            difficulty: self.difficulty(),
        }
    }
}

impl fmt::Debug for dyn CountingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountingSystem").field("id", &self.id()).finish()
    }
}

/// Serialisable metadata for listing systems in a picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_premium: bool,
    pub difficulty: DifficultyLevel,
}

static BUILT_IN: [&dyn CountingSystem; 1] = [&HiLo];

/// Every built-in system.
pub fn systems() -> &'static [&'static dyn CountingSystem] {
    &BUILT_IN
}

pub fn find_system(id: &str) -> Option<&'static dyn CountingSystem> {
    systems().iter().copied().find(|s| s.id() == id)
}

/// Sum of the system's tags over `cards`.
pub fn running_count<S: CountingSystem + ?Sized>(cards: &[Card], system: &S) -> i32 {
    cards.iter().map(|c| system.count_value(c.rank)).sum()
}

/// Running count per remaining deck, rounded to one decimal (halves round up).
///
/// With no decks left the running count is returned as is.
pub fn true_count(running_count: i32, decks_remaining: f64) -> f64 {
    if decks_remaining <= 0.0 {
        return running_count as f64;
    }
    (running_count as f64 / decks_remaining * 10.0 + 0.5).floor() / 10.0
}

/// Sign of a count value, used as a rendering hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountOverlay {
    Positive,
    Negative,
    Neutral,
}

pub fn count_overlay(count_value: i32) -> CountOverlay {
    if count_value > 0 {
        CountOverlay::Positive
    } else if count_value < 0 {
        CountOverlay::Negative
    } else {
        CountOverlay::Neutral
    }
}
