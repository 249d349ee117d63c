//! Headless single-hand counting drill.
//!
//! One hand is dealt card by card until it reaches 17 or busts. The player is
//! then asked for the hand's running count and, optionally, its total. Pacing
//! and animation belong to whoever drives the session: `deal_speed_ms` and
//! [`FLASH_DURATION_MS`] are carried as hints only.
//!
//! ## RNG
//!
//! A session owns one `StdRng`, seeded from `rng_seed` when given, so a seeded
//! session replays the same shoes and hands. Replacing an exhausted shoe draws
//! from the same generator.

use std::ops::RangeInclusive;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::training_engine::{
    counting::{count_overlay, find_system, running_count, CountOverlay, CountingSystem},
    error::DrillError,
    hand::{add_card_to_hand, create_hand, BlackjackHand, HandValue},
    models::Card,
    shoe::{DealOutcome, Shoe, ShoeConfig},
};

/// Dealing stops once the best total reaches this.
pub const STOP_TOTAL: u32 = 17;

pub const COUNT_ANSWER_OPTIONS: RangeInclusive<i32> = -5..=5;

/// Numeric totals offered; [`TotalAnswer::Bust`] is offered alongside.
pub const TOTAL_ANSWER_OPTIONS: RangeInclusive<u32> = 4..=21;

/// How long a flashed overlay stays up under [`Scaffolding::Flash`].
pub const FLASH_DURATION_MS: u32 = 400;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How much count help is drawn on the cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scaffolding {
    #[default]
    Bold,
    Subtle,
    Flash,
    #[serde(rename = "none")]
    Off,
}

impl Scaffolding {
    pub const ALL: [Scaffolding; 4] =
        [Scaffolding::Bold, Scaffolding::Subtle, Scaffolding::Flash, Scaffolding::Off];

    pub fn label(self) -> &'static str {
        match self {
            Scaffolding::Bold   => "Bold Outlines",
            Scaffolding::Subtle => "Subtle Outlines",
            Scaffolding::Flash  => "Brief Flash",
            Scaffolding::Off    => "No Helpers",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrillConfig {
    pub shoe: ShoeConfig,
    /// Id of a built-in counting system, e.g. `"hi-lo"`.
    pub counting_system: String,
    pub ask_hand_total: bool,
    pub scaffolding: Scaffolding,
    pub deal_speed_ms: u32,
    /// `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for DrillConfig {
    fn default() -> Self {
        DrillConfig {
            shoe: ShoeConfig::default(),
            counting_system: "hi-lo".to_string(),
            ask_hand_total: false,
            scaffolding: Scaffolding::Bold,
            deal_speed_ms: 1000,
            rng_seed: None,
        }
    }
}

impl DrillConfig {
    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, DrillError> {
        let config: DrillConfig = serde_json::from_str(json)?;
        config.shoe.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrillPhase {
    Idle,
    Dealing,
    AskingCount,
    AskingTotal,
    Feedback,
}

/// The player's answer to "what was the hand total?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TotalAnswer {
    Total(u32),
    Bust,
}

impl TotalAnswer {
    pub fn is_correct(self, correct_total: u32) -> bool {
        match self {
            TotalAnswer::Total(n) => n == correct_total,
            TotalAnswer::Bust => correct_total > 21,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillStats {
    pub count_correct: u32,
    pub total_correct: u32,
    pub hands_completed: u32,
}

impl DrillStats {
    /// Whole-percent count accuracy; `None` before the first scored hand.
    pub fn count_accuracy(&self) -> Option<u32> {
        percent(self.count_correct, self.hands_completed)
    }

    pub fn total_accuracy(&self) -> Option<u32> {
        percent(self.total_correct, self.hands_completed)
    }
}

fn percent(hits: u32, of: u32) -> Option<u32> {
    (of > 0).then(|| (hits as f64 * 100.0 / of as f64).round() as u32)
}

/// What the player answered against what was correct, for the last hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub selected_count: i32,
    pub correct_count: i32,
    pub count_correct: bool,
    pub selected_total: Option<TotalAnswer>,
    pub correct_total: u32,
    /// `None` when the drill does not ask for the total.
    pub total_correct: Option<bool>,
}

/// Result of one [`SingleHandDrill::deal_next`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealStep {
    Dealt(Card),
    /// The hand reached its stopping point and the questions are open.
    Frozen,
    /// The shoe ran out and was replaced; no card was dealt.
    ShoeReplaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayIntensity {
    Bold,
    Subtle,
    #[serde(rename = "none")]
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySettings {
    pub show_overlays: bool,
    pub intensity: OverlayIntensity,
    /// When set, only this card index shows its overlay.
    pub flash_index: Option<usize>,
}

impl OverlaySettings {
    /// Overlays for the current phase. Scaffolding only applies while
    /// dealing: the hand is hidden while a question is open, and the
    /// feedback review always shows every overlay in bold.
    pub fn for_scaffolding(scaffolding: Scaffolding, phase: DrillPhase, hand_len: usize) -> Self {
        match phase {
            DrillPhase::Dealing => Self::while_dealing(scaffolding, hand_len),
            DrillPhase::Feedback => OverlaySettings {
                show_overlays: true,
                intensity: OverlayIntensity::Bold,
                flash_index: None,
            },
            DrillPhase::Idle | DrillPhase::AskingCount | DrillPhase::AskingTotal => OverlaySettings {
                show_overlays: false,
                intensity: OverlayIntensity::Off,
                flash_index: None,
            },
        }
    }

    fn while_dealing(scaffolding: Scaffolding, hand_len: usize) -> Self {
        match scaffolding {
            Scaffolding::Bold => OverlaySettings {
                show_overlays: true,
                intensity: OverlayIntensity::Bold,
                flash_index: None,
            },
            Scaffolding::Subtle => OverlaySettings {
                show_overlays: true,
                intensity: OverlayIntensity::Subtle,
                flash_index: None,
            },
            Scaffolding::Flash => OverlaySettings {
                show_overlays: false,
                intensity: OverlayIntensity::Subtle,
                flash_index: hand_len.checked_sub(1),
            },
            Scaffolding::Off => OverlaySettings {
                show_overlays: false,
                intensity: OverlayIntensity::Off,
                flash_index: None,
            },
        }
    }

    pub fn shows_card(&self, index: usize) -> bool {
        match self.flash_index {
            Some(flash) => flash == index,
            None => self.show_overlays,
        }
    }
}

/// A single-hand counting drill session.
#[derive(Debug)]
pub struct SingleHandDrill {
    config: DrillConfig,
    system: &'static dyn CountingSystem,
    rng: StdRng,
    shoe: Shoe,
    hand: BlackjackHand,
    phase: DrillPhase,
    correct_count: i32,
    correct_total: u32,
    selected_count: Option<i32>,
    selected_total: Option<TotalAnswer>,
    stats: DrillStats,
}

impl SingleHandDrill {
    pub fn new(config: DrillConfig) -> Result<Self, DrillError> {
        let system = find_system(&config.counting_system)
            .ok_or_else(|| DrillError::UnknownCountingSystem(config.counting_system.clone()))?;
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let shoe = Shoe::new(config.shoe, &mut rng)?;

        Ok(SingleHandDrill {
            config,
            system,
            rng,
            shoe,
            hand: create_hand(None),
            phase: DrillPhase::Idle,
            correct_count: 0,
            correct_total: 0,
            selected_count: None,
            selected_total: None,
            stats: DrillStats::default(),
        })
    }

    /// Clear the table and begin dealing a new hand. Any open hand is dropped.
    pub fn start_hand(&mut self) {
        self.hand = create_hand(None);
        self.selected_count = None;
        self.selected_total = None;
        self.phase = DrillPhase::Dealing;
    }

    /// Advance the deal by one step.
    pub fn deal_next(&mut self) -> Result<DealStep, DrillError> {
        self.expect_phase(DrillPhase::Dealing)?;

        if self.hand.cards.len() >= 2 && self.should_stop() {
            self.freeze();
            return Ok(DealStep::Frozen);
        }

        match self.shoe.deal() {
            DealOutcome::Exhausted => {
                self.shoe = Shoe::new(self.config.shoe, &mut self.rng)?;
                debug!(decks = self.config.shoe.deck_count, "Shoe exhausted, replaced");
                Ok(DealStep::ShoeReplaced)
            }
            DealOutcome::Dealt { card, shoe } => {
                self.shoe = shoe;
                self.hand = add_card_to_hand(&self.hand, card);
                debug!(card = %card, remaining = self.shoe.remaining(), "Dealt");
                Ok(DealStep::Dealt(card))
            }
        }
    }

    /// Deal until the hand freezes, returning the cards dealt on the way.
    pub fn deal_until_frozen(&mut self) -> Result<Vec<Card>, DrillError> {
        let mut dealt = Vec::new();
        loop {
            match self.deal_next()? {
                DealStep::Dealt(card) => dealt.push(card),
                DealStep::ShoeReplaced => {}
                DealStep::Frozen => return Ok(dealt),
            }
        }
    }

    pub fn answer_count(&mut self, answer: i32) -> Result<DrillPhase, DrillError> {
        self.expect_phase(DrillPhase::AskingCount)?;
        self.selected_count = Some(answer);
        if self.config.ask_hand_total {
            self.phase = DrillPhase::AskingTotal;
        } else {
            self.score();
        }
        Ok(self.phase)
    }

    pub fn answer_total(&mut self, answer: TotalAnswer) -> Result<DrillPhase, DrillError> {
        self.expect_phase(DrillPhase::AskingTotal)?;
        self.selected_total = Some(answer);
        self.score();
        Ok(self.phase)
    }

    /// Back to idle with fresh stats. The shoe carries on.
    pub fn reset(&mut self) {
        self.phase = DrillPhase::Idle;
        self.hand = create_hand(None);
        self.selected_count = None;
        self.selected_total = None;
        self.stats = DrillStats::default();
    }

    pub fn feedback(&self) -> Option<Feedback> {
        if self.phase != DrillPhase::Feedback {
            return None;
        }
        let selected_count = self.selected_count?;
        Some(Feedback {
            selected_count,
            correct_count: self.correct_count,
            count_correct: selected_count == self.correct_count,
            selected_total: self.selected_total,
            correct_total: self.correct_total,
            total_correct: self
                .config
                .ask_hand_total
                .then(|| self.total_answer_is_correct()),
        })
    }

    pub fn overlay_settings(&self) -> OverlaySettings {
        OverlaySettings::for_scaffolding(self.config.scaffolding, self.phase, self.hand.cards.len())
    }

    /// Whether the hand is on show. It is put away while a question is open.
    pub fn hand_visible(&self) -> bool {
        matches!(self.phase, DrillPhase::Dealing | DrillPhase::Feedback)
    }

    /// Overlay to draw on each card of the hand, `None` where hidden.
    pub fn card_overlays(&self) -> Vec<Option<CountOverlay>> {
        let settings = self.overlay_settings();
        self.hand
            .cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                settings
                    .shows_card(i)
                    .then(|| count_overlay(self.system.count_value(card.rank)))
            })
            .collect()
    }

    pub fn total_answer_options() -> Vec<TotalAnswer> {
        TOTAL_ANSWER_OPTIONS
            .map(TotalAnswer::Total)
            .chain(std::iter::once(TotalAnswer::Bust))
            .collect()
    }

    pub fn phase(&self) -> DrillPhase {
        self.phase
    }

    pub fn hand(&self) -> &BlackjackHand {
        &self.hand
    }

    pub fn hand_value(&self) -> HandValue {
        self.hand.value()
    }

    /// Running count of the cards in the current hand.
    pub fn running_count(&self) -> i32 {
        running_count(&self.hand.cards, self.system)
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn stats(&self) -> DrillStats {
        self.stats
    }

    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    pub fn system(&self) -> &'static dyn CountingSystem {
        self.system
    }

    fn should_stop(&self) -> bool {
        let value = self.hand.value();
        value.best >= STOP_TOTAL || value.is_bust
    }

    fn freeze(&mut self) {
        self.correct_count = self.running_count();
        self.correct_total = self.hand.value().best;
        self.phase = DrillPhase::AskingCount;
        debug!(
            cards = self.hand.cards.len(),
            count = self.correct_count,
            total = self.correct_total,
            "Hand frozen"
        );
    }

    fn total_answer_is_correct(&self) -> bool {
        self.selected_total
            .is_some_and(|answer| answer.is_correct(self.correct_total))
    }

    fn score(&mut self) {
        let count_ok = self.selected_count == Some(self.correct_count);
        let total_ok = self.config.ask_hand_total && self.total_answer_is_correct();

        self.stats.count_correct += u32::from(count_ok);
        self.stats.total_correct += u32::from(total_ok);
        self.stats.hands_completed += 1;
        self.phase = DrillPhase::Feedback;

        info!(
            count_ok,
            total_ok,
            hands = self.stats.hands_completed,
            "Hand scored"
        );
    }

    fn expect_phase(&self, expected: DrillPhase) -> Result<(), DrillError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DrillError::WrongPhase { expected, actual: self.phase })
        }
    }
}
