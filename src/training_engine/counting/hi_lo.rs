use crate::training_engine::{
    counting::CountingSystem,
    models::{DifficultyLevel, Rank},
};

/// Hi-Lo: the balanced level-one count popularised by the MIT team.
///
/// | Ranks          | Tag |
/// |----------------|-----|
/// | 2-6            | +1  |
/// | 7-9            |  0  |
/// | 10, J, Q, K, A | -1  |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HiLo;

impl CountingSystem for HiLo {
    fn id(&self) -> &'static str {
        "hi-lo"
    }

    fn name(&self) -> &'static str {
        "Hi-Lo"
    }

    fn description(&self) -> &'static str {
        "The most popular balanced counting system. Easy to learn, effective for betting decisions."
    }

    fn is_premium(&self) -> bool {
        false
    }

    fn difficulty(&self) -> DifficultyLevel {
        DifficultyLevel::Beginner
    }

    fn count_value(&self, rank: Rank) -> i32 {
        match rank {
            Rank::Two | Rank::Three | Rank::Four | Rank::Five | Rank::Six => 1,
            Rank::Seven | Rank::Eight | Rank::Nine => 0,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => -1,
        }
    }
}
