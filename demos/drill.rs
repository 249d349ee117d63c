//! Seeded run of the single-hand counting drill.
//!
//! Run with: `cargo run --example drill`
//! Set `RUST_LOG=debug` to see every deal logged by the session.
//!
//! A scripted player answers each hand: perfectly on even hands, off by one
//! on odd hands, so the stats at the end show both outcomes.

use blackjack_count_drill::{
    format_hand_value, to_client_state, DrillConfig, DrillError, Scaffolding, ShoeConfig,
    SingleHandDrill, TotalAnswer,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), DrillError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut drill = SingleHandDrill::new(DrillConfig {
        shoe: ShoeConfig::new(2, 0.75)?,
        ask_hand_total: true,
        scaffolding: Scaffolding::Flash,
        rng_seed: Some(42),
        ..DrillConfig::default()
    })?;

    println!("System: {}  Scaffolding: {}", drill.system().name(), drill.config().scaffolding.label());
    println!();

    for hand_no in 0..6 {
        drill.start_hand();
        let cards = drill.deal_until_frozen()?;
        let shown: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
        let value = drill.hand_value();

        let count = drill.running_count();
        let guess = if hand_no % 2 == 0 { count } else { count + 1 };
        drill.answer_count(guess)?;

        let total = if value.is_bust { TotalAnswer::Bust } else { TotalAnswer::Total(value.best) };
        drill.answer_total(total)?;

        let fb = drill.feedback().expect("scored hand has feedback");
        println!(
            "  Hand {}: {:<24} {:<10} count {:+} (answered {:+}) {}",
            hand_no + 1,
            shown.join(" "),
            format_hand_value(&value),
            fb.correct_count,
            fb.selected_count,
            if fb.count_correct { "✓" } else { "✗" },
        );
    }

    let stats = drill.stats();
    println!();
    println!(
        "  Count: {}/{}  Total: {}/{}  Accuracy: {}%",
        stats.count_correct,
        stats.hands_completed,
        stats.total_correct,
        stats.hands_completed,
        stats.count_accuracy().unwrap_or(0),
    );

    let state = to_client_state(&drill);
    println!(
        "  Shoe: {} cards left, true count {}",
        state["shoe"]["remaining"], state["shoe"]["trueCount"]
    );
    Ok(())
}
