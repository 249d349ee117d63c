use serde_json::{json, Value};

use crate::training_engine::{
    counting::{running_count, true_count, CountOverlay},
    drill::{
        DrillPhase, OverlayIntensity, Scaffolding, SingleHandDrill, COUNT_ANSWER_OPTIONS,
        FLASH_DURATION_MS,
    },
    hand::format_hand_value,
    models::Card,
    shoe::Shoe,
};

fn overlay_str(overlay: Option<CountOverlay>) -> &'static str {
    match overlay {
        Some(CountOverlay::Positive) => "positive",
        Some(CountOverlay::Negative) => "negative",
        Some(CountOverlay::Neutral)  => "neutral",
        None                         => "none",
    }
}

fn intensity_str(intensity: OverlayIntensity) -> &'static str {
    match intensity {
        OverlayIntensity::Bold   => "bold",
        OverlayIntensity::Subtle => "subtle",
        OverlayIntensity::Off    => "none",
    }
}

/// One card slot. The overlay intensity drops to "none" on cards whose
/// overlay is hidden.
fn card_entry(card: &Card, overlay: Option<CountOverlay>, intensity: OverlayIntensity) -> Value {
    let intensity = if overlay.is_some() { intensity } else { OverlayIntensity::Off };
    json!({
        "id": card.id.to_string(),
        "rank": card.rank.symbol(),
        "suit": card.suit.name(),
        "faceUp": card.face_up,
        "overlay": overlay_str(overlay),
        "overlayIntensity": intensity_str(intensity),
    })
}

/// The shoe gauge: how full it is and, once no hand is in play, where the
/// count stands over all dealt cards.
fn shoe_entry(drill: &SingleHandDrill) -> Value {
    let shoe: &Shoe = drill.shoe();
    let settled = matches!(drill.phase(), DrillPhase::Idle | DrillPhase::Feedback);
    let (gauge_running, gauge_true) = if settled {
        let dealt: Vec<Card> = shoe.dealt().collect();
        let running = running_count(&dealt, drill.system());
        (Value::from(running), Value::from(true_count(running, shoe.decks_remaining())))
    } else {
        (Value::Null, Value::Null)
    };
    json!({
        "deckCount": shoe.config().deck_count,
        "remaining": shoe.remaining(),
        "totalCards": shoe.total_cards(),
        "decksRemaining": shoe.decks_remaining(),
        "fractionRemaining": shoe.fraction_remaining(),
        "cutCardPosition": shoe.cut_card_position(),
        "pastCutCard": shoe.is_past_cut_card(),
        "runningCount": gauge_running,
        "trueCount": gauge_true,
    })
}

/// The helper-level picker.
fn scaffolding_options() -> Vec<Value> {
    Scaffolding::ALL
        .iter()
        .map(|level| json!({ "value": level, "label": level.label() }))
        .collect()
}

fn phase_str(phase: DrillPhase) -> &'static str {
    match phase {
        DrillPhase::Idle        => "idle",
        DrillPhase::Dealing     => "dealing",
        DrillPhase::AskingCount => "asking-count",
        DrillPhase::AskingTotal => "asking-total",
        DrillPhase::Feedback    => "feedback",
    }
}

/// Snapshot a drill session as the JSON document the trainer view renders.
///
/// Card art and styling are the view's business; this only says what to draw.
pub fn to_client_state(drill: &SingleHandDrill) -> Value {
    let config = drill.config();
    let settings = drill.overlay_settings();
    let hand = drill.hand();

    // The hand is put away while a question is open.
    let visible = drill.hand_visible();
    let cards: Vec<Value> = if visible {
        hand.cards
            .iter()
            .zip(drill.card_overlays())
            .map(|(card, overlay)| card_entry(card, overlay, settings.intensity))
            .collect()
    } else {
        Vec::new()
    };

    let stats = drill.stats();
    let system = drill.system();

    // The hand's count is only revealed once the player has answered.
    let reveal = drill.phase() == DrillPhase::Feedback;
    let value_label = if reveal { Value::from(format_hand_value(&drill.hand_value())) } else { Value::Null };
    let hand_count = if reveal { Value::from(drill.running_count()) } else { Value::Null };
    let count_options: Vec<i32> = COUNT_ANSWER_OPTIONS.collect();

    json!({
        "phase": phase_str(drill.phase()),
        "system": system.summary(),
        "settings": {
            "askHandTotal": config.ask_hand_total,
            "scaffolding": config.scaffolding,
            "scaffoldingLabel": config.scaffolding.label(),
            "scaffoldingOptions": scaffolding_options(),
            "flashDurationMs": FLASH_DURATION_MS,
            "dealSpeedMs": config.deal_speed_ms,
            "overlays": settings,
        },
        "hand": {
            "visible": visible,
            "cardCount": hand.cards.len(),
            "cards": cards,
            "valueLabel": value_label,
            "runningCount": hand_count,
        },
        "countAnswerOptions": count_options,
        "totalAnswerOptions": SingleHandDrill::total_answer_options(),
        "feedback": drill.feedback(),
        "stats": {
            "countCorrect": stats.count_correct,
            "totalCorrect": stats.total_correct,
            "handsCompleted": stats.hands_completed,
            "countAccuracy": stats.count_accuracy(),
            "totalAccuracy": stats.total_accuracy(),
        },
        "shoe": shoe_entry(drill),
    })
}
