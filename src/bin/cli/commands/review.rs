use anyhow::{Context, Result};
use chrono::Utc;

use recall_lib::flashcards::{review_card, Recall};

use crate::app::App;
use crate::render::terminal::{format_due, paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    deck_name: &str,
    card_query: &str,
    signal: &str,
    interval: Option<String>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut deck = app.find_deck(deck_name)?;
    let card_id = App::find_card(&deck, card_query)?;
    let scheduler = app.scheduler_for(&deck);
    let now = Utc::now();

    let recall = Recall {
        signal: signal.to_string(),
        explicit_key: interval,
    };
    let outcome = review_card(&mut deck, &scheduler, card_id, &recall, now)
        .context("Review failed")?;
    app.save_deck(&deck)?;

    let card = deck.card(card_id).context("Card disappeared after review")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "cardId": card.id.to_string(),
                "signal": outcome.signal,
                "correct": outcome.correct,
                "nextReviewAt": outcome.next_review_at,
                "state": card.state,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let mark = if outcome.correct {
                paint("correct", Color::GREEN, use_color)
            } else {
                paint("missed", Color::RED, use_color)
            };
            println!("\"{}\": {} ({})", card.front, outcome.signal, mark);
            println!("  Next review {}", format_due(outcome.next_review_at, now));
        }
    }

    Ok(())
}
