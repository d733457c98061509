use anyhow::Result;
use chrono::Utc;

use recall_lib::flashcards::due_cards;
use recall_lib::flashcards::queue::next_due_at;

use crate::app::{short_id, App};
use crate::render::terminal::{format_due, paint, truncate, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    deck_name: &str,
    limit: Option<usize>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let now = Utc::now();

    let mut due = due_cards(&deck.cards, now);
    if let Some(limit) = limit {
        due.truncate(limit);
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = due
                .iter()
                .map(|card| {
                    serde_json::json!({
                        "id": card.id.to_string(),
                        "front": card.front,
                        "intervalPosition": card.state.interval_position,
                        "nextReviewAt": card.state.next_review_at,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                match next_due_at(&deck.cards) {
                    Some(next) => println!("Nothing due in \"{}\" (next {})", deck.name, format_due(next, now)),
                    None => println!("Nothing due in \"{}\"", deck.name),
                }
                return Ok(());
            }
            for card in &due {
                println!(
                    "{}  {}  {}",
                    paint(&short_id(card.id), Color::GRAY, use_color),
                    truncate(&card.front, 60),
                    paint(&card.state.interval_position, Color::DIM, use_color)
                );
            }
        }
    }

    Ok(())
}
