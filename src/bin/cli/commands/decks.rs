use anyhow::Result;
use chrono::Utc;

use recall_lib::flashcards::queue::due_count;

use crate::app::App;
use crate::render::terminal::{bold, paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let decks = app.list_decks()?;
    let now = Utc::now();

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = decks
                .iter()
                .map(|deck| {
                    serde_json::json!({
                        "id": deck.id.to_string(),
                        "name": deck.name,
                        "scheduler": deck.scheduler,
                        "cardCount": deck.cards.len(),
                        "dueCount": due_count(&deck.cards, now),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("(no decks)");
            }
            for deck in &decks {
                let due = due_count(&deck.cards, now);
                let due_text = format!("{} due", due);
                println!(
                    "{} [{}] {} cards, {}",
                    bold(&deck.name, use_color),
                    deck.scheduler,
                    deck.cards.len(),
                    if due > 0 {
                        paint(&due_text, Color::YELLOW, use_color)
                    } else {
                        paint(&due_text, Color::GRAY, use_color)
                    }
                );
            }
        }
    }

    Ok(())
}
