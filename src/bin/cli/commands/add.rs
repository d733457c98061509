use anyhow::{bail, Result};
use chrono::Utc;

use recall_lib::flashcards::Flashcard;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    deck_name: &str,
    front: String,
    back: String,
    tags: Option<&str>,
    associations: Vec<String>,
    format: &OutputFormat,
) -> Result<()> {
    if front.trim().is_empty() || back.trim().is_empty() {
        bail!("Card front and back cannot be empty");
    }

    let mut deck = app.find_deck(deck_name)?;
    let scheduler = app.scheduler_for(&deck);
    let now = Utc::now();

    let mut card = Flashcard::new(deck.id, front, back, scheduler.initial_state(now), now);
    if let Some(tag_str) = tags {
        card.tags = tag_str
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }
    card.personal_associations = associations
        .into_iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect();
    let card = deck.push_card(card).clone();
    deck.updated_at = now;
    app.save_deck(&deck)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Added card \"{}\" to deck \"{}\"", card.front, deck.name);
            if !card.tags.is_empty() {
                println!(
                    "  Tags: {}",
                    card.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" ")
                );
            }
            for association in &card.personal_associations {
                println!("  Association: {}", association);
            }
            println!("  ID: {}", card.id);
        }
    }

    Ok(())
}
