use anyhow::{bail, Result};
use chrono::Utc;

use recall_lib::flashcards::{Deck, SchedulerKind};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    name: &str,
    scheduler: SchedulerKind,
    description: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Deck name cannot be empty");
    }
    if app
        .list_decks()?
        .iter()
        .any(|d| d.name.to_lowercase() == name.to_lowercase())
    {
        bail!("A deck named '{}' already exists", name);
    }

    let mut deck = Deck::new(name.to_string(), scheduler, Utc::now());
    deck.description = description;
    app.save_deck(&deck)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": deck.id.to_string(),
                "name": deck.name,
                "scheduler": deck.scheduler,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Created deck \"{}\" ({} scheduler)", deck.name, deck.scheduler);
            println!("  ID: {}", deck.id);
        }
    }

    Ok(())
}
