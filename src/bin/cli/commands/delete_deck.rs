use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, deck_name: &str, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    app.decks
        .delete_deck(deck.id)
        .with_context(|| format!("Failed to delete deck '{}'", deck.name))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": deck.id.to_string(),
                "name": deck.name,
                "deleted": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted deck \"{}\" ({} cards)", deck.name, deck.cards.len());
        }
    }

    Ok(())
}
