use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Utc;

use recall_lib::chunking::{chunk_lesson, LociStructure};

use crate::app::App;
use crate::OutputFormat;

/// Parse `front<TAB>back` lines; blank lines and `#` comments are skipped
fn parse_items(content: &str) -> Result<Vec<(String, String)>> {
    let mut items = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('\t') {
            Some((front, back)) if !front.trim().is_empty() && !back.trim().is_empty() => {
                items.push((front.trim().to_string(), back.trim().to_string()));
            }
            _ => bail!("Line {}: expected 'front<TAB>back'", i + 1),
        }
    }
    Ok(items)
}

pub fn run(
    app: &App,
    deck_name: &str,
    lesson_name: &str,
    file: &Path,
    user: &str,
    format: &OutputFormat,
) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read lesson file {}", file.display()))?;
    let items = parse_items(&content)?;
    if items.is_empty() {
        bail!("Lesson file {} has no items", file.display());
    }

    let mut deck = app.find_deck(deck_name)?;
    let scheduler = app.scheduler_for(&deck);
    let profile = app
        .profiles
        .load_or_new(user)
        .with_context(|| format!("Failed to load profile for '{}'", user))?;

    let capacity = profile.current_capacity.max(1);
    let loci = LociStructure::numbered(items.len().div_ceil(capacity as usize));
    let chunks = chunk_lesson(
        &mut deck,
        &scheduler,
        lesson_name,
        &items,
        capacity,
        &loci,
        Utc::now(),
    );
    app.save_deck(&deck)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&chunks)?);
        }
        OutputFormat::Plain => {
            println!(
                "Added {} cards to \"{}\" in {} chunks of up to {}",
                items.len(),
                deck.name,
                chunks.len(),
                capacity
            );
            for chunk in &chunks {
                println!("  {}: {} cards", chunk.loci_id, chunk.card_ids.len());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items() {
        let items = parse_items("# capitals\nFrance\tParis\n\nJapan\t Tokyo \n").unwrap();
        assert_eq!(
            items,
            vec![
                ("France".to_string(), "Paris".to_string()),
                ("Japan".to_string(), "Tokyo".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_items_rejects_missing_back() {
        assert!(parse_items("France\tParis\nGermany\n").is_err());
        assert!(parse_items("France\t \n").is_err());
    }
}
