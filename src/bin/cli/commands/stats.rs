use anyhow::{Context, Result};
use chrono::Utc;

use recall_lib::flashcards::queue::due_count;

use crate::app::App;
use crate::render::terminal::{bold, format_accuracy};
use crate::OutputFormat;

/// Days of history shown in plain output
const RECENT_DAYS: usize = 7;

pub fn run(
    app: &App,
    deck_name: &str,
    user: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let log = app
        .decks
        .load_log(deck.id)
        .context("Failed to load study log")?;
    let profile = app
        .profiles
        .load_or_new(user)
        .with_context(|| format!("Failed to load profile for '{}'", user))?;

    let analytics = log.analytics(deck.cards.len(), profile.current_capacity);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&analytics)?);
        }
        OutputFormat::Plain => {
            println!("{}", bold(&deck.name, use_color));
            let analytics = match analytics {
                Some(analytics) => analytics,
                None => {
                    println!("  No sessions yet ({} cards)", deck.cards.len());
                    return Ok(());
                }
            };

            println!("  Sessions:      {}", analytics.total_sessions);
            println!("  Cards studied: {}", analytics.total_cards_studied);
            println!(
                "  Accuracy:      {}",
                format_accuracy(analytics.overall_accuracy, use_color)
            );
            println!(
                "  Cards:         {} ({} due)",
                analytics.total_cards_in_system,
                due_count(&deck.cards, Utc::now())
            );
            println!("  Capacity:      {}", analytics.current_capacity);

            println!();
            for (date, day) in analytics.daily_stats.iter().rev().take(RECENT_DAYS) {
                let rate = if day.cards_studied > 0 {
                    day.correct_answers as f64 / day.cards_studied as f64
                } else {
                    0.0
                };
                println!(
                    "  {}  {:>3} cards  {:>4}  {:.0}m",
                    date,
                    day.cards_studied,
                    format_accuracy(rate, use_color),
                    day.study_time_seconds / 60.0
                );
            }
        }
    }

    Ok(())
}
