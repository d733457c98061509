use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};

use recall_lib::clock::SystemClock;
use recall_lib::flashcards::algorithm::{format_interval, preview_intervals};
use recall_lib::flashcards::session::Result as SessionResult;
use recall_lib::flashcards::{
    study_session, DeckScheduler, Flashcard, IntervalTable, Recall, RecallSource, SessionError,
};

use crate::app::App;
use crate::render::terminal::{bold, format_accuracy, paint, Color};
use crate::OutputFormat;

/// Reads recall signals typed at a prompt.
///
/// Each answer is `<signal> [interval-key]`; `q` or end of input stops.
struct PromptRecallSource<R, W> {
    input: R,
    output: W,
    table: Arc<IntervalTable>,
    use_color: bool,
}

impl<R: BufRead, W: Write> PromptRecallSource<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask(&mut self, card: &Flashcard, scheduler: &DeckScheduler) -> io::Result<Option<Recall>> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", bold(&card.front, self.use_color))?;
        write!(self.output, "{}", paint("[enter to reveal] ", Color::GRAY, self.use_color))?;
        self.output.flush()?;
        match self.read_line()? {
            Some(answer) if answer != "q" => {}
            _ => return Ok(None),
        }
        writeln!(self.output, "{}", card.back)?;

        let accepted = scheduler.accepted_signals();
        if let DeckScheduler::Adaptive(_) = scheduler {
            let preview: Vec<String> = accepted
                .iter()
                .zip(preview_intervals(&card.state))
                .map(|(signal, days)| format!("{} {}", signal, format_interval(days)))
                .collect();
            writeln!(self.output, "{}", paint(&preview.join("  "), Color::GRAY, self.use_color))?;
        }
        loop {
            write!(self.output, "{}? ", accepted.join("/"))?;
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) if line != "q" => line.to_lowercase(),
                _ => return Ok(None),
            };
            let mut parts = line.split_whitespace();
            let signal = match parts.next() {
                Some(signal) if accepted.contains(&signal) => signal.to_string(),
                _ => {
                    writeln!(self.output, "Expected one of: {}", accepted.join(", "))?;
                    continue;
                }
            };

            let explicit_key = parts.next().map(str::to_string);
            if let Some(key) = &explicit_key {
                if matches!(scheduler, DeckScheduler::Adaptive(_)) {
                    writeln!(self.output, "Interval overrides only apply to fixed-step decks")?;
                    continue;
                }
                if !self.table.contains(key) {
                    let keys: Vec<&str> = self.table.keys().collect();
                    writeln!(self.output, "Unknown interval '{}'. Known: {}", key, keys.join(", "))?;
                    continue;
                }
            }

            return Ok(Some(Recall { signal, explicit_key }));
        }
    }
}

impl<R: BufRead, W: Write> RecallSource for PromptRecallSource<R, W> {
    fn recall(&mut self, card: &Flashcard, scheduler: &DeckScheduler) -> SessionResult<Option<Recall>> {
        self.ask(card, scheduler)
            .map_err(|e| SessionError::Source(e.to_string()))
    }
}

pub fn run(
    app: &App,
    deck_name: &str,
    limit: usize,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut deck = app.find_deck(deck_name)?;
    let scheduler = app.scheduler_for(&deck);
    let mut log = app
        .decks
        .load_log(deck.id)
        .context("Failed to load study log")?;

    let stdin = io::stdin();
    // keep stdout clean for JSON output
    let output: Box<dyn Write> = match format {
        OutputFormat::Json => Box::new(io::stderr()),
        OutputFormat::Plain => Box::new(io::stdout()),
    };
    let mut source = PromptRecallSource {
        input: stdin.lock(),
        output,
        table: Arc::clone(&app.table),
        use_color,
    };

    let result = study_session(&mut deck, &scheduler, limit, &SystemClock, &mut source, &mut log);
    // reviews applied before a failure are kept
    app.save_deck(&deck)?;
    let session = result.context("Study session failed")?;

    let session = match session {
        Some(session) => session,
        None => {
            match format {
                OutputFormat::Json => println!("null"),
                OutputFormat::Plain => println!("No cards studied in \"{}\"", deck.name),
            }
            return Ok(());
        }
    };

    app.decks
        .save_log(deck.id, &log)
        .context("Failed to save study log")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        OutputFormat::Plain => {
            println!();
            println!(
                "Studied {} cards, {} correct ({}) in {:.0}s",
                session.cards_studied,
                session.correct_answers,
                session
                    .accuracy()
                    .map(|rate| format_accuracy(rate, use_color))
                    .unwrap_or_else(|_| "-".to_string()),
                session.study_time_seconds()
            );
        }
    }

    Ok(())
}
