mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use recall_lib::flashcards::SchedulerKind;

#[derive(Parser)]
#[command(name = "recall-cli", about = "Spaced repetition decks and chunked lessons", version)]
struct Cli {
    /// Data directory (default: from config, else the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/recall/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List decks with due counts
    Decks,

    /// Create a deck
    NewDeck {
        name: String,
        /// fixed or adaptive (default from config)
        #[arg(long)]
        scheduler: Option<SchedulerKind>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Add a card to a deck
    Add {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        front: String,
        back: String,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Personal association to remember the card by (repeatable)
        #[arg(long = "association")]
        associations: Vec<String>,
    },

    /// Delete a deck and its study log
    DeleteDeck {
        deck: String,
    },

    /// List due cards, earliest first
    Due {
        deck: String,
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Review one card
    Review {
        deck: String,
        /// Card id prefix or front text prefix
        card: String,
        /// Recall signal (fixed: easy|medium|hard, adaptive: easy|good|hard|again)
        signal: String,
        /// Jump to a named interval (fixed decks only)
        #[arg(long)]
        interval: Option<String>,
    },

    /// Study due cards, reading signals from stdin
    Study {
        deck: String,
        /// Maximum cards (default from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the interval table
    Intervals,

    /// Record a capacity test result
    Capacity {
        user: String,
        size: u32,
        /// Success rate between 0 and 1
        rate: f64,
    },

    /// Run an interactive capacity test
    CapacityTest { user: String },

    /// Add a lesson file as chunked cards
    Lesson {
        deck: String,
        /// Lesson name, added as a tag on every card
        name: String,
        /// Lines of `front<TAB>back`
        file: PathBuf,
        /// Learner whose capacity sets the chunk size
        #[arg(long, default_value = "default")]
        user: String,
    },

    /// Study analytics for a deck
    Stats {
        deck: String,
        #[arg(long, default_value = "default")]
        user: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.config, cli.data_dir)?;

    match cli.command {
        Command::Decks => {
            commands::decks::run(&app, &cli.format, use_color)?;
        }
        Command::NewDeck { name, scheduler, description } => {
            let kind = scheduler.unwrap_or(app.config.default_scheduler);
            commands::new_deck::run(&app, &name, kind, description, &cli.format)?;
        }
        Command::Add { deck, front, back, tags, associations } => {
            commands::add::run(&app, &deck, front, back, tags.as_deref(), associations, &cli.format)?;
        }
        Command::DeleteDeck { deck } => {
            commands::delete_deck::run(&app, &deck, &cli.format)?;
        }
        Command::Due { deck, limit } => {
            commands::due::run(&app, &deck, limit, &cli.format, use_color)?;
        }
        Command::Review { deck, card, signal, interval } => {
            commands::review::run(&app, &deck, &card, &signal, interval, &cli.format, use_color)?;
        }
        Command::Study { deck, limit } => {
            let limit = limit.unwrap_or(app.config.max_cards_per_session);
            commands::study::run(&app, &deck, limit, &cli.format, use_color)?;
        }
        Command::Intervals => {
            commands::intervals::run(&app, &cli.format)?;
        }
        Command::Capacity { user, size, rate } => {
            commands::capacity::run(&app, &user, size, rate, &cli.format)?;
        }
        Command::CapacityTest { user } => {
            commands::capacity::run_test(&app, &user, &cli.format, use_color)?;
        }
        Command::Lesson { deck, name, file, user } => {
            commands::lesson::run(&app, &deck, &name, &file, &user, &cli.format)?;
        }
        Command::Stats { deck, user } => {
            commands::stats::run(&app, &deck, &user, &cli.format, use_color)?;
        }
    }

    Ok(())
}
