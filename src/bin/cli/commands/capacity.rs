use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use recall_lib::chunking::{CapacityTester, ChunkingProfile, SequenceBank};

use crate::app::App;
use crate::render::terminal::{bold, format_accuracy, paint, Color};
use crate::OutputFormat;

/// Record an externally measured capacity test
pub fn run(app: &App, user: &str, size: u32, rate: f64, format: &OutputFormat) -> Result<()> {
    let mut profile = app
        .profiles
        .load_or_new(user)
        .with_context(|| format!("Failed to load profile for '{}'", user))?;
    let previous = profile.current_capacity;

    profile
        .update_capacity(size, rate)
        .context("Invalid capacity test")?;
    app.profiles.save(&profile).context("Failed to save profile")?;

    print_profile(&profile, previous, format)
}

/// Present sequences at the prompt and score what is typed back
pub fn run_test(app: &App, user: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let mut profile = app
        .profiles
        .load_or_new(user)
        .with_context(|| format!("Failed to load profile for '{}'", user))?;
    let previous = profile.current_capacity;
    let tester = CapacityTester::new(SequenceBank::default(), app.config.max_test_size);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut judge = |sequence: &[String]| -> bool {
        ask_sequence(&mut input, sequence, use_color).unwrap_or(false)
    };

    let report = tester.run(&mut profile, &mut judge).context("Capacity test failed")?;
    app.profiles.save(&profile).context("Failed to save profile")?;

    if let OutputFormat::Plain = format {
        println!();
        for result in &report.results {
            println!(
                "  size {:>2}: {}",
                result.attempted_size,
                format_accuracy(result.success_rate, use_color)
            );
        }
    }
    print_profile(&profile, previous, format)
}

/// Show a sequence, hide it, and compare what the learner types back
fn ask_sequence<R: BufRead>(input: &mut R, sequence: &[String], use_color: bool) -> io::Result<bool> {
    let mut stdout = io::stdout();
    writeln!(stdout)?;
    writeln!(stdout, "Memorize: {}", bold(&sequence.join(" "), use_color))?;
    write!(stdout, "[enter when ready] ")?;
    stdout.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    if use_color {
        // clear the screen so the sequence is out of sight
        write!(stdout, "\x1b[2J\x1b[H")?;
    }

    write!(stdout, "Repeat the sequence: ")?;
    stdout.flush()?;
    line.clear();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }

    let answer: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
    let expected: Vec<String> = sequence.iter().map(|s| s.to_lowercase()).collect();
    let correct = answer == expected;
    if correct {
        writeln!(stdout, "{}", paint("correct", Color::GREEN, use_color))?;
    } else {
        writeln!(stdout, "{}", paint("missed", Color::RED, use_color))?;
    }
    Ok(correct)
}

fn print_profile(profile: &ChunkingProfile, previous: u32, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(profile)?);
        }
        OutputFormat::Plain => {
            if profile.current_capacity == previous {
                println!("Capacity for '{}' stays at {}", profile.user_id, previous);
            } else {
                println!(
                    "Capacity for '{}': {} -> {}",
                    profile.user_id, previous, profile.current_capacity
                );
            }
            println!(
                "  Best tested: {}, tests recorded: {}",
                profile.max_tested_capacity,
                profile.test_history().len()
            );
        }
    }
    Ok(())
}
