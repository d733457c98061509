use anyhow::Result;

use recall_lib::flashcards::intervals::format_duration;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output: Vec<_> = app
                .table
                .entries()
                .iter()
                .map(|(key, duration)| {
                    serde_json::json!({
                        "key": key,
                        "minutes": duration.num_minutes(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for (i, (key, duration)) in app.table.entries().iter().enumerate() {
                println!("{}. {:<12} {}", i + 1, key, format_duration(*duration));
            }
        }
    }

    Ok(())
}
