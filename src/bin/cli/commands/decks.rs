use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let decks = app.list_decks()?;

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = decks
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "id": d.id,
                        "name": d.name,
                        "cardCount": d.card_count(),
                        "createdAt": d.created_at.map(|t| t.to_rfc3339()),
                        "updatedAt": d.updated_at.map(|t| t.to_rfc3339()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("No saved decks yet");
                return Ok(());
            }

            let width = decks.iter().map(|d| d.name.chars().count()).max().unwrap_or(0);
            for deck in &decks {
                let details = match deck.created_at {
                    Some(created) => format!("{} cards, {}", deck.card_count(), created.format("%Y-%m-%d")),
                    None => format!("{} cards", deck.card_count()),
                };
                if use_color {
                    println!(
                        "{:<width$}  {}{}{}",
                        deck.name,
                        terminal::Color::DIM,
                        details,
                        terminal::Color::RESET,
                        width = width
                    );
                } else {
                    println!("{:<width$}  {}", deck.name, details, width = width);
                }
            }
        }
    }

    Ok(())
}
