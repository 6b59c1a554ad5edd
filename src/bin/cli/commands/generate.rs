use anyhow::{bail, Result};

use studybuddy_lib::flashcards::NewDeck;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &App,
    text: &str,
    save_as: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    if text.trim().is_empty() {
        bail!("No study text given. Pass it as an argument or pipe it on stdin.");
    }

    let response = app.generate(text)?;

    let saved = match save_as.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) if !response.flashcards.is_empty() => {
            let deck = NewDeck::new(name.to_string(), response.flashcards.clone());
            Some(app.save_deck(deck)?)
        }
        _ => None,
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "flashcards": response.flashcards,
                "fallback": response.fallback,
                "savedDeck": saved.as_ref().map(|d| serde_json::json!({
                    "id": d.id,
                    "name": d.name,
                })),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if response.fallback {
                eprintln!("{}", terminal::render_fallback_notice(use_color));
            }
            println!("{}", terminal::render_cards(&response.flashcards, use_color));
            if let Some(deck) = saved {
                println!();
                println!("Saved deck \"{}\" ({} cards)", deck.name, deck.card_count());
                println!("  ID: {}", deck.id);
            }
        }
    }

    Ok(())
}
