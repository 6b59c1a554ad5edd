use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, deck_name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.find_deck(deck_name)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&deck)?);
        }
        OutputFormat::Plain => {
            let header = format!("{} ({} cards)", deck.name, deck.card_count());
            if use_color {
                println!("{}{}{}", terminal::Color::BOLD, header, terminal::Color::RESET);
            } else {
                println!("{}", header);
            }

            if !deck.flashcards.is_empty() {
                println!();
                println!("{}", terminal::render_cards(&deck.flashcards, use_color));
            }
        }
    }

    Ok(())
}
