use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, deck_name: &str, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    app.delete_deck(&deck.id)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": deck.id,
                "name": deck.name,
                "deleted": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted deck \"{}\" ({} cards)", deck.name, deck.card_count());
        }
    }

    Ok(())
}
