mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "studybuddy-cli", about = "Study Buddy flashcard CLI and TUI", version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Generate flashcards from study text
    Generate {
        /// Study text (use "-" or pipe to read from stdin)
        text: Option<String>,
        /// Save the generated cards as a deck with this name
        #[arg(long)]
        save: Option<String>,
    },

    /// List saved decks
    Decks,

    /// Print the cards of a saved deck
    Show {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },

    /// Delete a saved deck
    Delete {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },

    /// Study interactively
    #[cfg(feature = "tui")]
    Study {
        /// Open this saved deck right away
        deck: Option<String>,
    },
}

/// Read content from stdin if piped, or resolve "-" as stdin
fn resolve_content(content: Option<String>) -> Option<String> {
    match content.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
            Some(buf)
        }
        Some(_) => content,
        None => {
            // Auto-detect piped stdin
            if !stdin_is_tty() {
                let mut buf = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
                if buf.is_empty() { None } else { Some(buf) }
            } else {
                None
            }
        }
    }
}

/// Check if stdin is a terminal (not piped)
fn stdin_is_tty() -> bool {
    unsafe { libc_isatty(0) != 0 }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let interactive = match cli.command {
        None => true,
        #[cfg(feature = "tui")]
        Some(Command::Study { .. }) => true,
        _ => false,
    };

    // Log lines would tear through the alternate screen unless asked for
    if !interactive || std::env::var_os("RUST_LOG").is_some() {
        env_logger::init();
    }

    let use_color = !cli.no_color && atty_check();
    let config = cli.config.as_deref();

    match cli.command {
        None => {
            #[cfg(feature = "tui")]
            {
                tui::run(config, None)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        Some(Command::Generate { text, save }) => {
            let app = app::App::new(config)?;
            let text = resolve_content(text).unwrap_or_default();
            commands::generate::run(&app, &text, save.as_deref(), &cli.format, use_color)?;
        }
        Some(Command::Decks) => {
            let app = app::App::new(config)?;
            commands::decks::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Show { deck }) => {
            let app = app::App::new(config)?;
            commands::show::run(&app, &deck, &cli.format, use_color)?;
        }
        Some(Command::Delete { deck }) => {
            let app = app::App::new(config)?;
            commands::delete::run(&app, &deck, &cli.format, use_color)?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Study { deck }) => {
            tui::run(config, deck.as_deref())?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
