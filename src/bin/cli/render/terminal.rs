use studybuddy_lib::flashcards::Flashcard;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render a list of cards as numbered question/answer pairs
pub fn render_cards(cards: &[Flashcard], use_color: bool) -> String {
    let mut lines = Vec::new();

    for (i, card) in cards.iter().enumerate() {
        let number = format!("{:>3}.", i + 1);
        lines.push(format!(
            "{} {} {}",
            paint(&number, Color::DIM, use_color),
            paint("Q:", Color::CYAN, use_color),
            paint(&card.question, Color::BOLD, use_color),
        ));
        for (j, answer_line) in card.answer.lines().enumerate() {
            let label = if j == 0 { "A:" } else { "  " };
            lines.push(format!(
                "     {} {}",
                paint(label, Color::GREEN, use_color),
                answer_line
            ));
        }
        lines.push(String::new()); // blank line between cards
    }

    // Remove trailing blank line
    while lines.last().map_or(false, |l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// Warning shown when the model reply could not be parsed into cards
pub fn render_fallback_notice(use_color: bool) -> String {
    paint(
        "The model reply could not be parsed; showing it as a single card.",
        Color::YELLOW,
        use_color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rendering() {
        let cards = vec![
            Flashcard::new("What is H2O?", "Water"),
            Flashcard::new("What is NaCl?", "Salt\nSodium chloride"),
        ];
        let out = render_cards(&cards, false);

        assert_eq!(
            out,
            "  1. Q: What is H2O?\n     A: Water\n\n  2. Q: What is NaCl?\n     A: Salt\n        Sodium chloride"
        );
    }

    #[test]
    fn test_color_wraps_question() {
        let cards = vec![Flashcard::new("Q", "A")];
        let out = render_cards(&cards, true);
        assert!(out.contains(&format!("{}Q{}", Color::BOLD, Color::RESET)));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(render_cards(&[], false), "");
    }
}
