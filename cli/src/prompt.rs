use std::path::PathBuf;

use colored::*;
use console::Term;

use crate::terminal::colors;

/// Asks for a file path on the terminal until a non-empty answer is given.
pub fn ask_path(question: &str) -> anyhow::Result<PathBuf> {
    let term = Term::stdout();

    if !term.features().is_attended() {
        anyhow::bail!("{question} is required when not running interactively");
    }

    loop {
        let marker = "?".color(colors::ACCENT).bold();
        term.write_str(&format!("{marker} {}: ", question.color(colors::PRIMARY)))?;

        let answer = term.read_line()?;
        if let Some(path) = clean_answer(&answer) {
            return Ok(path);
        }
    }
}

/// Trims whitespace and the quotes terminals add around dragged-in paths.
fn clean_answer(answer: &str) -> Option<PathBuf> {
    let cleaned = answer.trim().trim_matches(['"', '\'']).trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(PathBuf::from(cleaned))
    }
}
