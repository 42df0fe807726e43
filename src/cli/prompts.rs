//! Terminal output and prompts for the headless commands

use std::io::{self, BufRead, Write};

use crate::models::Activity;

/// Affirmative answers across the supported languages
const YES_WORDS: &[&str] = &["y", "yes", "j", "ja", "s", "si", "sí", "sì", "ναι"];

/// Parse a yes/no answer; empty input means no
pub fn parse_yes(input: &str) -> bool {
    let answer = input.trim().to_lowercase();
    YES_WORDS.contains(&answer.as_str())
}

/// Ask `question` on stdout and read one answer line from `input`
pub fn confirm_with(question: &str, input: &mut impl BufRead) -> io::Result<bool> {
    print!("{} [y/N]: ", question);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(parse_yes(&line))
}

pub fn confirm(question: &str) -> io::Result<bool> {
    confirm_with(question, &mut io::stdin().lock())
}

/// Print the activity table used by `list`
pub fn print_activities(title: &str, activities: &[&Activity], no_results: &str) {
    println!();
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║  {:<61}║", title);
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();

    if activities.is_empty() {
        println!("  {}", no_results);
        println!();
        return;
    }

    for act in activities {
        let row = act.format_row(44);
        println!("  #{:<3} {}  [{} | {}]", act.id, row, act.age, act.level);
        println!("       {} | {}", act.theme_line(), act.duration);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yes() {
        assert!(parse_yes("y\n"));
        assert!(parse_yes(" YES "));
        assert!(parse_yes("ja"));
        assert!(!parse_yes(""));
        assert!(!parse_yes("no"));
    }

    #[test]
    fn test_confirm_reads_one_line() {
        let mut input = io::Cursor::new(b"y\nn\n".to_vec());
        assert!(confirm_with("Export?", &mut input).unwrap());
        assert!(!confirm_with("Export?", &mut input).unwrap());
        // EOF counts as no
        assert!(!confirm_with("Export?", &mut input).unwrap());
    }
}
