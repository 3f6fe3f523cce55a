// Colored terminal output for keyword lists.

use colored::Colorize;

use crate::tfidf::Word;

/// Display a ranked keyword list in the terminal.
pub fn display_words(heading: &str, words: &[Word]) {
    if words.is_empty() {
        println!("No keywords found in {heading}.");
        return;
    }

    println!(
        "\n{}",
        format!("=== {} ({} keywords) ===", super::truncate_chars(heading, 60), words.len()).bold()
    );
    println!();

    println!(
        "  {:>4}  {:<24} {:>6}  {:>8}",
        "Rank".dimmed(),
        "Word".dimmed(),
        "Count".dimmed(),
        "Score".dimmed(),
    );
    println!("  {}", "-".repeat(48).dimmed());

    let top = words.iter().map(|w| w.score).fold(0.0_f64, f64::max);
    for (i, w) in words.iter().enumerate() {
        println!(
            "  {:>4}. {:<24} {:>6}  {}",
            i + 1,
            w.word,
            w.count,
            colorize_score(w.score, top),
        );
    }
    println!();
}

/// Summarize a dictionary dump.
pub fn display_dump_summary(path: &str, docs: u64, entries: usize, lexicon_size: usize) {
    println!(
        "\n{} {} entries written to {} ({} candidates, {} documents)",
        "Dumped".green().bold(),
        entries,
        path,
        lexicon_size,
        docs
    );
}

/// Color a score relative to the best score in the list.
fn colorize_score(score: f64, top: f64) -> colored::ColoredString {
    let text = format!("{score:>8.4}");
    if top <= 0.0 {
        return text.dimmed();
    }
    let ratio = score / top;
    if ratio >= 0.75 {
        text.bright_green().bold()
    } else if ratio >= 0.4 {
        text.bright_yellow()
    } else {
        text.normal()
    }
}
