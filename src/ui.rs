use console::{Style as TermStyle, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::kdf::Pbkdf2Config;
use crate::request::DerivationRequest;
use crate::session::Outcome;

const METER_WIDTH: usize = 25;

const STRONG_SCORE: u8 = 75;
const FAIR_SCORE: u8 = 40;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_meter_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support { ("█", "░") } else { ("#", "-") }
}

/// Run the derivation behind a spinner so the terminal shows activity
/// during the slow KDF call.
pub fn show_progress<F, T>(unicode_support: bool, f: F) -> Result<(T, Duration)>
where
    F: FnOnce() -> Result<T>,
{
    let term = Term::stdout();
    term.hide_cursor().ok();

    let pb = ProgressBar::new_spinner();

    if unicode_support {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
    } else {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("-\\|/-"),
        );
    }

    pb.set_message("Deriving key...");
    pb.enable_steady_tick(Duration::from_millis(80));

    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();

    pb.finish_and_clear();
    term.show_cursor().ok();

    result.map(|r| (r, elapsed))
}

pub fn display_output(
    outcome: &Outcome,
    request: &DerivationRequest,
    config: &Pbkdf2Config,
    elapsed: Duration,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", outcome.password);
        return;
    }

    println!("Password:\n{}\n", outcome.password);

    println!("Settings:");
    println!("  ├─ KDF        PBKDF2-HMAC-SHA-256 ({} iterations)", config.iterations);
    println!("  ├─ Style      {}", request.style.as_str());
    println!("  ├─ Symbol     {}", request.symbol);
    println!("  └─ Salt       {}", outcome.salt_b64);
    println!();

    let meter = meter_bar(outcome.strength, METER_WIDTH, options.unicode_support);
    let style = strength_style(outcome.strength, options.color_support);

    println!("Stats:");
    println!(
        "  ├─ Strength   {} {}/100 (indicative only)",
        style.apply_to(meter),
        style.apply_to(outcome.strength)
    );
    println!(
        "  ├─ Length     {} {}",
        outcome.password.chars().count(),
        if outcome.password.chars().count() == 1 {
            "char"
        } else {
            "chars"
        }
    );
    println!("  └─ Time       {:.1}s", elapsed.as_secs_f64());
    println!("\nKeep the salt if you want to regenerate this password later.");
}

pub fn meter_bar(score: u8, width: usize, unicode_support: bool) -> String {
    let (filled_char, empty_char) = get_meter_symbols(unicode_support);
    let filled = (score as usize * width) / 100;
    let mut bar = String::new();
    for _ in 0..filled {
        bar.push_str(filled_char);
    }
    for _ in filled..width {
        bar.push_str(empty_char);
    }
    bar
}

fn strength_style(score: u8, color_support: bool) -> TermStyle {
    if !color_support {
        return TermStyle::new();
    }
    if score >= STRONG_SCORE {
        TermStyle::new().green()
    } else if score >= FAIR_SCORE {
        TermStyle::new().yellow()
    } else {
        TermStyle::new().red()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meter_symbols_unicode() {
        let (filled, empty) = get_meter_symbols(true);
        assert_eq!(filled, "█");
        assert_eq!(empty, "░");
    }

    #[test]
    fn test_meter_symbols_ascii() {
        let (filled, empty) = get_meter_symbols(false);
        assert_eq!(filled, "#");
        assert_eq!(empty, "-");
    }

    #[test]
    fn test_meter_bar_empty() {
        assert_eq!(meter_bar(0, 10, false), "----------");
    }

    #[test]
    fn test_meter_bar_full() {
        assert_eq!(meter_bar(100, 10, false), "##########");
    }

    #[test]
    fn test_meter_bar_partial() {
        assert_eq!(meter_bar(50, 10, false), "#####-----");
        assert_eq!(meter_bar(49, 10, false), "####------");
    }

    #[test]
    fn test_meter_bar_width() {
        for score in [0u8, 33, 67, 100] {
            assert_eq!(meter_bar(score, 25, false).chars().count(), 25);
            assert_eq!(meter_bar(score, 25, true).chars().count(), 25);
        }
    }
}
