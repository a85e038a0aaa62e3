//! Output mode shared by every subcommand.

use std::sync::OnceLock;

use serde::Serialize;

static JSON: OnceLock<bool> = OnceLock::new();

/// Select the output mode. Only the first call takes effect.
pub fn init(json: bool) {
    let _ = JSON.set(json);
}

/// Whether results should be printed as JSON instead of text.
pub fn is_json() -> bool {
    JSON.get().copied().unwrap_or(false)
}

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("  Error: could not encode output: {e}"),
    }
}

/// Truncate `text` to `max` characters for one-line listings.
pub fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}
