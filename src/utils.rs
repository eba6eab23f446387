// Display helpers for the terminal front end
use crate::raffle_state::Raffle;

/// Format a currency amount with trailing fractional zeros removed
/// (110.0 -> "110", 115.5 -> "115.5"). Six decimal places at most.
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.6}", amount);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        return "0".to_string();
    }
    trimmed.to_string()
}

/// One-line description of the ledger for the menu header
pub fn status_line(raffle: &Raffle) -> String {
    if !raffle.is_open() {
        return "Draw has not started".to_string();
    }
    format!(
        "Draw is ongoing. Raffle pot size is ${}",
        format_amount(raffle.pot_size)
    )
}

/// "" for one, "s" otherwise
pub fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
