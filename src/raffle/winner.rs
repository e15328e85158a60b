//! Winning number generation.
//!
//! Uses the thread-local generator from `rand`. Good enough for a casual
//! raffle; not suitable where a draw has to be provably fair.

use rand::RngExt;

/// Draw a uniform number in `[0, 10^digit_count)` and zero-pad it.
pub fn generate_winner(digit_count: u8) -> String {
    let max = 10u32.pow(u32::from(digit_count));
    let value = rand::rng().random_range(0..max);
    format_winner(value, digit_count)
}

pub fn format_winner(value: u32, digit_count: u8) -> String {
    format!("{:0width$}", value, width = usize::from(digit_count))
}
