//! Lenient numeric parsing for user-typed quantities and prices.
//!
//! End users type decimals with comma or dot interchangeably, often with
//! stray symbols ("12,5 m²"). These parsers are total: whatever comes in,
//! a finite `f64` comes out, with `0.0` standing in for anything
//! unparseable. They run on every keystroke of an editing surface, so they
//! must never fail.

/// Tolerance used when comparing derived monetary values.
///
/// Derived totals are floats; two values closer than this are the same
/// amount of money.
pub const MONEY_EPSILON: f64 = 0.01;

/// Parses loosely formatted decimal text.
///
/// Every `,` becomes `.`, then the longest numeric prefix is taken, so
/// `"1,5"` is `1.5` and `"12abc"` is `12.0`. Empty or non-numeric input
/// yields `0.0`.
#[must_use]
pub fn parse_decimal(input: &str) -> f64 {
    let cleaned = input.trim().replace(',', ".");
    parse_prefix(&cleaned).unwrap_or(0.0)
}

/// Parses quantity/price fields of a line item.
///
/// Stricter sibling of [`parse_decimal`]: after the comma swap every
/// character that is not an ASCII digit or `.` is dropped, which also
/// removes any sign. `"1.234,56"` therefore reads as `1.234` (the second
/// separator ends the number), matching what the editing surfaces show.
#[must_use]
pub fn parse_amount(input: &str) -> f64 {
    let cleaned: String = input
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_prefix(&cleaned).unwrap_or(0.0)
}

/// Rounds to 2 decimal places, the monetary resolution of a budget.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Returns `true` when two monetary values are within [`MONEY_EPSILON`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < MONEY_EPSILON
}

/// Formats a monetary value with 2 decimal places.
#[must_use]
pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

/// Formats a quantity without trailing zeros (`2` rather than `2.0`).
#[must_use]
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Longest-numeric-prefix float parse: optional sign, digits, one dot.
///
/// Returns `None` when the prefix holds no digit at all, and when the
/// parsed value is not finite.
fn parse_prefix(input: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (idx, c) in input.char_indices() {
        match c {
            '+' | '-' if idx == 0 => end = idx + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = idx + 1;
            }
            c if c.is_ascii_digit() => {
                seen_digit = true;
                end = idx + 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }

    input[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
