//! Payment-terms breakdown.
//!
//! Payment terms are free text, one installment per line, usually of the
//! form "50% A la aceptación del presupuesto". For the printable document
//! each line's first percentage token is extracted and turned into a due
//! amount against the budget total. Isolated here so the text scraping
//! never leaks into the aggregate.

use serde::Serialize;

/// One line of the payment schedule.
#[derive(Clone, Debug, Serialize)]
pub struct PaymentLine {
    pub text: String,
    /// The extracted percentage, when the line carries one.
    pub percent: Option<f64>,
    /// `total * percent / 100`, when a percentage was found.
    pub amount: Option<f64>,
}

/// Splits free-text payment terms into schedule lines with due amounts.
///
/// Blank lines are dropped; lines without a percentage token are kept
/// verbatim with no amount.
#[must_use]
pub fn breakdown(terms: &str, total: f64) -> Vec<PaymentLine> {
    terms
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let percent = extract_percent(line);
            PaymentLine {
                text: line.to_string(),
                percent,
                amount: percent.map(|pct| total * pct / 100.0),
            }
        })
        .collect()
}

/// Finds the first `N%` / `N,M %` token in a line.
///
/// A token is digits, an optional `.`/`,` fraction, optional spaces, `%`.
fn extract_percent(line: &str) -> Option<f64> {
    let bytes = line.as_bytes();
    let mut idx = 0;

    while idx < bytes.len() {
        if !bytes[idx].is_ascii_digit() {
            idx += 1;
            continue;
        }

        let start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }

        let mut end = idx;
        if idx < bytes.len()
            && (bytes[idx] == b'.' || bytes[idx] == b',')
            && idx + 1 < bytes.len()
            && bytes[idx + 1].is_ascii_digit()
        {
            idx += 1;
            while idx < bytes.len() && bytes[idx].is_ascii_digit() {
                idx += 1;
            }
            end = idx;
        }

        let mut after = end;
        while after < bytes.len() && bytes[after] == b' ' {
            after += 1;
        }

        if after < bytes.len() && bytes[after] == b'%' {
            let token = line[start..end].replace(',', ".");
            return token.parse().ok();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbers::approx_eq;

    #[test]
    fn fifty_fifty_schedule() {
        let terms = "50% A la aceptación del presupuesto\n50% A la finalización de los trabajos";
        let lines = breakdown(terms, 302.50);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].percent, Some(50.0));
        assert!(approx_eq(lines[0].amount.unwrap(), 151.25));
        assert!(approx_eq(lines[1].amount.unwrap(), 151.25));
    }

    #[test]
    fn decimal_percentages_accept_comma_and_dot() {
        assert_eq!(extract_percent("33,5% al inicio"), Some(33.5));
        assert_eq!(extract_percent("33.5 % al inicio"), Some(33.5));
    }

    #[test]
    fn lines_without_token_carry_no_amount() {
        let lines = breakdown("Transferencia bancaria\n\n40% reserva", 1000.0);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].percent.is_none());
        assert!(lines[0].amount.is_none());
        assert!(approx_eq(lines[1].amount.unwrap(), 400.0));
    }

    #[test]
    fn first_token_wins() {
        assert_eq!(extract_percent("20% ahora, 80% después"), Some(20.0));
    }

    #[test]
    fn plain_numbers_are_not_percentages() {
        assert_eq!(extract_percent("Pago en 30 días"), None);
        // The digits before the token do not confuse the scan.
        assert_eq!(extract_percent("Cuota 2: 25% restante"), Some(25.0));
    }
}
