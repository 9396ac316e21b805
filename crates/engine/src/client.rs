//! Client data embedded in a budget.
//!
//! A budget keeps a denormalized snapshot of the client taken at
//! creation/edit time, so historical quotes stay stable even if the
//! client's master record changes later.

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Snapshot of the client a budget was quoted for.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Client {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub tax_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// The fields of a [`Client`] an editing surface can set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientField {
    Name,
    Address,
    Phone,
    Email,
    TaxId,
    PostalCode,
    City,
}

impl std::str::FromStr for ClientField {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "address" => Ok(Self::Address),
            "phone" => Ok(Self::Phone),
            "email" => Ok(Self::Email),
            "tax_id" | "nif" | "cif" => Ok(Self::TaxId),
            "postal_code" | "cp" => Ok(Self::PostalCode),
            "city" => Ok(Self::City),
            other => Err(EngineError::KeyNotFound(other.to_string())),
        }
    }
}

impl Client {
    /// Sets one field by name. Empty `postal_code`/`city` clear the field.
    pub fn set(&mut self, field: ClientField, value: String) {
        match field {
            ClientField::Name => self.name = value,
            ClientField::Address => self.address = value,
            ClientField::Phone => self.phone = value,
            ClientField::Email => self.email = value,
            ClientField::TaxId => self.tax_id = value,
            ClientField::PostalCode => {
                self.postal_code = (!value.is_empty()).then_some(value);
            }
            ClientField::City => {
                self.city = (!value.is_empty()).then_some(value);
            }
        }
    }
}

/// Formats a Spanish phone number as `XXX XX XX XX`.
///
/// Non-digits are dropped and the number is truncated to 9 digits; partial
/// input is grouped as far as it goes.
#[must_use]
pub fn format_phone(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).take(9).collect();

    let groups = [(0, 3), (3, 5), (5, 7), (7, 9)];
    let mut out = String::new();
    for (start, end) in groups {
        if digits.len() <= start {
            break;
        }
        if start > 0 {
            out.push(' ');
        }
        out.push_str(&digits[start..digits.len().min(end)]);
    }
    out
}

/// Normalizes a NIF/CIF: uppercase, alphanumeric only, 9 chars max.
#[must_use]
pub fn format_tax_id(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(9)
        .collect()
}

/// Checks a normalized tax id against the NIF/CIF/NIE shapes.
#[must_use]
pub fn is_valid_tax_id(value: &str) -> bool {
    let clean = format_tax_id(value);
    let chars: Vec<char> = clean.chars().collect();
    if chars.len() != 9 {
        return false;
    }

    let digits = |range: std::ops::Range<usize>| chars[range].iter().all(char::is_ascii_digit);
    let upper = |idx: usize| chars[idx].is_ascii_uppercase();

    // NIF: 8 digits + letter
    let nif = digits(0..8) && upper(8);
    // CIF: letter + 7 digits + alphanumeric
    let cif = upper(0) && digits(1..8) && chars[8].is_ascii_alphanumeric();
    // NIE: X/Y/Z + 7 digits + letter
    let nie = matches!(chars[0], 'X' | 'Y' | 'Z') && digits(1..8) && upper(8);

    nif || cif || nie
}

/// A phone is valid once it holds exactly 9 digits.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    value.chars().filter(char::is_ascii_digit).count() == 9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_grouping() {
        assert_eq!(format_phone("600123456"), "600 12 34 56");
        assert_eq!(format_phone("600-12"), "600 12");
        assert_eq!(format_phone("60012345678"), "600 12 34 56");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn tax_id_normalization() {
        assert_eq!(format_tax_id("12345678-z"), "12345678Z");
        assert_eq!(format_tax_id(" b 1234567 8 extra"), "B12345678");
    }

    #[test]
    fn tax_id_shapes() {
        assert!(is_valid_tax_id("12345678Z"));
        assert!(is_valid_tax_id("B1234567C"));
        assert!(is_valid_tax_id("X1234567L"));
        assert!(!is_valid_tax_id("1234567"));
        assert!(!is_valid_tax_id("ABCDEFGHI"));
    }

    #[test]
    fn phone_validity() {
        assert!(is_valid_phone("600 12 34 56"));
        assert!(!is_valid_phone("600 12 34"));
    }
}
