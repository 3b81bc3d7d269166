//! Numeric checksum validators
//!
//! Shape regexes only say a value *looks like* an identifier; these
//! validators confirm a candidate is *structurally* valid, cutting false
//! positives before a column is escalated to High. Both are pure and
//! total: the same input always yields the same boolean, and a wrong
//! length is a normal rejection, never an error.

use serde::{Deserialize, Serialize};

/// Which checksum validator confirmed a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumKind {
    /// Weighted-doubling (Luhn) payment-card validator
    CardNumber,
    /// 9-digit national-ID check-digit validator
    Sin,
}

impl ChecksumKind {
    /// Human-readable label for report text
    pub fn label(&self) -> &'static str {
        match self {
            Self::CardNumber => "credit card number",
            Self::Sin => "SIN",
        }
    }
}

/// Weighted-doubling (Luhn) validation for payment-card-like numbers.
///
/// Strips non-digits; rejects fewer than 12 remaining digits (too short
/// to be a card number). Doubles every digit whose index has the same
/// parity as the sequence length, folds results over 9 by subtracting 9,
/// and accepts iff the digit sum is divisible by 10.
pub fn luhn_valid(input: &str) -> bool {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 12 {
        return false;
    }
    let parity = digits.len() % 2;
    let mut checksum = 0;
    for (i, &digit) in digits.iter().enumerate() {
        let mut digit = digit;
        if i % 2 == parity {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        checksum += digit;
    }
    checksum % 10 == 0
}

/// 9-digit national-ID (Canadian SIN) check-digit validation.
///
/// Rejects unless exactly 9 digits remain after stripping non-digits.
/// The last digit is the check digit: every second of the first 8 digits
/// (even 1-indexed positions) is doubled and folded by the subtract-9
/// rule, the rest are taken as-is; accepts iff
/// `(10 - sum mod 10) mod 10` equals the check digit.
pub fn sin_valid(input: &str) -> bool {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 9 {
        return false;
    }
    let mut total = 0;
    for (idx, &digit) in digits[..8].iter().enumerate() {
        if (idx + 1) % 2 == 0 {
            let doubled = digit * 2;
            total += if doubled < 10 { doubled } else { doubled - 9 };
        } else {
            total += digit;
        }
    }
    let check_digit = (10 - total % 10) % 10;
    check_digit == digits[8]
}

/// Run both validators against a value's digits.
///
/// Mirrors the escalation rule: a value whose digits form a Luhn-valid
/// sequence of at least 12 is a card number; exactly 9 digits passing the
/// SIN check is a national ID. Card is checked first.
pub fn detect(value: &str) -> Option<ChecksumKind> {
    if luhn_valid(value) {
        return Some(ChecksumKind::CardNumber);
    }
    if sin_valid(value) {
        return Some(ChecksumKind::Sin);
    }
    None
}
