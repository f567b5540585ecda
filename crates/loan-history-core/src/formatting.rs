//! Currency and date presentation helpers.
//!
//! Currency formatting is pluggable through [`CurrencyFormatter`] so a front
//! end can substitute its own locale rules; [`DefaultCurrencyFormatter`]
//! covers the common cases.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Currency, Money};

/// Maximum fraction digits shown for an amount.
const MAX_FRACTION_DIGITS: u32 = 2;

/// Formats money amounts for display.
pub trait CurrencyFormatter {
    /// Amount with currency symbol, e.g. `₹15,00,000`.
    fn format(&self, amount: Money, currency: &Currency) -> String;
}

/// Symbol prefix plus grouped digits. INR uses lakh/crore grouping
/// (`12,34,567`), everything else groups by thousands.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCurrencyFormatter;

impl CurrencyFormatter for DefaultCurrencyFormatter {
    fn format(&self, amount: Money, currency: &Currency) -> String {
        format!("{}{}", currency.symbol(), group_amount(amount, currency))
    }
}

/// Format an amount without symbol, rounded to at most two fraction digits
/// with trailing zeros dropped.
pub fn group_amount(amount: Money, currency: &Currency) -> String {
    let rounded = amount
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let grouped = match currency {
        Currency::INR => group_indian(int_part),
        _ => group_thousands(int_part),
    };

    let mut out = String::with_capacity(grouped.len() + 4);
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, last_three) = digits.split_at(digits.len() - 3);
    let head_len = head.len();
    let mut out = String::with_capacity(digits.len() + head_len / 2 + 1);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head_len - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(last_three);
    out
}

/// Rate in percent with trailing zeros dropped (`8.50` → `8.5`).
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

/// Date as day, abbreviated month and four-digit year: `15 Jun 2024`.
pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_amount(dec!(1500000), &Currency::USD), "1,500,000");
        assert_eq!(group_amount(dec!(999), &Currency::USD), "999");
        assert_eq!(group_amount(dec!(1000), &Currency::USD), "1,000");
    }

    #[test]
    fn test_group_indian() {
        assert_eq!(group_amount(dec!(1500000), &Currency::INR), "15,00,000");
        assert_eq!(group_amount(dec!(12345678), &Currency::INR), "1,23,45,678");
        assert_eq!(group_amount(dec!(9500), &Currency::INR), "9,500");
        assert_eq!(group_amount(dec!(500), &Currency::INR), "500");
    }

    #[test]
    fn test_fraction_digits_trimmed_and_rounded() {
        assert_eq!(group_amount(dec!(10000.00), &Currency::INR), "10,000");
        assert_eq!(group_amount(dec!(9500.5), &Currency::INR), "9,500.5");
        assert_eq!(group_amount(dec!(1234.567), &Currency::USD), "1,234.57");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(group_amount(dec!(-1234.5), &Currency::USD), "-1,234.5");
    }

    #[test]
    fn test_default_formatter_prefixes_symbol() {
        let f = DefaultCurrencyFormatter;
        assert_eq!(f.format(dec!(250000), &Currency::INR), "₹2,50,000");
        assert_eq!(f.format(dec!(250000), &Currency::GBP), "£250,000");
    }

    #[test]
    fn test_format_event_date() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(format_event_date(d), "5 Jun 2024");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(8.50)), "8.5%");
        assert_eq!(format_percent(dec!(9)), "9%");
    }
}
