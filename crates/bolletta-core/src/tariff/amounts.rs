//! Number parsing and formatting for Italian contract text.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a contract number written with a decimal comma (e.g. "11,50").
///
/// The first comma is taken as the decimal separator and the longest
/// numeric prefix is parsed, so trailing text is ignored: "0,13089 €"
/// gives 0.13089 and "1.234,5" gives 1.234. Returns `None` when no digit
/// leads the input.
pub fn parse_decimal_comma(s: &str) -> Option<Decimal> {
    let normalized = s.trim_start().replacen(',', ".", 1);
    let prefix = numeric_prefix(&normalized)?;
    Decimal::from_str(&prefix).ok()
}

fn numeric_prefix(s: &str) -> Option<String> {
    let mut chars = s.chars().peekable();
    let mut prefix = String::new();

    match chars.peek() {
        Some('-') => {
            prefix.push('-');
            chars.next();
        }
        Some('+') => {
            chars.next();
        }
        _ => {}
    }

    let mut digits = 0;
    let mut seen_point = false;
    for c in chars {
        if c.is_ascii_digit() {
            digits += 1;
            prefix.push(c);
        } else if c == '.' && !seen_point {
            seen_point = true;
            prefix.push(c);
        } else {
            break;
        }
    }

    if digits == 0 {
        return None;
    }
    if prefix.ends_with('.') {
        prefix.pop();
    }
    if let Some(rest) = prefix.strip_prefix("-.") {
        prefix = format!("-0.{rest}");
    } else if prefix.starts_with('.') {
        prefix.insert(0, '0');
    }

    Some(prefix)
}

/// Format an amount in Italian style (1.234,56 €).
pub fn format_euro(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let s = format!("{:.2}", rounded.abs());
    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return format!("{s} €");
    };

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        formatted.push('-');
    }

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{formatted},{decimal_part} €")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_decimal_comma() {
        assert_eq!(parse_decimal_comma("11,50"), Some(dec("11.50")));
        assert_eq!(parse_decimal_comma("0,13089"), Some(dec("0.13089")));
        assert_eq!(parse_decimal_comma("6.00"), Some(dec("6.00")));
        assert_eq!(parse_decimal_comma("  42"), Some(dec("42")));
    }

    #[test]
    fn test_parse_takes_numeric_prefix() {
        assert_eq!(parse_decimal_comma("1.234,5"), Some(dec("1.234")));
        assert_eq!(parse_decimal_comma("0,05 €/kWh"), Some(dec("0.05")));
        assert_eq!(parse_decimal_comma(",5"), Some(dec("0.5")));
        assert_eq!(parse_decimal_comma("-3,5"), Some(dec("-3.5")));
        assert_eq!(parse_decimal_comma("12,"), Some(dec("12")));
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert_eq!(parse_decimal_comma(""), None);
        assert_eq!(parse_decimal_comma(","), None);
        assert_eq!(parse_decimal_comma("abc"), None);
        assert_eq!(parse_decimal_comma("-"), None);
    }

    #[test]
    fn test_format_euro() {
        assert_eq!(format_euro(dec("1234.56")), "1.234,56 €");
        assert_eq!(format_euro(dec("37.09")), "37,09 €");
        assert_eq!(format_euro(dec("17")), "17,00 €");
        assert_eq!(format_euro(dec("1234567.8")), "1.234.567,80 €");
        assert_eq!(format_euro(dec("-445.08")), "-445,08 €");
        assert_eq!(format_euro(Decimal::ZERO), "0,00 €");
    }
}
