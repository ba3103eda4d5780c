//! Display formatting for on-chain amounts.

use alloy::primitives::utils::format_units;
use alloy::primitives::U256;

const GWEI_DECIMALS: u8 = 9;

/// Format a wei amount in gwei with `decimals` fraction digits and
/// thousands separators, e.g. `1234567890000` → `"1,234.57"`.
///
/// `None` formats as `"0"`. If the amount cannot be converted, its plain
/// decimal form is returned unchanged.
pub fn parse_big_number(amount: Option<U256>, decimals: usize) -> String {
    let Some(amount) = amount else {
        return "0".to_string();
    };

    let gwei = match format_units(amount, GWEI_DECIMALS) {
        Ok(gwei) => gwei,
        Err(_) => return amount.to_string(),
    };
    match gwei.parse::<f64>() {
        Ok(value) => number_with_commas(&format!("{:.*}", decimals, value)),
        Err(_) => amount.to_string(),
    }
}

/// Insert `,` every three digits of the integer part.
pub fn number_with_commas(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_with_commas() {
        assert_eq!(number_with_commas("0"), "0");
        assert_eq!(number_with_commas("999"), "999");
        assert_eq!(number_with_commas("1000"), "1,000");
        assert_eq!(number_with_commas("1234567.891"), "1,234,567.891");
        assert_eq!(number_with_commas("-1234.5"), "-1,234.5");
        assert_eq!(number_with_commas("0.123456"), "0.123456");
    }

    #[test]
    fn test_parse_big_number() {
        assert_eq!(parse_big_number(None, 2), "0");
        assert_eq!(parse_big_number(Some(U256::ZERO), 2), "0.00");
        // 25 gwei
        assert_eq!(parse_big_number(Some(U256::from(25_000_000_000u64)), 2), "25.00");
        // 1,234.5678 gwei
        assert_eq!(parse_big_number(Some(U256::from(1_234_567_800_000u64)), 2), "1,234.57");
        assert_eq!(parse_big_number(Some(U256::from(1_234_567_800_000u64)), 0), "1,235");
    }
}
