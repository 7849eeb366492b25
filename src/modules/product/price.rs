use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use serde::{ser, Serializer};
use std::str::FromStr;

/// Largest number of significant digits accepted in an amount.
pub const MAX_DIGITS: usize = 38;

/// Plain `[+-]digits[.digits]` notation only. Exponents are refused so the
/// resulting scale stays bounded.
fn is_plain_decimal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(&['-', '+'][..]).unwrap_or(raw);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((_, "")) => return false,
        Some(parts) => parts,
        None => (unsigned, ""),
    };

    !whole.is_empty()
        && whole.len() + fraction.len() <= MAX_DIGITS
        && whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit())
}

/// Parses a decimal amount, yielding `None` for blank, non-numeric or
/// out-of-range input.
pub fn parse(raw: &str) -> Option<BigDecimal> {
    let raw = raw.trim();

    if !is_plain_decimal(raw) {
        return None;
    }

    BigDecimal::from_str(raw).ok()
}

/// Like [`parse`], but only accepts amounts a product can be sold for.
pub fn parse_amount(raw: &str) -> Option<BigDecimal> {
    parse(raw).filter(|price| *price >= BigDecimal::zero())
}

/// Writes an amount as a JSON number: whole amounts as integers, the rest as
/// floats.
pub fn serialize<S: Serializer>(price: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
    if price.with_scale(0) == *price {
        if let Some(whole) = price.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }

    match price.to_f64() {
        Some(price) if price.is_finite() => serializer.serialize_f64(price),
        _ => Err(ser::Error::custom("price is not representable as a number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimals() {
        assert_eq!(parse("5"), Some(BigDecimal::from(5)));
        assert_eq!(parse(" 10.50 "), BigDecimal::from_str("10.5").ok());
        assert_eq!(parse("-3"), Some(BigDecimal::from(-3)));
    }

    #[test]
    fn drops_non_numeric_input() {
        assert_eq!(parse("abc"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("12abc"), None);
        assert_eq!(parse("."), None);
        assert_eq!(parse("-"), None);
        assert_eq!(parse("1.2.3"), None);
        assert_eq!(parse(".5"), None);
        assert_eq!(parse("7."), None);
    }

    #[test]
    fn refuses_exponents_and_oversized_amounts() {
        assert_eq!(parse("1e-100000000"), None);
        assert_eq!(parse("1E5"), None);
        assert_eq!(parse_amount("1e-100000000"), None);

        let widest = "9".repeat(MAX_DIGITS);
        assert!(parse(&widest).is_some());
        assert_eq!(parse(&format!("{}9", widest)), None);
        assert_eq!(parse(&format!("0.{}", "0".repeat(MAX_DIGITS))), None);
    }

    #[test]
    fn serializes_as_json_numbers() {
        let to_json = |raw: &str| {
            let price = parse(raw).unwrap();
            serialize(&price, serde_json::value::Serializer).unwrap()
        };

        assert_eq!(to_json("5"), serde_json::json!(5));
        assert_eq!(to_json("12.00"), serde_json::json!(12));
        assert_eq!(to_json("9.5"), serde_json::json!(9.5));
        assert_eq!(to_json("-3"), serde_json::json!(-3));
    }

    #[test]
    fn amounts_must_not_be_negative() {
        assert_eq!(parse_amount("0"), Some(BigDecimal::zero()));
        assert_eq!(parse_amount("-0.01"), None);
    }
}
