/// Monetary amounts are IEEE doubles, matching the arithmetic the calculator
/// has always been checked against (2.5 * 30 = 75.00).
pub type Money = f64;

/// Whole-unit counts (canisters).
pub type Count = i64;

/// Parse the longest leading floating-point number in `input`, falling back to
/// `default` when nothing parses or the value is not finite.
///
/// Thousands separators are stripped first and leading whitespace is ignored,
/// so `"1,234.5kg"` -> 1234.5 and `"abc"` -> `default`.
pub fn parse_float_or(input: Option<&str>, default: Money) -> Money {
    let Some(input) = input else {
        return default;
    };
    let cleaned = input.replace(',', "");
    let text = cleaned.trim_start();
    let len = float_prefix_len(text);
    if len == 0 {
        return default;
    }
    match text[..len].parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => default,
    }
}

/// Parse the longest leading base-10 integer in `input`, falling back to
/// `default` when nothing parses or the value does not fit in a [`Count`].
///
/// Example: "1,200" -> 1200, "12.9" -> 12, "1e5" -> 1
pub fn parse_int_or(input: Option<&str>, default: Count) -> Count {
    let Some(input) = input else {
        return default;
    };
    let cleaned = input.replace(',', "");
    let text = cleaned.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return default;
    }
    text[..end].parse::<Count>().unwrap_or(default)
}

/// Coerce optional text into a float, zero on any failure.
pub fn safe_float(input: Option<&str>) -> Money {
    parse_float_or(input, 0.0)
}

/// Coerce optional text into an integer, zero on any failure.
pub fn safe_int(input: Option<&str>) -> Count {
    parse_int_or(input, 0)
}

/// Length of the leading `[+-]digits[.digits][(e|E)[+-]digits]` run.
/// Returns 0 when no mantissa digit is present.
fn float_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            mantissa_digits += 1;
        }
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    // Exponent only counts when it carries at least one digit ("5e" parses as 5).
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    end
}

/// Format money with two decimals and thousands separators.
/// Example: 1234.5 -> "1,234.50", -50.0 -> "-50.00"
pub fn format_money(amount: Money) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    let formatted = format!("{:.2}", amount.abs());
    let (units, decimals) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if amount < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, group_thousands(units), decimals)
}

/// Format a count with thousands separators.
/// Example: 12000 -> "12,000"
pub fn format_count(count: Count) -> String {
    let sign = if count < 0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(&count.unsigned_abs().to_string()))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_float_defaults_to_zero() {
        assert_eq!(safe_float(None), 0.0);
        assert_eq!(safe_float(Some("")), 0.0);
        assert_eq!(safe_float(Some("   ")), 0.0);
        assert_eq!(safe_float(Some("abc")), 0.0);
        assert_eq!(safe_float(Some("-")), 0.0);
        assert_eq!(safe_float(Some(".")), 0.0);
        assert_eq!(safe_float(Some("Infinity")), 0.0);
        assert_eq!(safe_float(Some("1e400")), 0.0);
    }

    #[test]
    fn test_safe_float_parses() {
        assert_eq!(safe_float(Some("1,234")), 1234.0);
        assert_eq!(safe_float(Some("2.5")), 2.5);
        assert_eq!(safe_float(Some(" 42")), 42.0);
        assert_eq!(safe_float(Some("-3.75")), -3.75);
        assert_eq!(safe_float(Some(".5")), 0.5);
        assert_eq!(safe_float(Some("5.")), 5.0);
        assert_eq!(safe_float(Some("1e3")), 1000.0);
        assert_eq!(safe_float(Some("5e")), 5.0);
        assert_eq!(safe_float(Some("12abc")), 12.0);
        assert_eq!(safe_float(Some("1,000,000.25")), 1_000_000.25);
    }

    #[test]
    fn test_safe_int_defaults_to_zero() {
        assert_eq!(safe_int(None), 0);
        assert_eq!(safe_int(Some("")), 0);
        assert_eq!(safe_int(Some("abc")), 0);
        assert_eq!(safe_int(Some("+")), 0);
        assert_eq!(safe_int(Some(".5")), 0);
        assert_eq!(safe_int(Some("99999999999999999999")), 0);
    }

    #[test]
    fn test_safe_int_parses() {
        assert_eq!(safe_int(Some("1,234")), 1234);
        assert_eq!(safe_int(Some("12.9")), 12);
        assert_eq!(safe_int(Some("1e5")), 1);
        assert_eq!(safe_int(Some("  -7 cans")), -7);
        assert_eq!(safe_int(Some("+8")), 8);
    }

    #[test]
    fn test_explicit_defaults() {
        assert_eq!(parse_float_or(Some("n/a"), 1.5), 1.5);
        assert_eq!(parse_int_or(None, 3), 3);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(75.0), "75.00");
        assert_eq!(format_money(1234.5), "1,234.50");
        assert_eq!(format_money(-50.0), "-50.00");
        assert_eq!(format_money(1_000_000.0), "1,000,000.00");
        assert_eq!(format_money(-0.001), "0.00");
        assert_eq!(format_money(f64::INFINITY), "inf");
        assert_eq!(format_money(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_money(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(12000), "12,000");
        assert_eq!(format_count(-1500), "-1,500");
    }
}
