//! Free-text quantity handling.
//!
//! Quantities are stored as user-facing strings (`"2"`, `"1.5"`,
//! `"6 left"`). Only the leading `\d+(\.\d+)?` is significant; anything
//! without a leading number reads as zero.

/// Byte length of the leading `\d+(\.\d+)?` in `text`, or 0 if none.
pub(crate) fn leading_number_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let int_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if int_len == 0 {
        return 0;
    }
    if bytes.get(int_len) == Some(&b'.') {
        let frac_len = bytes[int_len + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if frac_len > 0 {
            return int_len + 1 + frac_len;
        }
    }
    int_len
}

/// Parse the leading number of `text`, ignoring leading whitespace.
/// Returns `0.0` when there is none.
pub fn parse_quantity(text: &str) -> f64 {
    let text = text.trim_start();
    let len = leading_number_len(text);
    text[..len].parse().unwrap_or(0.0)
}

/// Shortest round-trippable rendering: `4.0` → `"4"`, `2.5` → `"2.5"`.
pub fn format_quantity(value: f64) -> String {
    // Adding zero folds -0.0 into 0.0.
    format!("{}", value + 0.0)
}

/// Add one unit. No upper bound.
pub fn step_up(quantity: &str) -> String {
    format_quantity(parse_quantity(quantity) + 1.0)
}

/// Remove one unit unless that would go below one; the quantity is then
/// returned unchanged.
pub fn step_down(quantity: &str) -> String {
    let current = parse_quantity(quantity);
    if current - 1.0 >= 1.0 {
        format_quantity(current - 1.0)
    } else {
        quantity.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leading_decimal() {
        assert_eq!(parse_quantity("6 left"), 6.0);
        assert_eq!(parse_quantity("  1.5 cups"), 1.5);
        assert_eq!(parse_quantity("2."), 2.0);
        assert_eq!(parse_quantity("12abc"), 12.0);
    }

    #[test]
    fn non_numeric_is_zero() {
        assert_eq!(parse_quantity("a pinch"), 0.0);
        assert_eq!(parse_quantity(""), 0.0);
        assert_eq!(parse_quantity(".5"), 0.0);
    }

    #[test]
    fn formats_without_trailing_zero() {
        assert_eq!(format_quantity(4.0), "4");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(-0.0), "0");
    }

    #[test]
    fn stepper_floors_at_one() {
        assert_eq!(step_down("1"), "1");
        assert_eq!(step_down("2"), "1");
        assert_eq!(step_down("1.5"), "1.5");
        assert_eq!(step_down("3.5"), "2.5");
    }

    #[test]
    fn stepper_has_no_ceiling() {
        assert_eq!(step_up("1"), "2");
        assert_eq!(step_up("99"), "100");
        assert_eq!(step_up("oops"), "1");
    }
}
