/// Placeholder shown for statistics of an empty view.
pub const NOT_AVAILABLE: &str = "N/A";

/// `2450.0` → `"$2,450.00"`.
pub fn currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Two decimals, or [`NOT_AVAILABLE`] when there is nothing to average.
pub fn two_decimals(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `0.1234` → `"12.3%"`.
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
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
    fn currency_groups_thousands() {
        assert_eq!(currency(2450.0), "$2,450.00");
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency(999.999), "$1,000.00");
        assert_eq!(currency(1_234_567.5), "$1,234,567.50");
        assert_eq!(currency(-12.3), "-$12.30");
    }

    #[test]
    fn mean_placeholder() {
        assert_eq!(two_decimals(Some(4.2)), "4.20");
        assert_eq!(two_decimals(None), "N/A");
        assert_eq!(two_decimals(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(percent(0.5), "50.0%");
        assert_eq!(percent(1.0 / 3.0), "33.3%");
    }
}
