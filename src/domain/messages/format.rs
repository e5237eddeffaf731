//! Number formatting for user-facing text.

/// Whole rupees with thousands separators, e.g. `₹1,200,000`.
pub fn format_rupees(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}₹{}", sign, group_thousands(rounded.abs() as u64))
}

/// Rupees and paise, e.g. `₹37,195.71`.
pub fn format_rupees_paise(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}₹{}.{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Percentage with at most two decimals and no trailing zeros, e.g. `8.5`.
pub fn format_percent(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_thousands() {
        assert_eq!(format_rupees(0.0), "₹0");
        assert_eq!(format_rupees(999.0), "₹999");
        assert_eq!(format_rupees(1_000.0), "₹1,000");
        assert_eq!(format_rupees(1_200_000.4), "₹1,200,000");
    }

    #[test]
    fn paise_keep_two_digits() {
        assert_eq!(format_rupees_paise(37_195.7067), "₹37,195.71");
        assert_eq!(format_rupees_paise(5.0), "₹5.00");
    }

    #[test]
    fn percent_drops_trailing_zeros() {
        assert_eq!(format_percent(8.5), "8.5");
        assert_eq!(format_percent(10.0), "10");
        assert_eq!(format_percent(12.346), "12.35");
    }
}
