//! Number formatting for reports.

/// Formats with `,` thousands separators. With zero decimals the value is
/// truncated toward zero, not rounded. NaN renders as `N/A`.
pub fn format_number(value: f64, decimals: usize, suffix: &str) -> String {
    if value.is_nan() {
        return "N/A".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let mut formatted = if decimals == 0 {
        group_thousands(&format!("{}", value.trunc() as i64))
    } else {
        let fixed = format!("{:.*}", decimals, value);
        match fixed.split_once('.') {
            Some((int_part, frac)) => format!("{}.{}", group_thousands(int_part), frac),
            None => group_thousands(&fixed),
        }
    };

    if !suffix.is_empty() {
        formatted.push(' ');
        formatted.push_str(suffix);
    }
    formatted
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "N/A".to_string();
    }
    format!("{}%", format_number(value, decimals, ""))
}

pub fn format_tonnes(kg: f64, decimals: usize) -> String {
    format_number(kg / 1000.0, decimals, "tonnes")
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{}{}", sign, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567.89, 0, ""), "1,234,567");
        assert_eq!(format_number(1234567.891, 2, "kg"), "1,234,567.89 kg");
        assert_eq!(format_number(999.0, 0, ""), "999");
        assert_eq!(format_number(-1500.4, 1, ""), "-1,500.4");
        assert_eq!(format_number(-0.7, 0, ""), "0");
        assert_eq!(format_number(f64::NAN, 2, "kg"), "N/A");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(12.345, 1), "12.3%");
        assert_eq!(format_percentage(-10.0, 1), "-10.0%");
        assert_eq!(format_percentage(1520.0, 1), "1,520.0%");
        assert_eq!(format_percentage(f64::NAN, 1), "N/A");
    }

    #[test]
    fn test_format_tonnes() {
        assert_eq!(format_tonnes(36656.0, 1), "36.7 tonnes");
    }
}
