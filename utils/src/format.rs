//! Number formatting for human-facing metadata.

/// Render `n` with a comma every three digits, e.g. `1999000` -> `"1,999,000"`.
pub fn format_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole units and the first `places` fractional digits of `raw / unit`,
/// truncated, with thousands separators on the integer part.
pub fn format_units(raw: u128, unit: u128, places: u32) -> String {
    let unit = unit.max(1);
    let whole = format_thousands(raw / unit);
    if places == 0 {
        return whole;
    }
    let scale = 10u128.saturating_pow(places);
    let frac = (raw % unit).saturating_mul(scale) / unit;
    format!("{whole}.{frac:0width$}", width = places as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(999_999), "999,999");
        assert_eq!(format_thousands(1_999_000), "1,999,000");
    }

    #[test]
    fn thousands_max() {
        assert_eq!(
            format_thousands(u128::MAX),
            "340,282,366,920,938,463,463,374,607,431,768,211,455"
        );
    }

    #[test]
    fn units_with_fraction() {
        assert_eq!(format_units(1_234_500, 1_000, 2), "1,234.50");
        assert_eq!(format_units(5, 1_000, 3), "0.005");
        assert_eq!(format_units(7_000, 1_000, 0), "7");
    }
}
