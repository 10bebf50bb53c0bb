/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Cleaned text, or `None` when nothing is left.
pub fn clean_opt(raw: &str) -> Option<String> {
    let s = clean_str(raw);
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Lenient numeric parse. NaN counts as missing.
pub fn parse_number(raw: &str) -> Option<f64> {
    clean_str(raw).parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Year as an integer; only finite whole numbers qualify (`"2021.0"` is 2021).
pub fn parse_year(raw: &str) -> Option<i32> {
    let v = parse_number(raw)?;
    if v.is_finite() && v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
        Some(v as i32)
    } else {
        None
    }
}

/// Withdrawals never go missing: anything unparseable reads as zero.
pub fn parse_withdrawal(raw: &str) -> f64 {
    parse_number(raw).unwrap_or(0.0)
}
