/// Format a money amount with two decimal places and thousands separators
pub fn format_money(value: f64, currency_symbol: &str) -> String {
    // Display-only rounding; avoid "-0.00" for float residue
    let value = if value.abs() < 0.005 { 0.0 } else { value };
    let rounded = format!("{:.2}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let grouped = group_digits(whole);

    if value < 0.0 {
        format!("-{currency_symbol}{grouped}.{frac}")
    } else {
        format!("{currency_symbol}{grouped}.{frac}")
    }
}

/// Insert thousands separators into a string of ASCII digits
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

/// Format an annual rate, trimming a trailing ".00"
pub fn format_rate(rate: f64) -> String {
    let formatted = format!("{rate:.2}");
    match formatted.strip_suffix(".00") {
        Some(whole) => format!("{whole}%"),
        None => format!("{formatted}%"),
    }
}

