//! Escaping and number formatting for rendered pages.

/// Escapes text for use in HTML content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Groups an integer's digits in threes: `12345` becomes `12,345`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// US dollars, cents shown only when present: `$12,345` or `$12,345.50`.
pub fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round() as i64;
    let dollars = group_thousands(cents / 100);
    match (cents % 100).abs() {
        0 => format!("${dollars}"),
        rest => format!("${dollars}.{rest:02}"),
    }
}

/// Odometer reading with grouped digits.
pub fn format_miles(miles: i32) -> String {
    group_thousands(i64::from(miles))
}
