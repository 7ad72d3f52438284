//! Formatting and HTML helpers shared by the core and the web layer

/// Format a number with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::new();
    let mut count = 0;
    for c in int_part.chars().rev() {
        if count == 3 {
            grouped.push(',');
            count = 0;
        }
        grouped.push(c);
        count += 1;
    }
    let int_grouped: String = grouped.chars().rev().collect();

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, int_grouped, f),
        None => format!("{}{}", sign, int_grouped),
    }
}

/// Format an amount with a currency symbol and fixed decimals, e.g. `₹1,250.00`
pub fn format_currency(amount: f64, symbol: &str, decimal_places: u32) -> String {
    let fixed = format!("{:.*}", decimal_places as usize, amount);
    match fixed.strip_prefix('-') {
        Some(abs) => format!("-{}{}", symbol, format_number(abs)),
        None => format!("{}{}", symbol, format_number(fixed)),
    }
}

/// Compact currency form without decimals, used in the sticky mobile summary
pub fn format_currency_compact(amount: f64, symbol: &str) -> String {
    format_currency(amount, symbol, 0)
}

/// Escape text for safe interpolation into HTML element content and attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
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

/// "1 transaction" / "3 transactions"
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
