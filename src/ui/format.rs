use crate::domain::aggregate::Balance;

/// `₹1,234,567` style, rounded to whole rupees.
pub fn format_inr(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

pub fn balance_label(balance: Balance) -> &'static str {
    match balance {
        Balance::Pending => "Pending",
        Balance::Excess => "Excess",
        Balance::Settled => "Settled",
    }
}

pub fn balance_color(balance: Balance) -> &'static str {
    match balance {
        Balance::Pending => "#EF553B",
        Balance::Excess => "#00CC96",
        Balance::Settled => "#7f7f7f",
    }
}

/// Cell text for a table column: amounts get the currency format, labels pass through.
pub fn display_cell(column: &str, value: &str) -> String {
    if matches!(column, "Month" | "Wing" | "Vendor") {
        return value.to_string();
    }
    match value.parse::<f64>() {
        Ok(number) => format_inr(number),
        Err(_) => value.to_string(),
    }
}
