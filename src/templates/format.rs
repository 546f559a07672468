// pt-BR display helpers.
use chrono::NaiveDateTime;

pub fn date_br(ts: &NaiveDateTime) -> String {
    ts.format("%d/%m/%Y").to_string()
}

pub fn opt_date_br(ts: Option<&NaiveDateTime>) -> String {
    ts.map(date_br).unwrap_or_else(|| "N/A".to_string())
}

/// `1234567.5` with 2 decimals -> `1.234.567,50`.
pub fn decimal_br(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped},{f}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn currency_br(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("R$ {}", decimal_br(v, 2)),
        None => "R$ -".to_string(),
    }
}

pub fn area_m2(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}m²", decimal_br(v, 0)),
        Some(v) => format!("{}m²", decimal_br(v, 2)),
        None => "-m²".to_string(),
    }
}

pub fn megabytes(bytes: usize) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}
