use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a tick unit renders its tick values as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickLabelFormat {
    /// Fixed decimals, optionally with `,` thousands grouping.
    Decimal { fraction_digits: u8, grouping: bool },
    /// `1.5E7` style mantissa/exponent.
    Scientific { mantissa_digits: u8 },
    /// Rounded to a whole number with `,` grouping.
    Integer,
    /// UTC timestamp in milliseconds rendered with a chrono pattern.
    Date { pattern: String },
    /// Integer index looked up in a symbol list; other values render empty.
    Symbol { symbols: Vec<String> },
}

impl TickLabelFormat {
    #[must_use]
    pub fn decimal(fraction_digits: u8) -> Self {
        Self::Decimal {
            fraction_digits,
            grouping: true,
        }
    }

    #[must_use]
    pub fn date(pattern: impl Into<String>) -> Self {
        Self::Date {
            pattern: pattern.into(),
        }
    }

    #[must_use]
    pub fn symbols(symbols: Vec<String>) -> Self {
        Self::Symbol { symbols }
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Decimal {
                fraction_digits,
                grouping,
            } => format_decimal(value, usize::from(*fraction_digits), *grouping),
            Self::Scientific { mantissa_digits } => {
                format_scientific(value, usize::from(*mantissa_digits))
            }
            Self::Integer => format_decimal(value.round(), 0, true),
            Self::Date { pattern } => format_date(value, pattern),
            Self::Symbol { symbols } => format_symbol(value, symbols),
        }
    }
}

impl Default for TickLabelFormat {
    fn default() -> Self {
        Self::decimal(0)
    }
}

fn format_decimal(value: f64, fraction_digits: usize, grouping: bool) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let mut text = format!("{value:.fraction_digits$}");
    // `-0.00` reads as noise on an axis.
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text.remove(0);
    }
    if !grouping {
        return text;
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

fn format_scientific(value: f64, mantissa_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    format!("{value:.mantissa_digits$E}")
}

fn format_date(millis: f64, pattern: &str) -> String {
    if !millis.is_finite() {
        return millis.to_string();
    }
    match DateTime::<Utc>::from_timestamp_millis(millis.round() as i64) {
        Some(time) => time.format(pattern).to_string(),
        None => format_decimal(millis, 0, false),
    }
}

fn format_symbol(value: f64, symbols: &[String]) -> String {
    let index = value.round();
    if (value - index).abs() > 1e-9 || index < 0.0 {
        return String::new();
    }
    symbols.get(index as usize).cloned().unwrap_or_default()
}
