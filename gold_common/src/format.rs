//! Price and change-indicator text.

use crate::quote::Quote;

/// Shown instead of a zero price.
pub const PRICE_PLACEHOLDER: &str = "-";
/// Currency suffix appended to prices.
pub const CURRENCY_SUFFIX: &str = "원";
/// Arrow for non-negative changes.
pub const UP_ARROW: char = '▲';
/// Arrow for negative changes.
pub const DOWN_ARROW: char = '▼';

/// Direction of a change, used to pick the indicator color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Zero or positive change.
    Up,
    /// Negative change.
    Down,
}

/// Rendered change indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDisplay {
    /// `"{rate} {arrow} {diff}"`.
    pub text: String,
    /// Color token.
    pub direction: Direction,
}

/// Group digits in threes with commas: `-1234567` -> `-1,234,567`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `0` renders as the placeholder dash, anything else as `1,234원`.
pub fn format_price(price: u64) -> String {
    if price == 0 {
        return PRICE_PLACEHOLDER.to_string();
    }
    let price = i64::try_from(price).unwrap_or(i64::MAX);
    format!("{}{}", group_thousands(price), CURRENCY_SUFFIX)
}

/// Build the change indicator from a rate text (`"-1.2%"`) and a diff text (`"-1,500"`).
///
/// The diff decides the direction when it parses; otherwise a `-` anywhere in the rate
/// means down and the diff is shown verbatim.
pub fn change_display(rate: &str, diff: &str) -> ChangeDisplay {
    let (direction, diff_display) = match diff.replace(',', "").trim().parse::<i64>() {
        Ok(n) if n < 0 => (Direction::Down, group_thousands(n.saturating_abs())),
        Ok(n) => (Direction::Up, group_thousands(n)),
        Err(_) if rate.contains('-') => (Direction::Down, diff.to_string()),
        Err(_) => (Direction::Up, diff.to_string()),
    };
    let arrow = match direction {
        Direction::Up => UP_ARROW,
        Direction::Down => DOWN_ARROW,
    };
    ChangeDisplay {
        text: format!("{rate} {arrow} {diff_display}"),
        direction,
    }
}

/// Change indicator for a fetched quote.
pub fn quote_change(quote: &Quote) -> ChangeDisplay {
    change_display(
        &format!("{}%", quote.change_rate),
        &group_thousands(quote.change_amount),
    )
}
