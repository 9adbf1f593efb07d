use rust_decimal::{Decimal, RoundingStrategy};

/// Currency prefix for every displayed amount.
pub const CURRENCY_SYMBOL: &str = "RM";

/// Inserts a comma between every group of three digits, counting from the
/// right. Expects ASCII digits only.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats an amount as whole Ringgit with thousands separators, e.g.
/// `RM 51,000`. Fractions are rounded half away from zero.
pub fn format_currency(amount: Decimal) -> String {
    let whole = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .trunc();
    let sign = if whole.is_sign_negative() && !whole.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{CURRENCY_SYMBOL} {}",
        group_thousands(&whole.abs().to_string())
    )
}

/// Formats a price range, e.g. `RM 51,000 - RM 64,000`.
pub fn format_range(
    min: Decimal,
    max: Decimal,
) -> String {
    format!("{} - {}", format_currency(min), format_currency(max))
}
