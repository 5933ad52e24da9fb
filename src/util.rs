//! Small currency helpers shared by the prize and dues calculators.

/// Round to the nearest cent, halves away from zero.
///
/// The value is nudged by a relative epsilon first so that products such as
/// `1.005 * 100` (stored as `100.49999..`) round the way a person expects.
pub fn round_to_cents(amount: f64) -> f64 {
    if !amount.is_finite() {
        return amount;
    }
    let scaled = amount * 100.0;
    let nudged = scaled + scaled.signum() * scaled.abs().max(1.0) * 1e-12;
    nudged.round() / 100.0
}

/// Render an amount as `$1,234.56`; negatives as `-$5.00`.
pub fn format_currency(amount: f64) -> String {
    let rounded = round_to_cents(amount);
    let cents = (rounded.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}
