//! Decimal truncation.
//!
//! Championship points are seconds divided by a distance divisor, cut off
//! (never rounded) at 3 decimals. The cut must happen in decimal text:
//! scaling floats (`(value * 1000.0).trunc() / 1000.0`) can push a value
//! that is conceptually `x.000` down to `x - 0.001` through binary
//! representation error, which corrupts rankings by a full point unit.

/// Truncates `value` to `decimals` fractional digits, toward zero.
///
/// Returns `None` for non-finite input. The value is formatted with two
/// guard digits and the text is sliced, so `149.999` stored as
/// `149.99899999…` still truncates to `149.999`.
pub fn truncate_decimals(value: f64, decimals: usize) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }

    let text = format!("{value:.prec$}", prec = decimals + 2);
    let cut = &text[..text.len() - 2];
    // The slice is always a valid decimal literal
    cut.parse().ok()
}
