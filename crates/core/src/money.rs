//! Monetary amounts.
//!
//! The database and the wire format hold integer cents. Floating point
//! only appears inside the pricing engine, and gets converted exactly
//! once at that boundary.

use crate::error::CoreError;

/// Largest amount we accept, in cents. Anything above this is a bug or
/// an attack, not a print job.
const MAX_CENTS: i64 = 1_000_000_000_00;

/// Convert a euro amount produced by the pricing engine into cents,
/// rounding half away from zero.
pub fn euros_to_cents(euros: f64) -> Result<i64, CoreError> {
    if !euros.is_finite() {
        return Err(CoreError::Validation(
            "amount is not a finite number".to_string(),
        ));
    }
    if euros < 0.0 {
        return Err(CoreError::Validation(format!(
            "amount must not be negative, got {euros}"
        )));
    }
    let cents = (euros * 100.0).round();
    if cents > MAX_CENTS as f64 {
        return Err(CoreError::Validation(format!(
            "amount {euros} exceeds the supported range"
        )));
    }
    Ok(cents as i64)
}

pub fn cents_to_euros(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Render cents as a plain decimal string, e.g. `4250` -> `"42.50"`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
