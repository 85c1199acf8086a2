//! Decoding of the ad-hoc exponent codes attached to the damage fields.
//!
//! The source log qualifies each raw damage value with a short code giving its
//! order of magnitude. The conventions accumulated over six decades of data
//! entry; the table below covers every code with an agreed meaning, and
//! everything else decodes to a null amount rather than an error.

/// Resolves an exponent code to its multiplier.
///
/// The table, case-insensitive where letters are involved:
/// digits `0`..`8` → ×10, `h` → ×100, `k` → ×1,000, `m` → ×1,000,000,
/// `b` → ×1,000,000,000, `+` → ×1. Anything else (empty string, `-`, `?`,
/// `9`, multi-character junk) is unrecognized and yields `None`; the caller
/// counts the anomaly and carries a null amount.
pub fn exponent_multiplier(code: &str) -> Option<f64> {
    let mut chars = code.trim().chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match first {
        '0'..='8' => Some(10.0),
        'h' | 'H' => Some(100.0),
        'k' | 'K' => Some(1_000.0),
        'm' | 'M' => Some(1_000_000.0),
        'b' | 'B' => Some(1_000_000_000.0),
        '+' => Some(1.0),
        _ => None,
    }
}

/// Decodes a raw (value, exponent-code) pair into an absolute currency
/// amount.
///
/// Returns `None` when the value is missing or negative or the code is
/// unrecognized. A null amount contributes zero to null-safe sums; the record
/// carrying it is never discarded for this reason alone.
pub fn decode_amount(value: Option<f64>, code: &str) -> Option<f64> {
    let value = value?;
    if value < 0.0 || !value.is_finite() {
        return None;
    }
    exponent_multiplier(code).map(|multiplier| value * multiplier)
}
