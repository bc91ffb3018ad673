//! Decimal value generators for money and hour columns.

use rand::Rng;
use rust_decimal::Decimal;

/// Uniform amount in `[min, max]` whole units, with cents.
pub fn money<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> Decimal {
    let cents = rng.random_range(min * 100..=max * 100);
    Decimal::new(cents, 2)
}

/// `amount` times a uniform percentage in `[min_pct, max_pct]`, rounded to
/// cents.
pub fn percent_of<R: Rng + ?Sized>(
    rng: &mut R,
    amount: Decimal,
    min_pct: u32,
    max_pct: u32,
) -> Decimal {
    let pct = rng.random_range(min_pct..=max_pct);
    (amount * Decimal::new(i64::from(pct), 2)).round_dp(2)
}

/// Uniform value in `[min, max]` with one decimal place.
pub fn tenths<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> Decimal {
    Decimal::new(rng.random_range(min * 10..=max * 10), 1)
}
