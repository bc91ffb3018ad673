//! Email addresses and phone numbers.

use super::names::PersonName;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Mobile network prefixes used for generated phone numbers.
pub const MOBILE_PREFIXES: &[&str] = &[
    "130", "131", "132", "133", "135", "136", "137", "138", "139", "150", "151", "152", "155",
    "156", "157", "158", "159", "166", "176", "177", "178", "180", "181", "182", "185", "186",
    "187", "188", "189", "199",
];

/// Build `{given}.{surname}{index}{NN}@{domain}`.
///
/// Uniqueness is left to the `employees.email` constraint.
pub fn email<R: Rng + ?Sized>(name: &PersonName, index: u64, domain: &str, rng: &mut R) -> String {
    let suffix: u32 = rng.random_range(0..100);
    format!(
        "{}.{}{}{:02}@{}",
        name.given_latin, name.surname_latin, index, suffix, domain
    )
}

/// Eleven-digit mobile number.
pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = MOBILE_PREFIXES.choose(rng).copied().unwrap_or("138");
    let line: u32 = rng.random_range(0..100_000_000);
    format!("{prefix}{line:08}")
}
