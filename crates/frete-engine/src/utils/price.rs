/// Rounds a monetary amount to cents, half away from zero.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// `max(base × rate, floor)`, rounded to cents.
pub fn percent_with_floor(base: f64, rate: f64, floor: f64) -> f64 {
    round_cents((base * rate).max(floor))
}

/// Sums already-rounded amounts and rounds the result again so that
/// binary noise from the addition never leaks past the cent.
pub fn sum_cents<I: IntoIterator<Item = f64>>(amounts: I) -> f64 {
    round_cents(amounts.into_iter().sum())
}
