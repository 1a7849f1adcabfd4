//! Small arithmetic helpers shared by the demand/supply functions and the
//! simulator: integer LCM over task periods, and ceiling/floor division on
//! nonnegative rationals.

/// LCM of a non-empty list of positive periods.
///
/// Periods are taken to be integral (any fractional part is a modeling error
/// upstream and is rounded away here); the hyperperiod itself is always an
/// integer number of ticks.
pub fn lcm(periods: &[f64]) -> u64 {
    assert!(!periods.is_empty(), "lcm requires a non-empty period list");

    periods
        .iter()
        .map(|p| {
            assert!(*p > 0.0, "periods must be positive");
            p.round() as u64
        })
        .fold(1u64, num::integer::lcm)
}

/// `ceil(a / b)` for `a >= 0`, `b > 0`.
pub fn ceil_div(a: f64, b: f64) -> f64 {
    (a / b).ceil()
}

/// `floor(a / b)` for `a >= 0`, `b > 0`.
pub fn floor_div(a: f64, b: f64) -> f64 {
    (a / b).floor()
}

#[test]
fn lcm_of_single_period() {
    assert_eq!(lcm(&[5.0]), 5);
}

#[test]
fn lcm_of_several_periods() {
    assert_eq!(lcm(&[5.0, 10.0]), 10);
    assert_eq!(lcm(&[4.0, 6.0, 10.0]), 60);
}

#[test]
fn ceil_and_floor_div() {
    assert_eq!(ceil_div(10.0, 3.0), 4.0);
    assert_eq!(floor_div(10.0, 3.0), 3.0);
    assert_eq!(ceil_div(9.0, 3.0), 3.0);
}

#[test]
#[should_panic]
fn lcm_rejects_empty() {
    lcm(&[]);
}
