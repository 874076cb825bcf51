use std::ops::RangeInclusive;

use rand::Rng;
use rand::rngs::SmallRng;

/// Range for both addends at a grade. Unknown grades get a gentle [1,20].
pub fn addition_range(grade: u8) -> RangeInclusive<i64> {
    match grade {
        4 => 1..=100,
        5 => 10..=500,
        6 => 50..=999,
        7 | 8 => 100..=999,
        _ => 1..=20,
    }
}

/// Ranges for the two factors at a grade.
pub fn multiplication_ranges(grade: u8) -> (RangeInclusive<i64>, RangeInclusive<i64>) {
    match grade {
        4 => (1..=10, 1..=10),
        5 => (2..=12, 2..=12),
        6 => (3..=15, 3..=15),
        7 => (5..=20, 5..=20),
        8 => (10..=25, 10..=20),
        _ => (1..=10, 1..=10),
    }
}

pub fn addition_pair(grade: u8, rng: &mut SmallRng) -> (i64, i64) {
    let range = addition_range(grade);
    (rng.gen_range(range.clone()), rng.gen_range(range))
}

/// Same operands as addition. The minuend may be smaller than the
/// subtrahend, so answers can be negative.
pub fn subtraction_pair(grade: u8, rng: &mut SmallRng) -> (i64, i64) {
    addition_pair(grade, rng)
}

pub fn multiplication_pair(grade: u8, rng: &mut SmallRng) -> (i64, i64) {
    let (first, second) = multiplication_ranges(grade);
    (rng.gen_range(first), rng.gen_range(second))
}

/// Builds the division from a multiplication pair so the quotient is whole.
pub fn division_pair(grade: u8, rng: &mut SmallRng) -> (i64, i64) {
    let (multiplier, multiplicand) = multiplication_pair(grade, rng);
    division_from_factors(multiplier, multiplicand)
}

/// `(multiplier * multiplicand) / multiplier`, returned as (dividend, divisor).
pub fn division_from_factors(multiplier: i64, multiplicand: i64) -> (i64, i64) {
    (multiplier * multiplicand, multiplier)
}
