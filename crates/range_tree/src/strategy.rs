//! Aggregation strategies for [`RangeTree`](crate::RangeTree).

/// An idempotent selection over `i64` that commutes with uniform addition.
///
/// `select` must be associative and commutative, and `outlier()` must be its
/// identity: `select(x, outlier()) == x` for every `x`. Range updates add the
/// same delta to a whole subtree, so `select(a + d, b + d) == select(a, b) + d`
/// is also required.
pub trait Selector {
    fn select(a: i64, b: i64) -> i64;

    /// Value standing in for a subtree that lies outside the queried range.
    fn outlier() -> i64;
}

/// Range minimum.
#[derive(Clone, Copy, Debug)]
pub enum MinStrategy {}

impl Selector for MinStrategy {
    #[inline(always)]
    fn select(a: i64, b: i64) -> i64 {
        a.min(b)
    }

    #[inline(always)]
    fn outlier() -> i64 {
        i64::MAX
    }
}

/// Range maximum.
#[derive(Clone, Copy, Debug)]
pub enum MaxStrategy {}

impl Selector for MaxStrategy {
    #[inline(always)]
    fn select(a: i64, b: i64) -> i64 {
        a.max(b)
    }

    #[inline(always)]
    fn outlier() -> i64 {
        i64::MIN
    }
}
