use std::ops::{Bound, RangeBounds};

/// Number of slots in the implicit heap layout for `n` leaves:
/// `2 * 2^ceil(log2(n)) - 1`.
///
/// `tree_size(0)` is `1`, but a tree is never built for zero leaves.
#[inline]
pub fn tree_size(n: usize) -> usize {
    2 * n.next_power_of_two() - 1
}

#[inline(always)]
pub(crate) fn left_child(node: usize) -> usize {
    2 * node + 1
}

#[inline(always)]
pub(crate) fn right_child(node: usize) -> usize {
    2 * node + 2
}

/// Converts Rust range bounds into a half-open `(start, end)` pair.
///
/// Saturates instead of overflowing; the result may be empty or exceed `len`.
pub(crate) fn half_open<R: RangeBounds<usize>>(range: &R, len: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&l) => l,
        Bound::Excluded(&l) => l.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&r) => r.saturating_add(1),
        Bound::Excluded(&r) => r,
        Bound::Unbounded => len,
    };
    (start, end)
}
