use std::marker::PhantomData;
use std::ops::RangeBounds;

use crate::error::RangeTreeError;
use crate::strategy::Selector;
use crate::util::{half_open, left_child, right_child, tree_size};

/// Range min/max tree with lazy range addition.
///
/// Nodes live in a flat array in heap order: node `i` covers `[lo, hi]`, its
/// children are `2i + 1` covering `[lo, mid]` and `2i + 2` covering
/// `[mid + 1, hi]`, with `mid = (lo + hi) / 2`. The root is node `0` covering
/// `[0, len - 1]`.
///
/// `nodes[i]` is always the true aggregate of its range once all ancestors
/// of `i` have been pushed. `lazy[i]` is a delta already folded into
/// `nodes[i]` but not yet handed to its children. For every internal node,
/// `nodes[i] == select(nodes[2i + 1], nodes[2i + 2]) + lazy[i]`. Leaves never
/// carry a lazy delta.
#[derive(Clone, Debug)]
pub struct RangeTree<S> {
    len: usize,
    nodes: Vec<i64>,
    lazy: Vec<i64>,
    _strategy: PhantomData<fn() -> S>,
}

impl<S: Selector> RangeTree<S> {
    /// Builds a tree over a copy of `values`.
    ///
    /// # Errors
    ///
    /// [`RangeTreeError::EmptyInput`] if `values` is empty.
    pub fn new(values: &[i64]) -> Result<Self, RangeTreeError> {
        if values.is_empty() {
            return Err(RangeTreeError::EmptyInput);
        }

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("range_tree_build", len = values.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let len = values.len();
        let size = tree_size(len);
        let mut tree = Self {
            len,
            nodes: vec![0; size],
            lazy: vec![0; size],
            _strategy: PhantomData,
        };
        tree.build(0, 0, len - 1, values);
        Ok(tree)
    }

    /// Number of elements the tree was built over.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Aggregate over the inclusive range `[left, right]`.
    ///
    /// # Errors
    ///
    /// [`RangeTreeError::InvalidRange`] if `left > right` or `right >= len`.
    pub fn query(&mut self, left: usize, right: usize) -> Result<i64, RangeTreeError> {
        self.check_range(left, right)?;
        Ok(self.fold(0, 0, self.len - 1, left, right))
    }

    /// Current value at `index`.
    pub fn get(&mut self, index: usize) -> Result<i64, RangeTreeError> {
        self.query(index, index)
    }

    /// [`query`](Self::query) over any Rust range, e.g. `2..5` or `..`.
    pub fn query_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<i64, RangeTreeError> {
        let (start, end) = half_open(&range, self.len);
        // An empty range turns into `left > right` (or `right == usize::MAX`).
        self.query(start, end.wrapping_sub(1))
    }

    /// Adds `delta` to every element in the inclusive range `[left, right]`.
    ///
    /// # Errors
    ///
    /// [`RangeTreeError::InvalidRange`] if `left > right` or `right >= len`.
    /// The tree is left untouched in that case.
    pub fn update(&mut self, delta: i64, left: usize, right: usize) -> Result<(), RangeTreeError> {
        self.check_range(left, right)?;

        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("range_tree_update", delta, left, right);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        self.add(0, 0, self.len - 1, left, right, delta);
        Ok(())
    }

    /// [`update`](Self::update) over any Rust range.
    pub fn update_range<R: RangeBounds<usize>>(
        &mut self,
        delta: i64,
        range: R,
    ) -> Result<(), RangeTreeError> {
        let (start, end) = half_open(&range, self.len);
        self.update(delta, start, end.wrapping_sub(1))
    }

    /// Current value of every element, in order. Pushes all pending deltas.
    pub fn to_vec(&mut self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len);
        self.collect(0, 0, self.len - 1, &mut out);
        out
    }

    fn check_range(&self, left: usize, right: usize) -> Result<(), RangeTreeError> {
        if left > right || right >= self.len {
            #[cfg(feature = "tracing")]
            tracing::debug!(left, right, len = self.len, "rejected range");
            return Err(RangeTreeError::InvalidRange {
                left,
                right,
                len: self.len,
            });
        }
        Ok(())
    }

    fn build(&mut self, node: usize, lo: usize, hi: usize, values: &[i64]) {
        if lo == hi {
            self.nodes[node] = values[lo];
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let (l, r) = (left_child(node), right_child(node));
        self.build(l, lo, mid, values);
        self.build(r, mid + 1, hi, values);
        self.nodes[node] = S::select(self.nodes[l], self.nodes[r]);
    }

    /// Pending deltas may overflow on their own while every element stays in
    /// range, so both slots wrap; the result is exact once the values fit.
    #[inline(always)]
    fn apply(&mut self, node: usize, delta: i64, is_leaf: bool) {
        self.nodes[node] = self.nodes[node].wrapping_add(delta);
        if !is_leaf {
            self.lazy[node] = self.lazy[node].wrapping_add(delta);
        }
    }

    /// Hands the pending delta of `node` (covering `[lo, hi]`) to its children.
    fn push(&mut self, node: usize, lo: usize, hi: usize) {
        if lo == hi {
            return;
        }
        let delta = std::mem::take(&mut self.lazy[node]);
        if delta == 0 {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.apply(left_child(node), delta, lo == mid);
        self.apply(right_child(node), delta, mid + 1 == hi);
    }

    fn fold(&mut self, node: usize, lo: usize, hi: usize, left: usize, right: usize) -> i64 {
        self.push(node, lo, hi);
        if hi < left || right < lo {
            return S::outlier();
        }
        if left <= lo && hi <= right {
            return self.nodes[node];
        }
        let mid = lo + (hi - lo) / 2;
        S::select(
            self.fold(left_child(node), lo, mid, left, right),
            self.fold(right_child(node), mid + 1, hi, left, right),
        )
    }

    fn add(&mut self, node: usize, lo: usize, hi: usize, left: usize, right: usize, delta: i64) {
        self.push(node, lo, hi);
        if hi < left || right < lo {
            return;
        }
        if left <= lo && hi <= right {
            self.apply(node, delta, lo == hi);
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let (l, r) = (left_child(node), right_child(node));
        self.add(l, lo, mid, left, right, delta);
        self.add(r, mid + 1, hi, left, right, delta);
        self.nodes[node] = S::select(self.nodes[l], self.nodes[r]);
    }

    fn collect(&mut self, node: usize, lo: usize, hi: usize, out: &mut Vec<i64>) {
        if lo == hi {
            out.push(self.nodes[node]);
            return;
        }
        self.push(node, lo, hi);
        let mid = lo + (hi - lo) / 2;
        self.collect(left_child(node), lo, mid, out);
        self.collect(right_child(node), mid + 1, hi, out);
    }

    /// Checks the node/lazy invariants over the whole tree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.nodes.len(), tree_size(self.len));
        assert_eq!(self.lazy.len(), tree_size(self.len));
        self.assert_node(0, 0, self.len - 1);
    }

    #[cfg(test)]
    fn assert_node(&self, node: usize, lo: usize, hi: usize) {
        if lo == hi {
            assert_eq!(self.lazy[node], 0, "leaf {node} carries a lazy delta");
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let (l, r) = (left_child(node), right_child(node));
        assert_eq!(
            self.nodes[node],
            S::select(self.nodes[l], self.nodes[r]).wrapping_add(self.lazy[node]),
            "node {node} covering [{lo}, {hi}]"
        );
        self.assert_node(l, lo, mid);
        self.assert_node(r, mid + 1, hi);
    }
}

#[cfg(test)]
mod tests {
    use super::RangeTree;
    use crate::error::RangeTreeError;
    use crate::strategy::{MaxStrategy, MinStrategy};

    #[test]
    fn updates_stay_lazy_below_covered_nodes() {
        let mut tree = RangeTree::<MinStrategy>::new(&[4, 8, 15, 16, 23, 42, 7, 9]).unwrap();
        tree.update(10, 0, 7).unwrap();
        // Only the root is touched.
        assert_eq!(tree.nodes[0], 14);
        assert_eq!(tree.lazy[0], 10);
        assert!(tree.lazy[1..].iter().all(|&d| d == 0));
        tree.assert_consistent();

        assert_eq!(tree.query(3, 3).unwrap(), 26);
        assert_eq!(tree.lazy[0], 0);
        tree.assert_consistent();
    }

    #[test]
    fn stacked_pending_deltas_may_exceed_i64() {
        let mut tree = RangeTree::<MinStrategy>::new(&[i64::MIN; 4]).unwrap();
        tree.update(i64::MAX, 0, 3).unwrap();
        tree.update(1, 0, 3).unwrap();
        tree.update(1, 0, 3).unwrap();
        assert_eq!(tree.query(0, 3), Ok(1));
        tree.assert_consistent();

        let values = [i64::MAX, i64::MAX - 1, i64::MAX, i64::MAX - 2];
        let mut tree = RangeTree::<MaxStrategy>::new(&values).unwrap();
        tree.update(i64::MIN, 0, 3).unwrap();
        tree.update(-1, 0, 3).unwrap();
        tree.update(5, 0, 3).unwrap();
        assert_eq!(tree.query(0, 3), Ok(3));
        assert_eq!(tree.to_vec(), vec![3, 2, 3, 1]);
        tree.assert_consistent();
    }

    #[test]
    fn padding_slots_stay_clean() {
        let values = [3, -1, 4, 1, 5];
        let mut tree = RangeTree::<MaxStrategy>::new(&values).unwrap();
        for (delta, l, r) in [(2, 0, 4), (-3, 1, 3), (7, 4, 4), (1, 0, 2)] {
            tree.update(delta, l, r).unwrap();
            tree.assert_consistent();
        }
        assert_eq!(tree.to_vec(), vec![6, -1, 4, 0, 14]);
        tree.assert_consistent();
        assert!(tree.lazy.iter().all(|&d| d == 0));
    }

    #[test]
    fn rejected_update_leaves_tree_untouched() {
        let mut tree = RangeTree::<MinStrategy>::new(&[5, 6, 7]).unwrap();
        tree.update(1, 0, 1).unwrap();
        let nodes = tree.nodes.clone();
        let lazy = tree.lazy.clone();

        assert_eq!(
            tree.update(100, 2, 3),
            Err(RangeTreeError::InvalidRange {
                left: 2,
                right: 3,
                len: 3
            })
        );
        assert_eq!(tree.nodes, nodes);
        assert_eq!(tree.lazy, lazy);
        assert_eq!(tree.query(0, 2).unwrap(), 6);
    }

    #[test]
    fn range_syntax_matches_inclusive_calls() {
        let mut tree = RangeTree::<MinStrategy>::new(&[9, 3, 7, 1, 8, 2]).unwrap();
        assert_eq!(tree.query_range(..).unwrap(), 1);
        assert_eq!(tree.query_range(0..3).unwrap(), 3);
        assert_eq!(tree.query_range(4..=5).unwrap(), 2);
        assert_eq!(tree.query_range(4..).unwrap(), 2);

        tree.update_range(10, ..4).unwrap();
        assert_eq!(tree.to_vec(), vec![19, 13, 17, 11, 8, 2]);

        assert!(tree.query_range(3..3).is_err());
        assert!(tree.query_range(..0).is_err());
        assert!(tree.query_range(0..7).is_err());
        assert!(tree.update_range(1, 6..).is_err());
        assert_eq!(tree.to_vec(), vec![19, 13, 17, 11, 8, 2]);
    }
}
