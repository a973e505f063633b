//! Combining many accumulators at once.
//!
//! Workers each own an accumulator over a disjoint slice of the data. Once
//! they are done, the partial results are folded with a pairwise reduction
//! tree: neighbours are merged level by level, so the original order of the
//! parts is preserved and the depth stays logarithmic in their number.

use alloc::vec::Vec;

use nalgebra::RealField;

use crate::{CovarianceError, StreamingCovariance};

impl<T: RealField + Copy> StreamingCovariance<T> {
    /// Merge every accumulator of `parts` into one.
    ///
    /// An empty input gives an empty accumulator. The first dimension
    /// mismatch encountered aborts the reduction.
    pub fn merge_all<I>(parts: I) -> Result<Self, CovarianceError>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut level: Vec<Self> = parts.into_iter().collect();
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            let mut pairs = level.into_iter();
            while let Some(mut left) = pairs.next() {
                if let Some(right) = pairs.next() {
                    left.merge(&right)?;
                }
                next.push(left);
            }
            level = next;
        }
        Ok(level.pop().unwrap_or_default())
    }
}
