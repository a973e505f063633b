use nalgebra::{DMatrix, DVector, Scalar};
#[cfg(feature = "std")]
use serde::Serialize;

/// Snapshot of everything an accumulator can report. Owns its data, so it
/// can be kept around after the accumulator keeps changing.
#[cfg_attr(feature = "std", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics<T: Scalar> {
    pub count: usize,
    pub mean: DVector<T>,
    pub covariance: DMatrix<T>,
    pub correlation: DMatrix<T>,
    /// diagonal of `covariance`
    pub variance: DVector<T>,
}

impl<T: Scalar> Statistics<T> {
    pub fn feature_count(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
