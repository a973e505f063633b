use core::fmt;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CovarianceError {
    /// An observation or another accumulator does not have the locked-in
    /// number of features. The accumulator is left untouched.
    DimensionMismatch { expected: usize, actual: usize },
}

impl fmt::Display for CovarianceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CovarianceError::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {} features, got {}",
                expected, actual
            ),
        }
    }
}

impl core::error::Error for CovarianceError {}
