use nalgebra::{DMatrix, DVector, RealField};

use crate::{CovarianceConfig, CovarianceError, Observations, Statistics};

pub(crate) fn from_count<T: RealField + Copy>(n: usize) -> T {
    nalgebra::convert::<f64, T>(n as f64)
}

/// Divide a covariance by the outer product of its standard deviations,
/// treating a zero standard deviation as 1.
fn normalize<T: RealField + Copy>(covariance: &DMatrix<T>) -> DMatrix<T> {
    let std_dev = covariance
        .diagonal()
        .map(|v| v.sqrt())
        .map(|s| if s == T::zero() { T::one() } else { s });
    let outer = &std_dev * std_dev.transpose();
    covariance.component_div(&outer)
}

/// Online estimator for the mean and covariance of p-component samples.
///
/// Keeps the running count, mean and scatter matrix (sum of outer products of
/// deviations, Welford's M2). Accumulators built over separate parts of a
/// data stream can be combined exactly with [`merge`](Self::merge).
#[derive(Debug, Clone, PartialEq)]
pub struct StreamingCovariance<T: RealField + Copy = f64> {
    count: usize,
    mean: DVector<T>,
    scatter: DMatrix<T>,
    config: CovarianceConfig,
}

impl<T: RealField + Copy> Default for StreamingCovariance<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RealField + Copy> StreamingCovariance<T> {
    /// Create a new, empty estimator. Dimensionality is taken from the first update.
    pub fn new() -> Self {
        Self::with_config(CovarianceConfig::default())
    }

    pub fn with_feature_count(feature_count: usize) -> Self {
        Self::with_config(CovarianceConfig {
            feature_count: Some(feature_count),
            ..Default::default()
        })
    }

    pub fn with_config(config: CovarianceConfig) -> Self {
        let feature_count = config.feature_count.unwrap_or(0);
        Self {
            count: 0,
            mean: DVector::zeros(feature_count),
            scatter: DMatrix::zeros(feature_count, feature_count),
            config,
        }
    }

    /// Zero the state and fix the dimensionality to `feature_count`.
    pub fn initialize(&mut self, feature_count: usize) {
        log_debug!("initializing accumulator with {} features", feature_count);
        self.count = 0;
        self.mean = DVector::zeros(feature_count);
        self.scatter = DMatrix::zeros(feature_count, feature_count);
    }

    /// Forget every observation, keeping the configuration.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn feature_count(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn mean(&self) -> &DVector<T> {
        &self.mean
    }

    /// Unnormalized scatter matrix.
    pub fn scatter(&self) -> &DMatrix<T> {
        &self.scatter
    }

    pub fn config(&self) -> &CovarianceConfig {
        &self.config
    }

    fn check_feature_count(&self, actual: usize) -> Result<(), CovarianceError> {
        let expected = self.feature_count();
        if expected != actual {
            log_warn!(
                "dimension mismatch: expected {} features, got {}",
                expected,
                actual
            );
            return Err(CovarianceError::DimensionMismatch { expected, actual });
        }
        Ok(())
    }

    /// Lock the dimensionality on the first observation, validate it afterwards.
    fn prepare(&mut self, feature_count: usize) -> Result<(), CovarianceError> {
        if self.count == 0 {
            self.initialize(feature_count);
            Ok(())
        } else {
            self.check_feature_count(feature_count)
        }
    }

    fn fold(&mut self, x: &DVector<T>) {
        self.count += 1;
        let n: T = from_count(self.count);

        let delta = x - &self.mean;
        // update mean
        self.mean += &delta / n;
        // deviation from the updated mean, not the old one
        let delta2 = x - &self.mean;
        self.scatter.ger(T::one(), &delta, &delta2, T::one());
    }

    /// Incorporate one new sample.
    pub fn update_single(&mut self, x: &DVector<T>) -> Result<(), CovarianceError> {
        self.prepare(x.len())?;
        self.fold(x);
        Ok(())
    }

    /// Incorporate every row of `data`, in order. Either all rows are applied
    /// or, on a dimension mismatch, none are.
    pub fn update_batch<'a>(
        &mut self,
        data: impl Into<Observations<'a, T>>,
    ) -> Result<Statistics<T>, CovarianceError> {
        let data = data.into();
        self.prepare(data.feature_count())?;
        for x in data.iter() {
            self.fold(&x);
        }
        Ok(self.statistics())
    }

    /// Incorporate rows one by one, stopping at the first row of the wrong width.
    pub fn update_rows<I>(&mut self, rows: I) -> Result<(), CovarianceError>
    where
        I: IntoIterator<Item = DVector<T>>,
    {
        for x in rows {
            self.update_single(&x)?;
        }
        Ok(())
    }

    /// `scatter / (count - ddof)`, with `ddof = 1` when `corrected`.
    ///
    /// Returns a 0x0 matrix when empty, and a NaN-filled matrix when there are
    /// not more samples than `ddof`.
    pub fn covariance(&self, corrected: bool) -> DMatrix<T> {
        let ddof = if corrected { 1 } else { 0 };
        if self.count == 0 {
            return DMatrix::zeros(0, 0);
        }
        if self.count <= ddof {
            let p = self.feature_count();
            return DMatrix::from_element(p, p, nalgebra::convert::<f64, T>(f64::NAN));
        }
        &self.scatter / from_count::<T>(self.count - ddof)
    }

    pub fn variance(&self, corrected: bool) -> DVector<T> {
        self.covariance(corrected).diagonal()
    }

    pub fn std_dev(&self, corrected: bool) -> DVector<T> {
        self.variance(corrected).map(|v| v.sqrt())
    }

    /// Pearson correlation derived from the sample covariance.
    ///
    /// A zero standard deviation is replaced by 1, so a constant dimension
    /// reports a correlation of 0 against every dimension, itself included,
    /// instead of NaN.
    pub fn correlation(&self) -> DMatrix<T> {
        normalize(&self.covariance(true))
    }

    /// Snapshot with the configured divisor. Its correlation is normalized
    /// from its own covariance, so with `corrected: false` a single sample
    /// gives a zero correlation rather than NaN.
    pub fn statistics(&self) -> Statistics<T> {
        let covariance = self.covariance(self.config.corrected);
        let correlation = normalize(&covariance);
        let variance = covariance.diagonal();
        let mean = if self.count == 0 {
            DVector::zeros(0)
        } else {
            self.mean.clone()
        };
        Statistics {
            count: self.count,
            mean,
            covariance,
            correlation,
            variance,
        }
    }

    /// Fold `other` into `self` with Chan's pairwise update. The result is the
    /// same as if `self` had also seen every sample of `other`.
    pub fn merge(&mut self, other: &Self) -> Result<(), CovarianceError> {
        if other.count == 0 {
            return Ok(());
        }
        if self.count == 0 {
            self.count = other.count;
            self.mean = other.mean.clone();
            self.scatter = other.scatter.clone();
            return Ok(());
        }
        self.check_feature_count(other.feature_count())?;

        let n_a = self.count;
        let n_b = other.count;
        let count = n_a + n_b;
        let n: T = from_count(count);

        let delta = &other.mean - &self.mean;
        self.mean += &delta * (from_count::<T>(n_b) / n);
        self.scatter += &other.scatter;
        let weight = from_count::<T>(n_a) * from_count::<T>(n_b) / n;
        self.scatter.ger(weight, &delta, &delta, T::one());
        self.count = count;

        log_trace!("merged {} and {} samples", n_a, n_b);
        Ok(())
    }

    /// Like [`merge`](Self::merge) but leaves both inputs untouched.
    pub fn merged(&self, other: &Self) -> Result<Self, CovarianceError> {
        let mut combined = self.clone();
        combined.merge(other)?;
        Ok(combined)
    }
}
