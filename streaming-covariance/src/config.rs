use serde::{Deserialize, Serialize};

/// Construction options for [`StreamingCovariance`](crate::StreamingCovariance).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CovarianceConfig {
    /// Pre-size the accumulator. `None` locks the dimensionality on the first update.
    pub feature_count: Option<usize>,
    /// Use Bessel's correction (n - 1) for the covariance in statistics snapshots.
    pub corrected: bool,
}

impl Default for CovarianceConfig {
    fn default() -> Self {
        Self {
            feature_count: None,
            corrected: true,
        }
    }
}

impl CovarianceConfig {
    pub fn ddof(&self) -> usize {
        if self.corrected { 1 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sample_covariance() {
        let config = CovarianceConfig::default();
        assert_eq!(config.feature_count, None);
        assert!(config.corrected);
        assert_eq!(config.ddof(), 1);
    }

    #[test]
    fn population_config_has_no_ddof() {
        let config = CovarianceConfig {
            corrected: false,
            ..Default::default()
        };
        assert_eq!(config.ddof(), 0);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = CovarianceConfig {
            feature_count: Some(6),
            corrected: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CovarianceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn config_from_json_sizes_accumulator() {
        let config: CovarianceConfig =
            serde_json::from_str(r#"{ "feature_count": 4, "corrected": true }"#).unwrap();
        let acc = crate::StreamingCovariance::<f64>::with_config(config);

        assert_eq!(acc.feature_count(), 4);
        assert!(acc.config().corrected);
    }
}
