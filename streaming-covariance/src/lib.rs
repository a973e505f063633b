// only use std when feature = "std" is enabled or during testing
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod fmt;

mod accumulator;
mod config;
mod error;
mod observations;
mod reduce;
mod statistics;

pub use accumulator::StreamingCovariance;
pub use config::CovarianceConfig;
pub use error::CovarianceError;
pub use observations::Observations;
pub use statistics::Statistics;

#[cfg(test)]
mod tests;
