#[cfg(feature = "log")]
use log::LevelFilter;
use nalgebra::DMatrix;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::StreamingCovariance;


pub fn init_logger() {
    #[cfg(feature = "log")]
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .filter(Some("streaming_covariance"), LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// `rows x cols` matrix with entries around a large offset, so naive
/// sum-of-squares formulas would lose most of their precision.
pub fn random_matrix(seed: u64, rows: usize, cols: usize) -> DMatrix<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    DMatrix::from_fn(rows, cols, |_, j| {
        1_000.0 * (j as f64 + 1.0) + rng.gen_range(-5.0..5.0)
    })
}

/// Reference covariance computed with all samples in memory.
pub fn two_pass_covariance(data: &DMatrix<f64>, ddof: usize) -> DMatrix<f64> {
    let n = data.nrows();
    let mean = data.row_mean();
    let centered = DMatrix::from_fn(n, data.ncols(), |i, j| data[(i, j)] - mean[j]);
    centered.transpose() * &centered / (n - ddof) as f64
}

pub fn accumulate_in_chunks(data: &DMatrix<f64>, chunk_sizes: &[usize]) -> StreamingCovariance<f64> {
    let mut acc = StreamingCovariance::new();
    let mut start = 0;
    for &size in chunk_sizes {
        acc.update_batch(data.rows(start, size)).unwrap();
        start += size;
    }
    assert_eq!(start, data.nrows(), "chunks must cover the data");
    acc
}

/// Split `data` into contiguous blocks of the given sizes.
pub fn blocks(data: &DMatrix<f64>, sizes: &[usize]) -> Vec<DMatrix<f64>> {
    let mut start = 0;
    sizes
        .iter()
        .map(|&size| {
            let block = data.rows(start, size).clone_owned();
            start += size;
            block
        })
        .collect()
}
