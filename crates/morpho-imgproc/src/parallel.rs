use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row length must be valid.
    #[error("row length must be > 0")]
    InvalidRowLength,

    /// The destination does not divide into whole rows.
    #[error("destination length {0} is not a multiple of the row length {1}")]
    RaggedRows(usize, usize),
}

/// Controls how the per-row work of a kernel call is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Partition rows across the global rayon thread pool.
    #[default]
    Parallel,

    /// Run all rows sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of
    /// parallelization outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Apply a function to every row of `dst`, partitioned according to `strategy`.
///
/// Each invocation receives the row index and an exclusive slice of that
/// output row. Rows are independent, so no synchronization happens beyond
/// the join at the end of the call, and the result is byte-identical for
/// every strategy.
///
/// # Arguments
///
/// * `dst` - The flat destination buffer, an exact multiple of `row_len` long.
/// * `row_len` - The length of one row in samples.
/// * `strategy` - The execution strategy.
/// * `f` - The operation to run for each `(row_index, row)` pair.
pub fn for_each_row<F>(
    dst: &mut [u8],
    row_len: usize,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), ParallelError>
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    if row_len == 0 {
        return Err(ParallelError::InvalidRowLength);
    }
    if dst.len() % row_len != 0 {
        return Err(ParallelError::RaggedRows(dst.len(), row_len));
    }

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(r, row)| f(r, row));
        }
        ExecutionStrategy::Parallel => {
            dst.par_chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(r, row)| f(r, row));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(row_len)
                    .enumerate()
                    .for_each(|(r, row)| f(r, row));
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_each_row_serial() {
        let mut dst = vec![0u8; 6];
        for_each_row(&mut dst, 3, ExecutionStrategy::Serial, |r, row| {
            row.fill(r as u8 + 1)
        })
        .unwrap();
        assert_eq!(dst, vec![1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn for_each_row_parallel() {
        let mut dst = vec![0u8; 8];
        for_each_row(&mut dst, 2, ExecutionStrategy::Parallel, |r, row| {
            row.fill(r as u8)
        })
        .unwrap();
        assert_eq!(dst, vec![0, 0, 1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn for_each_row_fixed() {
        let mut dst = vec![0u8; 8];
        for_each_row(&mut dst, 2, ExecutionStrategy::Fixed(2), |r, row| {
            row.fill(r as u8)
        })
        .unwrap();
        assert_eq!(dst, vec![0, 0, 1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn for_each_row_fixed_invalid() {
        let mut dst = vec![0u8; 4];
        let res = for_each_row(&mut dst, 2, ExecutionStrategy::Fixed(0), |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidThreadCount(0)));
    }

    #[test]
    fn for_each_row_zero_row_len() {
        let mut dst = vec![0u8; 4];
        let res = for_each_row(&mut dst, 0, ExecutionStrategy::Serial, |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidRowLength));
    }

    #[test]
    fn for_each_row_ragged() {
        let mut dst = vec![0u8; 5];
        let res = for_each_row(&mut dst, 2, ExecutionStrategy::Serial, |_, _| {});
        assert_eq!(res, Err(ParallelError::RaggedRows(5, 2)));
    }
}
