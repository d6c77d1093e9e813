//! Builder utilities for configuring the fan-out.
//!
//! Exposes worker-pool selection and the validation performed before a
//! [`Fanout`] is constructed.

use std::sync::Arc;

use rayon::ThreadPoolBuilder;

use crate::{
    error::FanoutError,
    fanout::{Fanout, WorkerPool},
};

/// Configures and constructs [`Fanout`] instances.
///
/// Without [`Self::with_worker_count`] the fan-out runs on Rayon's global
/// pool. With it, a dedicated pool of exactly that many threads is built.
///
/// # Examples
/// ```
/// use fanprim_core::FanoutBuilder;
///
/// let fanout = FanoutBuilder::new()
///     .with_worker_count(2)
///     .build()
///     .expect("two workers is a valid configuration");
/// assert_eq!(fanout.worker_count(), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FanoutBuilder {
    worker_count: Option<usize>,
}

impl FanoutBuilder {
    /// Creates a builder that targets the global pool.
    ///
    /// # Examples
    /// ```
    /// use fanprim_core::FanoutBuilder;
    ///
    /// assert_eq!(FanoutBuilder::new().worker_count(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a dedicated pool with `workers` threads.
    #[must_use]
    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = Some(workers);
        self
    }

    /// Returns the requested dedicated worker count, if any.
    #[must_use]
    pub fn worker_count(&self) -> Option<usize> {
        self.worker_count
    }

    /// Validates the configuration and constructs a [`Fanout`].
    ///
    /// # Errors
    /// Returns [`FanoutError::InvalidWorkerCount`] for a zero worker count
    /// and [`FanoutError::PoolBuild`] when the dedicated pool cannot start.
    ///
    /// # Examples
    /// ```
    /// use fanprim_core::{FanoutBuilder, FanoutError};
    ///
    /// let err = FanoutBuilder::new().with_worker_count(0).build().unwrap_err();
    /// assert_eq!(err, FanoutError::InvalidWorkerCount { got: 0 });
    /// ```
    pub fn build(self) -> Result<Fanout, FanoutError> {
        let pool = match self.worker_count {
            None => WorkerPool::Global,
            Some(0) => return Err(FanoutError::InvalidWorkerCount { got: 0 }),
            Some(workers) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|index| format!("fanprim-worker-{index}"))
                    .build()
                    .map_err(|error| FanoutError::PoolBuild {
                        workers,
                        message: Arc::from(error.to_string()),
                    })?;
                WorkerPool::Dedicated {
                    pool: Arc::new(pool),
                    workers,
                }
            }
        };
        Ok(Fanout::new(pool))
    }
}
