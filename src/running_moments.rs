use log::{debug, trace, warn};
use num_traits::Float;

use crate::{
    Kbn, Result, StatisticsError,
    extremum::{Extremum, Max, Min},
    helper::{decay, decay_factor, to_float},
};

/// Running mean, variance, standard deviation and extremes over an approximate sliding window.
///
/// No individual sample is stored. The accumulator keeps a running sum and a running sum of
/// squares (the "reference variance", squares taken of the raw values rather than of their
/// deviation from the mean). While fewer than `window_size` samples have been added both sums
/// are exact. Once the window is full, every new sample first scales both sums by
/// `(window_size - 1) / window_size`, which removes one average sample's worth of contribution
/// instead of the true oldest value. The statistics are therefore an approximation of the
/// window after the first overflow, and that decay law is part of the contract.
///
/// The minimum and maximum are all-time extremes since the last reset and are not windowed.
///
/// Sums are accumulated with Kahan-Babuska-Neumaier compensated summation.
///
/// # Examples
///
/// ```
/// use running_moments::RunningMoments;
///
/// let mut stats = RunningMoments::new(3)?;
/// stats.extend([10.0, 20.0, 30.0]);
///
/// assert_eq!(stats.mean()?, 20.0);
/// assert_eq!(stats.total(), 60.0);
/// assert_eq!(stats.min_observed(), Some(10.0));
/// assert_eq!(stats.max_observed(), Some(30.0));
/// # Ok::<(), running_moments::StatisticsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RunningMoments<T> {
    /// Maximum number of samples represented
    window_size: usize,
    /// Samples currently represented, never above `window_size`
    count: usize,
    /// Delta Degrees of Freedom
    ddof: bool,
    /// Running total
    sum: Kbn<T>,
    /// Reference variance
    sum_sq: Kbn<T>,
    /// All-time minimum
    min: Extremum<T, Min>,
    /// All-time maximum
    max: Extremum<T, Max>,
}

impl<T: Float + Default> RunningMoments<T> {
    /// Creates a new `RunningMoments` instance with the specified window size.
    ///
    /// # Arguments
    ///
    /// * `window_size` - The number of most recent samples to represent
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The accumulator, or `StatisticsError::InvalidConfiguration` if
    ///   `window_size` is zero
    pub fn new(window_size: usize) -> Result<Self> {
        Self::validate(window_size)?;
        Ok(Self {
            window_size,
            count: 0,
            ddof: false,
            sum: Kbn::default(),
            sum_sq: Kbn::default(),
            min: Extremum::new(),
            max: Extremum::new(),
        })
    }

    fn validate(window_size: usize) -> Result<()> {
        if window_size == 0 {
            warn!("rejected window size {window_size}");
            return Err(StatisticsError::InvalidConfiguration { window_size });
        }
        Ok(())
    }

    /// Sets a new window size and resets all accumulated state.
    ///
    /// On error the accumulator is left untouched.
    ///
    /// # Arguments
    ///
    /// * `window_size` - The number of most recent samples to represent
    ///
    /// # Returns
    ///
    /// * `Result<&mut Self>` - The accumulator, or `StatisticsError::InvalidConfiguration` if
    ///   `window_size` is zero
    pub fn configure(&mut self, window_size: usize) -> Result<&mut Self> {
        Self::validate(window_size)?;
        debug!("window size {} -> {window_size}", self.window_size);
        self.window_size = window_size;
        Ok(self.reset())
    }

    /// Resets the accumulated state, keeping the window size and ddof setting
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The accumulator
    pub fn reset(&mut self) -> &mut Self {
        debug!("reset, window size {}", self.window_size);
        self.count = 0;
        self.sum = Kbn::default();
        self.sum_sq = Kbn::default();
        self.min.reset();
        self.max.reset();
        self
    }

    /// Returns the Delta Degrees of Freedom
    ///
    /// # Returns
    ///
    /// * `bool` - `false` for population variance, `true` for sample variance
    #[inline]
    pub const fn ddof(&self) -> bool {
        self.ddof
    }

    /// Sets the Delta Degrees of Freedom
    ///
    /// # Arguments
    ///
    /// * `ddof` - `true` divides the variance by `count - 1` instead of `count`
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The accumulator
    #[inline]
    pub const fn set_ddof(&mut self, ddof: bool) -> &mut Self {
        self.ddof = ddof;
        self
    }

    /// Adds a sample.
    ///
    /// When the window is already full both sums are first scaled by
    /// `(window_size - 1) / window_size`, otherwise the sample count grows by one. The sample
    /// and its square are then added, and the all-time extremes updated.
    ///
    /// # Arguments
    ///
    /// * `value` - The sample to add
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The accumulator
    ///
    /// # Examples
    ///
    /// ```
    /// use running_moments::RunningMoments;
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let mut stats = RunningMoments::<f64>::new(3)?;
    /// stats.extend([10.0, 20.0, 30.0]);
    ///
    /// // 60 * 2/3 + 40
    /// assert_approx_eq!(stats.add_data(40.0).total(), 80.0);
    /// assert_eq!(stats.sample_count(), 3);
    /// assert_eq!(stats.min_observed(), Some(10.0));
    /// # Ok::<(), running_moments::StatisticsError>(())
    /// ```
    pub fn add_data(&mut self, value: T) -> &mut Self {
        if self.count >= self.window_size {
            match decay_factor(self.window_size) {
                Ok(factor) => {
                    self.sum = decay(&self.sum, factor);
                    self.sum_sq = decay(&self.sum_sq, factor);
                }
                Err(err) => warn!("decay skipped for window of {}: {err}", self.window_size),
            }
        } else {
            self.count += 1;
            if self.count == self.window_size {
                trace!("window of {} filled, decaying from here on", self.window_size);
            }
        }

        self.sum += value;
        self.sum_sq += value * value;

        self.min.push(value);
        self.max.push(value);
        self
    }

    /// Returns the arithmetic mean of the windowed samples
    ///
    /// # Returns
    ///
    /// * `Result<T>` - The mean, or `StatisticsError::EmptyAccumulator` if no sample was added
    pub fn mean(&self) -> Result<T> {
        let n = self.populated_count()?;
        Ok(self.sum.total() / n)
    }

    /// Returns the mean of the squared samples
    ///
    /// # Returns
    ///
    /// * `Result<T>` - The mean of squares, or `StatisticsError::EmptyAccumulator` if no sample
    ///   was added
    pub fn mean_sq(&self) -> Result<T> {
        let n = self.populated_count()?;
        Ok(self.sum_sq.total() / n)
    }

    /// Returns the variance of the windowed samples
    ///
    /// Derived from the reference variance as `sum_sq - count * mean^2`, divided by `count`
    /// (population variance) or by `count - 1` when ddof is set. Cancellation can push the
    /// numerator slightly below zero for near constant input, in which case zero is returned.
    ///
    /// # Returns
    ///
    /// * `Result<T>` - The variance, `StatisticsError::EmptyAccumulator` if no sample was added,
    ///   or `StatisticsError::InsufficientSamples` for sample variance over a single sample
    ///
    /// # Examples
    ///
    /// ```
    /// use running_moments::RunningMoments;
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let mut stats = RunningMoments::<f64>::new(8)?;
    /// stats.extend([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    ///
    /// assert_approx_eq!(stats.variance()?, 4.0);
    /// assert_approx_eq!(stats.set_ddof(true).variance()?, 32.0 / 7.0);
    /// # Ok::<(), running_moments::StatisticsError>(())
    /// ```
    pub fn variance(&self) -> Result<T> {
        let n = self.populated_count()?;
        let denom = if self.ddof {
            if self.count < 2 {
                return Err(StatisticsError::InsufficientSamples {
                    required: 2,
                    available: self.count,
                });
            }
            n - T::one()
        } else {
            n
        };

        let mean = self.sum.total() / n;
        let m2 = self.sum_sq.total() - n * mean * mean;
        let m2 = if m2 < T::zero() { T::zero() } else { m2 };
        Ok(m2 / denom)
    }

    /// Returns the standard deviation of the windowed samples
    ///
    /// # Returns
    ///
    /// * `Result<T>` - The square root of [`variance`](Self::variance), with the same errors
    #[inline]
    pub fn std_dev(&self) -> Result<T> {
        self.variance().map(T::sqrt)
    }

    /// Returns the largest sample since the last reset, `None` when empty
    #[inline]
    pub fn max_observed(&self) -> Option<T> {
        self.max.get()
    }

    /// Returns the smallest sample since the last reset, `None` when empty
    #[inline]
    pub fn min_observed(&self) -> Option<T> {
        self.min.get()
    }

    /// Returns `max_observed - min_observed`, `None` when empty
    #[inline]
    pub fn range(&self) -> Option<T> {
        self.max_observed()
            .zip(self.min_observed())
            .map(|(max, min)| max - min)
    }

    /// Returns the running total, zero when empty
    #[inline]
    pub fn total(&self) -> T {
        self.sum.total()
    }

    /// Returns the reference variance: the running sum of squared samples
    #[inline]
    pub fn sum_sq(&self) -> T {
        self.sum_sq.total()
    }

    /// Returns the number of samples currently represented
    ///
    /// # Returns
    ///
    /// * `usize` - The sample count, at most [`window_capacity`](Self::window_capacity)
    #[inline]
    pub const fn sample_count(&self) -> usize {
        self.count
    }

    /// Returns the configured window size
    #[inline]
    pub const fn window_capacity(&self) -> usize {
        self.window_size
    }

    /// Returns true if no sample was added since the last reset
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the window is full and the next sample decays the sums
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.count == self.window_size
    }

    fn populated_count(&self) -> Result<T> {
        if self.is_empty() {
            return Err(StatisticsError::EmptyAccumulator);
        }
        to_float(self.count)
    }
}

impl<T: Float + Default> Extend<T> for RunningMoments<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| {
            self.add_data(value);
        });
    }
}
