use core::marker::PhantomData;

use num_traits::Float;

/// Order policy deciding whether a new value displaces the stored extreme
///
/// # Methods
///
/// * `sentinel() -> T` - The value an empty tracker starts from
/// * `is_more_extreme(new: &T, existing: &T) -> bool` - Returns true if `new` should replace `existing`
pub trait OrderPolicy<T> {
    /// Starting value of an empty tracker, never reported
    fn sentinel() -> T;
    /// Returns true if `new` should replace `existing`
    fn is_more_extreme(new: &T, existing: &T) -> bool;
}

/// Order policy for minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Min;

/// Order policy for maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Max;

impl<T: Float> OrderPolicy<T> for Min {
    #[inline]
    fn sentinel() -> T {
        T::infinity()
    }

    #[inline]
    fn is_more_extreme(new: &T, existing: &T) -> bool {
        new < existing
    }
}

impl<T: Float> OrderPolicy<T> for Max {
    #[inline]
    fn sentinel() -> T {
        T::neg_infinity()
    }

    #[inline]
    fn is_more_extreme(new: &T, existing: &T) -> bool {
        new > existing
    }
}

/// # All-time extreme of a stream
///
/// Tracks the most extreme value seen since the last reset under the order policy `O`.
/// Unlike a rolling minimum or maximum, nothing ever leaves: the extreme only widens or
/// stays put, so a single value of storage is enough.
///
/// NaN is skipped and never displaces the stored value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum<T, O> {
    value: T,
    seen: bool,
    _order: PhantomData<O>,
}

impl<T, O> Extremum<T, O>
where
    T: Float,
    O: OrderPolicy<T>,
{
    /// Creates an empty tracker holding the policy sentinel
    pub fn new() -> Self {
        Self {
            value: O::sentinel(),
            seen: false,
            _order: PhantomData,
        }
    }

    /// Offers a new value to the tracker
    ///
    /// # Arguments
    ///
    /// * `value` - The value to compare against the stored extreme
    #[inline]
    pub fn push(&mut self, value: T) {
        if value.is_nan() {
            return;
        }
        if !self.seen || O::is_more_extreme(&value, &self.value) {
            self.value = value;
            self.seen = true;
        }
    }

    /// Returns the stored extreme
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The extreme, or `None` if nothing was pushed since the last reset
    #[inline]
    pub fn get(&self) -> Option<T> {
        self.seen.then_some(self.value)
    }

    /// Resets the tracker to its sentinel
    #[inline]
    pub fn reset(&mut self) {
        self.value = O::sentinel();
        self.seen = false;
    }
}

impl<T, O> Default for Extremum<T, O>
where
    T: Float,
    O: OrderPolicy<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_only_widens() {
        let mut min = Extremum::<f64, Min>::new();
        assert_eq!(min.get(), None);
        assert_eq!(min.value, f64::INFINITY);

        min.push(5.0);
        min.push(7.0);
        assert_eq!(min.get(), Some(5.0));
        min.push(-1.0);
        assert_eq!(min.get(), Some(-1.0));
        min.push(3.0);
        assert_eq!(min.get(), Some(-1.0));
    }

    #[test]
    fn max_only_widens() {
        let mut max = Extremum::<f32, Max>::new();
        assert_eq!(max.value, f32::NEG_INFINITY);

        max.push(1.0);
        max.push(4.0);
        max.push(2.0);
        assert_eq!(max.get(), Some(4.0));
    }

    #[test]
    fn nan_is_ignored() {
        let mut max = Extremum::<f64, Max>::new();
        max.push(2.0);
        max.push(f64::NAN);
        assert_eq!(max.get(), Some(2.0));
    }

    #[test]
    fn nan_only_stays_empty() {
        let mut min = Extremum::<f64, Min>::new();
        min.push(f64::NAN);
        assert_eq!(min.get(), None);
    }

    #[test]
    fn infinity_is_kept() {
        let mut min = Extremum::<f64, Min>::new();
        min.push(f64::INFINITY);
        assert_eq!(min.get(), Some(f64::INFINITY));
    }

    #[test]
    fn reset_restores_sentinel() {
        let mut min = Extremum::<f64, Min>::default();
        min.push(2.0);
        min.reset();
        assert_eq!(min.get(), None);
        assert_eq!(min.value, f64::INFINITY);

        min.push(9.0);
        assert_eq!(min.get(), Some(9.0));
    }
}
