use num_traits::Float;

use crate::{Kbn, Result, StatisticsError};

/// Converts a sample count into the sample type
///
/// # Arguments
///
/// * `n` - The count to convert
///
/// # Returns
///
/// * `Result<T>` - The converted count, or `StatisticsError::Conversion`
#[inline]
pub fn to_float<T: Float>(n: usize) -> Result<T> {
    T::from(n).ok_or(StatisticsError::Conversion)
}

/// Returns the fraction of a full window that survives one eviction, `(n - 1) / n`
///
/// # Arguments
///
/// * `window_size` - The window size, at least 1
///
/// # Returns
///
/// * `Result<T>` - The decay factor, or `StatisticsError::Conversion` if the window size is
///   not representable
#[inline]
pub fn decay_factor<T: Float>(window_size: usize) -> Result<T> {
    let n = to_float::<T>(window_size)?;
    Ok((n - T::one()) / n)
}

/// Scales a compensated sum by `factor`, starting a fresh compensation from the scaled total
///
/// # Arguments
///
/// * `sum` - The compensated sum to scale
/// * `factor` - The scale factor
///
/// # Returns
///
/// * `Kbn<T>` - The scaled sum
#[inline]
pub fn decay<T: Float + Default>(sum: &Kbn<T>, factor: T) -> Kbn<T> {
    let mut scaled = Kbn::default();
    scaled += sum.total() * factor;
    scaled
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn decay_factor_works() {
        assert_eq!(decay_factor::<f64>(1), Ok(0.0));
        assert_eq!(decay_factor::<f64>(4), Ok(0.75));
        assert_approx_eq!(decay_factor::<f32>(3).unwrap_or_default(), 2.0 / 3.0);
    }

    #[test]
    fn decay_scales_total() {
        let mut sum = Kbn::<f64>::default();
        sum += 10.0;
        sum += 20.0;
        sum += 30.0;
        let decayed = decay(&sum, 2.0 / 3.0);
        assert_approx_eq!(decayed.total(), 40.0);
    }

    #[test]
    fn to_float_works() {
        assert_eq!(to_float::<f64>(7), Ok(7.0));
    }
}
