//! Statistics over values that may be missing.
//!
//! Missing values ([`None`]) are skipped, they never count as zero.

/// Mean of the defined values, [`None`] if there are none.
pub fn masked_mean(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Population standard deviation and count of the defined values.
///
/// [`None`] if there are no defined values.
pub fn masked_std(values: impl IntoIterator<Item = Option<f64>> + Clone) -> Option<(f64, usize)> {
    let mean = masked_mean(values.clone())?;
    let (squares, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(squares, count), value| {
            (squares + (value - mean).powi(2), count + 1)
        });

    Some(((squares / count as f64).sqrt(), count))
}

/// Standard error of the mean of the defined values.
///
/// [`None`] unless at least two values are defined.
pub fn masked_sem(values: impl IntoIterator<Item = Option<f64>> + Clone) -> Option<f64> {
    match masked_std(values)? {
        (_, count) if count < 2 => None,
        (std, count) => Some(std / (count as f64).sqrt()),
    }
}
