use std::collections::BTreeMap;

use crate::core::error::{Result, SfaError};

/// Windows with a standard deviation below this are treated as constant.
pub const MIN_STD: f64 = 1e-8;

/// Windows whose variance falls below this fraction of the running
/// sum-of-squares scale are recomputed directly.
const CANCELLATION: f64 = 1e-6;

/// Rolling mean and standard deviation for all windows of length `w`.
///
/// Computed in a single pass over cumulative sums and sums-of-squares of the
/// samples centered on the series mean. Windows where the subtraction would
/// lose precision fall back to a two-pass computation. Windows containing a
/// non-finite sample get NaN for both statistics.
#[derive(Debug, Clone)]
pub struct WindowStats {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl WindowStats {
    pub fn compute(ts: &[f64], w: usize) -> Self {
        debug_assert!(w > 0 && ts.len() >= w);

        let n = ts.len();
        let n_windows = n - w + 1;

        let (total, finite) = ts
            .iter()
            .filter(|v| v.is_finite())
            .fold((0.0, 0usize), |(s, c), &v| (s + v, c + 1));
        let center = if finite > 0 { total / finite as f64 } else { 0.0 };

        let mut cumsum = vec![0.0; n + 1];
        let mut cumsum_sq = vec![0.0; n + 1];
        let mut non_finite = vec![0usize; n + 1];
        for (i, &x) in ts.iter().enumerate() {
            let (d, bad) = if x.is_finite() { (x - center, 0) } else { (0.0, 1) };
            cumsum[i + 1] = cumsum[i] + d;
            cumsum_sq[i + 1] = cumsum_sq[i] + d * d;
            non_finite[i + 1] = non_finite[i] + bad;
        }

        let w_f = w as f64;
        let mut mean = Vec::with_capacity(n_windows);
        let mut std = Vec::with_capacity(n_windows);
        for i in 0..n_windows {
            if non_finite[i + w] > non_finite[i] {
                mean.push(f64::NAN);
                std.push(f64::NAN);
                continue;
            }
            let mu = (cumsum[i + w] - cumsum[i]) / w_f;
            // E[X^2] - E[X]^2 on centered samples
            let var = (cumsum_sq[i + w] - cumsum_sq[i]) / w_f - mu * mu;
            let sigma = if var <= cumsum_sq[i + w] / w_f * CANCELLATION {
                window_std(&ts[i..i + w])
            } else {
                var.sqrt()
            };
            mean.push(center + mu);
            std.push(sigma);
        }

        Self { mean, std }
    }
}

/// Population standard deviation of one window (two-pass).
pub fn window_std(window: &[f64]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let n = window.len() as f64;
    let mu = window.iter().sum::<f64>() / n;
    (window.iter().map(|x| (x - mu) * (x - mu)).sum::<f64>() / n).sqrt()
}

/// Start offsets of the windows used to learn breakpoints.
///
/// Non-overlapping windows from the start of the series, with the last one
/// aligned to the end: `ceil(n / w)` windows in total.
pub fn training_window_starts(n: usize, w: usize) -> Vec<usize> {
    debug_assert!(w > 0 && n >= w);
    let count = n.div_ceil(w);
    let mut starts: Vec<usize> = (0..count - 1).map(|j| j * w).collect();
    starts.push(n - w);
    starts
}

/// Borrow every series of a collection, checking it is non-empty and rectangular.
pub fn collect_panel<S: AsRef<[f64]>>(x: &[S]) -> Result<Vec<&[f64]>> {
    let first = x.first().ok_or(SfaError::EmptyInput)?.as_ref().len();
    if first == 0 {
        return Err(SfaError::EmptyInput);
    }
    x.iter()
        .enumerate()
        .map(|(index, s)| {
            let s = s.as_ref();
            if s.len() == first {
                Ok(s)
            } else {
                Err(SfaError::RaggedInput {
                    index,
                    expected: first,
                    actual: s.len(),
                })
            }
        })
        .collect()
}

/// Map categorical labels to dense class ids in sorted label order.
///
/// Returns the ids and the number of distinct classes.
pub fn encode_labels<L: Ord>(labels: &[L]) -> (Vec<usize>, usize) {
    let mut classes: BTreeMap<&L, usize> = BTreeMap::new();
    for label in labels {
        classes.entry(label).or_insert(0);
    }
    for (id, slot) in classes.values_mut().enumerate() {
        *slot = id;
    }
    let ids = labels.iter().map(|l| classes[l]).collect();
    (ids, classes.len())
}

/// Evaluate `f` for every index in `0..n`, in parallel when available.
///
/// Results keep index order, so the output does not depend on scheduling.
pub(crate) fn map_indices<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..n).into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..n).map(f).collect()
    }
}
