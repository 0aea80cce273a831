use tracing::debug;

use crate::algorithms::common::map_indices;
use crate::algorithms::{igb, kmeans};
use crate::core::breakpoints::Breakpoints;
use crate::core::config::BinningMethod;

/// Learn one row of breakpoints per column of training coefficients.
///
/// `columns[r]` holds the values of selected coefficient `r` over all training
/// windows; `labels` is aligned with every column and is only consulted by the
/// information-gain strategy. Rows are learned independently and in parallel.
pub fn learn_breakpoints(
    columns: &[Vec<f64>],
    labels: Option<&[usize]>,
    n_classes: usize,
    method: BinningMethod,
    alphabet_size: usize,
) -> Breakpoints {
    debug_assert!(alphabet_size >= 2);
    let rows = map_indices(columns.len(), |r| {
        learn_row(&columns[r], labels, n_classes, method, alphabet_size)
    });
    Breakpoints::from_rows(rows, alphabet_size)
}

/// Interior cuts (`alphabet_size - 1` values) for one coefficient.
pub fn learn_row(
    values: &[f64],
    labels: Option<&[usize]>,
    n_classes: usize,
    method: BinningMethod,
    alphabet_size: usize,
) -> Vec<f64> {
    let n_cuts = alphabet_size - 1;

    // Drop non-finite samples, keeping labels aligned
    let mut finite = Vec::with_capacity(values.len());
    let mut finite_labels = Vec::with_capacity(values.len());
    for (i, &v) in values.iter().enumerate() {
        if v.is_finite() {
            finite.push(v);
            if let Some(y) = labels {
                finite_labels.push(y[i]);
            }
        }
    }

    if is_constant(&finite) {
        return vec![method.default_cut(); n_cuts];
    }

    match method {
        BinningMethod::EquiDepth => equi_depth(&finite, alphabet_size),
        BinningMethod::EquiWidth => equi_width(&finite, alphabet_size),
        BinningMethod::Kmeans => kmeans::cut_points(&finite, alphabet_size),
        BinningMethod::InformationGain => match labels {
            Some(_) => igb::cut_points(&finite, &finite_labels, n_classes, alphabet_size),
            None => {
                debug!("information-gain row without labels, using default cuts");
                vec![method.default_cut(); n_cuts]
            }
        },
    }
}

fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        None => true,
        Some(&first) => values.iter().all(|&v| v == first),
    }
}

/// Round to two decimals, the resolution at which unsupervised cuts are learned.
#[inline]
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Equal-frequency cuts: cut `k` is the order statistic at `floor(k * n / A)`.
pub fn equi_depth(values: &[f64], alphabet_size: usize) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().map(|&v| round2(v)).collect();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    (1..alphabet_size)
        .map(|k| sorted[(k * n / alphabet_size).min(n - 1)])
        .collect()
}

/// Equal-width cuts over `[min, max]`.
pub fn equi_width(values: &[f64], alphabet_size: usize) -> Vec<f64> {
    let (min, max) = values
        .iter()
        .map(|&v| round2(v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let width = (max - min) / alphabet_size as f64;
    (1..alphabet_size).map(|k| min + k as f64 * width).collect()
}
