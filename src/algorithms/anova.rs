use std::cmp::Ordering;

use crate::algorithms::common::map_indices;

/// Columns with a variance at or below this carry no class information.
pub const MIN_VARIANCE: f64 = 1e-8;

/// One-way ANOVA F-statistic of `values` grouped by `labels`.
///
/// Returns NaN when the statistic is undefined (fewer than two classes, no
/// within-group degrees of freedom, or a constant column) and `+inf` when
/// groups are internally constant but differ from each other.
pub fn f_statistic(values: &[f64], labels: &[usize], n_classes: usize) -> f64 {
    debug_assert_eq!(values.len(), labels.len());
    let n = values.len();

    let mut sums = vec![0.0; n_classes];
    let mut counts = vec![0usize; n_classes];
    for (&v, &y) in values.iter().zip(labels) {
        sums[y] += v;
        counts[y] += 1;
    }
    let groups = counts.iter().filter(|&&c| c > 0).count();
    if groups < 2 || n <= groups {
        return f64::NAN;
    }

    let grand_mean = sums.iter().sum::<f64>() / n as f64;
    let means: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();

    let mut ss_total = 0.0;
    let mut ss_within = 0.0;
    for (&v, &y) in values.iter().zip(labels) {
        ss_total += (v - grand_mean) * (v - grand_mean);
        ss_within += (v - means[y]) * (v - means[y]);
    }
    if ss_total / n as f64 <= MIN_VARIANCE {
        return f64::NAN;
    }
    let ss_between: f64 = means
        .iter()
        .zip(&counts)
        .map(|(&m, &c)| c as f64 * (m - grand_mean) * (m - grand_mean))
        .sum();

    let df_between = (groups - 1) as f64;
    let df_within = (n - groups) as f64;
    let ms_within = ss_within / df_within;
    if ms_within <= 0.0 {
        return if ss_between > 0.0 { f64::INFINITY } else { f64::NAN };
    }
    (ss_between / df_between) / ms_within
}

/// F-statistic for every column.
pub fn f_statistics(columns: &[Vec<f64>], labels: &[usize], n_classes: usize) -> Vec<f64> {
    map_indices(columns.len(), |j| f_statistic(&columns[j], labels, n_classes))
}

/// Pick the `k` highest-scoring column indices, returned in ascending order.
///
/// Ranking is by F descending with ties broken by ascending index; undefined
/// statistics rank last, so a degenerate label set reduces to the first `k`
/// columns.
pub fn select_top(scores: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // Stable sort keeps ascending index order among equal scores
    order.sort_by(|&a, &b| compare_desc(scores[a], scores[b]));
    let mut selected: Vec<usize> = order.into_iter().take(k).collect();
    selected.sort_unstable();
    selected
}

fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

fn compare_desc(a: f64, b: f64) -> Ordering {
    rank_key(b).total_cmp(&rank_key(a))
}
