const MAX_ITER: usize = 300;
const TOLERANCE: f64 = 1e-10;

/// One-dimensional Lloyd k-means with deterministic initialization.
///
/// Initial centers are the midpoints of `k` equal-width bins over
/// `[min, max]`. Points are assigned over the sorted values with prefix sums,
/// so each iteration is O(k log n). Ties go to the lower cluster and an empty
/// cluster keeps its previous center. Returns the centers sorted ascending.
pub fn centers(values: &[f64], k: usize) -> Vec<f64> {
    debug_assert!(k >= 1 && !values.is_empty());
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    let mut prefix = vec![0.0; n + 1];
    for (i, &v) in sorted.iter().enumerate() {
        prefix[i + 1] = prefix[i] + v;
    }

    let (min, max) = (sorted[0], sorted[n - 1]);
    let width = (max - min) / k as f64;
    let mut centers: Vec<f64> = (0..k).map(|j| min + (j as f64 + 0.5) * width).collect();

    for _ in 0..MAX_ITER {
        // Cluster j owns sorted[bounds[j]..bounds[j + 1]]
        let mut bounds = Vec::with_capacity(k + 1);
        bounds.push(0);
        for pair in centers.windows(2) {
            let mid = (pair[0] + pair[1]) / 2.0;
            bounds.push(sorted.partition_point(|&v| v <= mid));
        }
        bounds.push(n);

        let mut shift: f64 = 0.0;
        for (j, center) in centers.iter_mut().enumerate() {
            let (lo, hi) = (bounds[j], bounds[j + 1]);
            if hi > lo {
                let updated = (prefix[hi] - prefix[lo]) / (hi - lo) as f64;
                shift = shift.max((updated - *center).abs());
                *center = updated;
            }
        }
        // Keep centers ascending
        centers.sort_by(f64::total_cmp);
        if shift < TOLERANCE {
            break;
        }
    }
    centers
}

/// Midpoints between adjacent sorted cluster centers (`k - 1` cuts).
pub fn cut_points(values: &[f64], k: usize) -> Vec<f64> {
    centers(values, k)
        .windows(2)
        .map(|pair| (pair[0] + pair[1]) / 2.0)
        .collect()
}
