/// Smallest information gain accepted as a real split.
const MIN_GAIN: f64 = 1e-12;

/// Supervised cut points by best-first entropy splitting.
///
/// Samples are sorted by value and split like decision-tree nodes: at every
/// step the leaf whose best binary split has the largest information gain is
/// split at the midpoint between two adjacent distinct values. Growth stops at
/// `alphabet_size` leaves or when no split gains information. Missing cuts are
/// padded with `f64::MAX`.
pub fn cut_points(
    values: &[f64],
    labels: &[usize],
    n_classes: usize,
    alphabet_size: usize,
) -> Vec<f64> {
    debug_assert_eq!(values.len(), labels.len());
    let n_cuts = alphabet_size - 1;

    let mut samples: Vec<(f64, usize)> = values
        .iter()
        .copied()
        .zip(labels.iter().copied())
        .collect();
    samples.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut leaves = vec![Leaf::new(&samples, 0, samples.len(), n_classes)];
    let mut cuts = Vec::with_capacity(n_cuts);

    while cuts.len() < n_cuts {
        let mut best: Option<(usize, Split)> = None;
        for (i, leaf) in leaves.iter().enumerate() {
            if let Some(split) = leaf.split {
                if best.map_or(true, |(_, b)| split.gain > b.gain) {
                    best = Some((i, split));
                }
            }
        }
        let Some((i, split)) = best else {
            break;
        };

        let leaf = leaves.remove(i);
        cuts.push(split.threshold);
        leaves.insert(i, Leaf::new(&samples, split.at, leaf.end, n_classes));
        leaves.insert(i, Leaf::new(&samples, leaf.start, split.at, n_classes));
    }

    cuts.sort_by(f64::total_cmp);
    cuts.resize(n_cuts, f64::MAX);
    cuts
}

#[derive(Debug, Clone, Copy)]
struct Split {
    /// First sample index of the right child.
    at: usize,
    threshold: f64,
    gain: f64,
}

#[derive(Debug)]
struct Leaf {
    start: usize,
    end: usize,
    split: Option<Split>,
}

impl Leaf {
    fn new(samples: &[(f64, usize)], start: usize, end: usize, n_classes: usize) -> Self {
        Self {
            start,
            end,
            split: best_split(&samples[start..end], n_classes).map(|s| Split {
                at: start + s.at,
                ..s
            }),
        }
    }
}

/// Best split of a sorted run of samples, with `at` relative to the run.
fn best_split(samples: &[(f64, usize)], n_classes: usize) -> Option<Split> {
    let n = samples.len();
    if n < 2 {
        return None;
    }

    let mut total = vec![0usize; n_classes];
    for &(_, y) in samples {
        total[y] += 1;
    }
    let parent = n as f64 * entropy(&total, n);

    let mut left = vec![0usize; n_classes];
    let mut right = total;
    let mut best: Option<Split> = None;
    for i in 1..n {
        let y = samples[i - 1].1;
        left[y] += 1;
        right[y] -= 1;
        if samples[i - 1].0 == samples[i].0 {
            continue;
        }
        let gain = parent - i as f64 * entropy(&left, i) - (n - i) as f64 * entropy(&right, n - i);
        if gain > MIN_GAIN && best.map_or(true, |b| gain > b.gain) {
            best = Some(Split {
                at: i,
                threshold: (samples[i - 1].0 + samples[i].0) / 2.0,
                gain,
            });
        }
    }
    best
}

/// Shannon entropy (bits) of a class histogram with `n` samples.
fn entropy(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / n;
            -p * p.log2()
        })
        .sum()
}
