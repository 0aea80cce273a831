#![allow(dead_code)]

use std::f64::consts::TAU;

/// Deterministic pseudo-noise in `(-1, 1)`.
pub fn noise(seed: f64) -> f64 {
    ((seed * 12.9898).sin() * 43758.5453).fract()
}

/// Two-class dataset: class `a` oscillates at bin 5 of `period`, class `b` at bin 7.
///
/// Series are interleaved by class, so the labels read `a, b, a, b, ...`.
pub fn two_class_dataset(
    n_series: usize,
    length: usize,
    period: usize,
) -> (Vec<Vec<f64>>, Vec<&'static str>) {
    let mut x = Vec::with_capacity(n_series);
    let mut y = Vec::with_capacity(n_series);
    for s in 0..n_series {
        let (label, bin) = if s % 2 == 0 { ("a", 5.0) } else { ("b", 7.0) };
        let series = (0..length)
            .map(|i| {
                let t = i as f64;
                (TAU * bin * t / period as f64).sin() + 0.3 * noise(s as f64 * 1000.0 + t + 0.5)
            })
            .collect();
        x.push(series);
        y.push(label);
    }
    (x, y)
}

/// Smooth random-walk-like series for unsupervised tests.
pub fn wandering_series(n_series: usize, length: usize) -> Vec<Vec<f64>> {
    (0..n_series)
        .map(|s| {
            let mut level = 0.0;
            (0..length)
                .map(|i| {
                    level += noise(s as f64 * 7919.0 + i as f64 + 0.25);
                    level + (i as f64 * 0.17 + s as f64).sin()
                })
                .collect()
        })
        .collect()
}
