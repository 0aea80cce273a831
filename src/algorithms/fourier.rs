use std::f64::consts::TAU;
use std::sync::Arc;

use realfft::num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};

use crate::algorithms::common::{window_std, MIN_STD};
use crate::core::config::FourierTransform;

/// Shape of the coefficient vectors produced for one window length.
///
/// A vector holds `dft_length` interleaved values `re_k, im_k` for complex
/// coefficients `k = first_coefficient() ..`. With `norm` the DC term is
/// skipped, so the first retained coefficient is `k = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoefficientLayout {
    pub window_size: usize,
    /// Number of real values retained (always even).
    pub dft_length: usize,
    pub norm: bool,
    pub lower_bounding: bool,
}

impl CoefficientLayout {
    pub fn new(window_size: usize, dft_length: usize, norm: bool, lower_bounding: bool) -> Self {
        debug_assert!(dft_length % 2 == 0);
        Self {
            window_size,
            dft_length,
            norm,
            lower_bounding,
        }
    }

    /// Real values obtainable from a window of length `w`.
    ///
    /// A real transform of `w` samples has `w / 2 + 1` distinct complex
    /// coefficients; `norm` drops the DC pair.
    pub fn max_dft_length(w: usize, norm: bool) -> usize {
        let reals = 2 * (w / 2 + 1);
        if norm {
            reals - 2
        } else {
            reals
        }
    }

    #[inline]
    pub fn first_coefficient(&self) -> usize {
        usize::from(self.norm)
    }

    /// Number of complex coefficients tracked.
    #[inline]
    pub fn n_coefficients(&self) -> usize {
        self.dft_length / 2
    }

    /// Multiplier applied to raw coefficients of a window with the given std.
    #[inline]
    pub fn scale(&self, std: f64) -> f64 {
        let mut factor = if self.lower_bounding {
            1.0
        } else {
            1.0 / (self.window_size as f64).sqrt()
        };
        if self.norm && std >= MIN_STD {
            factor /= std;
        }
        factor
    }

    /// Interleave raw coefficients into `out`, applying scale and lower bounding.
    pub fn finish(&self, raw: &[Complex<f64>], std: f64, out: &mut [f64]) {
        debug_assert_eq!(raw.len(), self.n_coefficients());
        debug_assert_eq!(out.len(), self.dft_length);
        let factor = self.scale(std);
        let imag_sign = if self.lower_bounding { -1.0 } else { 1.0 };
        for (pair, c) in out.chunks_exact_mut(2).zip(raw) {
            pair[0] = c.re * factor;
            pair[1] = c.im * factor * imag_sign;
        }
    }
}

/// Coefficients `k = first .. first + count` by explicit summation.
pub fn dft_coefficients(window: &[f64], first: usize, count: usize) -> Vec<Complex<f64>> {
    let w = window.len();
    (first..first + count)
        .map(|k| {
            let mut acc = Complex::new(0.0, 0.0);
            for (n, &x) in window.iter().enumerate() {
                // Reduce k*n mod w before scaling to keep the angle accurate
                let theta = TAU * ((k * n) % w) as f64 / w as f64;
                acc.re += x * theta.cos();
                acc.im -= x * theta.sin();
            }
            acc
        })
        .collect()
}

/// Single-window Fourier approximation with a cached FFT plan.
///
/// Reuse one instance per thread: the plan and buffers are kept between calls
/// while the window length stays the same.
pub struct FourierApproximator {
    layout: CoefficientLayout,
    mode: FourierTransform,
    planner: RealFftPlanner<f64>,
    plan: Option<Arc<dyn RealToComplex<f64>>>,
    input: Vec<f64>,
    spectrum: Vec<Complex<f64>>,
}

impl FourierApproximator {
    pub fn new(layout: CoefficientLayout, mode: FourierTransform) -> Self {
        Self {
            layout,
            mode,
            planner: RealFftPlanner::new(),
            plan: None,
            input: Vec::new(),
            spectrum: Vec::new(),
        }
    }

    pub fn layout(&self) -> &CoefficientLayout {
        &self.layout
    }

    pub fn mode(&self) -> FourierTransform {
        self.mode
    }

    /// Unscaled complex coefficients of `window`, starting at the first retained one.
    ///
    /// Coefficients beyond the window's Nyquist index are zero-padded.
    pub fn raw(&mut self, window: &[f64]) -> Vec<Complex<f64>> {
        let first = self.layout.first_coefficient();
        let count = self.layout.n_coefficients();
        let available = (window.len() / 2 + 1).saturating_sub(first).min(count);

        let mut coefs = match self.mode {
            FourierTransform::Dft => dft_coefficients(window, first, available),
            FourierTransform::Fft => self.fft_coefficients(window, first, available),
        };
        coefs.resize(count, Complex::new(0.0, 0.0));
        coefs
    }

    /// Scaled, interleaved coefficient vector of length `dft_length`.
    pub fn transform(&mut self, window: &[f64]) -> Vec<f64> {
        let raw = self.raw(window);
        let mut out = vec![0.0; self.layout.dft_length];
        self.layout.finish(&raw, window_std(window), &mut out);
        out
    }

    fn fft_coefficients(
        &mut self,
        window: &[f64],
        first: usize,
        count: usize,
    ) -> Vec<Complex<f64>> {
        let w = window.len();
        if w == 0 || count == 0 {
            return Vec::new();
        }
        let plan = match &self.plan {
            Some(plan) if plan.len() == w => Arc::clone(plan),
            _ => {
                let plan = self.planner.plan_fft_forward(w);
                self.input = plan.make_input_vec();
                self.spectrum = plan.make_output_vec();
                self.plan = Some(Arc::clone(&plan));
                plan
            }
        };

        self.input.copy_from_slice(window);
        if plan.process(&mut self.input, &mut self.spectrum).is_err() {
            // Buffers come from the plan itself, so lengths always match
            return dft_coefficients(window, first, count);
        }
        self.spectrum[first..first + count].to_vec()
    }
}
