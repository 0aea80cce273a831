use std::f64::consts::TAU;

use realfft::num_complex::Complex;

use crate::algorithms::common::WindowStats;
use crate::algorithms::fourier::FourierApproximator;

/// Running state of the moving Fourier transform over one series.
///
/// Shifting the window by one sample updates every tracked coefficient with
/// `X_{i+1}[k] = (X_i[k] - x[i] + x[i+w]) * e^{2*pi*i*k/w}`, which costs
/// O(number of coefficients) instead of a full transform.
#[derive(Debug, Clone)]
pub struct MftState {
    coefs: Vec<Complex<f64>>,
    twiddles: Vec<Complex<f64>>,
    shift: usize,
}

impl MftState {
    /// Seed the state with a direct transform of the first window.
    pub fn new(first_window: &[f64], approximator: &mut FourierApproximator) -> Self {
        let w = first_window.len();
        let first = approximator.layout().first_coefficient();
        let coefs = approximator.raw(first_window);
        let twiddles = (first..first + coefs.len())
            .map(|k| {
                let theta = TAU * (k % w) as f64 / w as f64;
                Complex::new(theta.cos(), theta.sin())
            })
            .collect();
        Self {
            coefs,
            twiddles,
            shift: 0,
        }
    }

    /// Start offset of the window the coefficients currently describe.
    pub fn shift(&self) -> usize {
        self.shift
    }

    /// Unscaled coefficients of the current window.
    pub fn coefficients(&self) -> &[Complex<f64>] {
        &self.coefs
    }

    /// Slide the window by one sample.
    #[inline]
    pub fn advance(&mut self, leaving: f64, entering: f64) {
        let delta = entering - leaving;
        for (c, t) in self.coefs.iter_mut().zip(&self.twiddles) {
            *c = Complex::new(c.re + delta, c.im) * *t;
        }
        self.shift += 1;
    }

    /// Restart from a direct transform of the window starting at `shift`.
    pub fn reseed(
        &mut self,
        window: &[f64],
        shift: usize,
        approximator: &mut FourierApproximator,
    ) {
        self.coefs = approximator.raw(window);
        self.shift = shift;
    }
}

/// Visit the scaled coefficient vector of every window of `ts`, in order.
///
/// `visit` receives the window start and a `dft_length` slice. The recurrence
/// is sequential: window `i + 1` is derived from window `i`. A non-finite
/// sample poisons the running coefficients, so once it has left the window the
/// state is reseeded from a direct transform.
pub fn for_each_window<F>(ts: &[f64], approximator: &mut FourierApproximator, mut visit: F)
where
    F: FnMut(usize, &[f64]),
{
    let layout = *approximator.layout();
    let w = layout.window_size;
    debug_assert!(ts.len() >= w);

    let n_windows = ts.len() - w + 1;
    let stats = WindowStats::compute(ts, w);
    let mut state = MftState::new(&ts[..w], approximator);
    let mut out = vec![0.0; layout.dft_length];

    layout.finish(state.coefficients(), stats.std[0], &mut out);
    visit(0, &out);

    let mut last_bad = ts[..w].iter().rposition(|v| !v.is_finite());
    let mut poisoned = last_bad.is_some();

    for i in 1..n_windows {
        let entering = ts[i + w - 1];
        if !entering.is_finite() {
            last_bad = Some(i + w - 1);
        }
        let clean = last_bad.map_or(true, |b| b < i);
        if poisoned && clean {
            state.reseed(&ts[i..i + w], i, approximator);
            poisoned = false;
        } else {
            state.advance(ts[i - 1], entering);
            poisoned |= !clean;
        }
        layout.finish(state.coefficients(), stats.std[i], &mut out);
        visit(i, &out);
    }
}

/// Coefficient vectors (`dft_length` values each) for all `n - w + 1` windows.
pub fn mft(ts: &[f64], approximator: &mut FourierApproximator) -> Vec<Vec<f64>> {
    let n_windows = ts.len().saturating_sub(approximator.layout().window_size) + 1;
    let mut result = Vec::with_capacity(n_windows);
    for_each_window(ts, approximator, |_, coefs| result.push(coefs.to_vec()));
    result
}
