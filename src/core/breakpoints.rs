/// Per-letter cut values of shape `(word_length, alphabet_size)`.
///
/// Row `r` holds `alphabet_size - 1` non-decreasing interior cuts followed by a
/// `+inf` sentinel, so every value maps to some symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoints {
    values: Vec<f64>,
    alphabet_size: usize,
}

impl Breakpoints {
    /// Build from per-row interior cuts (each of length `alphabet_size - 1`).
    pub fn from_rows(rows: Vec<Vec<f64>>, alphabet_size: usize) -> Self {
        debug_assert!(alphabet_size >= 2);
        let mut values = Vec::with_capacity(rows.len() * alphabet_size);
        for row in rows {
            debug_assert_eq!(row.len(), alphabet_size - 1);
            values.extend(row);
            values.push(f64::INFINITY);
        }
        Self {
            values,
            alphabet_size,
        }
    }

    /// `(word_length, alphabet_size)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.values.len() / self.alphabet_size, self.alphabet_size)
    }

    pub fn n_rows(&self) -> usize {
        self.shape().0
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Full row including the trailing sentinel.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.values[r * self.alphabet_size..(r + 1) * self.alphabet_size]
    }

    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.row(r)[c]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.alphabet_size)
    }

    /// Smallest symbol `s` with `value <= row[s]`.
    ///
    /// NaN and anything above the last interior cut fall into the final bin.
    #[inline]
    pub fn symbol(&self, r: usize, value: f64) -> usize {
        let row = self.row(r);
        row[..self.alphabet_size - 1]
            .iter()
            .position(|&cut| value <= cut)
            .unwrap_or(self.alphabet_size - 1)
    }

    /// Discretize one coefficient vector (one value per row).
    pub fn symbols(&self, coefficients: &[f64]) -> Vec<usize> {
        debug_assert_eq!(coefficients.len(), self.n_rows());
        coefficients
            .iter()
            .enumerate()
            .map(|(r, &v)| self.symbol(r, v))
            .collect()
    }
}
