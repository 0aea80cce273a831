use tracing::{debug, instrument, warn};

use crate::algorithms::anova::{f_statistics, select_top};
use crate::algorithms::binning::learn_breakpoints;
use crate::algorithms::common::{collect_panel, map_indices, training_window_starts};
use crate::algorithms::fourier::{CoefficientLayout, FourierApproximator};
use crate::algorithms::pyramid::{effective_word_length, level_windows, LevelTags};
use crate::algorithms::word::WordEncoder;
use crate::core::config::{BagBackend, SfaConfig};
use crate::core::error::{Result, SfaError};
use crate::core::model::{LevelModel, SfaModel};
use crate::core::word_counts::KeyLayout;

/// Class ids aligned with the training series plus the number of classes.
#[derive(Debug, Clone, Copy)]
pub struct ClassLabels<'a> {
    pub ids: &'a [usize],
    pub n_classes: usize,
}

/// Learn coefficient selection and breakpoints for every pyramid level.
///
/// Training windows are the non-overlapping windows of each series (the last
/// one aligned to the end). The returned model is complete; nothing is
/// exposed if any level fails.
#[instrument(
    skip_all,
    fields(
        n_series = x.len(),
        window_size = config.window_size,
        levels = config.levels
    )
)]
pub fn fit<S: AsRef<[f64]> + Sync>(
    config: &SfaConfig,
    x: &[S],
    labels: Option<ClassLabels<'_>>,
) -> Result<SfaModel> {
    config.validate()?;
    let panel = collect_panel(x)?;
    let series_length = panel[0].len();

    if config.window_size > series_length {
        return Err(SfaError::InvalidParameter {
            name: "window_size",
            reason: format!(
                "{} exceeds the series length {series_length}",
                config.window_size
            ),
        });
    }
    if let Some(labels) = labels {
        if labels.ids.len() != panel.len() {
            return Err(SfaError::LabelMismatch {
                series: panel.len(),
                labels: labels.ids.len(),
            });
        }
    } else if config.anova {
        return Err(SfaError::MissingLabels("anova coefficient selection"));
    } else if config.binning_method.is_supervised() {
        return Err(SfaError::MissingLabels("information-gain binning"));
    }

    let tags = LevelTags::new(config.levels, config.bigrams);
    let key_layout = KeyLayout::new(tags.n_tags() as u64);

    let levels = level_windows(config.window_size, config.levels)
        .into_iter()
        .enumerate()
        .map(|(level, window_size)| {
            fit_level(config, &panel, labels, level, window_size, key_layout)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SfaModel {
        config: config.clone(),
        series_length,
        levels,
        tags,
        key_layout,
    })
}

fn fit_level(
    config: &SfaConfig,
    panel: &[&[f64]],
    labels: Option<ClassLabels<'_>>,
    level: usize,
    window_size: usize,
    key_layout: KeyLayout,
) -> Result<LevelModel> {
    let word_length = effective_word_length(config.word_length, window_size, config.norm);
    if word_length < config.word_length {
        warn!(
            level,
            window_size,
            requested = config.word_length,
            word_length,
            "word length exceeds available coefficients, clamping"
        );
    }
    let encoder = check_word_space(config, word_length, key_layout)?;

    let max_length = CoefficientLayout::max_dft_length(window_size, config.norm);
    let candidate_length = if config.anova {
        max_length
    } else {
        round_up_even(word_length)
    };
    let candidate = CoefficientLayout::new(
        window_size,
        candidate_length,
        config.norm,
        config.lower_bounding,
    );

    // Training coefficients, one row per (series, window)
    let starts = training_window_starts(panel[0].len(), window_size);
    let per_series: Vec<Vec<Vec<f64>>> = map_indices(panel.len(), |i| {
        let mut approximator = FourierApproximator::new(candidate, config.fourier_transform);
        starts
            .iter()
            .map(|&s| approximator.transform(&panel[i][s..s + window_size]))
            .collect()
    });

    let mut columns = vec![Vec::with_capacity(panel.len() * starts.len()); candidate_length];
    for row in per_series.iter().flatten() {
        for (column, &v) in columns.iter_mut().zip(row) {
            column.push(v);
        }
    }
    let window_labels: Option<Vec<usize>> = labels.map(|l| {
        l.ids
            .iter()
            .flat_map(|&y| std::iter::repeat(y).take(starts.len()))
            .collect()
    });
    let n_classes = labels.map_or(0, |l| l.n_classes);

    let support: Vec<usize> = match (&window_labels, config.anova) {
        (Some(y), true) => select_top(&f_statistics(&columns, y, n_classes), word_length),
        _ => (0..word_length).collect(),
    };
    let dft_length = match support.last() {
        Some(&last) if config.anova => round_up_even(last + 1),
        _ => candidate_length,
    };

    let selected: Vec<Vec<f64>> = support
        .iter()
        .map(|&j| std::mem::take(&mut columns[j]))
        .collect();
    let breakpoints = learn_breakpoints(
        &selected,
        window_labels.as_deref(),
        n_classes,
        config.binning_method,
        config.alphabet_size,
    );

    debug!(
        level,
        window_size,
        dft_length,
        support = ?support,
        training_windows = selected.first().map_or(0, Vec::len),
        "fitted level"
    );

    Ok(LevelModel {
        level,
        layout: CoefficientLayout::new(window_size, dft_length, config.norm, config.lower_bounding),
        mode: config.fourier_transform,
        support,
        breakpoints,
        encoder,
    })
}

/// Build the encoder and check every word (and bigram) fits the bag keys.
fn check_word_space(
    config: &SfaConfig,
    word_length: usize,
    key_layout: KeyLayout,
) -> Result<WordEncoder> {
    let encoder = WordEncoder::new(word_length, config.alphabet_size)?;
    let (letters, space) = if config.bigrams {
        (2 * word_length, encoder.bigram_space()?)
    } else {
        (word_length, encoder.word_space())
    };
    if config.backend == BagBackend::Typed && !key_layout.fits(space - 1) {
        return Err(SfaError::WordOverflow {
            letters,
            alphabet_size: config.alphabet_size,
        });
    }
    Ok(encoder)
}

#[inline]
fn round_up_even(n: usize) -> usize {
    n + n % 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BinningMethod;

    fn panel(n_series: usize, len: usize) -> Vec<Vec<f64>> {
        (0..n_series)
            .map(|s| {
                (0..len)
                    .map(|i| ((i as f64) * 0.2 + s as f64).sin() + (s % 3) as f64 * 0.1)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_round_up_even() {
        assert_eq!(round_up_even(5), 6);
        assert_eq!(round_up_even(6), 6);
        assert_eq!(round_up_even(0), 0);
    }

    #[test]
    fn test_truncation_support_and_length() {
        let x = panel(6, 64);
        let model = fit(&SfaConfig::new(5, 4, 16), &x, None).unwrap();
        assert_eq!(model.support(), &[0, 1, 2, 3, 4]);
        assert_eq!(model.dft_length(), 6);
        assert_eq!(model.breakpoints().shape(), (5, 4));
    }

    #[test]
    fn test_clamped_word_length() {
        let x = panel(4, 40);
        // Window 6 gives 4 complex coefficients = 8 values
        let model = fit(&SfaConfig::new(12, 3, 6), &x, None).unwrap();
        assert_eq!(model.word_length(), 8);
        assert_eq!(model.breakpoints().shape(), (8, 3));
    }

    #[test]
    fn test_window_longer_than_series() {
        let x = panel(3, 10);
        let err = fit(&SfaConfig::new(4, 4, 11), &x, None).unwrap_err();
        assert!(matches!(err, SfaError::InvalidParameter { name: "window_size", .. }));
    }

    #[test]
    fn test_supervised_needs_labels() {
        let x = panel(4, 32);
        let ig = SfaConfig::new(4, 4, 8).with_binning_method(BinningMethod::InformationGain);
        assert!(matches!(fit(&ig, &x, None), Err(SfaError::MissingLabels(_))));

        let ids = [0, 1, 0];
        let labels = ClassLabels { ids: &ids, n_classes: 2 };
        assert_eq!(
            fit(&ig, &x, Some(labels)).unwrap_err(),
            SfaError::LabelMismatch { series: 4, labels: 3 }
        );
    }

    #[test]
    fn test_anova_support_within_dft_length() {
        let x = panel(8, 48);
        let ids = [0, 1, 2, 0, 1, 2, 0, 1];
        let labels = ClassLabels { ids: &ids, n_classes: 3 };
        let config = SfaConfig::new(4, 4, 12).with_anova(true);
        let model = fit(&config, &x, Some(labels)).unwrap();
        let support = model.support();
        assert_eq!(support.len(), 4);
        assert!(support.windows(2).all(|p| p[0] < p[1]));
        assert!(support[3] < model.dft_length());
        assert_eq!(model.dft_length() % 2, 0);
    }

    #[test]
    fn test_typed_backend_overflow() {
        let x = panel(2, 80);
        // 8^21 words times 4 tags exceeds a u64 key
        let config = SfaConfig::new(21, 8, 64)
            .with_levels(4)
            .with_backend(BagBackend::Typed);
        assert!(matches!(fit(&config, &x, None), Err(SfaError::WordOverflow { .. })));
        assert!(fit(&config.clone().with_backend(BagBackend::Generic), &x, None).is_ok());
    }

    #[test]
    fn test_generic_backend_bigram_overflow() {
        let x = panel(2, 80);
        // 4^17 words fit, 4^34 bigrams do not
        let config = SfaConfig::new(17, 4, 64).with_backend(BagBackend::Generic);
        assert!(fit(&config, &x, None).is_ok());
        assert_eq!(
            fit(&config.with_bigrams(true), &x, None).unwrap_err(),
            SfaError::WordOverflow {
                letters: 34,
                alphabet_size: 4
            }
        );
    }
}
