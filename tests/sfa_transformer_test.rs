mod common;

use common::{two_class_dataset, wandering_series};
use sfa_rs::{
    BagBackend, BinningMethod, CoefficientLayout, FourierTransform, Sfa, SfaConfig, SfaError,
    WordCounts,
};

#[test]
fn test_binning_shape_and_default_cuts() {
    let (x, y) = two_class_dataset(10, 150, 32);
    for method in BinningMethod::ALL {
        let config = SfaConfig::new(6, 4, 32).with_binning_method(method);
        let model = Sfa::new(config).fit_supervised(&x, &y).unwrap();
        let bp = model.breakpoints();
        assert_eq!(bp.shape(), (6, 4), "{method}: wrong shape");

        // Row 1 is the imaginary part of the DC coefficient, always 0
        let expected = method.default_cut();
        for c in 0..3 {
            assert_eq!(
                bp.get(1, c),
                expected,
                "{method}: non-informative cut at column {c} is {}",
                bp.get(1, c)
            );
        }
        for row in bp.rows() {
            assert_eq!(row[3], f64::INFINITY, "{method}: missing sentinel");
            assert!(row[..3].windows(2).all(|p| p[0] <= p[1]), "{method}: {row:?}");
        }
    }
}

#[test]
fn test_anova_differs_from_truncation() {
    let (x, y) = two_class_dataset(12, 160, 32);
    let base = SfaConfig::new(4, 4, 32);

    let truncated = Sfa::new(base.clone()).fit_supervised(&x, &y).unwrap();
    let ranked = Sfa::new(base.with_anova(true)).fit_supervised(&x, &y).unwrap();

    assert_eq!(truncated.support(), &[0, 1, 2, 3]);
    assert_eq!(truncated.dft_length(), 4);
    assert_ne!(ranked.dft_length(), truncated.dft_length());
    assert_ne!(ranked.breakpoints(), truncated.breakpoints());

    // Imaginary parts of bins 5 and 7 carry the class signal
    assert!(ranked.support().contains(&11), "support {:?}", ranked.support());
    assert!(ranked.support().contains(&15), "support {:?}", ranked.support());
}

#[test]
fn test_anova_is_deterministic() {
    let (x, y) = two_class_dataset(8, 160, 32);
    let sfa = Sfa::new(SfaConfig::new(4, 4, 32).with_anova(true));
    let a = sfa.fit_supervised(&x, &y).unwrap();
    let b = sfa.fit_supervised(&x, &y).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.transform(&x).unwrap(), b.transform(&x).unwrap());
}

#[test]
fn test_word_length_grid() {
    let (x, y) = two_class_dataset(6, 150, 32);
    for word_length in [6, 7] {
        for alphabet_size in [4, 5] {
            for window_size in [5, 6] {
                for bigrams in [false, true] {
                    for levels in [1, 2] {
                        for transform in [FourierTransform::Fft, FourierTransform::Dft] {
                            let config = SfaConfig::new(word_length, alphabet_size, window_size)
                                .with_bigrams(bigrams)
                                .with_levels(levels)
                                .with_fourier_transform(transform);
                            let label = format!("{config:?}");
                            let model = Sfa::new(config)
                                .fit_supervised(&x, &y)
                                .unwrap_or_else(|e| panic!("fit failed for {label}: {e}"));

                            let available = CoefficientLayout::max_dft_length(window_size, false);
                            assert_eq!(
                                model.breakpoints().shape(),
                                (word_length.min(available), alphabet_size),
                                "{label}"
                            );
                            assert_eq!(model.levels().len(), levels);

                            let bags = model
                                .transform(&x)
                                .unwrap_or_else(|e| panic!("transform failed for {label}: {e}"));
                            assert_eq!(bags.len(), x.len());
                            assert!(bags.iter().all(|b| !b.is_empty()), "{label}");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_backends_render_identically() {
    let x = wandering_series(6, 120);
    let base = SfaConfig::new(5, 4, 20).with_levels(2).with_bigrams(true);
    let generic = Sfa::new(base.clone().with_backend(BagBackend::Generic)).fit(&x).unwrap();
    let typed = Sfa::new(base.with_backend(BagBackend::Typed)).fit(&x).unwrap();

    let generic_bags = generic.transform(&x).unwrap();
    let typed_bags = typed.transform(&x).unwrap();
    for (i, (g, t)) in generic_bags.iter().zip(&typed_bags).enumerate() {
        assert_eq!(g.backend(), BagBackend::Generic);
        assert_eq!(t.backend(), BagBackend::Typed);
        assert_eq!(g.entries(), t.entries(), "series {i}: entries differ");
        assert_eq!(
            generic.bag_to_string(g),
            typed.bag_to_string(t),
            "series {i}: rendered bags differ"
        );
    }
}

#[test]
fn test_rendered_words() {
    let x = wandering_series(4, 80);
    let model = Sfa::new(SfaConfig::new(3, 4, 16).with_levels(2).with_bigrams(true))
        .fit(&x)
        .unwrap();
    let rendered = model.bag_to_string(&model.transform_series(&x[0]).unwrap());
    assert!(rendered.starts_with('{') && rendered.ends_with('}'));
    assert!(rendered.contains("@0"));
    assert!(rendered.contains("@1"));
    assert!(rendered.contains('+'), "no bigram in {rendered}");
}

#[test]
fn test_words_in_range() {
    let x = wandering_series(8, 150);
    let model = Sfa::new(SfaConfig::new(6, 4, 24)).fit(&x).unwrap();
    assert_eq!(model.breakpoints().shape(), (6, 4));

    let bags = model.transform(&x).unwrap();
    assert_eq!(bags.len(), x.len());
    for bag in &bags {
        for (key, count) in bag.entries() {
            assert!(key.word < 4u64.pow(6), "word {} out of range", key.word);
            assert_eq!(key.level, 0);
            assert!(count > 0);
        }
    }
}

#[test]
fn test_transform_errors() {
    let (x, y) = two_class_dataset(6, 100, 20);

    let model = Sfa::new(SfaConfig::new(4, 4, 20)).fit(&x).unwrap();
    let short = vec![vec![0.0; 19]];
    assert_eq!(
        model.transform(&short).unwrap_err(),
        SfaError::IncompatibleInput {
            index: 0,
            length: 19,
            window: 20
        }
    );

    let ig = Sfa::new(SfaConfig::new(4, 4, 20).with_binning_method(BinningMethod::InformationGain));
    assert!(matches!(ig.fit(&x), Err(SfaError::MissingLabels(_))));
    assert!(ig.fit_supervised(&x, &y).is_ok());

    let anova = Sfa::new(SfaConfig::new(4, 4, 20).with_anova(true));
    assert!(matches!(anova.fit(&x), Err(SfaError::MissingLabels(_))));

    let empty: Vec<Vec<f64>> = Vec::new();
    assert_eq!(model_error(&empty), SfaError::EmptyInput);
}

fn model_error(x: &[Vec<f64>]) -> SfaError {
    Sfa::new(SfaConfig::default()).fit(x).unwrap_err()
}

#[test]
fn test_single_class_falls_back() {
    let (x, _) = two_class_dataset(6, 100, 20);
    let y = vec![1u8; x.len()];
    let config = SfaConfig::new(4, 4, 20)
        .with_anova(true)
        .with_binning_method(BinningMethod::InformationGain);
    let model = Sfa::new(config).fit_supervised(&x, &y).unwrap();
    assert_eq!(model.support(), &[0, 1, 2, 3]);
    for row in model.breakpoints().rows() {
        assert!(row[..3].iter().all(|&c| c == f64::MAX));
    }
    assert!(model.transform(&x).is_ok());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "word_length": 6,
        "alphabet_size": 5,
        "binning_method": "information-gain",
        "fourier_transform": "fft",
        "backend": "typed",
        "remove_repeat_words": false
    }"#;
    let config: SfaConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.word_length, 6);
    assert_eq!(config.alphabet_size, 5);
    assert_eq!(config.window_size, SfaConfig::default().window_size);
    assert_eq!(config.binning_method, BinningMethod::InformationGain);
    assert_eq!(config.fourier_transform, FourierTransform::Fft);
    assert_eq!(config.backend, BagBackend::Typed);
    assert!(!config.numerosity_reduction);

    assert!(serde_json::from_str::<SfaConfig>(r#"{"binning_method": "quantile"}"#).is_err());
    assert!(serde_json::from_str::<SfaConfig>(r#"{"fourier_transform": "wavelet"}"#).is_err());
    assert_eq!(
        "quantile".parse::<BinningMethod>(),
        Err(SfaError::UnsupportedBinningMethod("quantile".into()))
    );
}
