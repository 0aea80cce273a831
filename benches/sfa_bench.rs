use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sfa_rs::algorithms::mft::mft;
use sfa_rs::{
    BinningMethod, CoefficientLayout, FourierApproximator, FourierTransform, Sfa, SfaConfig,
};

fn panel(n_series: usize, length: usize) -> Vec<Vec<f64>> {
    (0..n_series)
        .map(|s| {
            (0..length)
                .map(|i| (i as f64 * 0.1 + s as f64).sin() + 0.3 * (i as f64 * 0.37).cos())
                .collect()
        })
        .collect()
}

fn bench_mft_vs_direct(c: &mut Criterion) {
    let mut group = c.benchmark_group("mft_vs_direct");
    let w = 64;
    let layout = CoefficientLayout::new(w, 16, true, true);
    for n in [1_000, 5_000, 10_000] {
        let ts: Vec<f64> = (0..n).map(|i| (i as f64 * 0.1).sin()).collect();
        group.bench_with_input(BenchmarkId::new("mft", n), &n, |b, _| {
            let mut approx = FourierApproximator::new(layout, FourierTransform::Fft);
            b.iter(|| mft(black_box(&ts), &mut approx))
        });
        for mode in [FourierTransform::Dft, FourierTransform::Fft] {
            group.bench_with_input(BenchmarkId::new(mode.as_str(), n), &n, |b, _| {
                let mut approx = FourierApproximator::new(layout, mode);
                b.iter(|| {
                    (0..=ts.len() - w)
                        .map(|i| approx.transform(black_box(&ts[i..i + w])))
                        .collect::<Vec<_>>()
                })
            });
        }
    }
    group.finish();
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    group.sample_size(10);
    let x = panel(200, 256);
    let y: Vec<usize> = (0..x.len()).map(|i| i % 3).collect();
    for method in BinningMethod::ALL {
        let sfa = Sfa::new(SfaConfig::new(8, 4, 32).with_binning_method(method));
        group.bench_function(method.as_str(), |b| {
            b.iter(|| sfa.fit_supervised(black_box(&x), black_box(&y)))
        });
    }
    let anova = Sfa::new(SfaConfig::new(8, 4, 32).with_anova(true));
    group.bench_function("anova", |b| {
        b.iter(|| anova.fit_supervised(black_box(&x), black_box(&y)))
    });
    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    group.sample_size(10);
    let x = panel(200, 512);
    for levels in [1, 3] {
        let model = Sfa::new(SfaConfig::new(8, 4, 64).with_levels(levels).with_bigrams(true))
            .fit(&x)
            .unwrap();
        group.bench_with_input(BenchmarkId::new("levels", levels), &levels, |b, _| {
            b.iter(|| model.transform(black_box(&x)))
        });
    }
    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_transform_thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_thread_scaling");
    group.sample_size(10);

    let x = panel(400, 512);
    let model = Sfa::new(SfaConfig::new(8, 4, 64)).fit(&x).unwrap();

    for threads in [1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(threads),
            &threads,
            |b, &threads| {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .unwrap();
                b.iter(|| pool.install(|| model.transform(black_box(&x))))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_mft_vs_direct, bench_fit, bench_transform);

#[cfg(feature = "parallel")]
criterion_group!(parallel_benches, bench_transform_thread_scaling);

#[cfg(feature = "parallel")]
criterion_main!(benches, parallel_benches);

#[cfg(not(feature = "parallel"))]
criterion_main!(benches);
