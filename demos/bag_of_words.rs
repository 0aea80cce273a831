//! Bag-of-words features for a two-class dataset.
//!
//! Class `up` carries a slow oscillation, class `down` a faster one. The
//! transform is fitted with ANOVA coefficient selection and information-gain
//! binning, then every series is turned into a bag of SFA words.
//!
//! Run with: cargo run --release --example bag_of_words

use sfa_rs::{BinningMethod, Sfa, SfaConfig, WordCounts};

fn main() -> sfa_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let n_series = 20;
    let length = 256;
    let mut x = Vec::with_capacity(n_series);
    let mut y = Vec::with_capacity(n_series);
    for s in 0..n_series {
        let (label, freq) = if s % 2 == 0 { ("up", 0.12) } else { ("down", 0.31) };
        let series: Vec<f64> = (0..length)
            .map(|i| {
                let t = i as f64;
                let carrier = (t * freq + s as f64 * 0.4).sin();
                carrier + 0.2 * ((t * 7.1 + s as f64).sin() * (t * 3.3).cos())
            })
            .collect();
        x.push(series);
        y.push(label);
    }

    let config = SfaConfig::new(6, 4, 32)
        .with_norm(true)
        .with_anova(true)
        .with_bigrams(true)
        .with_levels(2)
        .with_binning_method(BinningMethod::InformationGain);
    let model = Sfa::new(config).fit_supervised(&x, &y)?;

    println!("SFA bag of words");
    println!("================");
    for level in model.levels() {
        println!(
            "level {}: window {}, dft length {}, support {:?}",
            level.level(),
            level.window_size(),
            level.dft_length(),
            level.support()
        );
    }

    let bags = model.transform(&x)?;
    for (i, bag) in bags.iter().enumerate().take(4) {
        println!(
            "\n{} series {i}: {} distinct words, {} total",
            y[i],
            bag.len(),
            bag.total()
        );
        let mut top = bag.entries();
        top.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        for (key, count) in top.into_iter().take(5) {
            println!("  {:<20} {count}", model.word_to_string(key));
        }
    }
    Ok(())
}
