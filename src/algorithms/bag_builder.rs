use tracing::{debug, instrument};

use crate::algorithms::common::map_indices;
use crate::bags::Bag;
use crate::core::error::Result;
use crate::core::model::SfaModel;
use crate::core::word_counts::{WordCounts, WordKey};

/// Bag of words of one series over every pyramid level.
///
/// Each window contributes its unigram unless numerosity reduction is on and
/// the word repeats the one at the preceding position. With bigrams enabled a
/// counted unigram also adds the bigram of the preceding window's word and its
/// own. Callers check that `series` covers the base window.
pub fn build_bag(model: &SfaModel, series: &[f64]) -> Bag {
    let config = model.config();
    let tags = model.tags();
    let mut bag = Bag::new(config.backend, model.key_layout());

    for level in model.levels() {
        let unigram_tag = tags.unigram(level.level());
        let bigram_tag = tags.bigram(level.level());
        let encoder = level.encoder();
        let mut previous: Option<u64> = None;

        level.for_each_word(series, |_, word| {
            let repeated = previous == Some(word);
            if !(config.numerosity_reduction && repeated) {
                bag.increment(WordKey::new(word, unigram_tag));
                if config.bigrams {
                    if let Some(prev) = previous {
                        bag.increment(WordKey::new(encoder.bigram(prev, word), bigram_tag));
                    }
                }
            }
            previous = Some(word);
        });
    }
    bag
}

/// Bags for a collection of series, index-aligned with the input.
///
/// Series are independent and are processed in parallel (on a dedicated pool
/// when `n_jobs` is set). Series may differ in length but must each cover the
/// base window.
#[instrument(skip_all, fields(n_series = x.len()))]
pub fn transform<S: AsRef<[f64]> + Sync>(model: &SfaModel, x: &[S]) -> Result<Vec<Bag>> {
    let series: Vec<&[f64]> = x.iter().map(AsRef::as_ref).collect();
    for (index, s) in series.iter().enumerate() {
        model.check_length(index, s)?;
    }

    let bags = run_on_pool(model.config().n_jobs, || {
        map_indices(series.len(), |i| build_bag(model, series[i]))
    })?;
    debug!(
        distinct_words = bags.iter().map(|b| b.len()).sum::<usize>(),
        "transformed series"
    );
    Ok(bags)
}

#[cfg(feature = "parallel")]
fn run_on_pool<T, F>(n_jobs: Option<usize>, job: F) -> Result<T>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    use crate::core::error::SfaError;

    match n_jobs {
        None => Ok(job()),
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| SfaError::ThreadPool(e.to_string()))?;
            Ok(pool.install(job))
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn run_on_pool<T, F>(_n_jobs: Option<usize>, job: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    Ok(job())
}
