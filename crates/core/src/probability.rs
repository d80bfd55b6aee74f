use crate::{combination, ln_combination};

/// Probability of drawing at least `min_successes` copies of a target when
/// drawing `sample_size` cards without replacement from `population` cards,
/// `successes` of which are the target.
///
/// Impossible configurations short-circuit to `0.0` in this order: drawing
/// more than the population, more targets than the population, needing more
/// copies than exist, needing more copies than cards drawn.
pub fn hypergeometric(
    population: u32,
    successes: u32,
    sample_size: u32,
    min_successes: u32,
) -> f64 {
    if sample_size > population
        || successes > population
        || min_successes > successes
        || min_successes > sample_size
    {
        return 0.0;
    }
    let drawn_range = min_successes..=successes.min(sample_size);
    // sample_size <= population, so this is at least 1.
    let denominator = combination(population, sample_size);
    if denominator == u128::MAX {
        let ln_denominator = ln_combination(population, sample_size);
        let total: f64 = drawn_range
            .map(|drawn| {
                (ln_combination(successes, drawn)
                    + ln_combination(population - successes, sample_size - drawn)
                    - ln_denominator)
                    .exp()
            })
            .sum();
        return total.min(1.0);
    }
    let denominator = denominator as f64;
    drawn_range
        .map(|drawn| {
            let numerator = combination(successes, drawn) as f64
                * combination(population - successes, sample_size - drawn) as f64;
            numerator / denominator
        })
        .sum()
}
