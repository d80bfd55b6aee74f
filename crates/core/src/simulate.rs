use crate::{RngState, SimCard, SimDeck};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationConfig {
    pub trials: u32,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 20_000,
            seed: 0xC0FFEE,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("simulation needs at least one trial")]
    NoTrials,
    #[error("{tracked} tracked copies do not fit in a deck of {deck}")]
    TooManyCopies { tracked: u32, deck: u32 },
}

/// Observed frequencies from repeated shuffled draws.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationReport {
    pub trials: u32,
    pub draw_count: u32,
    /// Fraction of trials that drew at least one copy of each tracked card.
    pub per_target: Vec<f64>,
    /// Fraction of trials that drew at least one copy of every tracked card.
    pub all_targets: f64,
}

/// Estimates, by shuffling and drawing `draw_count` cards `config.trials`
/// times, how often each tracked card shows up. Unlike the combined odds in a
/// calculation result, `all_targets` is the true joint frequency.
///
/// A draw larger than the deck is reported as zero for every target, the same
/// value [`crate::hypergeometric`] gives when the sample exceeds the population.
pub fn simulate_draws(
    cards_in_deck: u32,
    copies: &[u32],
    draw_count: u32,
    config: SimulationConfig,
) -> Result<SimulationReport, SimulationError> {
    if config.trials == 0 {
        return Err(SimulationError::NoTrials);
    }
    let mut deck = SimDeck::build(cards_in_deck, copies).ok_or(SimulationError::TooManyCopies {
        tracked: copies.iter().sum(),
        deck: cards_in_deck,
    })?;
    if draw_count > cards_in_deck {
        return Ok(SimulationReport {
            trials: config.trials,
            draw_count,
            per_target: vec![0.0; copies.len()],
            all_targets: 0.0,
        });
    }
    let mut rng = RngState::from_seed(config.seed);
    let mut hits = vec![0u32; copies.len()];
    let mut all_hits = 0u32;
    let mut seen = vec![false; copies.len()];
    for _ in 0..config.trials {
        seen.iter_mut().for_each(|flag| *flag = false);
        for card in deck.draw(&mut rng, draw_count as usize) {
            if let SimCard::Target(idx) = card {
                seen[*idx] = true;
            }
        }
        for (count, found) in hits.iter_mut().zip(&seen) {
            if *found {
                *count += 1;
            }
        }
        if seen.iter().all(|found| *found) {
            all_hits += 1;
        }
    }
    let trials = config.trials as f64;
    Ok(SimulationReport {
        trials: config.trials,
        draw_count,
        per_target: hits.iter().map(|count| *count as f64 / trials).collect(),
        all_targets: all_hits as f64 / trials,
    })
}

/// Monte Carlo counterpart of [`crate::hypergeometric`], with the same
/// zero-probability edge cases.
pub fn estimate_at_least(
    population: u32,
    successes: u32,
    sample_size: u32,
    min_successes: u32,
    config: SimulationConfig,
) -> Result<f64, SimulationError> {
    if config.trials == 0 {
        return Err(SimulationError::NoTrials);
    }
    if sample_size > population
        || successes > population
        || min_successes > successes
        || min_successes > sample_size
    {
        return Ok(0.0);
    }
    let mut deck = SimDeck::build(population, &[successes]).ok_or(
        SimulationError::TooManyCopies {
            tracked: successes,
            deck: population,
        },
    )?;
    let mut rng = RngState::from_seed(config.seed);
    let mut hits = 0u32;
    for _ in 0..config.trials {
        let drawn = deck
            .draw(&mut rng, sample_size as usize)
            .iter()
            .filter(|card| matches!(card, SimCard::Target(_)))
            .count() as u32;
        if drawn >= min_successes {
            hits += 1;
        }
    }
    Ok(hits as f64 / config.trials as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypergeometric;

    const TOLERANCE: f64 = 0.02;

    #[test]
    fn estimate_tracks_closed_form() {
        let config = SimulationConfig::default();
        for (population, successes, sample, min) in
            [(20, 1, 7, 1), (20, 2, 7, 1), (13, 1, 7, 1), (14, 2, 3, 1), (18, 2, 6, 2)]
        {
            let exact = hypergeometric(population, successes, sample, min);
            let estimate =
                estimate_at_least(population, successes, sample, min, config).expect("simulate");
            assert!(
                (exact - estimate).abs() < TOLERANCE,
                "({population}, {successes}, {sample}, {min}): exact {exact}, estimate {estimate}"
            );
        }
    }

    #[test]
    fn estimate_shares_edge_cases() {
        let config = SimulationConfig::default();
        assert_eq!(estimate_at_least(5, 1, 6, 1, config), Ok(0.0));
        assert_eq!(estimate_at_least(20, 1, 7, 2, config), Ok(0.0));
        assert_eq!(
            estimate_at_least(20, 1, 7, 1, SimulationConfig { trials: 0, seed: 1 }),
            Err(SimulationError::NoTrials)
        );
    }

    #[test]
    fn joint_frequency_is_below_independent_product_for_disjoint_targets() {
        let report = simulate_draws(12, &[1, 1], 3, SimulationConfig::default()).expect("run");
        let single = hypergeometric(12, 1, 3, 1);
        for observed in &report.per_target {
            assert!((observed - single).abs() < TOLERANCE);
        }
        // Exact joint value: C(10,1) / C(12,3) = 10/220.
        let joint = 10.0 / 220.0;
        assert!((report.all_targets - joint).abs() < TOLERANCE);
        assert!(joint < single * single);
    }

    #[test]
    fn rejects_impossible_decks() {
        let config = SimulationConfig::default();
        assert_eq!(
            simulate_draws(3, &[2, 2], 1, config),
            Err(SimulationError::TooManyCopies { tracked: 4, deck: 3 })
        );
    }

    #[test]
    fn oversized_draw_reports_zero_like_closed_form() {
        let config = SimulationConfig::default();
        let report = simulate_draws(3, &[1, 2], 4, config).expect("run");
        assert_eq!(report.trials, config.trials);
        assert_eq!(report.draw_count, 4);
        assert_eq!(report.per_target, vec![0.0, 0.0]);
        assert_eq!(report.all_targets, 0.0);
        assert_eq!(hypergeometric(3, 1, 4, 1), 0.0);
    }

    #[test]
    fn same_seed_gives_same_report() {
        let config = SimulationConfig {
            trials: 500,
            seed: 42,
        };
        assert_eq!(
            simulate_draws(15, &[2, 1], 5, config),
            simulate_draws(15, &[2, 1], 5, config)
        );
    }
}
