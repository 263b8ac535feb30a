use std::fmt;

use crate::{RatingDifference, Round};

/// Tunable inputs of a replay. A candidate is never modified once proposed;
/// derived candidates are built with [`ParameterSet::nudged`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    /// Rating points at stake in a game (the Elo *k*).
    pub update_rate: f64,
    pub location_advantage: RatingDifference,
    /// Fraction of its distance from the initial rating that a rating keeps
    /// between seasons.
    pub regression_factor: f64,
    /// Update rate by round, starting at round 1. Overrides `update_rate`
    /// for the rounds it covers.
    pub round_update_rates: Option<Vec<f64>>,
}

/// Names a single tunable value in a [`ParameterSet`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    UpdateRate,
    LocationAdvantage,
    RegressionFactor,
    RoundUpdateRate(Round),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Field::UpdateRate => f.write_str("update_rate"),
            Field::LocationAdvantage => f.write_str("location_advantage"),
            Field::RegressionFactor => f.write_str("regression_factor"),
            Field::RoundUpdateRate(round) => write!(f, "round_update_rates[{round}]"),
        }
    }
}

impl ParameterSet {
    pub fn new(update_rate: f64, location_advantage: RatingDifference, regression_factor: f64) -> ParameterSet {
        ParameterSet {
            update_rate,
            location_advantage,
            regression_factor,
            round_update_rates: None,
        }
    }

    /// Adds a per-round table of `rounds` entries, each starting at the
    /// scalar update rate.
    #[must_use]
    pub fn with_round_update_rates(self, rounds: usize) -> ParameterSet {
        ParameterSet {
            round_update_rates: Some(vec![self.update_rate; rounds]),
            ..self
        }
    }

    /// Update rate that applies to games in `round`.
    pub fn update_rate_for(&self, round: Round) -> f64 {
        self.round_update_rates
            .as_deref()
            .zip(round.index())
            .and_then(|(rates, index)| rates.get(index))
            .copied()
            .unwrap_or(self.update_rate)
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::UpdateRate => Some(self.update_rate),
            Field::LocationAdvantage => Some(self.location_advantage.0),
            Field::RegressionFactor => Some(self.regression_factor),
            Field::RoundUpdateRate(round) => self
                .round_update_rates
                .as_deref()
                .zip(round.index())
                .and_then(|(rates, index)| rates.get(index))
                .copied(),
        }
    }

    /// A copy with `delta` added to one field. Returns `None` if the field
    /// does not exist in this set.
    #[must_use]
    pub fn nudged(&self, field: Field, delta: f64) -> Option<ParameterSet> {
        let mut nudged = self.clone();
        match field {
            Field::UpdateRate => nudged.update_rate += delta,
            Field::LocationAdvantage => nudged.location_advantage.0 += delta,
            Field::RegressionFactor => nudged.regression_factor += delta,
            Field::RoundUpdateRate(round) => {
                let index = round.index()?;
                *nudged.round_update_rates.as_mut()?.get_mut(index)? += delta;
            }
        }
        Some(nudged)
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "k={} location_advantage={} regression_factor={}",
            self.update_rate, self.location_advantage.0, self.regression_factor
        )?;
        if let Some(rates) = &self.round_update_rates {
            write!(f, " round_update_rates={rates:?}")?;
        }
        Ok(())
    }
}
