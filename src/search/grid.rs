use std::str::FromStr;

use thiserror::Error;

use crate::{
    search::{Proposal, SearchStrategy},
    Loss, ParameterSet, RatingDifference, SearchError,
};

/// Closed range `min..=max` sampled every `step`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Range {
    pub fn new(min: f64, max: f64, step: f64) -> Range {
        assert!(min.is_finite() && max.is_finite());
        assert!(step > 0.0 && step.is_finite());
        Range { min, max, step }
    }

    pub fn single(value: f64) -> Range {
        Range::new(value, value, 1.0)
    }

    /// Sample points. Each is computed from its index rather than by repeated
    /// addition, and a point within rounding distance of `max` is included.
    pub fn values(&self) -> Vec<f64> {
        let tolerance = self.step * 1e-9;
        (0u32..)
            .map(|i| self.min + f64::from(i) * self.step)
            .take_while(|&value| value <= self.max + tolerance)
            .collect()
    }
}

#[derive(Debug, Error)]
#[error("invalid range, expected MIN,MAX,STEP with STEP > 0")]
pub struct InvalidRange;

impl FromStr for Range {
    type Err = InvalidRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ',');
        let mut next = || -> Result<f64, InvalidRange> {
            parts
                .next()
                .ok_or(InvalidRange)?
                .trim()
                .parse()
                .map_err(|_| InvalidRange)
        };
        let (min, max, step) = (next()?, next()?, next()?);
        if !(min.is_finite() && max.is_finite() && step.is_finite() && step > 0.0) {
            return Err(InvalidRange);
        }
        Ok(Range { min, max, step })
    }
}

/// Every combination of update rate, location advantage and regression
/// factor, with update rate varying slowest and regression factor fastest.
/// Ignores feedback.
#[derive(Debug, Clone)]
pub struct GridStrategy {
    update_rates: Vec<f64>,
    location_advantages: Vec<f64>,
    regression_factors: Vec<f64>,
    next: usize,
}

impl Default for GridStrategy {
    fn default() -> GridStrategy {
        GridStrategy::new(
            Range::new(10.0, 80.0, 5.0),
            Range::new(0.0, 300.0, 50.0),
            Range::new(0.25, 1.3, 0.2),
        )
    }
}

impl GridStrategy {
    pub fn new(update_rate: Range, location_advantage: Range, regression_factor: Range) -> GridStrategy {
        GridStrategy {
            update_rates: update_rate.values(),
            location_advantages: location_advantage.values(),
            regression_factors: regression_factor.values(),
            next: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.update_rates.len() * self.location_advantages.len() * self.regression_factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Starts the enumeration over.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    fn candidate(&self, index: usize) -> Option<ParameterSet> {
        if index >= self.len() {
            return None;
        }
        let inner = self.regression_factors.len();
        let middle = self.location_advantages.len() * inner;
        Some(ParameterSet::new(
            self.update_rates[index / middle],
            RatingDifference(self.location_advantages[index % middle / inner]),
            self.regression_factors[index % inner],
        ))
    }

    /// All candidates in enumeration order.
    pub fn candidates(&self) -> Vec<ParameterSet> {
        (0..self.len()).filter_map(|index| self.candidate(index)).collect()
    }
}

impl SearchStrategy for GridStrategy {
    fn propose(&mut self, _feedback: Option<Loss>) -> Result<Proposal, SearchError> {
        Ok(match self.candidate(self.next) {
            Some(candidate) => {
                self.next += 1;
                Proposal::Candidate(candidate)
            }
            None => Proposal::Exhausted,
        })
    }
}
