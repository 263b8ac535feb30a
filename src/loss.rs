use std::{cmp::Ordering, fmt};

use compensated_summation::KahanBabuskaNeumaier;
use ordered_float::OrderedFloat;

use crate::Probability;

/// Total log-loss over a set of scored games. Lower is better.
///
/// `+inf` is a legitimate value: it means at least one observed outcome was
/// predicted with probability `0.0`.
#[derive(Debug, Copy, Clone)]
pub struct Loss(pub f64);

impl Loss {
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        self.0 == f64::INFINITY
    }

    #[inline]
    pub fn sort_key(self) -> OrderedFloat<f64> {
        OrderedFloat(self.0)
    }
}

impl PartialEq for Loss {
    fn eq(&self, other: &Loss) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Loss {}

impl PartialOrd for Loss {
    fn partial_cmp(&self, other: &Loss) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Loss {
    fn cmp(&self, other: &Loss) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Loss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            f.write_str("inf")
        } else {
            write!(f, "{:.6}", self.0)
        }
    }
}

/// Running sum of surprisals.
///
/// Compensated summation does not survive an infinite term (the correction
/// becomes `inf - inf`), so infinity is tracked separately and saturates.
#[derive(Debug, Default)]
pub struct LogLoss {
    total: KahanBabuskaNeumaier<f64>,
    infinite: bool,
    games: u64,
}

impl LogLoss {
    pub fn add(&mut self, observed: Probability) {
        let surprisal = observed.surprisal();
        if surprisal.is_infinite() {
            self.infinite = true;
        } else {
            self.total += surprisal;
        }
        self.games += 1;
    }

    pub fn total(&self) -> Loss {
        if self.infinite {
            Loss(f64::INFINITY)
        } else {
            Loss(self.total.total())
        }
    }

    pub fn games(&self) -> u64 {
        self.games
    }

    /// Mean loss per scored game, or `NaN` if nothing was scored.
    pub fn mean(&self) -> f64 {
        self.total().value() / self.games as f64
    }
}
