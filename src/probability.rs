use crate::rating::RatingScalar;

/// A win probability in the range `0.0..=1.0`.
///
/// Mathematically the logistic curve never reaches either end, but extreme
/// rating gaps can round to exactly `0.0` or `1.0`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Probability(pub f64);

impl Probability {
    #[inline]
    pub fn opposite(self) -> Probability {
        Probability(1.0 - self.0)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Negative natural log of the probability. This is the log-loss of an
    /// outcome that was predicted with this probability, and is `+inf` when
    /// the probability is exactly `0.0`.
    #[inline]
    pub fn surprisal(self) -> f64 {
        -self.0.ln()
    }
}

/// Probability that a competitor rated `first` defeats a competitor rated
/// `second` on neutral ground.
pub fn win_probability(RatingScalar(first): RatingScalar, RatingScalar(second): RatingScalar) -> Probability {
    Probability(1.0 / (1.0 + 10f64.powf((second - first) / 400.0)))
}
