use std::ops::{Add, Mul, Neg, Sub};

/// Number representing playing strength, such that the difference between two
/// ratings can be used to predict a win probability. Higher is better.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct RatingScalar(pub f64);

impl From<RatingScalar> for f64 {
    #[inline]
    fn from(RatingScalar(rating): RatingScalar) -> f64 {
        rating
    }
}

impl RatingScalar {
    /// Moves the rating towards (`factor < 1`) or away from (`factor > 1`)
    /// `baseline`.
    #[must_use]
    #[inline]
    pub fn regressed(self, baseline: RatingScalar, factor: f64) -> RatingScalar {
        baseline + (self - baseline) * factor
    }
}

impl Sub<RatingScalar> for RatingScalar {
    type Output = RatingDifference;

    #[inline]
    fn sub(self, rhs: RatingScalar) -> RatingDifference {
        RatingDifference(self.0 - rhs.0)
    }
}

impl Add<RatingDifference> for RatingScalar {
    type Output = RatingScalar;

    #[inline]
    fn add(self, RatingDifference(difference): RatingDifference) -> RatingScalar {
        RatingScalar(self.0 + difference)
    }
}

impl Sub<RatingDifference> for RatingScalar {
    type Output = RatingScalar;

    #[inline]
    fn sub(self, RatingDifference(difference): RatingDifference) -> RatingScalar {
        RatingScalar(self.0 - difference)
    }
}

/// A difference between two ratings, such as a location advantage or the
/// amount a single game moves a rating.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct RatingDifference(pub f64);

impl From<RatingDifference> for f64 {
    #[inline]
    fn from(RatingDifference(difference): RatingDifference) -> f64 {
        difference
    }
}

impl Mul<f64> for RatingDifference {
    type Output = RatingDifference;

    #[inline]
    fn mul(self, scalar: f64) -> RatingDifference {
        RatingDifference(self.0 * scalar)
    }
}

impl Neg for RatingDifference {
    type Output = RatingDifference;

    #[inline]
    fn neg(self) -> RatingDifference {
        RatingDifference(-self.0)
    }
}
