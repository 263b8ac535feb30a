use crate::{RatingDifference, RatingScalar};

#[derive(Debug, Clone)]
pub struct RatingSystemBuilder {
    initial_rating: RatingScalar,
    location_advantage: RatingDifference,
}

impl Default for RatingSystemBuilder {
    fn default() -> RatingSystemBuilder {
        RatingSystemBuilder::new()
    }
}

impl RatingSystemBuilder {
    pub fn new() -> RatingSystemBuilder {
        RatingSystemBuilder {
            initial_rating: RatingScalar(1000.0),
            location_advantage: RatingDifference(0.0),
        }
    }

    pub fn initial_rating(&mut self, initial_rating: RatingScalar) -> &mut Self {
        assert!(initial_rating.0.is_finite());
        self.initial_rating = initial_rating;
        self
    }

    pub fn location_advantage(&mut self, location_advantage: RatingDifference) -> &mut Self {
        assert!(!location_advantage.0.is_nan());
        self.location_advantage = location_advantage;
        self
    }

    pub fn build(&self) -> RatingSystem {
        RatingSystem {
            initial_rating: self.initial_rating,
            location_advantage: self.location_advantage,
        }
    }
}

/// Constants of the rating scheme that stay fixed while a schedule is
/// replayed.
#[derive(Debug, Clone)]
pub struct RatingSystem {
    initial_rating: RatingScalar,
    location_advantage: RatingDifference,
}

impl Default for RatingSystem {
    fn default() -> RatingSystem {
        RatingSystem::new()
    }
}

impl RatingSystem {
    pub fn builder() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    pub fn new() -> RatingSystem {
        RatingSystem::builder().build()
    }

    /// Rating of a team that has not played yet, and the baseline that
    /// ratings regress towards.
    pub fn initial_rating(&self) -> RatingScalar {
        self.initial_rating
    }

    /// Rating points added for the home side, and subtracted for the
    /// visiting side, when predicting a game that is not on neutral ground.
    pub fn location_advantage(&self) -> RatingDifference {
        self.location_advantage
    }
}
