use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use crate::{
    loss::LogLoss, win_probability, Location, Probability, RatingDifference, RatingScalar,
    RatingSystem, Team,
};

/// Current rating of every team that has played at least one game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingState {
    inner: FxHashMap<Team, RatingScalar>,
}

impl RatingState {
    pub fn get(&self, team: &str) -> Option<RatingScalar> {
        self.inner.get(team).copied()
    }

    fn set(&mut self, team: &str, rating: RatingScalar) {
        match self.inner.get_mut(team) {
            Some(current) => *current = rating,
            None => {
                self.inner.insert(team.into(), rating);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, RatingScalar)> {
        self.inner.iter().map(|(team, &rating)| (&**team, rating))
    }

    /// Teams ordered by descending rating. Equal ratings are ordered by team
    /// name.
    pub fn ranked(&self) -> Vec<(&str, RatingScalar)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_unstable_by_key(|&(team, RatingScalar(rating))| (Reverse(OrderedFloat(rating)), team));
        ranked
    }
}

/// Elo ratings that evolve as results are recorded.
#[derive(Debug)]
pub struct RatingModel {
    system: RatingSystem,
    state: RatingState,
    loss: LogLoss,
}

impl RatingModel {
    pub fn new(system: RatingSystem) -> RatingModel {
        RatingModel {
            system,
            state: RatingState::default(),
            loss: LogLoss::default(),
        }
    }

    pub fn system(&self) -> &RatingSystem {
        &self.system
    }

    /// Current rating, or the initial rating for a team that has not played.
    pub fn rating(&self, team: &str) -> RatingScalar {
        self.state
            .get(team)
            .unwrap_or_else(|| self.system.initial_rating())
    }

    /// Probability that `first` beats `second`, where `location` is where
    /// `first` plays.
    pub fn predict(&self, first: &str, second: &str, location: Location) -> Probability {
        let advantage = self.system.location_advantage();
        let adjustment = match location {
            Location::Home => advantage,
            Location::Away => -advantage,
            Location::Neutral => RatingDifference(0.0),
        };
        win_probability(self.rating(first) + adjustment, self.rating(second))
    }

    /// Records that `winner` beat `loser` and returns the probability that was
    /// assigned to this outcome before the update.
    ///
    /// The winner gains exactly what the loser gives up:
    /// `update_rate * (1 - p)`. When `count_in_loss` is set, the surprisal
    /// of the outcome is added to the running loss.
    ///
    /// # Panics
    ///
    /// Panics if `winner` and `loser` are the same team.
    pub fn record_result(
        &mut self,
        winner: &str,
        loser: &str,
        location: Location,
        update_rate: f64,
        count_in_loss: bool,
    ) -> Probability {
        assert_ne!(winner, loser, "a team cannot play itself");

        let observed = self.predict(winner, loser, location);
        if count_in_loss {
            self.loss.add(observed);
        }

        let delta = RatingDifference(update_rate * observed.opposite().value());
        let winner_rating = self.rating(winner) + delta;
        let loser_rating = self.rating(loser) - delta;
        self.state.set(winner, winner_rating);
        self.state.set(loser, loser_rating);

        observed
    }

    /// Moves every rating towards the initial rating, keeping the fraction
    /// `factor` of its distance.
    pub fn regress_to_mean(&mut self, factor: f64) {
        let baseline = self.system.initial_rating();
        for rating in self.state.inner.values_mut() {
            *rating = rating.regressed(baseline, factor);
        }
    }

    pub fn ranked_competitors(&self) -> Vec<(&str, RatingScalar)> {
        self.state.ranked()
    }

    pub fn state(&self) -> &RatingState {
        &self.state
    }

    pub fn loss(&self) -> &LogLoss {
        &self.loss
    }

    pub fn into_parts(self) -> (RatingState, LogLoss) {
        (self.state, self.loss)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn model(location_advantage: f64) -> RatingModel {
        RatingModel::new(
            RatingSystem::builder()
                .initial_rating(RatingScalar(1000.0))
                .location_advantage(RatingDifference(location_advantage))
                .build(),
        )
    }

    #[test]
    fn unseen_teams_start_at_initial_rating() {
        let model = model(0.0);
        assert_eq!(model.rating("Rice"), RatingScalar(1000.0));
        assert_abs_diff_eq!(model.predict("Rice", "Tulane", Location::Neutral).value(), 0.5);
        assert!(model.ranked_competitors().is_empty());
    }

    #[test]
    fn location_shifts_first_team() {
        let model = model(100.0);
        let home = model.predict("Rice", "Tulane", Location::Home);
        let away = model.predict("Rice", "Tulane", Location::Away);
        assert_abs_diff_eq!(home.value(), win_probability(RatingScalar(1100.0), RatingScalar(1000.0)).value());
        assert_abs_diff_eq!(away.value(), win_probability(RatingScalar(900.0), RatingScalar(1000.0)).value());

        let mirrored = model.predict("Tulane", "Rice", Location::Home.flipped());
        assert_abs_diff_eq!(home.value() + mirrored.value(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn record_result_conserves_rating() {
        let mut model = model(65.0);
        model.record_result("Utah", "BYU", Location::Away, 20.0, true);
        model.record_result("BYU", "Boise State", Location::Home, 32.0, true);

        let before_winner = model.rating("Utah");
        let before_loser = model.rating("Boise State");
        let observed = model.record_result("Utah", "Boise State", Location::Home, 40.0, false);

        let winner_delta = model.rating("Utah") - before_winner;
        let loser_delta = model.rating("Boise State") - before_loser;
        assert_abs_diff_eq!(winner_delta.0, -loser_delta.0, epsilon = 1e-9);
        assert_abs_diff_eq!(winner_delta.0, 40.0 * (1.0 - observed.value()), epsilon = 1e-9);
        assert!(winner_delta.0 > 0.0);

        let total: f64 = model.state().iter().map(|(_, r)| r.0).sum();
        assert_abs_diff_eq!(total, 3000.0, epsilon = 1e-9);
    }

    #[test]
    #[should_panic(expected = "a team cannot play itself")]
    fn record_result_rejects_self_play() {
        let mut model = model(0.0);
        model.record_result("Utah", "Utah", Location::Home, 40.0, true);
    }

    #[test]
    fn first_game_moves_half_the_update_rate() {
        let mut model = model(0.0);
        let observed = model.record_result("Utah", "BYU", Location::Neutral, 40.0, true);
        assert_abs_diff_eq!(observed.value(), 0.5);
        assert_abs_diff_eq!(model.rating("Utah").0, 1020.0);
        assert_abs_diff_eq!(model.rating("BYU").0, 980.0);
        assert_abs_diff_eq!(model.loss().total().value(), std::f64::consts::LN_2);
    }

    #[test]
    fn loss_only_counts_flagged_games() {
        let mut model = model(0.0);
        model.record_result("Utah", "BYU", Location::Neutral, 40.0, false);
        assert_eq!(model.loss().games(), 0);
        assert_eq!(model.loss().total().value(), 0.0);
        let observed = model.record_result("BYU", "Utah", Location::Neutral, 40.0, true);
        assert_eq!(model.loss().games(), 1);
        assert_abs_diff_eq!(model.loss().total().value(), observed.surprisal());
    }

    #[test]
    fn regress_to_mean_limits() {
        let mut model = model(0.0);
        model.record_result("Utah", "BYU", Location::Neutral, 40.0, false);
        model.record_result("Utah", "Utah State", Location::Neutral, 40.0, false);
        let before = model.state().clone();

        model.regress_to_mean(1.0);
        assert_eq!(model.state(), &before);

        model.regress_to_mean(0.0);
        for (_, rating) in model.state().iter() {
            assert_abs_diff_eq!(rating.0, 1000.0);
        }
        assert_eq!(model.state().len(), 3);
    }

    #[test]
    fn regress_to_mean_halves_distance() {
        let mut model = model(0.0);
        model.record_result("Utah", "BYU", Location::Neutral, 40.0, false);
        model.regress_to_mean(0.5);
        assert_abs_diff_eq!(model.rating("Utah").0, 1010.0);
        assert_abs_diff_eq!(model.rating("BYU").0, 990.0);
    }

    #[test]
    fn ranked_breaks_ties_by_name() {
        let mut model = model(0.0);
        model.record_result("Oregon", "Washington", Location::Neutral, 40.0, false);
        model.record_result("Auburn", "Alabama", Location::Neutral, 40.0, false);
        let ranked: Vec<&str> = model.ranked_competitors().into_iter().map(|(team, _)| team).collect();
        assert_eq!(ranked, ["Auburn", "Oregon", "Alabama", "Washington"]);
    }

    #[test]
    fn extreme_gap_gives_infinite_loss() {
        let mut model = model(0.0);
        for _ in 0..3 {
            model.record_result("Ohio State", "Kent State", Location::Neutral, 1e6, false);
        }
        let observed = model.record_result("Kent State", "Ohio State", Location::Neutral, 1.0, true);
        assert_eq!(observed.value(), 0.0);
        assert!(model.loss().total().is_infinite());
    }
}
