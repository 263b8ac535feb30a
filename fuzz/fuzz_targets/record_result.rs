#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use cfb_elo::{Location, RatingDifference, RatingModel, RatingScalar, RatingSystem};
use libfuzzer_sys::fuzz_target;

const TEAMS: [&str; 4] = ["Army", "Navy", "Air Force", "Notre Dame"];

#[derive(Arbitrary, Debug)]
enum ArbitraryLocation {
    Home,
    Away,
    Neutral,
}

impl From<ArbitraryLocation> for Location {
    fn from(location: ArbitraryLocation) -> Location {
        match location {
            ArbitraryLocation::Home => Location::Home,
            ArbitraryLocation::Away => Location::Away,
            ArbitraryLocation::Neutral => Location::Neutral,
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Game {
    winner: u8,
    loser: u8,
    location: ArbitraryLocation,
    update_rate: f64,
    scored: bool,
}

#[derive(Arbitrary, Debug)]
struct Season {
    location_advantage: f64,
    regression_factor: f64,
    games: Vec<Game>,
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(season) = Season::arbitrary(&mut u) else {
        return;
    };
    if !season.location_advantage.is_finite() || !season.regression_factor.is_finite() {
        return;
    }

    let mut model = RatingModel::new(
        RatingSystem::builder()
            .initial_rating(RatingScalar(1000.0))
            .location_advantage(RatingDifference(season.location_advantage.clamp(-1000.0, 1000.0)))
            .build(),
    );

    for game in season.games {
        let winner = TEAMS[usize::from(game.winner) % TEAMS.len()];
        let loser = TEAMS[usize::from(game.loser) % TEAMS.len()];
        if winner == loser || !game.update_rate.is_finite() {
            continue;
        }

        let before = model.rating(winner).0 + model.rating(loser).0;
        let observed = model.record_result(
            winner,
            loser,
            game.location.into(),
            game.update_rate.clamp(0.0, 1000.0),
            game.scored,
        );
        let after = model.rating(winner).0 + model.rating(loser).0;

        assert!((0.0..=1.0).contains(&observed.value()));
        assert!((before - after).abs() <= 1e-6 * before.abs().max(1.0));
        assert!(!model.loss().total().value().is_nan());
    }

    model.regress_to_mean(season.regression_factor.clamp(0.0, 2.0));
    for (_, rating) in model.state().iter() {
        assert!(!rating.0.is_nan());
    }
});
