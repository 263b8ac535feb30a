use tracing::trace;

use crate::{
    GameRecord, Loss, ParameterSet, RatingModel, RatingScalar, RatingState, RatingSystem, Round,
    ScheduleConfig,
};

/// Ratings and loss after a full pass over a schedule.
#[derive(Debug, Clone)]
pub struct Replay {
    pub ratings: RatingState,
    pub loss: Loss,
    pub scored_games: u64,
}

impl Replay {
    /// Mean loss per scored game, or `NaN` if nothing was scored.
    pub fn mean_loss(&self) -> f64 {
        self.loss.value() / self.scored_games as f64
    }
}

/// Plays a chronologically sorted schedule through a fresh [`RatingModel`].
#[derive(Debug, Clone)]
pub struct ScheduleReplayer {
    initial_rating: RatingScalar,
    terminal_round: Round,
}

impl ScheduleReplayer {
    pub fn new(initial_rating: RatingScalar, schedule: &ScheduleConfig) -> ScheduleReplayer {
        ScheduleReplayer {
            initial_rating,
            terminal_round: schedule.terminal_round(),
        }
    }

    pub fn initial_rating(&self) -> RatingScalar {
        self.initial_rating
    }

    /// Replays `games` in order. Ratings regress once whenever the period
    /// changes from one game to the next. Only games accepted by `is_scored`
    /// contribute to the loss.
    pub fn replay<P>(&self, games: &[GameRecord], params: &ParameterSet, is_scored: P) -> Replay
    where
        P: Fn(&GameRecord) -> bool,
    {
        let mut model = RatingModel::new(
            RatingSystem::builder()
                .initial_rating(self.initial_rating)
                .location_advantage(params.location_advantage)
                .build(),
        );

        let mut last_period = None;

        for game in games {
            if last_period.is_some_and(|period| period != game.period) {
                trace!(period = %game.period, "regressing ratings to mean");
                model.regress_to_mean(params.regression_factor);
            }
            last_period = Some(game.period);

            let outcome = game.outcome(self.terminal_round);
            model.record_result(
                outcome.winner,
                outcome.loser,
                outcome.location,
                params.update_rate_for(game.round),
                is_scored(game),
            );
        }

        let (ratings, loss) = model.into_parts();
        Replay {
            ratings,
            loss: loss.total(),
            scored_games: loss.games(),
        }
    }
}
