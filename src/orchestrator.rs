use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    search::{Proposal, SearchStrategy},
    GameRecord, Loss, ParameterSet, RatingScalar, RatingState, Replay, ScheduleConfig,
    ScheduleReplayer, SearchError,
};

/// One evaluated candidate.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub loss: Loss,
    pub mean_loss: f64,
    pub params: ParameterSet,
    pub ratings: RatingState,
}

/// Replays a schedule once per candidate proposed by a strategy, keeping
/// every result.
#[derive(Debug)]
pub struct SearchOrchestrator<'a> {
    games: &'a [GameRecord],
    schedule: ScheduleConfig,
    replayer: ScheduleReplayer,
    results: Vec<SearchResult>,
    best: Option<usize>,
    searched: bool,
}

impl<'a> SearchOrchestrator<'a> {
    /// `games` must be sorted chronologically.
    pub fn new(games: &'a [GameRecord], initial_rating: RatingScalar, schedule: ScheduleConfig) -> SearchOrchestrator<'a> {
        SearchOrchestrator {
            games,
            replayer: ScheduleReplayer::new(initial_rating, &schedule),
            schedule,
            results: Vec::new(),
            best: None,
            searched: false,
        }
    }

    pub fn evaluate(&self, params: &ParameterSet) -> Replay {
        self.replayer
            .replay(self.games, params, |game| self.schedule.is_scored(game))
    }

    /// Runs `strategy` until it is exhausted, feeding back the loss of each
    /// candidate.
    pub fn run<S: SearchStrategy + ?Sized>(&mut self, strategy: &mut S) -> Result<&SearchResult, SearchError> {
        self.searched = true;
        let mut feedback = None;
        while let Proposal::Candidate(params) = strategy.propose(feedback)? {
            let replay = self.evaluate(&params);
            feedback = Some(replay.loss);
            self.record(params, replay);
        }
        self.best()
    }

    /// Evaluates a fixed list of candidates in parallel. Results are recorded
    /// in the order of `candidates`.
    pub fn run_parallel(&mut self, candidates: Vec<ParameterSet>) -> Result<&SearchResult, SearchError> {
        self.searched = true;
        let this = &*self;
        let replays: Vec<(ParameterSet, Replay)> = candidates
            .into_par_iter()
            .map(|params| {
                let replay = this.evaluate(&params);
                (params, replay)
            })
            .collect();

        for (params, replay) in replays {
            self.record(params, replay);
        }
        self.best()
    }

    fn record(&mut self, params: ParameterSet, replay: Replay) {
        debug!(%params, loss = %replay.loss, "evaluated candidate");

        let improved = self
            .best
            .map_or(true, |best| replay.loss < self.results[best].loss);
        if improved {
            info!(%params, loss = %replay.loss, mean_loss = replay.mean_loss(), "new best candidate");
            self.best = Some(self.results.len());
        }

        self.results.push(SearchResult {
            loss: replay.loss,
            mean_loss: replay.mean_loss(),
            params,
            ratings: replay.ratings,
        });
    }

    fn ensure_searched(&self) -> Result<(), SearchError> {
        if !self.searched {
            Err(SearchError::NoSearchRun)
        } else if self.results.is_empty() {
            Err(SearchError::NoCandidates)
        } else {
            Ok(())
        }
    }

    /// Results in evaluation order.
    pub fn results(&self) -> Result<&[SearchResult], SearchError> {
        self.ensure_searched()?;
        Ok(&self.results)
    }

    /// Results ordered by ascending loss. Equal losses keep evaluation order.
    pub fn ranked_results(&self) -> Result<Vec<&SearchResult>, SearchError> {
        self.ensure_searched()?;
        let mut ranked: Vec<&SearchResult> = self.results.iter().collect();
        ranked.sort_by_key(|result| result.loss);
        Ok(ranked)
    }

    /// The first candidate that reached the lowest loss.
    pub fn best(&self) -> Result<&SearchResult, SearchError> {
        self.ensure_searched()?;
        self.best
            .map(|best| &self.results[best])
            .ok_or(SearchError::NoCandidates)
    }

    pub fn best_ratings(&self) -> Result<&RatingState, SearchError> {
        self.best().map(|best| &best.ratings)
    }

    /// The `n` highest rated teams under the best candidate.
    pub fn top_teams(&self, n: usize) -> Result<Vec<(&str, RatingScalar)>, SearchError> {
        let mut ranked = self.best_ratings()?.ranked();
        ranked.truncate(n);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{search::GradientStrategy, search::GridStrategy, search::Range, Period, RatingDifference, Round};

    fn game(period: u16, round: u8, visitor: &str, visitor_score: u32, home: &str, home_score: u32) -> GameRecord {
        GameRecord {
            period: Period(period),
            round: Round(round),
            visitor: visitor.into(),
            visitor_score,
            home: home.into(),
            home_score,
        }
    }

    fn schedule() -> Vec<GameRecord> {
        let mut games = Vec::new();
        for period in 2010..2014 {
            games.push(game(period, 1, "Akron", 3, "Ohio", 24));
            games.push(game(period, 2, "Toledo", 10, "Ohio", 31));
            games.push(game(period, 3, "Akron", 7, "Toledo", 14));
            games.push(game(period, 4, "Kent", 20, "Akron", 17));
            games.push(game(period, 5, "Ohio", 28, "Kent", 21));
            games.push(game(period, 17, "Toledo", 35, "Kent", 10));
        }
        games
    }

    #[test]
    fn results_require_a_search() {
        let games = schedule();
        let orchestrator = SearchOrchestrator::new(&games, RatingScalar(1000.0), ScheduleConfig::new());
        assert_eq!(orchestrator.best().unwrap_err(), SearchError::NoSearchRun);
        assert_eq!(orchestrator.ranked_results().unwrap_err(), SearchError::NoSearchRun);
        assert_eq!(orchestrator.top_teams(25).unwrap_err(), SearchError::NoSearchRun);
    }

    #[test]
    fn empty_grid_has_no_candidates() {
        let games = schedule();
        let mut orchestrator = SearchOrchestrator::new(&games, RatingScalar(1000.0), ScheduleConfig::new());
        let mut grid = GridStrategy::new(Range::new(2.0, 1.0, 1.0), Range::single(0.0), Range::single(1.0));
        assert_eq!(orchestrator.run(&mut grid).unwrap_err(), SearchError::NoCandidates);
        assert_eq!(orchestrator.ranked_results().unwrap_err(), SearchError::NoCandidates);
    }

    #[test]
    fn grid_search_tracks_best() {
        let games = schedule();
        let schedule = ScheduleConfig::builder().first_scored_period(Period(2011)).build();
        let mut orchestrator = SearchOrchestrator::new(&games, RatingScalar(1000.0), schedule);
        let mut grid = GridStrategy::new(
            Range::new(10.0, 60.0, 10.0),
            Range::new(0.0, 100.0, 50.0),
            Range::new(0.5, 1.0, 0.25),
        );

        let best = orchestrator.run(&mut grid).unwrap().clone();
        let ranked = orchestrator.ranked_results().unwrap();
        assert_eq!(ranked.len(), 6 * 3 * 3);
        assert_eq!(ranked[0].loss, best.loss);
        assert!(ranked.windows(2).all(|pair| pair[0].loss <= pair[1].loss));
        assert!(ranked.iter().all(|result| result.loss >= best.loss));

        // Warm-up season excluded: 3 scored seasons of 6 games.
        let replay = orchestrator.evaluate(&best.params);
        assert_eq!(replay.scored_games, 18);
        assert_abs_diff_eq!(best.mean_loss, best.loss.value() / 18.0, epsilon = 1e-12);

        let top = orchestrator.top_teams(2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, "Ohio");
        assert_eq!(orchestrator.best_ratings().unwrap(), &best.ratings);
    }

    #[test]
    fn parallel_matches_sequential() {
        let games = schedule();
        let grid = GridStrategy::new(Range::new(10.0, 40.0, 10.0), Range::new(0.0, 60.0, 30.0), Range::single(0.8));

        let mut sequential = SearchOrchestrator::new(&games, RatingScalar(1500.0), ScheduleConfig::new());
        sequential.run(&mut grid.clone()).unwrap();

        let mut parallel = SearchOrchestrator::new(&games, RatingScalar(1500.0), ScheduleConfig::new());
        parallel.run_parallel(grid.candidates()).unwrap();

        let sequential = sequential.results().unwrap();
        let parallel = parallel.results().unwrap();
        assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.iter().zip(parallel) {
            assert_eq!(a.params, b.params);
            assert_eq!(a.loss, b.loss);
        }
    }

    #[test]
    fn gradient_search_improves_on_seed() {
        let games = schedule();
        let mut orchestrator = SearchOrchestrator::new(&games, RatingScalar(1000.0), ScheduleConfig::new());
        let seed = ParameterSet::new(5.0, RatingDifference(0.0), 1.0);
        let mut gradient = GradientStrategy::new(seed.clone(), 9.0);

        let best = orchestrator.run(&mut gradient).unwrap().clone();
        let first = &orchestrator.results().unwrap()[0];
        assert_eq!(first.params, seed);
        assert!(best.loss < first.loss);
        assert_eq!(Some(best.loss), gradient.center_loss());
    }
}
