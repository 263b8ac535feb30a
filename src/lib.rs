//! Elo ratings for college football, and a search for the rating parameters
//! that best predict historical results.
//!
//! A [`ScheduleReplayer`] plays a chronologically sorted list of
//! [`GameRecord`]s through a fresh [`RatingModel`] and measures the log-loss
//! of its predictions. A [`SearchOrchestrator`] repeats this for every
//! [`ParameterSet`] proposed by a [`search::SearchStrategy`], either an
//! exhaustive [`search::GridStrategy`] or a coordinate-wise
//! [`search::GradientStrategy`].
//!
//! ```
//! use cfb_elo::{
//!     search::GridStrategy, search::Range, GameRecord, Period, RatingScalar, Round,
//!     ScheduleConfig, SearchOrchestrator,
//! };
//!
//! let games = vec![GameRecord {
//!     period: Period(2018),
//!     round: Round(1),
//!     visitor: "Army".into(),
//!     visitor_score: 14,
//!     home: "Duke".into(),
//!     home_score: 34,
//! }];
//!
//! let mut orchestrator = SearchOrchestrator::new(&games, RatingScalar(1000.0), ScheduleConfig::new());
//! let mut grid = GridStrategy::new(
//!     Range::new(10.0, 40.0, 10.0),
//!     Range::new(0.0, 100.0, 50.0),
//!     Range::single(1.0),
//! );
//! let best = orchestrator.run(&mut grid).expect("grid is not empty");
//! assert!(best.loss.value() < std::f64::consts::LN_2);
//! ```

mod error;
mod loss;
mod model;
mod orchestrator;
mod params;
mod probability;
mod rating;
mod rating_system;
mod replay;
mod schedule;
pub mod search;

pub use error::SearchError;
pub use loss::{LogLoss, Loss};
pub use model::{RatingModel, RatingState};
pub use orchestrator::{SearchOrchestrator, SearchResult};
pub use params::{Field, ParameterSet};
pub use probability::{win_probability, Probability};
pub use rating::{RatingDifference, RatingScalar};
pub use rating_system::{RatingSystem, RatingSystemBuilder};
pub use replay::{Replay, ScheduleReplayer};
pub use schedule::{
    sort_chronologically, GameRecord, Location, Outcome, Period, Round, ScheduleConfig,
    ScheduleConfigBuilder, Team,
};
