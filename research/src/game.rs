use std::{fmt, io, str::FromStr};

use cfb_elo::{sort_chronologically, GameRecord, Period, Round};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use thiserror::Error;
use tracing::warn;

/// Number of columns in a score file row.
pub const COLUMNS: usize = 6;

/// One line of a score file:
/// `period,round,visitor,visitor_score,home,home_score`.
#[serde_as]
#[derive(Deserialize, Debug)]
pub struct RawGame {
    pub period: u16,
    #[serde_as(as = "DisplayFromStr")]
    pub round: Week,
    pub visitor: String,
    pub visitor_score: u32,
    pub home: String,
    pub home_score: u32,
}

/// A round number as written in a score file. Weeks count from `1`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Week(pub Round);

#[derive(Debug, Error)]
#[error("invalid week, expected a number from 1 to 255")]
pub struct InvalidWeek;

impl FromStr for Week {
    type Err = InvalidWeek;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u8>() {
            Ok(0) | Err(_) => Err(InvalidWeek),
            Ok(week) => Ok(Week(Round(week))),
        }
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum InvalidRow {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("expected 6 columns, got {0}")]
    ColumnCount(usize),
    #[error("team name is empty")]
    EmptyTeam,
    #[error("{0} cannot play itself")]
    SameTeam(String),
}

impl TryFrom<RawGame> for GameRecord {
    type Error = InvalidRow;

    fn try_from(raw: RawGame) -> Result<GameRecord, InvalidRow> {
        if raw.visitor.is_empty() || raw.home.is_empty() {
            return Err(InvalidRow::EmptyTeam);
        }
        if raw.visitor == raw.home {
            return Err(InvalidRow::SameTeam(raw.home));
        }
        Ok(GameRecord {
            period: Period(raw.period),
            round: raw.round.0,
            visitor: raw.visitor.into_boxed_str(),
            visitor_score: raw.visitor_score,
            home: raw.home.into_boxed_str(),
            home_score: raw.home_score,
        })
    }
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read score file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to read score file: {0}")]
    Csv(#[from] csv::Error),
}

/// Games read from a score file, in chronological order.
#[derive(Debug, Default)]
pub struct Schedule {
    pub games: Vec<GameRecord>,
    /// Rows that could not be parsed and were left out.
    pub skipped: usize,
}

/// Reads a score file without header. Malformed rows are logged and
/// skipped. Only failing to read the input itself is an error.
///
/// Games within the same round keep their order from the file.
pub fn read_games<R: io::Read>(reader: R) -> Result<Schedule, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut schedule = Schedule::default();

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                warn!(%err, "skipping unreadable row");
                schedule.skipped += 1;
                continue;
            }
        };

        let line = record.position().map_or(0, |position| position.line());

        let parsed = if record.len() == COLUMNS {
            record
                .deserialize::<RawGame>(None)
                .map_err(InvalidRow::from)
                .and_then(GameRecord::try_from)
        } else {
            Err(InvalidRow::ColumnCount(record.len()))
        };

        match parsed {
            Ok(game) => schedule.games.push(game),
            Err(err) => {
                warn!(line, %err, "skipping malformed row");
                schedule.skipped += 1;
            }
        }
    }

    sort_chronologically(&mut schedule.games);
    Ok(schedule)
}
