use std::fmt;

/// A season. Ratings are regressed towards the mean whenever the period
/// changes between two consecutive games.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(pub u16);

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A week within a season, starting at `1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Round(pub u8);

impl Round {
    /// Zero-based position of the round in a per-round table.
    #[inline]
    pub fn index(self) -> Option<usize> {
        usize::from(self.0).checked_sub(1)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Competitor identity.
pub type Team = Box<str>;

/// Where a game was played, from the point of view of the first-named team.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Home,
    Away,
    Neutral,
}

impl Location {
    /// Location as seen by the other team.
    pub fn flipped(self) -> Location {
        match self {
            Location::Home => Location::Away,
            Location::Away => Location::Home,
            Location::Neutral => Location::Neutral,
        }
    }
}

/// A final score, as listed on a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub period: Period,
    pub round: Round,
    pub visitor: Team,
    pub visitor_score: u32,
    pub home: Team,
    pub home_score: u32,
}

/// Winner and loser of a game, and where the winner played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<'a> {
    pub winner: &'a str,
    pub loser: &'a str,
    pub location: Location,
}

impl GameRecord {
    pub fn instant(&self) -> (Period, Round) {
        (self.period, self.round)
    }

    /// Decides the winner by comparing scores. A tied score is credited to the
    /// home side. Games in the terminal round are played on neutral ground.
    pub fn outcome(&self, terminal_round: Round) -> Outcome<'_> {
        let (winner, loser, location) = if self.visitor_score > self.home_score {
            (&*self.visitor, &*self.home, Location::Away)
        } else {
            (&*self.home, &*self.visitor, Location::Home)
        };

        Outcome {
            winner,
            loser,
            location: if self.round == terminal_round {
                Location::Neutral
            } else {
                location
            },
        }
    }
}

/// Sorts games chronologically. Games in the same round keep their relative
/// order.
pub fn sort_chronologically(games: &mut [GameRecord]) {
    games.sort_by_key(GameRecord::instant);
}

#[derive(Debug, Clone)]
pub struct ScheduleConfigBuilder {
    terminal_round: Round,
    first_scored_period: Option<Period>,
}

impl Default for ScheduleConfigBuilder {
    fn default() -> ScheduleConfigBuilder {
        ScheduleConfigBuilder::new()
    }
}

impl ScheduleConfigBuilder {
    pub fn new() -> ScheduleConfigBuilder {
        ScheduleConfigBuilder {
            terminal_round: Round(17),
            first_scored_period: None,
        }
    }

    pub fn terminal_round(&mut self, terminal_round: Round) -> &mut Self {
        assert!(terminal_round.0 >= 1);
        self.terminal_round = terminal_round;
        self
    }

    /// Games before this period only warm up the ratings and are not scored.
    pub fn first_scored_period(&mut self, first_scored_period: Period) -> &mut Self {
        self.first_scored_period = Some(first_scored_period);
        self
    }

    pub fn build(&self) -> ScheduleConfig {
        ScheduleConfig {
            terminal_round: self.terminal_round,
            first_scored_period: self.first_scored_period,
        }
    }
}

/// How a schedule is interpreted during replay.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    terminal_round: Round,
    first_scored_period: Option<Period>,
}

impl Default for ScheduleConfig {
    fn default() -> ScheduleConfig {
        ScheduleConfig::new()
    }
}

impl ScheduleConfig {
    pub fn builder() -> ScheduleConfigBuilder {
        ScheduleConfigBuilder::default()
    }

    pub fn new() -> ScheduleConfig {
        ScheduleConfig::builder().build()
    }

    pub fn terminal_round(&self) -> Round {
        self.terminal_round
    }

    pub fn first_scored_period(&self) -> Option<Period> {
        self.first_scored_period
    }

    /// Whether the game counts towards the loss.
    pub fn is_scored(&self, game: &GameRecord) -> bool {
        self.first_scored_period
            .map_or(true, |first| game.period >= first)
    }
}
