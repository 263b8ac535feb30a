use std::{collections::BTreeMap, error::Error as StdError, io};

use cfb_elo::{GameRecord, Location, Period, Round};
use cfb_elo_research::game::read_games;
use clap::Parser as _;
use compensated_summation::KahanBabuskaNeumaier;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
struct Opt {
    /// Round of championship and bowl games, which are played on neutral
    /// ground.
    #[clap(long, default_value = "17")]
    terminal_round: u8,
}

#[derive(Default, Debug)]
struct Stats {
    home_wins: u64,
    non_neutral_games: u64,
    total_home_margin: KahanBabuskaNeumaier<f64>,
    neutral_games: u64,
}

impl Stats {
    pub fn csv_header() -> &'static str {
        "period,games,neutral_games,home_win_share,avg_home_margin"
    }

    pub fn csv(&self, period: Period) -> String {
        format!(
            "{},{},{},{},{}",
            period,
            self.non_neutral_games + self.neutral_games,
            self.neutral_games,
            self.home_wins as f64 / self.non_neutral_games as f64,
            self.total_home_margin.total() / self.non_neutral_games as f64
        )
    }
}

fn tally(games: &[GameRecord], terminal_round: Round) -> BTreeMap<Period, Stats> {
    let mut by_period: BTreeMap<Period, Stats> = BTreeMap::new();

    for game in games {
        let stats = by_period.entry(game.period).or_default();

        if game.outcome(terminal_round).location == Location::Neutral {
            stats.neutral_games += 1;
            continue;
        }

        stats.non_neutral_games += 1;
        if game.home_score > game.visitor_score {
            stats.home_wins += 1;
        }
        stats.total_home_margin += f64::from(game.home_score) - f64::from(game.visitor_score);
    }

    by_period
}

/// Summarizes how often and by how much the home side wins in each season,
/// as a sanity check for the location advantage found by the search.
fn main() -> Result<(), Box<dyn StdError>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let opt = Opt::parse();
    let schedule = read_games(io::stdin().lock())?;

    let by_period = tally(&schedule.games, Round(opt.terminal_round));

    println!("{}", Stats::csv_header());
    for (period, stats) in &by_period {
        println!("{}", stats.csv(*period));
    }

    Ok(())
}
