use std::{error::Error as StdError, fs::File, io, path::PathBuf};

use cfb_elo::{
    search::{GradientStrategy, GridStrategy, Range},
    ParameterSet, Period, RatingDifference, RatingScalar, Round, ScheduleConfig, SearchOrchestrator,
};
use cfb_elo_research::{
    game::{read_games, Schedule},
    report::write_report,
};
use clap::Parser as _;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(clap::Parser)]
struct Opt {
    /// Score file without header. Reads stdin if omitted.
    #[clap(long)]
    input: Option<PathBuf>,
    #[clap(long, default_value = "1000")]
    initial_rating: f64,
    /// Round of championship and bowl games, which are played on neutral
    /// ground.
    #[clap(long, default_value = "17")]
    terminal_round: u8,
    /// Earlier seasons only warm up the ratings and are not scored.
    #[clap(long)]
    first_scored_period: Option<u16>,
    /// Number of teams to list for the best candidate.
    #[clap(long, default_value = "25")]
    top: usize,
    #[clap(subcommand)]
    strategy: Strategy,
}

#[derive(clap::Subcommand)]
enum Strategy {
    /// Evaluate every combination of the given ranges.
    Grid {
        #[clap(long, default_value = "10,80,5")]
        update_rate: Range,
        #[clap(long, default_value = "0,300,50")]
        location_advantage: Range,
        #[clap(long, default_value = "0.25,1.3,0.2")]
        regression_factor: Range,
        /// Evaluate candidates on all cores.
        #[clap(long)]
        parallel: bool,
    },
    /// Hill climb from a seed, one parameter at a time.
    Gradient {
        #[clap(long, default_value = "20")]
        update_rate: f64,
        #[clap(long, default_value = "50")]
        location_advantage: f64,
        #[clap(long, default_value = "0.9")]
        regression_factor: f64,
        /// Initial step size.
        #[clap(long, default_value = "27")]
        step: f64,
        /// Tune a separate update rate for each round.
        #[clap(long)]
        per_round: bool,
        #[clap(long, default_value = "17")]
        rounds: usize,
    },
}

fn read_schedule(input: Option<&PathBuf>) -> Result<Schedule, Box<dyn StdError>> {
    Ok(match input {
        Some(path) => read_games(File::open(path)?)?,
        None => read_games(io::stdin().lock())?,
    })
}

fn main() -> Result<(), Box<dyn StdError>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let opt = Opt::parse();

    let process_uuid = Uuid::now_v7();

    let schedule = read_schedule(opt.input.as_ref())?;
    info!(
        games = schedule.games.len(),
        skipped = schedule.skipped,
        "read schedule"
    );

    let mut config = ScheduleConfig::builder();
    config.terminal_round(Round(opt.terminal_round));
    if let Some(period) = opt.first_scored_period {
        config.first_scored_period(Period(period));
    }

    let mut orchestrator = SearchOrchestrator::new(
        &schedule.games,
        RatingScalar(opt.initial_rating),
        config.build(),
    );

    match opt.strategy {
        Strategy::Grid {
            update_rate,
            location_advantage,
            regression_factor,
            parallel,
        } => {
            let mut grid = GridStrategy::new(update_rate, location_advantage, regression_factor);
            info!(candidates = grid.len(), parallel, "starting grid search");
            if parallel {
                orchestrator.run_parallel(grid.candidates())?;
            } else {
                orchestrator.run(&mut grid)?;
            }
        }
        Strategy::Gradient {
            update_rate,
            location_advantage,
            regression_factor,
            step,
            per_round,
            rounds,
        } => {
            let seed = ParameterSet::new(update_rate, RatingDifference(location_advantage), regression_factor);
            let mut gradient = if per_round {
                GradientStrategy::new(seed.with_round_update_rates(rounds), step).with_round_tuning()
            } else {
                GradientStrategy::new(seed, step)
            };
            info!(step, per_round, "starting gradient search");
            orchestrator.run(&mut gradient)?;
        }
    }

    write_report(
        File::create(format!("report-{}.csv", process_uuid))?,
        &orchestrator,
        &schedule,
        opt.top,
    )?;
    write_report(io::stdout().lock(), &orchestrator, &schedule, opt.top)?;

    Ok(())
}
