use std::io::{self, Write};

use cfb_elo::{SearchError, SearchOrchestrator, SearchResult};
use serde::Serialize;
use thiserror::Error;

use crate::game::Schedule;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// One evaluated candidate in the loss surface.
#[derive(Serialize, Debug)]
struct CandidateRow {
    update_rate: f64,
    location_advantage: f64,
    regression_factor: f64,
    /// Per-round update rates separated by `;`, empty when the scalar rate
    /// applies to every round.
    round_update_rates: String,
    loss: f64,
    mean_loss: f64,
}

impl From<&SearchResult> for CandidateRow {
    fn from(result: &SearchResult) -> CandidateRow {
        CandidateRow {
            update_rate: result.params.update_rate,
            location_advantage: f64::from(result.params.location_advantage),
            regression_factor: result.params.regression_factor,
            round_update_rates: result
                .params
                .round_update_rates
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|rate| rate.to_string())
                .collect::<Vec<_>>()
                .join(";"),
            loss: result.loss.value(),
            mean_loss: result.mean_loss,
        }
    }
}

/// Writes every evaluated candidate as CSV, best first, followed by a
/// commented summary of the best candidate and its top `top` teams.
pub fn write_report<W: Write>(
    mut writer: W,
    orchestrator: &SearchOrchestrator<'_>,
    schedule: &Schedule,
    top: usize,
) -> Result<(), ReportError> {
    let ranked = orchestrator.ranked_results()?;
    let best = orchestrator.best()?;

    {
        let mut rows = csv::Writer::from_writer(&mut writer);
        for result in &ranked {
            rows.serialize(CandidateRow::from(*result))?;
        }
        rows.flush()?;
    }

    writeln!(writer, "# ---")?;
    writeln!(writer, "# Best parameters: {}", best.params)?;
    writeln!(
        writer,
        "# Best loss: {} (mean {:.6})",
        best.loss, best.mean_loss
    )?;
    writeln!(writer, "# ---")?;
    for (rank, (team, rating)) in orchestrator.top_teams(top)?.into_iter().enumerate() {
        writeln!(writer, "# {:>3}. {} {:.1}", rank + 1, team, f64::from(rating))?;
    }
    writeln!(writer, "# ---")?;
    writeln!(writer, "# Games: {} (skipped rows: {})", schedule.games.len(), schedule.skipped)?;
    writeln!(writer, "# Candidates evaluated: {}", ranked.len())?;
    writeln!(writer, "# ---")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use cfb_elo::{search::GridStrategy, search::Range, ParameterSet, RatingDifference, RatingScalar, ScheduleConfig};

    use super::*;
    use crate::game::read_games;

    const GAMES: &str = "\
2017,1,Georgia Tech,10,Clemson,38
2017,2,Clemson,24,Auburn,14
2017,3,Auburn,21,Georgia Tech,28
";

    fn candidate_rows(report: &str) -> Vec<csv::StringRecord> {
        csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .from_reader(report.as_bytes())
            .records()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn report_before_search_fails() {
        let schedule = Schedule::default();
        let orchestrator = SearchOrchestrator::new(&schedule.games, RatingScalar(1000.0), ScheduleConfig::new());
        let err = write_report(Vec::new(), &orchestrator, &schedule, 25).unwrap_err();
        assert!(matches!(err, ReportError::Search(SearchError::NoSearchRun)));
    }

    #[test]
    fn report_lists_candidates_best_first() {
        let schedule = read_games(GAMES.as_bytes()).unwrap();
        let mut orchestrator = SearchOrchestrator::new(&schedule.games, RatingScalar(1000.0), ScheduleConfig::new());
        orchestrator
            .run(&mut GridStrategy::new(Range::new(10.0, 30.0, 10.0), Range::single(0.0), Range::single(1.0)))
            .unwrap();

        let mut out = Vec::new();
        write_report(&mut out, &orchestrator, &schedule, 2).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(
            out.lines().next(),
            Some("update_rate,location_advantage,regression_factor,round_update_rates,loss,mean_loss")
        );

        let rows = candidate_rows(&out);
        assert_eq!(rows.len(), 3);
        let losses: Vec<f64> = rows.iter().map(|row| row[4].parse().unwrap()).collect();
        assert!(losses.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(rows.iter().all(|row| row[3].is_empty()));

        assert!(out.contains("#   1. Clemson"));
        assert!(!out.contains("#   3."));
        assert!(out.contains("# Games: 3 (skipped rows: 0)"));
    }

    #[test]
    fn report_lists_round_update_rates() {
        let schedule = read_games(GAMES.as_bytes()).unwrap();
        let mut orchestrator = SearchOrchestrator::new(&schedule.games, RatingScalar(1000.0), ScheduleConfig::new());
        let mut params = ParameterSet::new(20.0, RatingDifference(0.0), 1.0);
        params.round_update_rates = Some(vec![20.0, 12.5, 30.0]);
        orchestrator.run_parallel(vec![params]).unwrap();

        let mut out = Vec::new();
        write_report(&mut out, &orchestrator, &schedule, 25).unwrap();
        let rows = candidate_rows(&String::from_utf8(out).unwrap());

        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][3], "20;12.5;30");
        assert_eq!(rows[0][0].parse::<f64>().unwrap(), 20.0);
    }
}
