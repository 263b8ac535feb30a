use std::collections::VecDeque;

use tracing::{debug, info};

use crate::{
    search::{Proposal, SearchStrategy},
    Field, Loss, ParameterSet, Round, SearchError,
};

/// Regression factors live on a scale about a hundred times smaller than
/// update rates and location advantages.
const REGRESSION_STEP_SCALE: f64 = 0.01;

const STEP_DIVISOR: f64 = 3.0;

const DEFAULT_MIN_STEP: f64 = 0.1;

/// Too few games are played in these rounds to tune them individually.
const UNTUNED_ROUNDS: [Round; 2] = [Round(16), Round(17)];

/// Coordinate-wise hill climbing.
///
/// Each round of the search tries `center ± step` in every tunable field,
/// one field at a time. If the best of those beats the center, it becomes
/// the new center and the same step is tried again. Otherwise the step is
/// divided by three. The search ends once the step drops below a minimum.
#[derive(Debug, Clone)]
pub struct GradientStrategy {
    center: ParameterSet,
    center_loss: Option<Loss>,
    step: f64,
    min_step: f64,
    tune_rounds: bool,
    pending: VecDeque<ParameterSet>,
    tried: Vec<(ParameterSet, Loss)>,
    awaiting: Option<ParameterSet>,
    exhausted: bool,
}

impl GradientStrategy {
    pub fn new(seed: ParameterSet, step: f64) -> GradientStrategy {
        assert!(step > 0.0 && step.is_finite());
        GradientStrategy {
            center: seed,
            center_loss: None,
            step,
            min_step: DEFAULT_MIN_STEP,
            tune_rounds: false,
            pending: VecDeque::new(),
            tried: Vec::new(),
            awaiting: None,
            exhausted: false,
        }
    }

    /// Tunes each entry of the per-round update rate table instead of the
    /// scalar update rate. The seed must carry such a table.
    #[must_use]
    pub fn with_round_tuning(self) -> GradientStrategy {
        assert!(self.center.round_update_rates.is_some());
        GradientStrategy {
            tune_rounds: true,
            ..self
        }
    }

    #[must_use]
    pub fn with_min_step(self, min_step: f64) -> GradientStrategy {
        assert!(min_step > 0.0);
        GradientStrategy { min_step, ..self }
    }

    /// Best parameters found so far.
    pub fn center(&self) -> &ParameterSet {
        &self.center
    }

    pub fn center_loss(&self) -> Option<Loss> {
        self.center_loss
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if !self.tune_rounds {
            fields.push(Field::UpdateRate);
        }
        fields.push(Field::LocationAdvantage);
        fields.push(Field::RegressionFactor);
        if self.tune_rounds {
            let rounds = self.center.round_update_rates.as_ref().map_or(0, Vec::len);
            fields.extend(
                (1..=rounds)
                    .filter_map(|round| u8::try_from(round).ok())
                    .map(Round)
                    .filter(|round| !UNTUNED_ROUNDS.contains(round))
                    .map(Field::RoundUpdateRate),
            );
        }
        fields
    }

    fn step_for(&self, field: Field) -> f64 {
        match field {
            Field::RegressionFactor => self.step * REGRESSION_STEP_SCALE,
            _ => self.step,
        }
    }

    fn perturbations(&self) -> VecDeque<ParameterSet> {
        self.fields()
            .into_iter()
            .flat_map(|field| {
                let delta = self.step_for(field);
                [
                    self.center.nudged(field, delta),
                    self.center.nudged(field, -delta),
                ]
            })
            .flatten()
            .collect()
    }

    /// Moves to the best perturbation if it improves on the center, or
    /// shrinks the step otherwise.
    fn conclude_round(&mut self) {
        let best = self
            .tried
            .drain(..)
            .min_by(|(_, a), (_, b)| a.cmp(b));

        match (best, self.center_loss) {
            (Some((params, loss)), Some(center_loss)) if loss < center_loss => {
                info!(%loss, %params, step = self.step, "gradient search moved");
                self.center = params;
                self.center_loss = Some(loss);
            }
            _ => {
                self.step /= STEP_DIVISOR;
                debug!(step = self.step, "gradient search shrinking step");
            }
        }
    }
}

impl SearchStrategy for GradientStrategy {
    fn propose(&mut self, feedback: Option<Loss>) -> Result<Proposal, SearchError> {
        if self.exhausted {
            return Ok(Proposal::Exhausted);
        }

        if let Some(candidate) = self.awaiting.take() {
            let Some(loss) = feedback else {
                self.awaiting = Some(candidate);
                return Err(SearchError::MissingFeedback);
            };
            if self.center_loss.is_none() {
                self.center_loss = Some(loss);
            } else {
                self.tried.push((candidate, loss));
            }
        }

        if self.center_loss.is_none() {
            self.awaiting = Some(self.center.clone());
            return Ok(Proposal::Candidate(self.center.clone()));
        }

        if self.pending.is_empty() {
            if !self.tried.is_empty() {
                self.conclude_round();
            }
            if self.step < self.min_step {
                info!(params = %self.center, step = self.step, "gradient search converged");
                self.exhausted = true;
                return Ok(Proposal::Exhausted);
            }
            self.pending = self.perturbations();
        }

        match self.pending.pop_front() {
            Some(candidate) => {
                self.awaiting = Some(candidate.clone());
                Ok(Proposal::Candidate(candidate))
            }
            None => {
                self.exhausted = true;
                Ok(Proposal::Exhausted)
            }
        }
    }
}
