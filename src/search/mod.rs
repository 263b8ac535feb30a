//! Strategies that propose parameter sets to evaluate.
//!
//! A strategy is driven by repeated calls to [`SearchStrategy::propose`].
//! Each call hands back the loss of the previously proposed candidate (or
//! `None` on the first call) and receives the next candidate, until the
//! strategy reports [`Proposal::Exhausted`].

mod gradient;
mod grid;

pub use gradient::GradientStrategy;
pub use grid::{GridStrategy, InvalidRange, Range};

use crate::{Loss, ParameterSet, SearchError};

#[derive(Debug, Clone, PartialEq)]
pub enum Proposal {
    Candidate(ParameterSet),
    Exhausted,
}

pub trait SearchStrategy {
    /// Takes the loss of the last proposed candidate and returns the next one.
    fn propose(&mut self, feedback: Option<Loss>) -> Result<Proposal, SearchError>;
}

impl<S: SearchStrategy + ?Sized> SearchStrategy for &mut S {
    fn propose(&mut self, feedback: Option<Loss>) -> Result<Proposal, SearchError> {
        (**self).propose(feedback)
    }
}

impl<S: SearchStrategy + ?Sized> SearchStrategy for Box<S> {
    fn propose(&mut self, feedback: Option<Loss>) -> Result<Proposal, SearchError> {
        (**self).propose(feedback)
    }
}
