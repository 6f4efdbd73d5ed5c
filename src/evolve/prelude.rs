//! Re-exports for driving a run end-to-end.
#[doc(no_inline)]
pub use crate::chromosome::Chromosome;
#[doc(no_inline)]
pub use crate::constraint::{ConstraintChecker, Repairer, ViolationReport};
#[doc(no_inline)]
pub use crate::crossover::Crossover;
#[doc(no_inline)]
pub use crate::elitism::Elitism;
#[doc(no_inline)]
pub use crate::errors::TryFromEvolveBuilderError;
#[doc(no_inline)]
pub use crate::evolve::{Evolve, EvolveBuilder, EvolveConfig};
#[doc(no_inline)]
pub use crate::fitness::{
    FitnessBreakdown, FitnessEvaluator, FitnessValue, PenaltyWeights, RANK_WEIGHTS,
};
#[doc(no_inline)]
pub use crate::model::{
    DataError, MatchData, Preference, Project, ProjectId, Student, StudentId,
};
#[doc(no_inline)]
pub use crate::mutate::Mutate;
#[doc(no_inline)]
pub use crate::population::Population;
#[doc(no_inline)]
pub use crate::select::Select;
#[doc(no_inline)]
pub use crate::stats::{
    Advisory, AssignmentRecord, GenerationStats, RunMetadata, RunResult, StopReason,
};
