//! Per-generation aggregates and the final run result.
use crate::chromosome::Chromosome;
use crate::evolve::EvolveConfig;
use crate::fitness::FitnessValue;
use crate::model::{ProjectId, StudentId};
use std::fmt;
use std::time::Duration;

/// Fitness aggregates of one generation's population, recorded before any
/// breeding for that generation happens. `best_ever` is monotone
/// non-decreasing across the run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: FitnessValue,
    pub mean: f64,
    pub worst: FitnessValue,
    pub stddev: f64,
    pub valid_count: usize,
    pub best_ever: FitnessValue,
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generation {}: best/mean/worst {} / {:.1} / {}, stddev {:.1}, valid {}, best-ever {}",
            self.generation,
            self.best,
            self.mean,
            self.worst,
            self.stddev,
            self.valid_count,
            self.best_ever
        )
    }
}

/// Why the generational loop ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    MaxGenerations,
    TargetFitness,
    Converged,
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::MaxGenerations => write!(f, "max generations reached"),
            StopReason::TargetFitness => write!(f, "target fitness reached"),
            StopReason::Converged => write!(f, "converged"),
            StopReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Post-run conditions worth surfacing next to the result. None of these
/// abort a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advisory {
    /// No project in the catalog admits this student's GPA; their position
    /// stays in violation through any repair.
    NoFeasibleProject { student: StudentId },
    /// The reported best assignment still violates constraints.
    ResidualViolations {
        capacity: usize,
        gpa: usize,
        partner: usize,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::NoFeasibleProject { student } => {
                write!(f, "no project admits student {}", student)
            }
            Advisory::ResidualViolations {
                capacity,
                gpa,
                partner,
            } => write!(
                f,
                "best assignment keeps violations (capacity: {}, gpa: {}, partner: {})",
                capacity, gpa, partner
            ),
        }
    }
}

/// One student's final placement with the preference rank it satisfies
/// (`None` = the project was not in the student's preferences).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub student: StudentId,
    pub project: ProjectId,
    pub rank: Option<u8>,
}

/// Run-level metadata: the parameters used, how long the run took and why it
/// stopped.
#[derive(Clone, Debug)]
pub struct RunMetadata {
    pub config: EvolveConfig,
    pub generations: usize,
    pub elapsed: Duration,
    pub best_fitness: FitnessValue,
    pub stop_reason: StopReason,
}

impl RunMetadata {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// The outcome of one run: the best assignment ever observed, the stats
/// stream, run metadata and any advisories.
#[derive(Clone, Debug)]
pub struct RunResult {
    pub assignments: Vec<AssignmentRecord>,
    pub best: Chromosome,
    pub stats: Vec<GenerationStats>,
    pub metadata: RunMetadata,
    pub advisories: Vec<Advisory>,
}

impl RunResult {
    pub fn assignment_for(&self, student: StudentId) -> Option<ProjectId> {
        self.assignments
            .iter()
            .find(|record| record.student == student)
            .map(|record| record.project)
    }

    /// Histogram of satisfied preference ranks, indexed by rank; bucket 0
    /// counts placements outside the student's preferences.
    pub fn rank_distribution(&self) -> [usize; 6] {
        let mut histogram = [0usize; 6];
        for record in &self.assignments {
            histogram[record.rank.unwrap_or(0) as usize] += 1;
        }
        histogram
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "run_result:")?;
        writeln!(f, "  best_fitness: {}", self.metadata.best_fitness)?;
        writeln!(f, "  generations: {}", self.metadata.generations)?;
        writeln!(f, "  elapsed_ms: {}", self.metadata.elapsed_ms())?;
        writeln!(f, "  stop_reason: {}", self.metadata.stop_reason)?;
        let histogram = self.rank_distribution();
        writeln!(
            f,
            "  rank_distribution (1..5/unlisted): {:?} / {}",
            &histogram[1..],
            histogram[0]
        )?;
        for advisory in &self.advisories {
            writeln!(f, "  advisory: {}", advisory)?;
        }
        Ok(())
    }
}
