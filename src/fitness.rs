//! The search goal: preference satisfaction minus weighted constraint
//! penalties.
//!
//! The evaluator is constructed once per run from the immutable [MatchData]
//! snapshot and fills chromosome fitness caches, sequentially or in parallel.
//! Penalized-but-alive is deliberate: infeasible chromosomes keep a (low)
//! score so the search can traverse infeasible regions.
use crate::chromosome::Chromosome;
use crate::model::MatchData;
use crate::population::Population;
use rayon::prelude::*;
use std::sync::Arc;

/// Use isize for easy handling of scores (ordering, comparing) as floats are
/// tricky in that regard.
pub type FitnessValue = isize;

/// Score per preference rank, indexed by rank. Index 0 is the weight of a
/// project the student did not list.
pub const RANK_WEIGHTS: [FitnessValue; 6] = [0, 100, 80, 60, 40, 20];

/// The weight a rank contributes; `None` means the project was not listed.
pub fn rank_weight(rank: Option<u8>) -> FitnessValue {
    match rank {
        Some(rank) => RANK_WEIGHTS[rank as usize],
        None => 0,
    }
}

/// Penalty multipliers for the three constraint families.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PenaltyWeights {
    pub capacity: FitnessValue,
    pub gpa: FitnessValue,
    pub partner: FitnessValue,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            capacity: 50,
            gpa: 30,
            partner: 40,
        }
    }
}

/// The four components of a score, plus their weighted total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FitnessBreakdown {
    pub preference_score: FitnessValue,
    pub capacity_excess: usize,
    pub gpa_violations: usize,
    pub partner_splits: usize,
    pub total: FitnessValue,
}

/// Maps a chromosome to a scalar score using the snapshot's precomputed
/// index tables.
#[derive(Clone, Debug)]
pub struct FitnessEvaluator {
    data: Arc<MatchData>,
    weights: PenaltyWeights,
    parallel: bool,
}

impl FitnessEvaluator {
    pub fn new(data: Arc<MatchData>, weights: PenaltyWeights, parallel: bool) -> Self {
        Self {
            data,
            weights,
            parallel,
        }
    }

    /// Compute the score and write it into the chromosome's cache.
    pub fn fitness(&self, chromosome: &mut Chromosome) -> FitnessValue {
        let value = self.calculate(chromosome);
        chromosome.set_fitness(value);
        value
    }

    /// Pure score computation; the cache is untouched.
    pub fn calculate(&self, chromosome: &Chromosome) -> FitnessValue {
        self.breakdown(chromosome).total
    }

    /// The four components and the weighted total.
    pub fn breakdown(&self, chromosome: &Chromosome) -> FitnessBreakdown {
        assert_eq!(
            chromosome.len(),
            self.data.student_count(),
            "chromosome length disagrees with student count"
        );

        let preference_score = self.preference_score(chromosome);
        let capacity_excess = self.capacity_excess(chromosome);
        let gpa_violations = self.gpa_violations(chromosome);
        let partner_splits = self.partner_splits(chromosome);

        let total = preference_score
            - self.weights.capacity * capacity_excess as FitnessValue
            - self.weights.gpa * gpa_violations as FitnessValue
            - self.weights.partner * partner_splits as FitnessValue;

        FitnessBreakdown {
            preference_score,
            capacity_excess,
            gpa_violations,
            partner_splits,
            total,
        }
    }

    /// Histogram of preference ranks over the assignment, indexed by rank.
    /// Bucket 0 counts assignments to unlisted projects.
    pub fn rank_distribution(&self, chromosome: &Chromosome) -> [usize; 6] {
        let mut histogram = [0usize; 6];
        for (position, &project) in chromosome.genes().iter().enumerate() {
            let bucket = self.data.rank_of(position, project).unwrap_or(0);
            histogram[bucket as usize] += 1;
        }
        histogram
    }

    /// Fill the fitness cache of every not-yet-evaluated chromosome.
    ///
    /// Parallel evaluation writes only each chromosome's own cache against the
    /// shared read-only tables, so it is bit-identical to sequential.
    pub fn evaluate_population(&self, population: &mut Population) {
        if self.parallel {
            population
                .chromosomes_mut()
                .par_iter_mut()
                .filter(|c| c.fitness().is_none())
                .for_each(|c| {
                    self.fitness(c);
                });
        } else {
            population
                .chromosomes_mut()
                .iter_mut()
                .filter(|c| c.fitness().is_none())
                .for_each(|c| {
                    self.fitness(c);
                });
        }
    }

    fn preference_score(&self, chromosome: &Chromosome) -> FitnessValue {
        chromosome
            .genes()
            .iter()
            .enumerate()
            .map(|(position, &project)| rank_weight(self.data.rank_of(position, project)))
            .sum()
    }

    /// Sum over projects of the distance outside the capacity band.
    fn capacity_excess(&self, chromosome: &Chromosome) -> usize {
        let counts = self.assignment_counts(chromosome);
        self.data
            .projects()
            .iter()
            .zip(counts)
            .map(|(project, count)| {
                project.min_capacity.saturating_sub(count)
                    + count.saturating_sub(project.max_capacity)
            })
            .sum()
    }

    fn gpa_violations(&self, chromosome: &Chromosome) -> usize {
        chromosome
            .genes()
            .iter()
            .enumerate()
            .filter(|(position, &project)| match self.data.project(project) {
                Some(project) => !project.admits(self.data.student_at(*position).gpa),
                None => false,
            })
            .count()
    }

    /// Partner pairs assigned to different projects; each pair counted once.
    fn partner_splits(&self, chromosome: &Chromosome) -> usize {
        self.data
            .partner_pairs()
            .iter()
            .filter(|&&(i, j)| chromosome.get(i) != chromosome.get(j))
            .count()
    }

    /// Per-project assignment counts, in catalog order.
    pub fn assignment_counts(&self, chromosome: &Chromosome) -> Vec<usize> {
        let mut counts = vec![0usize; self.data.projects().len()];
        for &project in chromosome.genes() {
            if let Some(index) = self.data.project_position(project) {
                counts[index] += 1;
            }
        }
        counts
    }
}
