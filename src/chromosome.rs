//! One candidate assignment: a fixed-length vector of project identities,
//! position `i` holding the project of the `i`-th student.
use crate::fitness::FitnessValue;
use crate::model::ProjectId;
use rand::prelude::*;
use std::cmp::Ordering;

/// A candidate solution with cached fitness and validity.
///
/// Both caches are sum types: `None` means not computed. Any write to the
/// assignment vector resets both to `None`, so a stale score can never be
/// observed.
#[derive(Clone, Debug)]
pub struct Chromosome {
    genes: Vec<ProjectId>,
    fitness: Option<FitnessValue>,
    valid: Option<bool>,
}

impl Chromosome {
    pub fn new(genes: Vec<ProjectId>) -> Self {
        Self {
            genes,
            fitness: None,
            valid: None,
        }
    }

    /// Uniformly random assignment over the candidate projects.
    pub fn random<R: Rng>(length: usize, candidates: &[ProjectId], rng: &mut R) -> Self {
        let genes = (0..length)
            .map(|_| candidates[rng.gen_range(0..candidates.len())])
            .collect();
        Self::new(genes)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn get(&self, position: usize) -> ProjectId {
        self.genes[position]
    }

    pub fn set(&mut self, position: usize, project: ProjectId) {
        self.genes[position] = project;
        self.taint();
    }

    /// Swap the assignments at two positions.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.genes.swap(a, b);
        self.taint();
    }

    pub fn genes(&self) -> &[ProjectId] {
        &self.genes
    }

    /// Number of positions assigned to `project`.
    pub fn count_assigned(&self, project: ProjectId) -> usize {
        self.genes.iter().filter(|&&g| g == project).count()
    }

    /// Positions assigned to `project`, ascending.
    pub fn positions_assigned(&self, project: ProjectId) -> Vec<usize> {
        self.genes
            .iter()
            .enumerate()
            .filter(|(_, &g)| g == project)
            .map(|(position, _)| position)
            .collect()
    }

    pub fn fitness(&self) -> Option<FitnessValue> {
        self.fitness
    }
    pub fn set_fitness(&mut self, fitness: FitnessValue) {
        self.fitness = Some(fitness);
    }

    pub fn valid(&self) -> Option<bool> {
        self.valid
    }
    pub fn set_valid(&mut self, valid: bool) {
        self.valid = Some(valid);
    }

    /// Reset both caches to not-computed.
    pub fn taint(&mut self) {
        self.fitness = None;
        self.valid = None;
    }

    /// Descending order by cached fitness; unevaluated chromosomes sort last.
    pub fn cmp_fitness_desc(&self, other: &Self) -> Ordering {
        other
            .fitness
            .unwrap_or(FitnessValue::MIN)
            .cmp(&self.fitness.unwrap_or(FitnessValue::MIN))
    }
}

/// Equality is structural over the assignment vector; caches do not participate.
impl PartialEq for Chromosome {
    fn eq(&self, other: &Self) -> bool {
        self.genes == other.genes
    }
}
impl Eq for Chromosome {}
