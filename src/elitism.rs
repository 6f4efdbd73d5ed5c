//! Unconditional carry-over of the fittest chromosomes into the next
//! generation.
use crate::chromosome::Chromosome;
use crate::population::Population;
use rustc_hash::{FxHashSet, FxHasher};
use std::hash::{Hash, Hasher};

/// Elite selection parameters. The elite count is
/// `clamp(round(fraction * N), min_elite, max_elite)`, capped at the
/// population size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Elitism {
    pub fraction: f64,
    pub min_elite: usize,
    pub max_elite: usize,
    /// Skip chromosomes whose assignment vector was already taken, so the
    /// elite slots are not filled with structural duplicates.
    pub unique_only: bool,
}

impl Default for Elitism {
    fn default() -> Self {
        Self {
            fraction: 0.05,
            min_elite: 1,
            max_elite: 50,
            unique_only: true,
        }
    }
}

impl Elitism {
    pub fn new(fraction: f64, min_elite: usize, max_elite: usize, unique_only: bool) -> Self {
        Self {
            fraction,
            min_elite,
            max_elite,
            unique_only,
        }
    }

    pub fn elite_count(&self, population_size: usize) -> usize {
        let k = (self.fraction * population_size as f64).round() as usize;
        k.clamp(self.min_elite, self.max_elite).min(population_size)
    }

    /// Deep copies of the top elites, in descending fitness order.
    ///
    /// With `unique_only` the sorted population is walked skipping structural
    /// duplicates; fewer than the target count may be returned when the
    /// population is exhausted.
    pub fn select_elite(&self, population: &mut Population) -> Vec<Chromosome> {
        let k = self.elite_count(population.size());
        population.sort_by_fitness();
        if !self.unique_only {
            return population.get_elite(k);
        }

        let mut seen: FxHashSet<u64> = FxHashSet::default();
        let mut elite = Vec::with_capacity(k);
        for chromosome in population.iter() {
            if elite.len() == k {
                break;
            }
            if seen.insert(genes_hash(chromosome)) {
                elite.push(chromosome.clone());
            }
        }
        elite
    }

    /// Overwrite the worst `elite.len()` slots of `population` with deep
    /// copies of the elites. The caller guarantees the elites came from a
    /// population at least as fit, which makes the post-application best
    /// fitness non-decreasing.
    pub fn apply_elitism(&self, elite: &[Chromosome], population: &mut Population) {
        population.sort_by_fitness();
        let n = population.size();
        let count = elite.len().min(n);
        for (offset, chromosome) in elite.iter().take(count).enumerate() {
            population.set(n - count + offset, chromosome.clone());
        }
    }
}

fn genes_hash(chromosome: &Chromosome) -> u64 {
    let mut hasher = FxHasher::default();
    chromosome.genes().hash(&mut hasher);
    hasher.finish()
}
