//! The selection phase, where parent chromosomes are drawn for the crossover
//! phase. Selection reads the population and never mutates it.
use crate::chromosome::Chromosome;
use crate::fitness::FitnessValue;
use crate::population::Population;
use itertools::Itertools;
use rand::prelude::*;

/// How many times a parent pair redraws the second parent to avoid handing
/// back the same chromosome twice.
const PAIR_RESAMPLE_LIMIT: usize = 10;

/// Parent selection strategy. Each variant's parameters live in its payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Select {
    /// Draw `size` chromosomes with replacement, keep the fittest; ties go to
    /// the first one seen. Moderate, tunable selection pressure.
    Tournament { size: usize },
    /// Fitness-proportionate draw. Negative scores are shifted so every
    /// chromosome keeps a positive weight.
    Roulette,
    /// Draw proportional to descending-fitness rank (best has rank N), which
    /// sidesteps roulette's sensitivity to fitness scaling.
    Rank,
}

impl Default for Select {
    fn default() -> Self {
        Select::Tournament { size: 3 }
    }
}

impl Select {
    /// Select one parent from the population.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn select<'a, R: Rng>(&self, population: &'a Population, rng: &mut R) -> &'a Chromosome {
        assert!(!population.is_empty(), "cannot select from empty population");
        match self {
            Select::Tournament { size } => tournament(population, *size, rng),
            Select::Roulette => roulette(population, rng),
            Select::Rank => rank(population, rng),
        }
    }

    /// Draw two parents, resampling the second a bounded number of times so
    /// it is usually not the very same chromosome as the first.
    pub fn parent_pair<'a, R: Rng>(
        &self,
        population: &'a Population,
        rng: &mut R,
    ) -> (&'a Chromosome, &'a Chromosome) {
        let first = self.select(population, rng);
        let mut second = self.select(population, rng);
        for _ in 0..PAIR_RESAMPLE_LIMIT {
            if !std::ptr::eq(first, second) {
                break;
            }
            second = self.select(population, rng);
        }
        (first, second)
    }
}

fn tournament<'a, R: Rng>(
    population: &'a Population,
    size: usize,
    rng: &mut R,
) -> &'a Chromosome {
    let n = population.size();
    let mut winner_index = rng.gen_range(0..n);
    let mut winner_fitness = fitness_or_min(population, winner_index);
    for _ in 1..size.max(1) {
        let index = rng.gen_range(0..n);
        let fitness = fitness_or_min(population, index);
        if fitness > winner_fitness {
            winner_index = index;
            winner_fitness = fitness;
        }
    }
    population.get(winner_index).unwrap()
}

fn roulette<'a, R: Rng>(population: &'a Population, rng: &mut R) -> &'a Chromosome {
    let n = population.size();
    let fitnesses: Vec<FitnessValue> =
        population.iter().map(|c| c.fitness().unwrap_or(0)).collect();

    let min_fitness = *fitnesses.iter().min().unwrap();
    let shift = if min_fitness < 0 { -min_fitness + 1 } else { 0 };

    let total: FitnessValue = fitnesses.iter().map(|f| f + shift).sum();
    if total == 0 {
        return population.get(rng.gen_range(0..n)).unwrap();
    }

    let r = rng.gen_range(0..total);
    let mut cumulative = 0;
    for (index, fitness) in fitnesses.iter().enumerate() {
        cumulative += fitness + shift;
        if cumulative >= r {
            return population.get(index).unwrap();
        }
    }
    population.get(n - 1).unwrap()
}

fn rank<'a, R: Rng>(population: &'a Population, rng: &mut R) -> &'a Chromosome {
    let n = population.size();
    // Local descending order; the population's own lazy sort state is not
    // touched by selection.
    let order: Vec<usize> = (0..n)
        .sorted_unstable_by(|&a, &b| {
            population
                .get(a)
                .unwrap()
                .cmp_fitness_desc(population.get(b).unwrap())
        })
        .collect();

    let total = n * (n + 1) / 2;
    let r = rng.gen_range(0..total);
    let mut cumulative = 0;
    for (sorted_position, &index) in order.iter().enumerate() {
        cumulative += n - sorted_position;
        if cumulative > r {
            return population.get(index).unwrap();
        }
    }
    population.get(*order.last().unwrap()).unwrap()
}

fn fitness_or_min(population: &Population, index: usize) -> FitnessValue {
    population
        .get(index)
        .and_then(|c| c.fitness())
        .unwrap_or(FitnessValue::MIN)
}
