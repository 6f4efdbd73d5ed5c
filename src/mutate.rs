//! The mutation phase, perturbing one chromosome in place.
//!
//! The driver gates mutation per chromosome with the configured rate and then
//! applies exactly one operator. Every application goes through the
//! chromosome's tainting writers, so the fitness and validity caches can never
//! go stale.
use crate::chromosome::Chromosome;
use crate::fitness::FitnessValue;
use crate::model::ProjectId;
use rand::prelude::*;

/// In-place perturbation operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mutate {
    /// Exchange the assignments of two distinct positions.
    Swap,
    /// Reassign one position to a uniformly random candidate project.
    RandomReset,
    /// Fisher-Yates shuffle of a random inclusive segment.
    Scramble,
    /// Reverse a random inclusive segment.
    Inversion,
}

impl Default for Mutate {
    fn default() -> Self {
        Mutate::Swap
    }
}

impl Mutate {
    /// Apply this operator once.
    pub fn apply<R: Rng>(
        &self,
        chromosome: &mut Chromosome,
        candidates: &[ProjectId],
        rng: &mut R,
    ) {
        match self {
            Mutate::Swap => swap(chromosome, rng),
            Mutate::RandomReset => random_reset(chromosome, candidates, rng),
            Mutate::Scramble => scramble(chromosome, rng),
            Mutate::Inversion => inversion(chromosome, rng),
        }
    }

    /// Independent Bernoulli trial per position, each a random reset. Returns
    /// the number of mutated positions.
    pub fn per_gene<R: Rng>(
        chromosome: &mut Chromosome,
        rate: f64,
        candidates: &[ProjectId],
        rng: &mut R,
    ) -> usize {
        let mut mutated = 0;
        for position in 0..chromosome.len() {
            if rng.gen_bool(rate.clamp(0.0, 1.0)) {
                chromosome.set(position, candidates[rng.gen_range(0..candidates.len())]);
                mutated += 1;
            }
        }
        mutated
    }

    /// Fitness-adaptive rate: strong chromosomes mutate near `min_rate`, weak
    /// ones near `max_rate`. The fitness ratio is clamped into [0, 1], so a
    /// negative score gets the full `max_rate`.
    pub fn adaptive_rate(
        fitness: FitnessValue,
        max_fitness: FitnessValue,
        min_rate: f64,
        max_rate: f64,
    ) -> f64 {
        let ratio = if max_fitness <= 0 {
            0.0
        } else {
            (fitness as f64 / max_fitness as f64).clamp(0.0, 1.0)
        };
        max_rate - ratio * (max_rate - min_rate)
    }
}

fn swap<R: Rng>(chromosome: &mut Chromosome, rng: &mut R) {
    let n = chromosome.len();
    if n < 2 {
        return;
    }
    let a = rng.gen_range(0..n);
    let mut b = rng.gen_range(0..n);
    while b == a {
        b = rng.gen_range(0..n);
    }
    chromosome.swap(a, b);
}

fn random_reset<R: Rng>(chromosome: &mut Chromosome, candidates: &[ProjectId], rng: &mut R) {
    let position = rng.gen_range(0..chromosome.len());
    chromosome.set(position, candidates[rng.gen_range(0..candidates.len())]);
}

fn scramble<R: Rng>(chromosome: &mut Chromosome, rng: &mut R) {
    let (a, b) = segment(chromosome.len(), rng);
    for position in ((a + 1)..=b).rev() {
        let other = rng.gen_range(a..=position);
        chromosome.swap(position, other);
    }
}

fn inversion<R: Rng>(chromosome: &mut Chromosome, rng: &mut R) {
    let (mut a, mut b) = segment(chromosome.len(), rng);
    while a < b {
        chromosome.swap(a, b);
        a += 1;
        b -= 1;
    }
}

/// Random inclusive segment `[a, b]` with `a <= b`.
fn segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let first = rng.gen_range(0..n);
    let second = rng.gen_range(0..n);
    if first <= second {
        (first, second)
    } else {
        (second, first)
    }
}
