//! The crossover phase, producing two offspring from a parent pair.
use crate::chromosome::Chromosome;
use rand::prelude::*;

/// Recombination strategy. The crossover rate is carried by the driver
/// configuration and gates whether recombination happens at all.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Crossover {
    /// Each position independently inherits from parent one with probability
    /// `bias` (offspring two takes the other parent's gene).
    Uniform { bias: f64 },
    /// One cut drawn from `1..N`; the tail beyond the cut is exchanged.
    SinglePoint,
    /// Two points drawn from `0..N`; the segment between them is exchanged.
    TwoPoint,
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::Uniform { bias: 0.5 }
    }
}

impl Crossover {
    /// Produce two offspring.
    ///
    /// With probability `1 - rate` the offspring are plain copies of the
    /// parents (caches intact, since the genes are unchanged). Otherwise the
    /// offspring are fresh chromosomes with cleared caches.
    pub fn offspring<R: Rng>(
        &self,
        rate: f64,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        if !rng.gen_bool(rate.clamp(0.0, 1.0)) {
            return (parent1.clone(), parent2.clone());
        }
        match self {
            Crossover::Uniform { bias } => uniform(*bias, parent1, parent2, rng),
            Crossover::SinglePoint => single_point(parent1, parent2, rng),
            Crossover::TwoPoint => two_point(parent1, parent2, rng),
        }
    }
}

fn uniform<R: Rng>(
    bias: f64,
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let n = parent1.len();
    let mut genes1 = Vec::with_capacity(n);
    let mut genes2 = Vec::with_capacity(n);
    for position in 0..n {
        if rng.gen_bool(bias.clamp(0.0, 1.0)) {
            genes1.push(parent1.get(position));
            genes2.push(parent2.get(position));
        } else {
            genes1.push(parent2.get(position));
            genes2.push(parent1.get(position));
        }
    }
    (Chromosome::new(genes1), Chromosome::new(genes2))
}

fn single_point<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let n = parent1.len();
    if n < 2 {
        // No cut in 1..N exists; both offspring copy a full parent.
        return (parent1.clone(), parent2.clone());
    }
    let cut = rng.gen_range(1..n);

    let mut genes1: Vec<_> = parent1.genes()[..cut].to_vec();
    genes1.extend_from_slice(&parent2.genes()[cut..]);
    let mut genes2: Vec<_> = parent2.genes()[..cut].to_vec();
    genes2.extend_from_slice(&parent1.genes()[cut..]);

    (Chromosome::new(genes1), Chromosome::new(genes2))
}

fn two_point<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let n = parent1.len();
    let first = rng.gen_range(0..n);
    let second = rng.gen_range(0..n);
    let (a, b) = if first <= second {
        (first, second)
    } else {
        (second, first)
    };

    let mut genes1 = parent1.genes().to_vec();
    let mut genes2 = parent2.genes().to_vec();
    for position in a..b {
        genes1[position] = parent2.get(position);
        genes2[position] = parent1.get(position);
    }
    (Chromosome::new(genes1), Chromosome::new(genes2))
}
