//! The population is a container for [Chromosomes](Chromosome) with a lazily
//! maintained sort order and aggregate fitness statistics.
use crate::chromosome::Chromosome;
use stats::{mean, stddev};

/// Ordered container of chromosomes.
///
/// The `sorted` flag is encapsulated: every mutator clears it, the sort
/// routine sets it, and accessors that need order force a sort. Sorted order
/// is descending by fitness; ties are in unspecified order.
#[derive(Clone, Debug)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
    sorted: bool,
}

impl Population {
    pub fn new(chromosomes: Vec<Chromosome>) -> Self {
        Self {
            chromosomes,
            sorted: false,
        }
    }

    pub fn new_empty() -> Self {
        Self::new(vec![])
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chromosomes: Vec::with_capacity(capacity),
            sorted: false,
        }
    }

    pub fn size(&self) -> usize {
        self.chromosomes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn push(&mut self, chromosome: Chromosome) {
        self.chromosomes.push(chromosome);
        self.sorted = false;
    }

    pub fn get(&self, index: usize) -> Option<&Chromosome> {
        self.chromosomes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Chromosome> {
        self.sorted = false;
        self.chromosomes.get_mut(index)
    }

    pub fn set(&mut self, index: usize, chromosome: Chromosome) {
        self.chromosomes[index] = chromosome;
        self.sorted = false;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome> {
        self.chromosomes.iter()
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Mutable access to every chromosome; conservatively drops the sort flag.
    pub fn chromosomes_mut(&mut self) -> &mut [Chromosome] {
        self.sorted = false;
        &mut self.chromosomes
    }

    /// Sort descending by fitness. No-op when already sorted.
    pub fn sort_by_fitness(&mut self) {
        if !self.sorted {
            self.chromosomes
                .sort_unstable_by(|a, b| a.cmp_fitness_desc(b));
            self.sorted = true;
        }
    }

    /// The fittest chromosome; forces a sort.
    pub fn best(&mut self) -> Option<&Chromosome> {
        self.sort_by_fitness();
        self.chromosomes.first()
    }

    /// The least fit chromosome; forces a sort.
    pub fn worst(&mut self) -> Option<&Chromosome> {
        self.sort_by_fitness();
        self.chromosomes.last()
    }

    /// Deep copies of the top `k` chromosomes; forces a sort.
    pub fn get_elite(&mut self, k: usize) -> Vec<Chromosome> {
        self.sort_by_fitness();
        self.chromosomes.iter().take(k).cloned().collect()
    }

    pub fn fitness_mean(&self) -> f64 {
        mean(self.chromosomes.iter().filter_map(|c| c.fitness()))
    }
    pub fn fitness_stddev(&self) -> f64 {
        stddev(self.chromosomes.iter().filter_map(|c| c.fitness()))
    }

    /// Chromosomes whose validity cache says all constraints hold.
    pub fn valid_count(&self) -> usize {
        self.chromosomes
            .iter()
            .filter(|c| c.valid() == Some(true))
            .count()
    }

    pub fn clear(&mut self) {
        self.chromosomes.clear();
        self.sorted = false;
    }

    pub fn replace_all(&mut self, chromosomes: Vec<Chromosome>) {
        self.chromosomes = chromosomes;
        self.sorted = false;
    }

    /// Trim to `target` chromosomes, dropping the worst; forces a sort.
    pub fn truncate_to(&mut self, target: usize) {
        self.sort_by_fitness();
        self.chromosomes.truncate(target);
    }
}

impl From<Vec<Chromosome>> for Population {
    fn from(chromosomes: Vec<Chromosome>) -> Self {
        Self::new(chromosomes)
    }
}
