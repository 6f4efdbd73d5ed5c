use optimatch::chromosome::Chromosome;
use optimatch::fitness::FitnessValue;
use optimatch::population::Population;

#[allow(dead_code)]
pub fn genes(chromosome: &Chromosome) -> Vec<u32> {
    chromosome.genes().iter().map(|p| p.0).collect()
}

#[allow(dead_code)]
pub fn genes_with_fitness(chromosome: &Chromosome) -> (Vec<u32>, Option<FitnessValue>) {
    (genes(chromosome), chromosome.fitness())
}

#[allow(dead_code)]
pub fn population_genes(population: &Population) -> Vec<Vec<u32>> {
    population.iter().map(genes).collect()
}

#[allow(dead_code)]
pub fn population_fitnesses(population: &Population) -> Vec<Option<FitnessValue>> {
    population.iter().map(|c| c.fitness()).collect()
}
