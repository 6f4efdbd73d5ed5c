mod support;
use approx::assert_relative_eq;
use support::build;
use support::inspect;
use support::*;

#[test]
fn sort_flag_cleared_by_mutation_and_set_by_sort() {
    let mut population = build::population_with_fitness(vec![
        (vec![1], 10),
        (vec![2], 30),
        (vec![3], 20),
    ]);
    assert!(!population.is_sorted());

    population.sort_by_fitness();
    assert!(population.is_sorted());
    assert_eq!(
        inspect::population_genes(&population),
        vec![vec![2], vec![3], vec![1]]
    );

    population.push(build::chromosome_with_fitness(vec![4], 40));
    assert!(!population.is_sorted());
}

#[test]
fn best_and_worst_force_a_sort() {
    let mut population = build::population_with_fitness(vec![
        (vec![1], -5),
        (vec![2], 25),
        (vec![3], 10),
    ]);

    assert_eq!(population.best().and_then(|c| c.fitness()), Some(25));
    assert_eq!(population.worst().and_then(|c| c.fitness()), Some(-5));
    assert!(population.is_sorted());
}

#[test]
fn first_element_after_sort_has_maximum_fitness() {
    let mut population = build::population_with_fitness(vec![
        (vec![1], 3),
        (vec![2], 17),
        (vec![3], 17),
        (vec![4], -2),
    ]);
    population.sort_by_fitness();

    let maximum = population.iter().filter_map(|c| c.fitness()).max();
    assert_eq!(population.get(0).and_then(|c| c.fitness()), maximum);
}

#[test]
fn get_elite_returns_independent_copies() {
    let mut population = build::population_with_fitness(vec![
        (vec![1, 1], 10),
        (vec![2, 2], 30),
        (vec![3, 3], 20),
    ]);

    let mut elite = population.get_elite(2);
    assert_eq!(
        elite.iter().map(inspect::genes).collect::<Vec<_>>(),
        vec![vec![2, 2], vec![3, 3]]
    );

    elite[0].set(0, ProjectId(9));
    assert_eq!(
        inspect::population_genes(&population),
        vec![vec![2, 2], vec![3, 3], vec![1, 1]]
    );
}

#[test]
fn aggregates_over_evaluated_chromosomes() {
    let mut population = build::population_with_fitness(vec![
        (vec![1], 10),
        (vec![2], 20),
        (vec![3], 30),
    ]);
    population.push(build::chromosome(vec![4]));

    assert_relative_eq!(population.fitness_mean(), 20.0);
    assert_relative_eq!(
        population.fitness_stddev(),
        (200.0_f64 / 3.0).sqrt(),
        epsilon = 1e-9
    );
}

#[test]
fn valid_count_reads_the_validity_cache() {
    let mut population = build::population(vec![vec![1], vec![2], vec![3]]);
    population.get_mut(0).unwrap().set_valid(true);
    population.get_mut(1).unwrap().set_valid(false);

    assert_eq!(population.valid_count(), 1);
}

#[test]
fn truncate_to_drops_the_worst() {
    let mut population = build::population_with_fitness(vec![
        (vec![1], 5),
        (vec![2], 50),
        (vec![3], 20),
        (vec![4], 35),
    ]);

    population.truncate_to(2);

    assert_eq!(
        inspect::population_genes(&population),
        vec![vec![2], vec![4]]
    );
}

#[test]
fn replace_all_swaps_contents() {
    let mut population = build::population(vec![vec![1], vec![2]]);
    population.sort_by_fitness();

    population.replace_all(vec![build::chromosome(vec![7])]);

    assert_eq!(population.size(), 1);
    assert!(!population.is_sorted());
    assert_eq!(inspect::population_genes(&population), vec![vec![7]]);
}
