mod support;
use support::build;
use support::inspect;
use support::*;

#[test]
fn random_construction_draws_from_candidates() {
    let candidates = vec![ProjectId(1), ProjectId(2), ProjectId(3)];
    let mut rng = SmallRng::seed_from_u64(0);
    let chromosome = Chromosome::random(50, &candidates, &mut rng);

    assert_eq!(chromosome.len(), 50);
    assert!(chromosome.genes().iter().all(|g| candidates.contains(g)));
    assert_eq!(chromosome.fitness(), None);
    assert_eq!(chromosome.valid(), None);
}

#[test]
fn set_taints_both_caches() {
    let mut chromosome = build::chromosome(vec![1, 2, 1]);
    chromosome.set_fitness(42);
    chromosome.set_valid(true);

    chromosome.set(1, ProjectId(1));

    assert_eq!(chromosome.fitness(), None);
    assert_eq!(chromosome.valid(), None);
}

#[test]
fn swap_taints_and_twice_is_identity() {
    let mut chromosome = build::chromosome(vec![1, 2, 3, 4]);
    chromosome.set_fitness(7);

    chromosome.swap(0, 3);
    assert_eq!(chromosome.fitness(), None);
    assert_eq!(inspect::genes(&chromosome), vec![4, 2, 3, 1]);

    chromosome.swap(0, 3);
    assert_eq!(inspect::genes(&chromosome), vec![1, 2, 3, 4]);
}

#[test]
fn counts_and_positions_by_project() {
    let chromosome = build::chromosome(vec![5, 9, 5, 5, 9]);

    assert_eq!(chromosome.count_assigned(ProjectId(5)), 3);
    assert_eq!(chromosome.count_assigned(ProjectId(9)), 2);
    assert_eq!(chromosome.count_assigned(ProjectId(1)), 0);
    assert_eq!(chromosome.positions_assigned(ProjectId(5)), vec![0, 2, 3]);
    assert_eq!(chromosome.positions_assigned(ProjectId(9)), vec![1, 4]);
}

#[test]
fn equality_is_structural_over_genes() {
    let mut a = build::chromosome(vec![1, 2, 3]);
    let b = build::chromosome(vec![1, 2, 3]);
    let c = build::chromosome(vec![3, 2, 1]);

    a.set_fitness(99);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn deep_copy_is_independent() {
    let mut original = build::chromosome(vec![1, 2, 3]);
    let copy = original.clone();

    original.set(0, ProjectId(9));

    assert_eq!(inspect::genes(&copy), vec![1, 2, 3]);
    assert_eq!(inspect::genes(&original), vec![9, 2, 3]);
}

#[test]
fn ordering_is_descending_by_fitness_with_unevaluated_last() {
    let high = build::chromosome_with_fitness(vec![1], 100);
    let low = build::chromosome_with_fitness(vec![2], -50);
    let unevaluated = build::chromosome(vec![3]);

    assert_eq!(high.cmp_fitness_desc(&low), std::cmp::Ordering::Less);
    assert_eq!(low.cmp_fitness_desc(&high), std::cmp::Ordering::Greater);
    assert_eq!(
        low.cmp_fitness_desc(&unevaluated),
        std::cmp::Ordering::Less
    );
}
