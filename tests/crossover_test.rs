mod support;
use support::build;
use support::inspect;
use support::*;

#[test]
fn rate_zero_returns_assignment_equal_copies() {
    let parent1 = build::chromosome_with_fitness(vec![1, 1, 1, 1], 10);
    let parent2 = build::chromosome_with_fitness(vec![2, 2, 2, 2], 20);
    let mut rng = SmallRng::seed_from_u64(0);

    for crossover in [
        Crossover::Uniform { bias: 0.5 },
        Crossover::SinglePoint,
        Crossover::TwoPoint,
    ] {
        let (child1, child2) = crossover.offspring(0.0, &parent1, &parent2, &mut rng);
        assert_eq!(child1, parent1);
        assert_eq!(child2, parent2);
        // Unchanged genes keep their caches.
        assert_eq!(child1.fitness(), Some(10));
        assert_eq!(child2.fitness(), Some(20));
    }
}

#[test]
fn offspring_have_cleared_caches() {
    let parent1 = build::chromosome_with_fitness(vec![1, 1, 1, 1], 10);
    let parent2 = build::chromosome_with_fitness(vec![2, 2, 2, 2], 20);
    let mut rng = SmallRng::seed_from_u64(1);

    for crossover in [
        Crossover::Uniform { bias: 0.5 },
        Crossover::SinglePoint,
        Crossover::TwoPoint,
    ] {
        let (child1, child2) = crossover.offspring(1.0, &parent1, &parent2, &mut rng);
        assert_eq!(child1.fitness(), None);
        assert_eq!(child2.fitness(), None);
        assert_eq!(child1.valid(), None);
        assert_eq!(child2.valid(), None);
    }
}

#[test]
fn uniform_offspring_are_complementary_per_position() {
    let parent1 = build::chromosome(vec![1, 3, 5, 7, 9]);
    let parent2 = build::chromosome(vec![2, 4, 6, 8, 10]);
    let crossover = Crossover::Uniform { bias: 0.5 };
    let mut rng = SmallRng::seed_from_u64(2);

    for _ in 0..20 {
        let (child1, child2) = crossover.offspring(1.0, &parent1, &parent2, &mut rng);
        for position in 0..parent1.len() {
            let inherited = (child1.get(position), child2.get(position));
            let from_parents = (parent1.get(position), parent2.get(position));
            let swapped = (parent2.get(position), parent1.get(position));
            assert!(inherited == from_parents || inherited == swapped);
        }
    }
}

#[test]
fn uniform_bias_one_reproduces_the_parents() {
    let parent1 = build::chromosome(vec![1, 3, 5]);
    let parent2 = build::chromosome(vec![2, 4, 6]);
    let mut rng = SmallRng::seed_from_u64(3);

    let (child1, child2) =
        Crossover::Uniform { bias: 1.0 }.offspring(1.0, &parent1, &parent2, &mut rng);
    assert_eq!(child1, parent1);
    assert_eq!(child2, parent2);
}

#[test]
fn single_point_exchanges_a_nonempty_tail() {
    let parent1 = build::chromosome(vec![1; 8]);
    let parent2 = build::chromosome(vec![2; 8]);
    let mut rng = SmallRng::seed_from_u64(4);

    for _ in 0..30 {
        let (child1, child2) = Crossover::SinglePoint.offspring(1.0, &parent1, &parent2, &mut rng);
        let genes1 = inspect::genes(&child1);
        let genes2 = inspect::genes(&child2);

        // Child 1 is 1^cut 2^(8-cut) with cut in 1..8; child 2 the complement.
        let cut = genes1.iter().take_while(|&&g| g == 1).count();
        assert!((1..8).contains(&cut), "cut {} outside 1..8", cut);
        assert!(genes1[cut..].iter().all(|&g| g == 2));
        assert!(genes2[..cut].iter().all(|&g| g == 2));
        assert!(genes2[cut..].iter().all(|&g| g == 1));
    }
}

#[test]
fn single_point_on_length_one_copies_the_parents() {
    let parent1 = build::chromosome(vec![1]);
    let parent2 = build::chromosome(vec![2]);
    let mut rng = SmallRng::seed_from_u64(5);

    let (child1, child2) = Crossover::SinglePoint.offspring(1.0, &parent1, &parent2, &mut rng);
    assert_eq!(child1, parent1);
    assert_eq!(child2, parent2);
}

#[test]
fn two_point_swaps_only_the_inner_segment() {
    let parent1 = build::chromosome(vec![1; 10]);
    let parent2 = build::chromosome(vec![2; 10]);
    let mut rng = SmallRng::seed_from_u64(6);

    for _ in 0..30 {
        let (child1, child2) = Crossover::TwoPoint.offspring(1.0, &parent1, &parent2, &mut rng);
        let genes1 = inspect::genes(&child1);
        let genes2 = inspect::genes(&child2);

        for position in 0..10 {
            // Positions are exchanged together or not at all.
            assert_eq!(genes1[position] == 2, genes2[position] == 1);
        }
        // The exchanged region is one contiguous run.
        let exchanged: Vec<usize> = (0..10).filter(|&p| genes1[p] == 2).collect();
        if let (Some(&first), Some(&last)) = (exchanged.first(), exchanged.last()) {
            assert_eq!(exchanged.len(), last - first + 1);
        }
    }
}

#[test]
fn offspring_always_preserve_length() {
    let data = build::cohort30();
    let candidates = data.project_ids();
    let mut rng = SmallRng::seed_from_u64(7);
    let parent1 = Chromosome::random(data.student_count(), &candidates, &mut rng);
    let parent2 = Chromosome::random(data.student_count(), &candidates, &mut rng);

    for crossover in [
        Crossover::Uniform { bias: 0.5 },
        Crossover::SinglePoint,
        Crossover::TwoPoint,
    ] {
        let (child1, child2) = crossover.offspring(0.8, &parent1, &parent2, &mut rng);
        assert_eq!(child1.len(), data.student_count());
        assert_eq!(child2.len(), data.student_count());
    }
}
