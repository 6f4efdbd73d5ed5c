//! The generational loop driving the search.
//!
//! The Evolve driver initializes a random population over the candidate
//! projects, then runs through generations in a loop:
//! * record this generation's [stats](crate::stats)
//! * check ending conditions (target fitness, convergence, cancellation)
//! * carry the [elite](crate::elitism) into the next population
//! * draw parent pairs via [selection](crate::select), recombine them via
//!   [crossover](crate::crossover), perturb via [mutation](crate::mutate) and
//!   [repair](crate::constraint::repair) the offspring
//! * evaluate [fitness](crate::fitness) for the offspring and swap populations
//!
//! Given identical inputs, configuration and seed the run is reproducible
//! bit-for-bit.
//!
//! See [EvolveBuilder] for initialization options.
//!
//! Example:
//! ```
//! use optimatch::evolve::prelude::*;
//!
//! let students = vec![
//!     Student { id: StudentId(1), name: "Ada".into(), gpa: 3.9, partner: None },
//!     Student { id: StudentId(2), name: "Grace".into(), gpa: 3.4, partner: None },
//! ];
//! let projects = vec![Project {
//!     id: ProjectId(1),
//!     code: "COMP".into(),
//!     name: "Compilers".into(),
//!     min_capacity: 1,
//!     max_capacity: 2,
//!     required_gpa: 0.0,
//! }];
//! let preferences = vec![
//!     Preference { student: StudentId(1), project: ProjectId(1), rank: 1 },
//!     Preference { student: StudentId(2), project: ProjectId(1), rank: 1 },
//! ];
//! let data = MatchData::new(students, projects, preferences).unwrap();
//!
//! let mut evolve = Evolve::builder()
//!     .with_data(data)
//!     .with_config(EvolveConfig::quick())
//!     .with_seed(42)
//!     .build()
//!     .unwrap();
//! let result = evolve.run();
//!
//! assert_eq!(result.metadata.best_fitness, 200);
//! ```
mod builder;
pub mod prelude;

pub use self::builder::Builder as EvolveBuilder;

use crate::chromosome::Chromosome;
use crate::constraint::{ConstraintChecker, Repairer};
use crate::crossover::Crossover;
use crate::elitism::Elitism;
use crate::fitness::{FitnessEvaluator, FitnessValue, PenaltyWeights};
use crate::model::{MatchData, ProjectId};
use crate::mutate::Mutate;
use crate::population::Population;
use crate::select::Select;
use crate::stats::{
    Advisory, AssignmentRecord, GenerationStats, RunMetadata, RunResult, StopReason,
};
use rand::prelude::*;
use rand::rngs::SmallRng;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// All run parameters. See [EvolveBuilder] for per-field validation; the
/// presets bundle tested configurations for common cohort sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct EvolveConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub elite_percentage: f64,
    pub convergence_enabled: bool,
    pub convergence_generations: usize,
    pub convergence_threshold: f64,
    pub target_fitness: Option<FitnessValue>,
    pub repair_enabled: bool,
    pub seed: Option<u64>,
    pub penalty_weights: PenaltyWeights,
    pub parallel_fitness: bool,
    pub select: Select,
    pub crossover: Crossover,
    pub mutate: Mutate,
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            max_generations: 1000,
            mutation_rate: 0.02,
            crossover_rate: 0.8,
            elite_percentage: 0.05,
            convergence_enabled: true,
            convergence_generations: 50,
            convergence_threshold: 0.001,
            target_fitness: None,
            repair_enabled: true,
            seed: None,
            penalty_weights: PenaltyWeights::default(),
            parallel_fitness: false,
            select: Select::default(),
            crossover: Crossover::default(),
            mutate: Mutate::default(),
        }
    }
}

impl EvolveConfig {
    /// Cohorts up to a few dozen students.
    pub fn small() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            ..Self::default()
        }
    }

    /// The default bundle.
    pub fn medium() -> Self {
        Self::default()
    }

    /// Large cohorts; slower mutation over a longer run.
    pub fn large() -> Self {
        Self {
            population_size: 500,
            max_generations: 2000,
            mutation_rate: 0.01,
            ..Self::default()
        }
    }

    /// Fast smoke-test bundle.
    pub fn quick() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            convergence_generations: 10,
            ..Self::default()
        }
    }

    /// Spend extra generations for marginally better assignments.
    pub fn high_quality() -> Self {
        Self {
            population_size: 400,
            max_generations: 5000,
            mutation_rate: 0.03,
            convergence_generations: 200,
            ..Self::default()
        }
    }
}

impl fmt::Display for EvolveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "evolve_config:")?;
        writeln!(f, "  population_size: {}", self.population_size)?;
        writeln!(f, "  max_generations: {}", self.max_generations)?;
        writeln!(f, "  mutation_rate: {}", self.mutation_rate)?;
        writeln!(f, "  crossover_rate: {}", self.crossover_rate)?;
        writeln!(f, "  elite_percentage: {}", self.elite_percentage)?;
        writeln!(
            f,
            "  convergence: {:?} over {} generations, threshold {}",
            self.convergence_enabled, self.convergence_generations, self.convergence_threshold
        )?;
        writeln!(f, "  target_fitness: {:?}", self.target_fitness)?;
        writeln!(f, "  repair_enabled: {}", self.repair_enabled)?;
        writeln!(f, "  seed: {:?}", self.seed)?;
        writeln!(f, "  select: {:?}", self.select)?;
        writeln!(f, "  crossover: {:?}", self.crossover)?;
        writeln!(f, "  mutate: {:?}", self.mutate)
    }
}

/// The GA driver. Owns the data snapshot, the configured operators and the
/// PRNG; each [run](Evolve::run) executes the full state machine and returns
/// a [RunResult].
#[derive(Debug)]
pub struct Evolve {
    data: Arc<MatchData>,
    pub config: EvolveConfig,
    evaluator: FitnessEvaluator,
    checker: ConstraintChecker,
    repairer: Repairer,
    elitism: Elitism,
    candidates: Vec<ProjectId>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Evolve {
    pub fn builder() -> EvolveBuilder {
        EvolveBuilder::new()
    }

    pub fn data(&self) -> &MatchData {
        &self.data
    }

    /// Execute one full run.
    pub fn run(&mut self) -> RunResult {
        let run_started = Instant::now();
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut population = self.initial_population(&mut rng);
        let mut best_ever = population
            .best()
            .expect("population_size is validated > 0")
            .clone();

        let mut stats = Vec::new();
        let mut stop_reason = StopReason::MaxGenerations;

        for generation in 0..self.config.max_generations {
            if self.is_cancelled() {
                stop_reason = StopReason::Cancelled;
                break;
            }

            if let Some(best) = population.best() {
                if best.fitness() > best_ever.fitness() {
                    best_ever = best.clone();
                }
            }
            let record = self.record_stats(generation, &mut population, &best_ever);
            stats.push(record);
            self.report_round(&record);

            if let Some(target) = self.config.target_fitness {
                if record.best_ever >= target {
                    stop_reason = StopReason::TargetFitness;
                    break;
                }
            }
            if self.is_converged(&stats) {
                stop_reason = StopReason::Converged;
                break;
            }

            let next = self.breed(&mut population, &mut rng);
            #[cfg(debug_assertions)]
            self.assert_elite_monotonicity(&mut population, &next);
            population = next;
        }

        // A population bred after the last recorded generation is dropped:
        // best_ever and the stats stream always describe the same run, so
        // best_fitness equals the final recorded best-ever.
        self.build_result(best_ever, stats, stop_reason, run_started.elapsed())
    }

    fn initial_population<R: Rng>(&self, rng: &mut R) -> Population {
        let length = self.data.student_count();
        let mut population = Population::new(
            (0..self.config.population_size)
                .map(|_| Chromosome::random(length, &self.candidates, rng))
                .collect(),
        );
        if self.config.repair_enabled {
            for chromosome in population.chromosomes_mut() {
                self.repairer.repair(chromosome, rng);
            }
        }
        self.evaluator.evaluate_population(&mut population);
        self.refresh_validity(&mut population);
        population
    }

    /// Build the next generation: elites first, then offspring until the
    /// population size is reached (a second offspring that would overflow is
    /// dropped).
    fn breed<R: Rng>(&self, population: &mut Population, rng: &mut R) -> Population {
        let target = self.config.population_size;
        let mut next = Population::with_capacity(target);
        for chromosome in self.elitism.select_elite(population) {
            next.push(chromosome);
        }

        while next.size() < target {
            let (parent1, parent2) = self.config.select.parent_pair(population, rng);
            let (mut child1, mut child2) =
                self.config
                    .crossover
                    .offspring(self.config.crossover_rate, parent1, parent2, rng);
            for child in [&mut child1, &mut child2] {
                if rng.gen_bool(self.config.mutation_rate) {
                    self.config.mutate.apply(child, &self.candidates, rng);
                }
                if self.config.repair_enabled {
                    self.repairer.repair(child, rng);
                }
            }
            next.push(child1);
            if next.size() < target {
                next.push(child2);
            }
        }

        self.evaluator.evaluate_population(&mut next);
        self.refresh_validity(&mut next);
        next
    }

    fn record_stats(
        &self,
        generation: usize,
        population: &mut Population,
        best_ever: &Chromosome,
    ) -> GenerationStats {
        let best = population
            .best()
            .and_then(|c| c.fitness())
            .unwrap_or(FitnessValue::MIN);
        let worst = population
            .worst()
            .and_then(|c| c.fitness())
            .unwrap_or(FitnessValue::MIN);
        GenerationStats {
            generation,
            best,
            mean: population.fitness_mean(),
            worst,
            stddev: population.fitness_stddev(),
            valid_count: population.valid_count(),
            best_ever: best_ever.fitness().unwrap_or(FitnessValue::MIN),
        }
    }

    /// Convergence: the last `convergence_generations` recorded best-ever
    /// values improved by less than the threshold in total.
    fn is_converged(&self, stats: &[GenerationStats]) -> bool {
        if !self.config.convergence_enabled {
            return false;
        }
        let window = self.config.convergence_generations;
        if stats.len() < window {
            return false;
        }
        let newest = stats[stats.len() - 1].best_ever;
        let oldest = stats[stats.len() - window].best_ever;
        ((newest - oldest) as f64) < self.config.convergence_threshold
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    fn refresh_validity(&self, population: &mut Population) {
        for chromosome in population.chromosomes_mut() {
            if chromosome.valid().is_none() {
                self.checker.check_all(chromosome);
            }
        }
    }

    #[cfg(debug_assertions)]
    fn assert_elite_monotonicity(&self, previous: &mut Population, next: &Population) {
        let next_best = next.iter().filter_map(|c| c.fitness()).max();
        let previous_best = previous.best().and_then(|c| c.fitness());
        debug_assert!(
            next_best >= previous_best,
            "elitism lost the best chromosome: {:?} < {:?}",
            next_best,
            previous_best
        );
    }

    fn report_round(&self, record: &GenerationStats) {
        log::debug!(
            "generation (current/best-ever): {}/{}, fitness (best/mean/worst/stddev/valid): {} / {:.1} / {} / {:.1} / {}",
            record.generation,
            record.best_ever,
            record.best,
            record.mean,
            record.worst,
            record.stddev,
            record.valid_count,
        );
    }

    fn build_result(
        &self,
        best: Chromosome,
        stats: Vec<GenerationStats>,
        stop_reason: StopReason,
        elapsed: std::time::Duration,
    ) -> RunResult {
        let assignments: Vec<AssignmentRecord> = best
            .genes()
            .iter()
            .enumerate()
            .map(|(position, &project)| AssignmentRecord {
                student: self.data.student_at(position).id,
                project,
                rank: self.data.rank_of(position, project),
            })
            .collect();

        let mut advisories: Vec<Advisory> = self
            .data
            .infeasible_positions()
            .into_iter()
            .map(|position| Advisory::NoFeasibleProject {
                student: self.data.student_at(position).id,
            })
            .collect();
        let report = self.checker.violations(&best);
        if !report.is_empty() {
            advisories.push(Advisory::ResidualViolations {
                capacity: report.capacity.len(),
                gpa: report.gpa.len(),
                partner: report.partner.len(),
            });
        }
        for advisory in &advisories {
            log::warn!("{}", advisory);
        }

        let best_fitness = best.fitness().unwrap_or_else(|| self.evaluator.calculate(&best));
        RunResult {
            assignments,
            best,
            metadata: RunMetadata {
                config: self.config.clone(),
                generations: stats.len(),
                elapsed,
                best_fitness,
                stop_reason,
            },
            stats,
            advisories,
        }
    }
}

impl fmt::Display for Evolve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "evolve:")?;
        writeln!(
            f,
            "  students/projects: {}/{}",
            self.data.student_count(),
            self.data.projects().len()
        )?;
        write!(f, "{}", self.config)
    }
}
