//! Builder for [Evolve](super::Evolve) with fail-fast configuration
//! validation.
use super::{Evolve, EvolveConfig};
use crate::constraint::{ConstraintChecker, Repairer};
use crate::crossover::Crossover;
use crate::elitism::Elitism;
use crate::errors::TryFromEvolveBuilderError;
use crate::fitness::{FitnessEvaluator, FitnessValue, PenaltyWeights};
use crate::model::MatchData;
use crate::mutate::Mutate;
use crate::select::Select;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct Builder {
    pub data: Option<MatchData>,
    pub config: EvolveConfig,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: MatchData) -> Self {
        self.data = Some(data);
        self
    }
    /// Replace the whole configuration bundle; field setters called after
    /// this override individual values.
    pub fn with_config(mut self, config: EvolveConfig) -> Self {
        self.config = config;
        self
    }
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.config.population_size = population_size;
        self
    }
    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.config.max_generations = max_generations;
        self
    }
    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.config.mutation_rate = mutation_rate;
        self
    }
    pub fn with_crossover_rate(mut self, crossover_rate: f64) -> Self {
        self.config.crossover_rate = crossover_rate;
        self
    }
    pub fn with_elite_percentage(mut self, elite_percentage: f64) -> Self {
        self.config.elite_percentage = elite_percentage;
        self
    }
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.config.select = Select::Tournament { size };
        self
    }
    pub fn with_convergence_enabled(mut self, enabled: bool) -> Self {
        self.config.convergence_enabled = enabled;
        self
    }
    pub fn with_convergence_generations(mut self, generations: usize) -> Self {
        self.config.convergence_generations = generations;
        self
    }
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.config.convergence_threshold = threshold;
        self
    }
    pub fn with_target_fitness(mut self, target: FitnessValue) -> Self {
        self.config.target_fitness = Some(target);
        self
    }
    pub fn with_repair_enabled(mut self, enabled: bool) -> Self {
        self.config.repair_enabled = enabled;
        self
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }
    pub fn with_penalty_weights(mut self, weights: PenaltyWeights) -> Self {
        self.config.penalty_weights = weights;
        self
    }
    pub fn with_parallel_fitness(mut self, parallel: bool) -> Self {
        self.config.parallel_fitness = parallel;
        self
    }
    pub fn with_select(mut self, select: Select) -> Self {
        self.config.select = select;
        self
    }
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.config.crossover = crossover;
        self
    }
    pub fn with_mutate(mut self, mutate: Mutate) -> Self {
        self.config.mutate = mutate;
        self
    }
    /// Cooperative cancellation, checked at generation boundaries.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn build(self) -> Result<Evolve, TryFromEvolveBuilderError> {
        self.try_into()
    }
}

impl TryFrom<Builder> for Evolve {
    type Error = TryFromEvolveBuilderError;

    fn try_from(builder: Builder) -> Result<Self, Self::Error> {
        let config = &builder.config;
        if builder.data.is_none() {
            return Err(TryFromEvolveBuilderError("Evolve requires match data"));
        }
        if config.population_size < 10 {
            return Err(TryFromEvolveBuilderError(
                "Evolve requires a population_size of at least 10",
            ));
        }
        if config.max_generations < 1 {
            return Err(TryFromEvolveBuilderError(
                "Evolve requires max_generations of at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&config.mutation_rate) {
            return Err(TryFromEvolveBuilderError(
                "Evolve requires a mutation_rate within [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&config.crossover_rate) {
            return Err(TryFromEvolveBuilderError(
                "Evolve requires a crossover_rate within [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&config.elite_percentage) {
            return Err(TryFromEvolveBuilderError(
                "Evolve requires an elite_percentage within [0, 1]",
            ));
        }
        if let Select::Tournament { size } = config.select {
            if size < 2 {
                return Err(TryFromEvolveBuilderError(
                    "Evolve requires a tournament_size of at least 2",
                ));
            }
        }
        if let Crossover::Uniform { bias } = config.crossover {
            if !(0.0..=1.0).contains(&bias) {
                return Err(TryFromEvolveBuilderError(
                    "Evolve requires a uniform crossover bias within [0, 1]",
                ));
            }
        }
        if config.convergence_generations < 1 {
            return Err(TryFromEvolveBuilderError(
                "Evolve requires convergence_generations of at least 1",
            ));
        }
        if !config.convergence_threshold.is_finite() || config.convergence_threshold < 0.0 {
            return Err(TryFromEvolveBuilderError(
                "Evolve requires a finite, non-negative convergence_threshold",
            ));
        }

        let data = Arc::new(builder.data.unwrap());
        let candidates = data.project_ids();
        let config = builder.config;
        Ok(Evolve {
            evaluator: FitnessEvaluator::new(
                data.clone(),
                config.penalty_weights,
                config.parallel_fitness,
            ),
            checker: ConstraintChecker::new(data.clone()),
            repairer: Repairer::new(data.clone()),
            elitism: Elitism {
                fraction: config.elite_percentage,
                ..Elitism::default()
            },
            candidates,
            data,
            config,
            cancel: builder.cancel,
        })
    }
}
