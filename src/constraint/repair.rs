//! Best-effort repair of constraint violations.
//!
//! Repair runs its three phases in a fixed order: partner co-location first
//! (which may resolve GPA violations incidentally), then GPA floors (which
//! shift per-project counts), then capacity bands. Each phase is deterministic
//! where it can be and falls back to uniform random draws where it cannot.
//! Repair never fails; residual violations simply stay and are priced by the
//! fitness penalties.
use super::ConstraintChecker;
use crate::chromosome::Chromosome;
use crate::model::{MatchData, Project};
use rand::prelude::*;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Repairer {
    data: Arc<MatchData>,
    checker: ConstraintChecker,
}

impl Repairer {
    pub fn new(data: Arc<MatchData>) -> Self {
        let checker = ConstraintChecker::new(data.clone());
        Self { data, checker }
    }

    /// Repair in order partners, GPA, capacity, then refresh the validity
    /// cache. Returns the positions left unresolvable because no project
    /// admits the student.
    pub fn repair<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) -> Vec<usize> {
        self.repair_partners(chromosome, rng);
        let unresolvable = self.repair_gpa(chromosome, rng);
        self.repair_capacity(chromosome, rng);
        self.checker.check_all(chromosome);
        unresolvable
    }

    /// Co-locate each split partner pair.
    ///
    /// The project held by the higher-GPA partner is the anchor (ties go to
    /// the first position of the pair). When the anchor does not admit both,
    /// a uniformly random project admitting both is drawn; when none exists
    /// the pair is left as it is.
    fn repair_partners<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) {
        for &(i, j) in self.data.partner_pairs() {
            if chromosome.get(i) == chromosome.get(j) {
                continue;
            }
            let gpa_i = self.data.student_at(i).gpa;
            let gpa_j = self.data.student_at(j).gpa;
            let pair_gpa = gpa_i.min(gpa_j);

            let anchor = if gpa_j > gpa_i {
                chromosome.get(j)
            } else {
                chromosome.get(i)
            };

            let admits_both = self
                .data
                .project(anchor)
                .map(|p| p.admits(pair_gpa))
                .unwrap_or(false);
            if admits_both {
                chromosome.set(i, anchor);
                chromosome.set(j, anchor);
            } else {
                let candidates: Vec<&Project> = self.data.eligible_projects(pair_gpa).collect();
                if let Some(project) = candidates.choose(rng) {
                    chromosome.set(i, project.id);
                    chromosome.set(j, project.id);
                }
            }
        }
    }

    /// Move each GPA-violating student to a random project that admits them,
    /// dragging a declared partner along. Positions no project admits are
    /// returned as unresolvable.
    fn repair_gpa<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) -> Vec<usize> {
        let mut unresolvable = Vec::new();
        for position in 0..chromosome.len() {
            let student = self.data.student_at(position);
            let violates = self
                .data
                .project(chromosome.get(position))
                .map(|p| !p.admits(student.gpa))
                .unwrap_or(false);
            if !violates {
                continue;
            }

            let candidates: Vec<&Project> = self.data.eligible_projects(student.gpa).collect();
            match candidates.choose(rng) {
                Some(project) => {
                    chromosome.set(position, project.id);
                    if let Some(partner_position) = self.data.partner_position(position) {
                        chromosome.set(partner_position, project.id);
                    }
                }
                None => unresolvable.push(position),
            }
        }
        unresolvable
    }

    /// Shuffle students out of overfull projects into underfull ones.
    ///
    /// Up to `2 * N` iterations of one move each: a deterministic high-to-low
    /// walk over the first overflow project's positions (partnered students
    /// are never moved), falling back to a random non-partnered position and
    /// a random GPA-eligible destination with headroom. Stops early once all
    /// bands hold, or when the first overflow project has no movable
    /// positions at all.
    fn repair_capacity<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) {
        let projects = self.data.projects();
        for _ in 0..2 * chromosome.len() {
            let counts = self.assignment_counts(chromosome);
            let overflow: Vec<usize> = (0..projects.len())
                .filter(|&index| counts[index] > projects[index].max_capacity)
                .collect();
            let underflow: Vec<usize> = (0..projects.len())
                .filter(|&index| counts[index] < projects[index].min_capacity)
                .collect();
            if overflow.is_empty() && underflow.is_empty() {
                break;
            }
            // Only underflow left: there is no overfull source to move from.
            let Some(&over_index) = overflow.first() else {
                break;
            };

            let positions = chromosome.positions_assigned(projects[over_index].id);
            let mut moved = false;
            for &position in positions.iter().rev() {
                if self.data.partner_position(position).is_some() {
                    continue;
                }
                let gpa = self.data.student_at(position).gpa;
                if let Some(&under_index) = underflow
                    .iter()
                    .find(|&&index| projects[index].admits(gpa))
                {
                    chromosome.set(position, projects[under_index].id);
                    moved = true;
                    break;
                }
            }
            if moved {
                continue;
            }

            let movable: Vec<usize> = positions
                .into_iter()
                .filter(|&position| self.data.partner_position(position).is_none())
                .collect();
            let Some(&position) = movable.choose(rng) else {
                break;
            };
            let gpa = self.data.student_at(position).gpa;
            let destinations: Vec<usize> = (0..projects.len())
                .filter(|&index| {
                    projects[index].admits(gpa) && counts[index] < projects[index].max_capacity
                })
                .collect();
            if let Some(&destination) = destinations.choose(rng) {
                chromosome.set(position, projects[destination].id);
            }
        }
    }

    fn assignment_counts(&self, chromosome: &Chromosome) -> Vec<usize> {
        let mut counts = vec![0usize; self.data.projects().len()];
        for &project in chromosome.genes() {
            if let Some(index) = self.data.project_position(project) {
                counts[index] += 1;
            }
        }
        counts
    }
}
