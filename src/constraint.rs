//! Constraint predicates over a chromosome and structured violation reports.
//!
//! Three orthogonal constraint families: capacity bands, GPA floors and
//! partner co-location. A chromosome is valid iff all three hold. Violations
//! never abort a run; they feed the fitness penalties and, for the final
//! reported assignment, the run advisories.
pub mod repair;

pub use self::repair::Repairer;

use crate::chromosome::Chromosome;
use crate::model::{MatchData, ProjectId, StudentId};
use std::sync::Arc;

/// A project outside its capacity band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapacityViolation {
    pub project: ProjectId,
    pub count: usize,
    pub min: usize,
    pub max: usize,
    /// True when the project is under its minimum, false when over its maximum.
    pub underflow: bool,
}

/// A student on a project whose GPA floor they do not meet.
#[derive(Clone, Debug, PartialEq)]
pub struct GpaViolation {
    pub student: StudentId,
    pub project: ProjectId,
    pub gpa: f32,
    pub required_gpa: f32,
}

/// A partner pair assigned to two different projects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartnerViolation {
    pub student: StudentId,
    pub partner: StudentId,
    pub project: ProjectId,
    pub partner_project: ProjectId,
}

/// All violations of a chromosome, grouped by constraint family.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViolationReport {
    pub capacity: Vec<CapacityViolation>,
    pub gpa: Vec<GpaViolation>,
    pub partner: Vec<PartnerViolation>,
}

impl ViolationReport {
    pub fn is_empty(&self) -> bool {
        self.capacity.is_empty() && self.gpa.is_empty() && self.partner.is_empty()
    }

    pub fn total(&self) -> usize {
        self.capacity.len() + self.gpa.len() + self.partner.len()
    }
}

/// Detects constraint violations and maintains chromosome validity caches.
#[derive(Clone, Debug)]
pub struct ConstraintChecker {
    data: Arc<MatchData>,
}

impl ConstraintChecker {
    pub fn new(data: Arc<MatchData>) -> Self {
        Self { data }
    }

    /// Every project within its capacity band.
    pub fn capacity_ok(&self, chromosome: &Chromosome) -> bool {
        let counts = self.assignment_counts(chromosome);
        self.data
            .projects()
            .iter()
            .zip(counts)
            .all(|(project, count)| {
                project.min_capacity <= count && count <= project.max_capacity
            })
    }

    /// Every student on a project whose GPA floor they meet.
    pub fn gpa_ok(&self, chromosome: &Chromosome) -> bool {
        chromosome
            .genes()
            .iter()
            .enumerate()
            .all(|(position, &project)| match self.data.project(project) {
                Some(project) => project.admits(self.data.student_at(position).gpa),
                None => true,
            })
    }

    /// Every partner pair co-located.
    pub fn partners_ok(&self, chromosome: &Chromosome) -> bool {
        self.data
            .partner_pairs()
            .iter()
            .all(|&(i, j)| chromosome.get(i) == chromosome.get(j))
    }

    /// All three families, without touching the validity cache.
    pub fn is_valid(&self, chromosome: &Chromosome) -> bool {
        self.capacity_ok(chromosome) && self.gpa_ok(chromosome) && self.partners_ok(chromosome)
    }

    /// Check all three families and refresh the chromosome's validity cache.
    pub fn check_all(&self, chromosome: &mut Chromosome) -> bool {
        let valid = self.is_valid(chromosome);
        chromosome.set_valid(valid);
        valid
    }

    /// Structured lists of every violation. Partner pairs are enumerated once.
    pub fn violations(&self, chromosome: &Chromosome) -> ViolationReport {
        let mut report = ViolationReport::default();

        let counts = self.assignment_counts(chromosome);
        for (project, count) in self.data.projects().iter().zip(counts) {
            if count < project.min_capacity || count > project.max_capacity {
                report.capacity.push(CapacityViolation {
                    project: project.id,
                    count,
                    min: project.min_capacity,
                    max: project.max_capacity,
                    underflow: count < project.min_capacity,
                });
            }
        }

        for (position, &project_id) in chromosome.genes().iter().enumerate() {
            if let Some(project) = self.data.project(project_id) {
                let student = self.data.student_at(position);
                if !project.admits(student.gpa) {
                    report.gpa.push(GpaViolation {
                        student: student.id,
                        project: project.id,
                        gpa: student.gpa,
                        required_gpa: project.required_gpa,
                    });
                }
            }
        }

        for &(i, j) in self.data.partner_pairs() {
            if chromosome.get(i) != chromosome.get(j) {
                report.partner.push(PartnerViolation {
                    student: self.data.student_at(i).id,
                    partner: self.data.student_at(j).id,
                    project: chromosome.get(i),
                    partner_project: chromosome.get(j),
                });
            }
        }

        report
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
