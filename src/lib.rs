//! Heuristic assignment of a student cohort to a fixed catalog of projects.
//!
//! Each student gets exactly one project. The search maximizes a weighted
//! preference-satisfaction score while honoring project capacity bands,
//! per-project GPA floors and partner co-location, using a generational
//! genetic algorithm with penalty-based constraint handling and best-effort
//! repair.
//!
//! There are three main elements:
//! * The [MatchData](crate::model::MatchData) snapshot (students, projects,
//!   preferences: validated once, immutable for the run)
//! * The [FitnessEvaluator](crate::fitness::FitnessEvaluator) (preference
//!   score minus weighted constraint penalties)
//! * The [Evolve](crate::evolve::Evolve) driver (the generational loop)
//!
//! ## Quick Usage
//!
//! ```rust
//! use optimatch::evolve::prelude::*;
//!
//! let students = vec![
//!     Student { id: StudentId(1), name: "Ada".into(), gpa: 3.9, partner: Some(StudentId(2)) },
//!     Student { id: StudentId(2), name: "Grace".into(), gpa: 3.4, partner: Some(StudentId(1)) },
//!     Student { id: StudentId(3), name: "Edsger".into(), gpa: 2.1, partner: None },
//! ];
//! let projects = vec![
//!     Project {
//!         id: ProjectId(1),
//!         code: "COMP".into(),
//!         name: "Compilers".into(),
//!         min_capacity: 1,
//!         max_capacity: 2,
//!         required_gpa: 3.0,
//!     },
//!     Project {
//!         id: ProjectId(2),
//!         code: "WEB".into(),
//!         name: "Web shop".into(),
//!         min_capacity: 1,
//!         max_capacity: 2,
//!         required_gpa: 0.0,
//!     },
//! ];
//! let preferences = vec![
//!     Preference { student: StudentId(1), project: ProjectId(1), rank: 1 },
//!     Preference { student: StudentId(2), project: ProjectId(1), rank: 1 },
//!     Preference { student: StudentId(3), project: ProjectId(2), rank: 1 },
//! ];
//!
//! let data = MatchData::new(students, projects, preferences).unwrap();
//! let mut evolve = Evolve::builder()
//!     .with_data(data)
//!     .with_config(EvolveConfig::quick())
//!     .with_seed(12345)
//!     .build()
//!     .unwrap();
//!
//! let result = evolve.run();
//! assert_eq!(result.assignment_for(StudentId(3)), Some(ProjectId(2)));
//! println!("{}", result);
//! ```
//!
//! Invalid chromosomes survive with reduced fitness on purpose, so the search
//! can traverse infeasible regions; only the final reported assignment is
//! flagged (see [Advisory](crate::stats::Advisory)) when residual violations
//! remain.

pub mod chromosome;
pub mod constraint;
pub mod crossover;
pub mod elitism;
pub mod errors;
pub mod evolve;
pub mod fitness;
pub mod model;
pub mod mutate;
pub mod population;
pub mod select;
pub mod stats;
