use optimatch::chromosome::Chromosome;
use optimatch::fitness::FitnessValue;
use optimatch::model::{MatchData, Preference, Project, ProjectId, Student, StudentId};
use optimatch::population::Population;

#[allow(dead_code)]
pub fn student(id: u32, gpa: f32) -> Student {
    Student {
        id: StudentId(id),
        name: format!("student-{}", id),
        gpa,
        partner: None,
    }
}

#[allow(dead_code)]
pub fn partnered_student(id: u32, gpa: f32, partner: u32) -> Student {
    Student {
        id: StudentId(id),
        name: format!("student-{}", id),
        gpa,
        partner: Some(StudentId(partner)),
    }
}

#[allow(dead_code)]
pub fn project(id: u32, min: usize, max: usize, required_gpa: f32) -> Project {
    Project {
        id: ProjectId(id),
        code: format!("PRJ{}", id),
        name: format!("project-{}", id),
        min_capacity: min,
        max_capacity: max,
        required_gpa,
    }
}

#[allow(dead_code)]
pub fn preference(student: u32, project: u32, rank: u8) -> Preference {
    Preference {
        student: StudentId(student),
        project: ProjectId(project),
        rank,
    }
}

#[allow(dead_code)]
pub fn chromosome(genes: Vec<u32>) -> Chromosome {
    Chromosome::new(genes.into_iter().map(ProjectId).collect())
}

#[allow(dead_code)]
pub fn chromosome_with_fitness(genes: Vec<u32>, fitness: FitnessValue) -> Chromosome {
    let mut chromosome = chromosome(genes);
    chromosome.set_fitness(fitness);
    chromosome
}

#[allow(dead_code)]
pub fn population(data: Vec<Vec<u32>>) -> Population {
    Population::new(data.into_iter().map(chromosome).collect())
}

#[allow(dead_code)]
pub fn population_with_fitness(data: Vec<(Vec<u32>, FitnessValue)>) -> Population {
    Population::new(
        data.into_iter()
            .map(|(genes, fitness)| chromosome_with_fitness(genes, fitness))
            .collect(),
    )
}

#[allow(dead_code)]
pub fn match_data(
    students: Vec<Student>,
    projects: Vec<Project>,
    preferences: Vec<Preference>,
) -> MatchData {
    MatchData::new(students, projects, preferences).unwrap()
}

/// Three students, two projects, no partners. Student 3's GPA only admits
/// project 2.
#[allow(dead_code)]
pub fn simple_data() -> MatchData {
    let students = vec![
        student(1, 3.9),
        student(2, 3.4),
        student(3, 2.1),
    ];
    let projects = vec![project(1, 1, 2, 3.0), project(2, 1, 2, 0.0)];
    let preferences = vec![
        preference(1, 1, 1),
        preference(1, 2, 2),
        preference(2, 1, 1),
        preference(2, 2, 2),
        preference(3, 2, 1),
        preference(3, 1, 2),
    ];
    match_data(students, projects, preferences)
}

/// The 30-student / 6-project dataset: GPAs cycle over 2.0..4.0, four
/// symmetric partner pairs, every student ranks five of the six projects.
#[allow(dead_code)]
pub fn cohort30() -> MatchData {
    const PARTNERS: [(u32, u32); 4] = [(1, 2), (5, 6), (11, 12), (21, 22)];

    let students = (1..=30u32)
        .map(|id| {
            let gpa = 2.0 + (id % 9) as f32 * 0.25;
            match PARTNERS.iter().find(|(a, b)| *a == id || *b == id) {
                Some(&(a, b)) => {
                    let partner = if a == id { b } else { a };
                    partnered_student(id, gpa, partner)
                }
                None => student(id, gpa),
            }
        })
        .collect();

    let projects = vec![
        project(101, 3, 6, 0.0),
        project(102, 3, 6, 2.5),
        project(103, 4, 7, 0.0),
        project(104, 3, 5, 3.0),
        project(105, 4, 6, 0.0),
        project(106, 3, 6, 2.0),
    ];

    let mut preferences = Vec::new();
    for id in 1..=30u32 {
        for rank in 1..=5u8 {
            let projected = 101 + (id + rank as u32) % 6;
            preferences.push(preference(id, projected, rank));
        }
    }

    match_data(students, projects, preferences)
}
