//! The input records and the validated, immutable data snapshot a run operates on.
//!
//! [MatchData] is constructed once from plain record collections and owns every
//! lookup table the rest of the crate needs: id to dense index maps, the
//! partner pair list and the per-student preference ranks. All collections are
//! read-only for the duration of a run.
use rustc_hash::FxHashMap;
use std::fmt;

/// Identity of a student, unique within a [MatchData] snapshot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct StudentId(pub u32);

/// Identity of a project, unique within a [MatchData] snapshot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ProjectId(pub u32);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}
impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// GPA in [0.0, 4.0]
    pub gpa: f32,
    /// Declared partner, if any. Partnerships are expected to be symmetric;
    /// a one-sided pointer is honored but warned about.
    pub partner: Option<StudentId>,
}

#[derive(Clone, Debug)]
pub struct Project {
    pub id: ProjectId,
    pub code: String,
    pub name: String,
    /// Lower capacity band, at least 1.
    pub min_capacity: usize,
    /// Upper capacity band, at least min_capacity.
    pub max_capacity: usize,
    /// GPA floor a student must meet to be placed on this project.
    pub required_gpa: f32,
}

impl Project {
    /// Whether a student with the given GPA meets this project's floor.
    pub fn admits(&self, gpa: f32) -> bool {
        gpa >= self.required_gpa
    }
}

/// A single preference entry: `student` ranks `project` at `rank` (1 = first choice).
#[derive(Clone, Debug)]
pub struct Preference {
    pub student: StudentId,
    pub project: ProjectId,
    pub rank: u8,
}

/// Inconsistencies in the input collections. All of these fail fast in
/// [MatchData::new] before any run state is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    NoStudents,
    NoProjects,
    DuplicateStudent(StudentId),
    DuplicateProject(ProjectId),
    GpaOutOfRange { student: StudentId, gpa: f32 },
    InvalidCapacity { project: ProjectId, min: usize, max: usize },
    InvalidRequiredGpa { project: ProjectId, required_gpa: f32 },
    UnknownStudentInPreference { student: StudentId },
    UnknownProjectInPreference { student: StudentId, project: ProjectId },
    DuplicatePreference { student: StudentId, project: ProjectId },
    DuplicateRank { student: StudentId, rank: u8 },
    RankOutOfRange { student: StudentId, rank: u8 },
    UnknownPartner { student: StudentId, partner: StudentId },
    SelfPartner(StudentId),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::NoStudents => write!(f, "student collection is empty"),
            DataError::NoProjects => write!(f, "project collection is empty"),
            DataError::DuplicateStudent(id) => write!(f, "duplicate student id {}", id),
            DataError::DuplicateProject(id) => write!(f, "duplicate project id {}", id),
            DataError::GpaOutOfRange { student, gpa } => {
                write!(f, "student {} has gpa {} outside [0.0, 4.0]", student, gpa)
            }
            DataError::InvalidCapacity { project, min, max } => write!(
                f,
                "project {} has invalid capacity band [{}, {}]",
                project, min, max
            ),
            DataError::InvalidRequiredGpa { project, required_gpa } => write!(
                f,
                "project {} has negative required gpa {}",
                project, required_gpa
            ),
            DataError::UnknownStudentInPreference { student } => {
                write!(f, "preference references unknown student {}", student)
            }
            DataError::UnknownProjectInPreference { student, project } => write!(
                f,
                "preference of student {} references unknown project {}",
                student, project
            ),
            DataError::DuplicatePreference { student, project } => write!(
                f,
                "student {} lists project {} more than once",
                student, project
            ),
            DataError::DuplicateRank { student, rank } => {
                write!(f, "student {} uses rank {} more than once", student, rank)
            }
            DataError::RankOutOfRange { student, rank } => {
                write!(f, "student {} has rank {} outside 1..=5", student, rank)
            }
            DataError::UnknownPartner { student, partner } => write!(
                f,
                "student {} declares unknown partner {}",
                student, partner
            ),
            DataError::SelfPartner(id) => write!(f, "student {} declares self as partner", id),
        }
    }
}
impl std::error::Error for DataError {}

/// Validated, immutable snapshot of students, projects and preferences.
///
/// Student iteration order is the external position ordering: position `i` in a
/// chromosome is the assignment of `students()[i]`.
#[derive(Clone, Debug)]
pub struct MatchData {
    students: Vec<Student>,
    projects: Vec<Project>,
    preferences: Vec<Preference>,
    student_index: FxHashMap<StudentId, usize>,
    project_index: FxHashMap<ProjectId, usize>,
    /// By student position: the partner's position, if declared.
    partner_position: Vec<Option<usize>>,
    /// Partner pairs `(i, j)` with `i < j`, each unordered pair exactly once,
    /// whichever side declared it.
    partner_pairs: Vec<(usize, usize)>,
    /// By student position: project id to declared rank.
    ranks: Vec<FxHashMap<ProjectId, u8>>,
}

impl MatchData {
    pub fn new(
        students: Vec<Student>,
        projects: Vec<Project>,
        preferences: Vec<Preference>,
    ) -> Result<Self, DataError> {
        if students.is_empty() {
            return Err(DataError::NoStudents);
        }
        if projects.is_empty() {
            return Err(DataError::NoProjects);
        }

        let mut student_index = FxHashMap::default();
        for (position, student) in students.iter().enumerate() {
            if student_index.insert(student.id, position).is_some() {
                return Err(DataError::DuplicateStudent(student.id));
            }
            if !(0.0..=4.0).contains(&student.gpa) {
                return Err(DataError::GpaOutOfRange {
                    student: student.id,
                    gpa: student.gpa,
                });
            }
        }

        let mut project_index = FxHashMap::default();
        for (index, project) in projects.iter().enumerate() {
            if project_index.insert(project.id, index).is_some() {
                return Err(DataError::DuplicateProject(project.id));
            }
            if project.min_capacity < 1 || project.max_capacity < project.min_capacity {
                return Err(DataError::InvalidCapacity {
                    project: project.id,
                    min: project.min_capacity,
                    max: project.max_capacity,
                });
            }
            if project.required_gpa < 0.0 {
                return Err(DataError::InvalidRequiredGpa {
                    project: project.id,
                    required_gpa: project.required_gpa,
                });
            }
        }

        let mut ranks: Vec<FxHashMap<ProjectId, u8>> = vec![FxHashMap::default(); students.len()];
        let mut used_ranks: Vec<Vec<u8>> = vec![vec![]; students.len()];
        for preference in &preferences {
            let position = *student_index
                .get(&preference.student)
                .ok_or(DataError::UnknownStudentInPreference {
                    student: preference.student,
                })?;
            if !project_index.contains_key(&preference.project) {
                return Err(DataError::UnknownProjectInPreference {
                    student: preference.student,
                    project: preference.project,
                });
            }
            if !(1..=5).contains(&preference.rank) {
                return Err(DataError::RankOutOfRange {
                    student: preference.student,
                    rank: preference.rank,
                });
            }
            if used_ranks[position].contains(&preference.rank) {
                return Err(DataError::DuplicateRank {
                    student: preference.student,
                    rank: preference.rank,
                });
            }
            if ranks[position]
                .insert(preference.project, preference.rank)
                .is_some()
            {
                return Err(DataError::DuplicatePreference {
                    student: preference.student,
                    project: preference.project,
                });
            }
            used_ranks[position].push(preference.rank);
        }

        let mut partner_position: Vec<Option<usize>> = vec![None; students.len()];
        for (position, student) in students.iter().enumerate() {
            if let Some(partner_id) = student.partner {
                if partner_id == student.id {
                    return Err(DataError::SelfPartner(student.id));
                }
                let partner_pos =
                    *student_index
                        .get(&partner_id)
                        .ok_or(DataError::UnknownPartner {
                            student: student.id,
                            partner: partner_id,
                        })?;
                partner_position[position] = Some(partner_pos);
            }
        }
        for (position, student) in students.iter().enumerate() {
            if let Some(partner_pos) = partner_position[position] {
                if partner_position[partner_pos] != Some(position) {
                    log::warn!(
                        "asymmetric partnership: {} declares {} but not vice versa",
                        student.id,
                        students[partner_pos].id
                    );
                }
            }
        }

        // Each unordered pair once (symmetric pairs dedup at i < j, one-sided
        // pairs enter from the declaring position), stored in ascending
        // position order regardless of which side declared.
        let mut partner_pairs = Vec::new();
        for (i, &partner) in partner_position.iter().enumerate() {
            if let Some(j) = partner {
                if i < j || partner_position[j] != Some(i) {
                    partner_pairs.push((i.min(j), i.max(j)));
                }
            }
        }

        Ok(Self {
            students,
            projects,
            preferences,
            student_index,
            project_index,
            partner_position,
            partner_pairs,
            ranks,
        })
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }
    pub fn students(&self) -> &[Student] {
        &self.students
    }
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }
    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    pub fn student_at(&self, position: usize) -> &Student {
        &self.students[position]
    }
    pub fn student_position(&self, id: StudentId) -> Option<usize> {
        self.student_index.get(&id).copied()
    }
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.project_index.get(&id).map(|&index| &self.projects[index])
    }
    pub fn project_position(&self, id: ProjectId) -> Option<usize> {
        self.project_index.get(&id).copied()
    }

    /// All project identities, in catalog order. The candidate set for random
    /// construction and random-reset mutation.
    pub fn project_ids(&self) -> Vec<ProjectId> {
        self.projects.iter().map(|p| p.id).collect()
    }

    pub fn partner_position(&self, position: usize) -> Option<usize> {
        self.partner_position[position]
    }

    /// Partner pairs by position with `i < j`, each unordered pair exactly
    /// once.
    pub fn partner_pairs(&self) -> &[(usize, usize)] {
        &self.partner_pairs
    }

    /// The declared rank of `project` for the student at `position`, if listed.
    pub fn rank_of(&self, position: usize, project: ProjectId) -> Option<u8> {
        self.ranks[position].get(&project).copied()
    }

    /// Projects whose GPA floor the given GPA meets.
    pub fn eligible_projects(&self, gpa: f32) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(move |p| p.admits(gpa))
    }

    /// Positions of students no project admits. These stay in violation through
    /// any repair and are surfaced as run advisories.
    pub fn infeasible_positions(&self) -> Vec<usize> {
        self.students
            .iter()
            .enumerate()
            .filter(|(_, s)| !self.projects.iter().any(|p| p.admits(s.gpa)))
            .map(|(position, _)| position)
            .collect()
    }
}
