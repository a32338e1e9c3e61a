use serde::{Deserialize, Serialize};

/// Platform-wide counters shown on the super admin overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformStats {
    pub total_schools: u64,
    pub total_admins: u64,
    pub total_teachers: u64,
    pub total_students: u64,
    pub total_parents: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolStats {
    pub total_teachers: u64,
    pub total_students: u64,
    pub total_parents: u64,
    pub total_classes: u64,
    pub total_lessons: u64,
    pub todays_classes: u64,
    pub upcoming_holidays: u64,
    pub upcoming_events: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeacherStats {
    pub total_classes: u64,
    pub total_students: u64,
    pub todays_classes: u64,
    pub total_lessons: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentCount {
    pub parent_name: String,
    pub student_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentCount {
    pub student_name: String,
    pub parent_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParentStudentStats {
    pub total_parents: u64,
    pub total_students: u64,
    pub unlinked_students: u64,
    pub unlinked_parents: u64,
    pub total_links: u64,
    pub students_per_parent: Vec<ParentCount>,
    pub parents_per_student: Vec<StudentCount>,
}
