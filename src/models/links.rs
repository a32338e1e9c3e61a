use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentParentLink {
    pub id: i64,
    pub student_id: i64,
    pub parent_id: i64,
    pub relationship_type: String,
    pub student_name: String,
    pub student_email: String,
    pub parent_name: String,
    pub parent_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLinkRequest {
    pub student_id: i64,
    pub parent_id: i64,
    pub relationship_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedPerson {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub relationship_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentWithParents {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub grade: Option<String>,
    pub school_id: Option<i64>,
    #[serde(default)]
    pub linked_parents: Vec<LinkedPerson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentWithStudents {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub school_id: Option<i64>,
    #[serde(default)]
    pub linked_students: Vec<LinkedPerson>,
}
