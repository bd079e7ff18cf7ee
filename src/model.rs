use serde::{Deserialize, Serialize};

/// Term code as it appears in the term selector, e.g. `"202308"`.
pub type Term = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Short prefix, e.g. `"CMSC"`.
    pub id: String,
    pub name: String,
}

/// One catalog entry, written to disk as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub credits: String,
    pub description: String,
    #[serde(rename = "grading-method")]
    pub grading_method: Vec<String>,
    pub sections: Vec<Section>,
    pub term: Term,
    /// Display name of the department, not its prefix.
    pub department: String,
}

/// Every field is kept as the page shows it, seat counts included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub instructor: String,
    pub seats: String,
    #[serde(rename = "open-seats")]
    pub open_seats: String,
    pub waitlist: String,
    pub days: String,
    pub start: String,
    pub end: String,
    pub building: String,
    pub room: String,
}
