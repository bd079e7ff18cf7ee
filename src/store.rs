use std::path::{Path, PathBuf};

use tokio::fs;

use crate::model::Course;
use crate::{Error, Result};

/// `<root>/<term>/<department_id>/<course_id>.json`
pub fn course_path(root: &Path, term: &str, department_id: &str, course_id: &str) -> PathBuf {
    root.join(term)
        .join(department_id)
        .join(format!("{course_id}.json"))
}

/// True when `s` can be used as one directory or file name below the output root:
/// not empty, no separators, not `.` or `..`.
pub fn is_path_segment(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\', '\0'])
}

/// Writes courses below a root directory, one pretty-printed JSON file each.
#[derive(Debug, Clone)]
pub struct CourseStore {
    root: PathBuf,
}

impl CourseStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates missing directories and overwrites any previous file for the course.
    /// The write is not atomic: an interrupted run can leave a truncated file behind.
    pub async fn write(&self, course: &Course, department_id: &str) -> Result<PathBuf> {
        if course.id.is_empty() {
            return Err(Error::MissingCourseId {
                term: course.term.clone(),
                department: department_id.into(),
            });
        }
        for segment in [course.term.as_str(), department_id, course.id.as_str()] {
            if !is_path_segment(segment) {
                return Err(Error::UnsafePathSegment(segment.into()));
            }
        }

        let path = course_path(&self.root, &course.term, department_id, &course.id);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let json = serde_json::to_string_pretty(course)?;
        fs::write(&path, json).await?;
        Ok(path)
    }
}
