use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    InvalidSelector(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Unexpected status {status} while requesting {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Refusing to write a course without an id (term {term}, department {department})")]
    MissingCourseId { term: String, department: String },

    #[error("Refusing to use {0:?} as a file or directory name")]
    UnsafePathSegment(String),

    #[error("Couldn't fetch sections for {course_id}: {source}")]
    Sections {
        course_id: String,
        #[source]
        source: Box<Error>,
    },
}
