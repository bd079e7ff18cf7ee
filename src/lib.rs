//! Testudo schedule-of-classes scraper.
//!
//! Walks every active term, every department and every course listed on
//! <https://app.testudo.umd.edu/soc/> and writes one JSON file per course to
//! `data/<term>/<department>/<course>.json`.

mod error;
mod macros;

pub mod catalog;
pub mod config;
pub mod model;
pub mod parse;
pub mod process;
pub mod request;
pub mod store;

pub use error::{Error, Result};

const BASE_URL: &str = "https://app.testudo.umd.edu/soc";
const OUTPUT_DIR: &str = "data";
const USER_AGENT: &str = "testudo.rs <https://github.com/edsu/testudo>";
/// Pause after every sections request, successful or not.
const SECTION_DELAY_MS: u64 = 1000;
const ACTIVE_TERMS_ONLY: bool = true;
