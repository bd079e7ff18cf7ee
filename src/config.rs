use std::path::PathBuf;
use std::time::Duration;

use crate::{ACTIVE_TERMS_ONLY, BASE_URL, OUTPUT_DIR, SECTION_DELAY_MS, USER_AGENT};

/// What a course does with its sections when the sections request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionFailurePolicy {
    /// Log the failure and keep the course with whatever sections were found (usually none).
    #[default]
    Degrade,
    /// Surface the failure as an error for that course.
    Propagate,
}

/// Run settings. Built once at startup and handed to every component that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the schedule of classes, without a trailing slash.
    pub base_url: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub section_delay: Duration,
    pub active_terms_only: bool,
    pub on_section_failure: SectionFailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.into(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            user_agent: USER_AGENT.into(),
            section_delay: Duration::from_millis(SECTION_DELAY_MS),
            active_terms_only: ACTIVE_TERMS_ONLY,
            on_section_failure: SectionFailurePolicy::default(),
        }
    }
}

impl Config {
    /// Same settings pointed at another host, e.g. a local mirror.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_section_delay(mut self, section_delay: Duration) -> Self {
        self.section_delay = section_delay;
        self
    }
}
