use std::vec::IntoIter;

use crate::config::{Config, SectionFailurePolicy};
use crate::model::{Course, Department, Section, Term};
use crate::parse::{course_fragments, parse_course, parse_departments, parse_sections, parse_terms};
use crate::request::{courses_url, landing_url, sections_url, PageSource};
use crate::store::is_path_segment;
use crate::{info_time, Error, Result};

/// Outcome of a sections request. A failure is reported, never raised.
#[derive(Debug)]
pub enum SectionFetch {
    Sections(Vec<Section>),
    FetchFailed(Error),
}

impl SectionFetch {
    pub fn is_failed(&self) -> bool {
        matches!(self, SectionFetch::FetchFailed(_))
    }

    /// Logs a failure and falls back to an empty list.
    pub fn into_sections(self, course_id: &str) -> Vec<Section> {
        match self {
            SectionFetch::Sections(sections) => sections,
            SectionFetch::FetchFailed(err) => {
                info_time!(warn: "sections for {course_id} unavailable: {err}");
                Vec::new()
            }
        }
    }

    pub fn into_result(self, course_id: &str) -> Result<Vec<Section>> {
        match self {
            SectionFetch::Sections(sections) => Ok(sections),
            SectionFetch::FetchFailed(err) => Err(Error::Sections {
                course_id: course_id.into(),
                source: Box::new(err),
            }),
        }
    }
}

/// Entry point to the schedule of classes, over whatever `PageSource` it was given.
pub struct Catalog<S> {
    source: S,
    config: Config,
}

impl<S: PageSource> Catalog<S> {
    pub fn new(source: S, config: Config) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Terms offered by the landing page, honouring `Config::active_terms_only`.
    pub async fn list_terms(&self) -> Result<Vec<Term>> {
        self.list_terms_filtered(self.config.active_terms_only).await
    }

    pub async fn list_active_terms(&self) -> Result<Vec<Term>> {
        self.list_terms_filtered(true).await
    }

    pub async fn list_terms_filtered(&self, active_only: bool) -> Result<Vec<Term>> {
        let html = self.source.get_html(&landing_url(&self.config.base_url)).await?;
        parse_terms(&html, active_only)
    }

    /// Fetches the landing page again; nothing is cached between calls.
    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        let html = self.source.get_html(&landing_url(&self.config.base_url)).await?;
        parse_departments(&html)
    }

    /// Requests the department listing once and returns a stream over its courses.
    /// Each course is extracted, and its sections fetched, only when the stream is pulled.
    pub async fn fetch_courses<'a>(
        &'a self,
        department: &'a Department,
        term: &'a str,
    ) -> Result<CourseStream<'a, S>> {
        let url = courses_url(&self.config.base_url, term, &department.id);
        let html = self.source.get_html(&url).await?;
        let fragments = course_fragments(&html)?;

        Ok(CourseStream {
            catalog: self,
            department,
            term,
            fragments: fragments.into_iter(),
            degraded: 0,
        })
    }

    /// Requests the sections of one course. Always waits `Config::section_delay`
    /// before returning, whether the request worked or not.
    pub async fn fetch_sections(&self, course_id: &str, term: &str) -> SectionFetch {
        let url = sections_url(&self.config.base_url, term, course_id);
        let res = match self.source.get_html(&url).await {
            Ok(html) => parse_sections(&html),
            Err(err) => Err(err),
        };

        tokio::time::sleep(self.config.section_delay).await;

        match res {
            Ok(sections) => SectionFetch::Sections(sections),
            Err(err) => SectionFetch::FetchFailed(err),
        }
    }
}

/// Courses of one department listing, produced one at a time.
/// Starting over means calling `Catalog::fetch_courses` again.
pub struct CourseStream<'a, S> {
    catalog: &'a Catalog<S>,
    department: &'a Department,
    term: &'a str,
    fragments: IntoIter<String>,
    degraded: usize,
}

impl<S: PageSource> CourseStream<'_, S> {
    /// Next course with its sections attached, or `None` once the listing is exhausted.
    pub async fn next(&mut self) -> Option<Result<Course>> {
        loop {
            let fragment = self.fragments.next()?;
            let mut course = match parse_course(&fragment, self.term, self.department) {
                Ok(course) => course,
                Err(err) => return Some(Err(err)),
            };
            if !is_path_segment(&course.id) {
                info_time!(
                    warn: "skipping course block with id {:?} in {} for {}",
                    course.id,
                    self.term,
                    self.department.id
                );
                continue;
            }

            let fetch = self.catalog.fetch_sections(&course.id, self.term).await;
            if fetch.is_failed() {
                self.degraded += 1;
            }
            course.sections = match self.catalog.config.on_section_failure {
                SectionFailurePolicy::Degrade => fetch.into_sections(&course.id),
                SectionFailurePolicy::Propagate => match fetch.into_result(&course.id) {
                    Ok(sections) => sections,
                    Err(err) => return Some(Err(err)),
                },
            };
            return Some(Ok(course));
        }
    }

    /// Course blocks not yet pulled.
    pub fn remaining(&self) -> usize {
        self.fragments.len()
    }

    /// Courses so far whose sections request failed.
    pub fn degraded(&self) -> usize {
        self.degraded
    }

    /// Drains the stream into a `Vec`, stopping at the first error.
    pub async fn collect(mut self) -> Result<Vec<Course>> {
        let mut courses = Vec::with_capacity(self.remaining());
        while let Some(course) = self.next().await {
            courses.push(course?);
        }
        Ok(courses)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    use async_trait::async_trait;

    use super::*;

    const BASE: &str = "http://catalog.test/soc";

    /// Serves canned pages; any other URL answers 500.
    #[derive(Default)]
    struct FakeSource {
        pages: HashMap<String, String>,
        hits: AtomicUsize,
    }

    impl FakeSource {
        fn with(mut self, url: String, html: &str) -> Self {
            self.pages.insert(url, html.into());
            self
        }
    }

    #[async_trait]
    impl PageSource for FakeSource {
        async fn get_html(&self, url: &str) -> Result<String> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| Error::UnexpectedStatus {
                    url: url.into(),
                    status: 500,
                })
        }
    }

    fn config(delay: Duration) -> Config {
        Config::default()
            .with_base_url(BASE)
            .with_section_delay(delay)
    }

    fn cmsc() -> Department {
        Department {
            id: "CMSC".into(),
            name: "Computer Science".into(),
        }
    }

    const LANDING: &str = r#"
        <select id="term-id-input">
          <option value="202301">Spring 2023</option>
          <option value="202308" selected>Fall 2023</option>
        </select>
        <div class="course-prefix">
          <span class="prefix-abbrev">CMSC</span>
          <span class="prefix-name">Computer Science</span>
        </div>
    "#;

    const LISTING: &str = r#"
        <div class="course"><div class="course-id">CMSC131</div></div>
        <div class="course"><div class="course-title">Orphan block</div></div>
        <div class="course"><div class="course-id">../../etc</div></div>
        <div class="course"><div class="course-id">CMSC132</div></div>
    "#;

    const SECTIONS: &str = r#"
        <div class="section"><span class="section-id">0101</span></div>
        <div class="section"><span class="section-id">0102</span></div>
    "#;

    #[tokio::test]
    async fn landing_page_fetched_per_call() {
        let source = FakeSource::default().with(landing_url(BASE), LANDING);
        let catalog = Catalog::new(source, config(Duration::ZERO));

        assert_eq!(catalog.list_active_terms().await.unwrap(), vec!["202308"]);
        assert_eq!(
            catalog.list_terms_filtered(false).await.unwrap(),
            vec!["202301", "202308"]
        );
        assert_eq!(catalog.list_departments().await.unwrap(), vec![cmsc()]);
        assert_eq!(catalog.source.hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn landing_failure_is_an_error() {
        let catalog = Catalog::new(FakeSource::default(), config(Duration::ZERO));
        let err = catalog.list_departments().await.unwrap_err();
        assert!(matches!(err, Error::UnexpectedStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn failed_sections_still_pause() {
        let catalog = Catalog::new(FakeSource::default(), config(Duration::from_millis(50)));

        let start = Instant::now();
        let fetch = catalog.fetch_sections("CMSC131", "202308").await;
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert!(fetch.is_failed());
        assert!(fetch.into_sections("CMSC131").is_empty());
    }

    #[tokio::test]
    async fn sections_pause_on_success_too() {
        let source =
            FakeSource::default().with(sections_url(BASE, "202308", "CMSC131"), SECTIONS);
        let catalog = Catalog::new(source, config(Duration::from_millis(50)));

        let start = Instant::now();
        let fetch = catalog.fetch_sections("CMSC131", "202308").await;
        assert!(start.elapsed() >= Duration::from_millis(50));

        let ids: Vec<_> = fetch
            .into_result("CMSC131")
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["0101", "0102"]);
    }

    #[tokio::test]
    async fn stream_is_pulled_one_course_at_a_time() {
        let source = FakeSource::default()
            .with(courses_url(BASE, "202308", "CMSC"), LISTING)
            .with(sections_url(BASE, "202308", "CMSC131"), SECTIONS);
        let catalog = Catalog::new(source, config(Duration::ZERO));
        let dept = cmsc();

        let mut stream = catalog.fetch_courses(&dept, "202308").await.unwrap();
        assert_eq!(stream.remaining(), 4);
        // Only the listing so far.
        assert_eq!(catalog.source.hits.load(Ordering::SeqCst), 1);

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.id, "CMSC131");
        assert_eq!(first.sections.len(), 2);
        assert_eq!(catalog.source.hits.load(Ordering::SeqCst), 2);

        // Blocks without a usable id are skipped; CMSC132 has no sections page.
        let second = stream.next().await.unwrap().unwrap();
        assert_eq!(second.id, "CMSC132");
        assert!(second.sections.is_empty());
        assert_eq!(stream.degraded(), 1);

        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn propagate_policy_surfaces_section_failure() {
        let source = FakeSource::default()
            .with(courses_url(BASE, "202308", "CMSC"), LISTING)
            .with(sections_url(BASE, "202308", "CMSC131"), SECTIONS);
        let mut settings = config(Duration::ZERO);
        settings.on_section_failure = SectionFailurePolicy::Propagate;
        let catalog = Catalog::new(source, settings);
        let dept = cmsc();

        let stream = catalog.fetch_courses(&dept, "202308").await.unwrap();
        let err = stream.collect().await.unwrap_err();
        assert!(matches!(err, Error::Sections { ref course_id, .. } if course_id == "CMSC132"));
    }

    #[tokio::test]
    async fn listing_failure_is_an_error() {
        let catalog = Catalog::new(FakeSource::default(), config(Duration::ZERO));
        let dept = cmsc();
        assert!(catalog.fetch_courses(&dept, "202308").await.is_err());
    }
}
