use chrono::Local;

use crate::catalog::Catalog;
use crate::request::PageSource;
use crate::store::CourseStore;
use crate::{info_time, Result};

/// Counts reported at the end of a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub terms: usize,
    pub departments: usize,
    pub courses: usize,
    /// Courses written without their sections because the sections request failed.
    pub degraded: usize,
}

/// Walks every term, every department and every course, writing each course as it arrives.
/// Listing failures abort the sweep; files already written stay on disk.
pub async fn process_catalog<S: PageSource>(
    catalog: &Catalog<S>,
    store: &CourseStore,
) -> Result<RunSummary> {
    let start_time = Local::now();
    let mut summary = RunSummary::default();

    info_time!(
        "Started scraping {} into {}",
        catalog.config().base_url,
        store.root().display()
    );

    for term in catalog.list_terms().await? {
        info_time!("getting term {term}");
        summary.terms += 1;

        for dept in catalog.list_departments().await? {
            info_time!("getting courses in {term} for {}", dept.id);
            summary.departments += 1;

            let mut courses = catalog.fetch_courses(&dept, &term).await?;
            while let Some(course) = courses.next().await {
                let course = course?;
                let path = store.write(&course, &dept.id).await?;
                info_time!("writing {}", path.display());
                summary.courses += 1;
            }
            summary.degraded += courses.degraded();
        }
    }

    info_time!(
        start_time,
        "Finished: {} terms, {} departments, {} courses ({} without sections data)",
        summary.terms,
        summary.departments,
        summary.courses,
        summary.degraded
    );
    Ok(summary)
}
