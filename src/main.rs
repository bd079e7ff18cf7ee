use chrono::Local;
use testudo::catalog::Catalog;
use testudo::config::Config;
use testudo::process::process_catalog;
use testudo::request::HttpSource;
use testudo::store::CourseStore;
use testudo::{info_time, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();

    let config = Config::default();
    let source = HttpSource::new(&config)?;
    let store = CourseStore::new(&config.output_dir);
    let catalog = Catalog::new(source, config);

    process_catalog(&catalog, &store).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
