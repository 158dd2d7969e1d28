//! `sync`: fetch the summary of every configured course and record it.
//!
//! Course ids that look like preview or branch deploys are skipped with a
//! warning. Everything else is fetched concurrently and written one record per
//! course under `<course-id>/lo`. The first fetch or write failure aborts the run.

use lo_tree_core::contract::{LoWriter, SummaryFetcher};
use lo_tree_core::derive::{get_course_summaries, update_lo};
use lo_tree_core::path_ops::is_valid_course_name;
use lo_tree_core::{Course, LoError};
use tracing::{info, warn};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

pub async fn sync_courses<F, W>(
    fetcher: &F,
    writer: &W,
    courses: &[String],
) -> Result<SyncReport, LoError>
where
    F: SummaryFetcher + ?Sized,
    W: LoWriter + ?Sized,
{
    let (valid, skipped): (Vec<String>, Vec<String>) = courses
        .iter()
        .cloned()
        .partition(|id| is_valid_course_name(id));
    for id in &skipped {
        warn!(course_id = %id, "Skipping preview or branch-deploy course id");
    }

    info!(courses = valid.len(), "[SYNC] Fetching course summaries");
    let summaries = get_course_summaries(fetcher, &valid).await?;

    let mut written = Vec::with_capacity(valid.len());
    for (id, summary) in valid.into_iter().zip(summaries) {
        let course = Course::new(summary);
        update_lo(writer, &id, &course, &course.lo).await?;
        written.push(id);
    }

    info!(written = written.len(), skipped = skipped.len(), "[SYNC] Complete");
    Ok(SyncReport { written, skipped })
}
