//! Derived records: normalised remote course summaries and the persisted
//! summary record of a learning object.
//!
//! The projections are pure; the only effects are the calls into the
//! [`SummaryFetcher`] and [`LoWriter`] collaborators.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::contract::{LoWriter, SummaryFetcher};
use crate::error::LoError;
use crate::lo::{is_truthy, Course, Icon, Lo, LoKind, COURSE_URL_PLACEHOLDER};

const READER_URL: &str = "https://reader.tutors.dev";

/// Host a course is deployed to.
pub fn course_host(course_id: &str) -> String {
    format!("{course_id}.netlify.app")
}

/// Location of the course's published summary document.
pub fn summary_url(course_id: &str) -> String {
    format!("https://{}/tutors.json", course_host(course_id))
}

/// Reader-app deep link for a course.
pub fn reader_route(course_id: &str) -> String {
    format!("{READER_URL}//#/course/{}", course_host(course_id))
}

/// Fetches `tutors.json` for `course_id` and reshapes it into a `web` Lo
/// pointing at the reader app.
///
/// Fails on fetch or parse errors, and when the document has no `img`.
pub async fn get_course_summary<F>(fetcher: &F, course_id: &str) -> Result<Lo, LoError>
where
    F: SummaryFetcher + ?Sized,
{
    let url = summary_url(course_id);
    let body = fetcher.fetch(&url).await.map_err(|source| {
        error!(course_id = %course_id, url = %url, error = %source, "Course summary fetch failed");
        LoError::Fetch {
            url: url.clone(),
            source,
        }
    })?;

    let mut doc: Value = serde_json::from_str(&body)?;
    if let Some(obj) = doc.as_object_mut() {
        obj.insert("type".to_string(), Value::from(LoKind::Web.as_str()));
    }
    let mut lo: Lo = serde_json::from_value(doc)?;

    lo.route = Some(reader_route(course_id));
    let img = match lo.img.as_deref() {
        Some(img) => img.replacen(COURSE_URL_PLACEHOLDER, &course_host(course_id), 1),
        None => return Err(LoError::missing("img", &lo.kind)),
    };
    lo.img = Some(img);

    if let Some(icon) = lo.property("icon").filter(|v| is_truthy(v)).cloned() {
        lo.icon = Some(serde_json::from_value::<Icon>(icon)?);
    }

    info!(course_id = %course_id, title = ?lo.title, "Course summary loaded");
    Ok(lo)
}

/// Fetches several course summaries concurrently, failing on the first error.
pub async fn get_course_summaries<F>(fetcher: &F, course_ids: &[String]) -> Result<Vec<Lo>, LoError>
where
    F: SummaryFetcher + ?Sized,
{
    try_join_all(course_ids.iter().map(|id| get_course_summary(fetcher, id))).await
}

/// The record persisted for a learning object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoRecord {
    pub icon: Icon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_route: Option<String>,
    /// The course's `private` property when truthy, otherwise `0`.
    pub is_private: Value,
}

fn record_icon(current: &Lo) -> Icon {
    if current.kind == LoKind::Course {
        if let Some(icon) = &current.icon {
            return icon.clone();
        }
    }
    let Some(front_icon) = current.front_matter.as_ref().and_then(|fm| fm.get("icon")) else {
        return Icon::default();
    };
    let text = |key: &str| {
        front_icon
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    Icon {
        kind: text("type"),
        color: text("color"),
    }
}

/// Projects `current` into the record stored for it within `course`.
pub fn summary_record(course: &Course, current: &Lo) -> LoRecord {
    LoRecord {
        icon: record_icon(current),
        img: current.img.clone(),
        title: current.title.clone(),
        course_title: course.title().map(str::to_string),
        sub_route: current.route.clone(),
        is_private: course.is_private(),
    }
}

/// Writes the summary record for `current` to `{root}/lo`.
pub async fn update_lo<W>(writer: &W, root: &str, course: &Course, current: &Lo) -> Result<(), LoError>
where
    W: LoWriter + ?Sized,
{
    let key = format!("{root}/lo");
    let record = summary_record(course, current);
    debug!(key = %key, ?record, "Projected summary record");

    let value = serde_json::to_value(&record)?;
    writer.write_obj(&key, value).await.map_err(|source| {
        error!(key = %key, error = %source, "Failed to write summary record");
        LoError::Write {
            key: key.clone(),
            source,
        }
    })?;
    info!(key = %key, "Summary record written");
    Ok(())
}
