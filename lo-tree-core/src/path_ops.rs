//! String and URL helpers for course, topic and lab URLs. No tree knowledge.

/// Drops the final `/`-separated segment. Input without `/` yields `""`.
pub fn remove_last_directory(url: &str) -> String {
    match url.rfind('/') {
        Some(index) => url[..index].to_string(),
        None => String::new(),
    }
}

/// Returns everything after the last `#`, or the input unchanged when there is none.
pub fn remove_leading_hashes(s: &str) -> &str {
    match s.rfind('#') {
        Some(index) => &s[index + 1..],
        None => s,
    }
}

/// The final path segment, falling back to the one before it when the URL
/// ends in `/`. `None` only for the empty string.
pub fn last_segment(url: &str) -> Option<&str> {
    let mut parts = url.rsplit('/');
    match parts.next() {
        Some(last) if !last.is_empty() => Some(last),
        _ => parts.next(),
    }
}

fn basename(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}

/// Derives `(course_url, topic_url)` from a lab URL.
///
/// The topic is the lab's directory. When that directory is a unit nested in
/// a topic (`.../topicX/unitY/lab`), the topic is one level further up. The
/// course is always the directory above the topic.
pub fn find_course_urls(lab_url: &str) -> (String, String) {
    let mut topic_url = remove_last_directory(lab_url);
    if basename(&topic_url).starts_with("unit") && topic_url.contains("topic") {
        topic_url = remove_last_directory(&topic_url);
    }
    let course_url = remove_last_directory(&topic_url);
    (course_url, topic_url)
}

/// Rejects course ids derived from CI preview or branch deploys.
pub fn is_valid_course_name(course: &str) -> bool {
    let chars: Vec<char> = course.chars().collect();
    if chars.len() > 27 && chars[24] == '-' && chars[25] == '-' {
        return false;
    }
    !(course.starts_with("main--")
        || course.starts_with("master--")
        || course.starts_with("deploy-preview"))
}
