//! In-place rewrites of a learning-object tree.
//!
//! All operations here take `&mut`, so a tree has exactly one writer at a
//! time. Nodes are never removed; only fields and child order change.

use tracing::debug;

use crate::error::LoError;
use crate::lo::{BackLink, Lo, LoHandle, LoKind, COURSE_URL_PLACEHOLDER};

/// Replaces the first `{{COURSEURL}}` in `route`, `img`, `video` and `pdf` with
/// `url`, on this node and every descendant.
pub fn inject_course_url(lo: &mut Lo, url: &str) {
    for field in [&mut lo.route, &mut lo.img, &mut lo.video, &mut lo.pdf] {
        if let Some(value) = field.as_mut() {
            if value.contains(COURSE_URL_PLACEHOLDER) {
                *value = value.replacen(COURSE_URL_PLACEHOLDER, url, 1);
            }
        }
    }
    if let Some(los) = lo.los.as_mut() {
        for child in los.iter_mut() {
            inject_course_url(child, url);
        }
    }
}

/// Points every descendant's `parent_lo` at its structural parent.
///
/// Handles are relative to `parent`; resolve them with [`Lo::node_at`] on the
/// same node. Reordering or replacing `los` afterwards invalidates them.
pub fn thread_los(parent: &mut Lo) -> Result<(), LoError> {
    if parent.los.is_none() {
        return Err(LoError::missing("los", &parent.kind));
    }
    let mut path = Vec::new();
    thread_from(parent, &mut path);
    Ok(())
}

fn thread_from(parent: &mut Lo, path: &mut Vec<usize>) {
    let handle = LoHandle::new(path.clone());
    let Some(los) = parent.los.as_mut() else {
        return;
    };
    for (index, child) in los.iter_mut().enumerate() {
        child.parent_lo = BackLink::to(handle.clone());
        if child.los.is_some() {
            path.push(index);
            thread_from(child, path);
            path.pop();
        }
    }
}

fn canonicalise_hash_route(value: &mut String) {
    if let Some(rest) = value.strip_prefix('#') {
        *value = format!("/#/{rest}");
    }
}

/// Rewrites `#x` routes and videos to `/#/x`, then lets a video replace a
/// markdown-sourced route.
///
/// Requires `route`; a node without one is rejected before anything changes.
pub fn fix_routes(lo: &mut Lo) -> Result<(), LoError> {
    if lo.route.is_none() {
        return Err(LoError::missing("route", &lo.kind));
    }
    if let Some(route) = lo.route.as_mut() {
        canonicalise_hash_route(route);
    }
    if let Some(video) = lo.video.as_mut() {
        canonicalise_hash_route(video);
    }
    let route_is_markdown = lo.route.as_deref().is_some_and(|r| r.ends_with("md"));
    if route_is_markdown {
        if let Some(video) = lo.video_url().map(str::to_string) {
            lo.route = Some(video);
        }
    }
    Ok(())
}

/// Applies [`fix_routes`] to every routed node in the tree, pre-order.
pub fn fix_all_routes(lo: &mut Lo) -> Result<(), LoError> {
    if lo.route.is_some() {
        fix_routes(lo)?;
    }
    if let Some(los) = lo.los.as_mut() {
        for child in los.iter_mut() {
            fix_all_routes(child)?;
        }
    }
    Ok(())
}

/// Reorders each unit's children as panel videos, then panel talks, then the
/// rest, keeping relative order inside each group. Returns the units.
pub fn get_sorted_units(los: &mut [Lo]) -> Vec<&Lo> {
    for unit in los.iter_mut().filter(|lo| lo.kind.is_unit()) {
        let Some(children) = unit.los.take() else {
            debug!(title = ?unit.title, "Unit has no children to sort");
            continue;
        };
        let mut panel_videos = Vec::new();
        let mut panel_talks = Vec::new();
        let mut standard = Vec::new();
        for child in children {
            match child.kind {
                LoKind::PanelVideo => panel_videos.push(child),
                LoKind::PanelTalk => panel_talks.push(child),
                _ => standard.push(child),
            }
        }
        panel_videos.append(&mut panel_talks);
        panel_videos.append(&mut standard);
        unit.los = Some(panel_videos);
    }
    los.iter().filter(|lo| lo.kind.is_unit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(los: &[Lo]) -> Vec<&str> {
        los.iter().map(|lo| lo.kind.as_str()).collect()
    }

    #[test]
    fn test_inject_course_url_replaces_first_placeholder_everywhere() {
        let mut root = Lo::new(LoKind::Course)
            .with_img("https://{{COURSEURL}}/img.png")
            .with_los(vec![Lo::new(LoKind::Topic)
                .with_route("/topic/{{COURSEURL}}/t1")
                .with_los(vec![Lo::new(LoKind::Lab)
                    .with_video("{{COURSEURL}}/v")
                    .with_pdf("{{COURSEURL}}/a-{{COURSEURL}}.pdf")])]);

        inject_course_url(&mut root, "c.netlify.app");

        assert_eq!(root.img.as_deref(), Some("https://c.netlify.app/img.png"));
        let topic = &root.children()[0];
        assert_eq!(topic.route.as_deref(), Some("/topic/c.netlify.app/t1"));
        let lab = &topic.children()[0];
        assert_eq!(lab.video.as_deref(), Some("c.netlify.app/v"));
        assert_eq!(lab.pdf.as_deref(), Some("c.netlify.app/a-{{COURSEURL}}.pdf"));
    }

    #[test]
    fn test_inject_course_url_is_idempotent_for_plain_url() {
        let mut once = Lo::new(LoKind::Talk).with_route("{{COURSEURL}}/x");
        inject_course_url(&mut once, "host");
        let mut twice = once.clone();
        inject_course_url(&mut twice, "host");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_thread_los_sets_structural_parent() {
        let mut root = Lo::new(LoKind::Course).with_title("root").with_los(vec![
            Lo::new(LoKind::Topic).with_title("t0").with_los(vec![
                Lo::new(LoKind::Talk).with_title("talk"),
                Lo::new(LoKind::Unit)
                    .with_title("u")
                    .with_los(vec![Lo::new(LoKind::Lab).with_title("lab")]),
            ]),
            Lo::new(LoKind::Note).with_title("n"),
        ]);

        thread_los(&mut root).unwrap();

        assert!(!root.parent_lo.is_set());
        let t0 = &root.children()[0];
        assert!(std::ptr::eq(t0.parent_in(&root).unwrap(), &root));
        let note = &root.children()[1];
        assert!(std::ptr::eq(note.parent_in(&root).unwrap(), &root));
        let talk = &t0.children()[0];
        assert!(std::ptr::eq(talk.parent_in(&root).unwrap(), t0));
        let unit = &t0.children()[1];
        let lab = &unit.children()[0];
        assert!(std::ptr::eq(lab.parent_in(&root).unwrap(), unit));
    }

    #[test]
    fn test_thread_los_requires_children() {
        let mut leaf = Lo::new(LoKind::Talk);
        let err = thread_los(&mut leaf).unwrap_err();
        assert!(matches!(err, LoError::MissingField { field: "los", .. }));
    }

    #[test]
    fn test_fix_routes_canonicalises_hash_route() {
        let mut lo = Lo::new(LoKind::Talk).with_route("#foo");
        fix_routes(&mut lo).unwrap();
        assert_eq!(lo.route.as_deref(), Some("/#/foo"));
        assert!(lo.video.is_none());
    }

    #[test]
    fn test_fix_routes_prefers_video_over_markdown_route() {
        let mut lo = Lo::new(LoKind::Video)
            .with_route("readme.md")
            .with_video("#bar");
        fix_routes(&mut lo).unwrap();
        assert_eq!(lo.video.as_deref(), Some("/#/bar"));
        assert_eq!(lo.route.as_deref(), Some("/#/bar"));
    }

    #[test]
    fn test_fix_routes_keeps_non_markdown_route() {
        let mut lo = Lo::new(LoKind::Video)
            .with_route("/talk/x")
            .with_video("https://vimeo/1");
        fix_routes(&mut lo).unwrap();
        assert_eq!(lo.route.as_deref(), Some("/talk/x"));
    }

    #[test]
    fn test_fix_routes_without_route_fails_untouched() {
        let mut lo = Lo::new(LoKind::Video).with_video("#bar");
        let err = fix_routes(&mut lo).unwrap_err();
        assert!(matches!(err, LoError::MissingField { field: "route", .. }));
        assert_eq!(lo.video.as_deref(), Some("#bar"));
    }

    #[test]
    fn test_fix_all_routes_skips_unrouted_nodes() {
        let mut root = Lo::new(LoKind::Course).with_los(vec![
            Lo::new(LoKind::Talk).with_route("#a"),
            Lo::new(LoKind::Note).with_video("#b"),
        ]);
        fix_all_routes(&mut root).unwrap();
        assert_eq!(root.children()[0].route.as_deref(), Some("/#/a"));
        assert_eq!(root.children()[1].video.as_deref(), Some("#b"));
    }

    #[test]
    fn test_get_sorted_units_promotes_panel_media() {
        let mut los = vec![
            Lo::new(LoKind::Talk).with_title("outside"),
            Lo::new(LoKind::Unit).with_title("u").with_los(vec![
                Lo::new(LoKind::PanelTalk).with_title("talk1"),
                Lo::new(LoKind::PanelVideo).with_title("video1"),
                Lo::new(LoKind::Lab).with_title("other1"),
                Lo::new(LoKind::PanelVideo).with_title("video2"),
                Lo::new(LoKind::Note).with_title("other2"),
            ]),
        ];

        let units = get_sorted_units(&mut los);

        assert_eq!(units.len(), 1);
        let order: Vec<_> = units[0]
            .children()
            .iter()
            .map(|lo| lo.title.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(order, vec!["video1", "video2", "talk1", "other1", "other2"]);
        assert_eq!(
            kinds(units[0].children()),
            vec!["panelvideo", "panelvideo", "paneltalk", "lab", "note"]
        );
    }

    #[test]
    fn test_get_sorted_units_keeps_nested_units() {
        let mut los = vec![Lo::new(LoKind::Unit).with_los(vec![
            Lo::new(LoKind::Unit).with_title("inner"),
            Lo::new(LoKind::PanelTalk),
        ])];
        let units = get_sorted_units(&mut los);
        assert_eq!(kinds(units[0].children()), vec!["paneltalk", "unit"]);
    }
}
