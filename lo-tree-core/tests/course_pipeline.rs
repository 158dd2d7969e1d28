use lo_tree_core::contract::{MockLoWriter, MockSummaryFetcher};
use lo_tree_core::derive::{get_course_summary, update_lo};
use lo_tree_core::lo::{Course, Lo, LoKind};
use lo_tree_core::mutate::{fix_all_routes, get_sorted_units, inject_course_url, thread_los};
use lo_tree_core::walk::{all_los, all_video_los, find_by_route, flatten_los};
use serde_json::json;

fn course_document() -> serde_json::Value {
    json!({
        "type": "course",
        "title": "Full Stack Development",
        "img": "https://{{COURSEURL}}/course.png",
        "route": "#/course/{{COURSEURL}}",
        "properties": {"private": 0, "icon": {"type": "fa-code", "color": "teal"}},
        "los": [
            {
                "type": "topic",
                "title": "Topic 1",
                "route": "#/topic/{{COURSEURL}}/topic-01",
                "frontMatter": {"icon": {"type": "fa-rocket"}},
                "los": [
                    {"type": "talk", "title": "Intro", "route": "#/talk/{{COURSEURL}}/topic-01/talk-1", "pdf": "https://{{COURSEURL}}/topic-01/talk-1/intro.pdf"},
                    {
                        "type": "unit",
                        "title": "Unit 1",
                        "route": "#/unit/{{COURSEURL}}/topic-01/unit-1",
                        "los": [
                            {"type": "lab", "title": "Lab 1", "route": "#/lab/{{COURSEURL}}/topic-01/unit-1/book-1"},
                            {"type": "paneltalk", "title": "Panel talk", "route": "#/talk/{{COURSEURL}}/topic-01/unit-1/talk-2"},
                            {"type": "panelvideo", "title": "Panel video", "route": "README.md", "video": "#/video/{{COURSEURL}}/topic-01/unit-1/pv"}
                        ]
                    }
                ]
            },
            {
                "type": "topic",
                "title": "Topic 2",
                "route": "#/topic/{{COURSEURL}}/topic-02",
                "los": [
                    {"type": "video", "title": "Lecture", "route": "lecture.md", "video": "https://vimeo.com/123"},
                    {"type": "lab", "title": "Lab 2", "route": "#/lab/{{COURSEURL}}/topic-02/book-2"}
                ]
            }
        ]
    })
}

#[test]
fn test_course_tree_prepared_for_reader() {
    let mut root: Lo = serde_json::from_value(course_document()).unwrap();

    inject_course_url(&mut root, "fsd.netlify.app");
    thread_los(&mut root).unwrap();
    fix_all_routes(&mut root).unwrap();

    assert_eq!(root.img.as_deref(), Some("https://fsd.netlify.app/course.png"));
    assert_eq!(root.route.as_deref(), Some("/#//course/fsd.netlify.app"));

    let flat = flatten_los(root.children());
    assert_eq!(flat.len(), 9);
    assert!(flat
        .iter()
        .all(|lo| !lo.route.as_deref().unwrap_or_default().contains("{{COURSEURL}}")));

    let topics = root.children();
    let labs = all_los(&LoKind::Lab, topics);
    let lab_titles: Vec<_> = labs.iter().filter_map(|lo| lo.title.as_deref()).collect();
    assert_eq!(lab_titles, vec!["Lab 1", "Lab 2"]);

    let videos = all_video_los(topics);
    let video_titles: Vec<_> = videos.iter().filter_map(|lo| lo.title.as_deref()).collect();
    assert_eq!(video_titles, vec!["Panel video", "Lecture"]);

    // A markdown route gives way to the video.
    let lecture = find_by_route(topics, "https://vimeo.com/123").unwrap();
    assert_eq!(lecture.title.as_deref(), Some("Lecture"));
    let lecture_parent = lecture.parent_in(&root).unwrap();
    assert_eq!(lecture_parent.title.as_deref(), Some("Topic 2"));
}

#[test]
fn test_unit_children_sorted_with_panel_media_first() {
    let mut root: Lo = serde_json::from_value(course_document()).unwrap();
    let topic = &mut root.los.as_mut().unwrap()[0];

    let units = get_sorted_units(topic.los.as_mut().unwrap());

    assert_eq!(units.len(), 1);
    let kinds: Vec<_> = units[0].children().iter().map(|lo| lo.kind.clone()).collect();
    assert_eq!(kinds, vec![LoKind::PanelVideo, LoKind::PanelTalk, LoKind::Lab]);
}

#[tokio::test]
async fn test_summary_fetched_and_recorded() {
    let mut fetcher = MockSummaryFetcher::new();
    fetcher
        .expect_fetch()
        .withf(|url| url == "https://fsd.netlify.app/tutors.json")
        .times(1)
        .returning(|_| Ok(course_document().to_string()));

    let summary = get_course_summary(&fetcher, "fsd").await.unwrap();
    assert_eq!(summary.kind, LoKind::Web);

    let course = Course::new(summary.clone());
    let mut writer = MockLoWriter::new();
    writer
        .expect_write_obj()
        .withf(|key, value| {
            key == "fsd/lo"
                && value["icon"]["type"] == "fa-rocket"
                && value["courseTitle"] == "Full Stack Development"
                && value["title"] == "Topic 1"
                && value["isPrivate"] == 0
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let topic = &course.lo.children()[0];
    update_lo(&writer, "fsd", &course, topic).await.unwrap();
}
