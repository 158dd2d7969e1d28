//! # lo: the learning-object tree model
//!
//! A course is described by a tree of [`Lo`] nodes (course → unit → topic → leaf
//! content such as talks, labs and videos). Children are owned through `los`;
//! the parent relation is a non-owning [`BackLink`] that serde and equality
//! never look at.
//!
//! Unknown JSON fields are kept in [`Lo::extra`] so a `tutors.json` document can
//! be loaded, rewritten and saved without losing data.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Deferred-resolution marker embedded in `route`, `img`, `video` and `pdf`.
pub const COURSE_URL_PLACEHOLDER: &str = "{{COURSEURL}}";

/// The content kind of a learning object (`type` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoKind {
    Course,
    Unit,
    Topic,
    Talk,
    Lab,
    Note,
    Web,
    Github,
    Archive,
    Book,
    Video,
    PanelVideo,
    PanelTalk,
    PanelNote,
    /// Any leaf kind outside the fixed taxonomy, kept verbatim.
    Other(String),
}

impl LoKind {
    pub fn as_str(&self) -> &str {
        match self {
            LoKind::Course => "course",
            LoKind::Unit => "unit",
            LoKind::Topic => "topic",
            LoKind::Talk => "talk",
            LoKind::Lab => "lab",
            LoKind::Note => "note",
            LoKind::Web => "web",
            LoKind::Github => "github",
            LoKind::Archive => "archive",
            LoKind::Book => "book",
            LoKind::Video => "video",
            LoKind::PanelVideo => "panelvideo",
            LoKind::PanelTalk => "paneltalk",
            LoKind::PanelNote => "panelnote",
            LoKind::Other(other) => other,
        }
    }

    /// Units are the only containers the type and video searches descend into.
    pub fn is_unit(&self) -> bool {
        matches!(self, LoKind::Unit)
    }
}

impl From<&str> for LoKind {
    fn from(s: &str) -> Self {
        match s {
            "course" => LoKind::Course,
            "unit" => LoKind::Unit,
            "topic" => LoKind::Topic,
            "talk" => LoKind::Talk,
            "lab" => LoKind::Lab,
            "note" => LoKind::Note,
            "web" => LoKind::Web,
            "github" => LoKind::Github,
            "archive" => LoKind::Archive,
            "book" => LoKind::Book,
            "video" => LoKind::Video,
            "panelvideo" => LoKind::PanelVideo,
            "paneltalk" => LoKind::PanelTalk,
            "panelnote" => LoKind::PanelNote,
            other => LoKind::Other(other.to_string()),
        }
    }
}

impl From<String> for LoKind {
    fn from(s: String) -> Self {
        LoKind::from(s.as_str())
    }
}

impl From<LoKind> for String {
    fn from(kind: LoKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for LoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display icon for a learning object. An empty icon serialises as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Icon {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.color.is_none()
    }
}

/// Path of child indices from a threading root down to a node.
/// The empty path is the threading root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LoHandle(Vec<usize>);

impl LoHandle {
    pub fn new(path: Vec<usize>) -> Self {
        LoHandle(path)
    }

    pub fn path(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

/// Non-owning reference to a node's parent, set by [`crate::mutate::thread_los`].
///
/// Always compares equal and is skipped by serde, so equality and
/// serialisation never follow it.
#[derive(Clone, Default)]
pub struct BackLink(Option<LoHandle>);

impl BackLink {
    pub fn to(handle: LoHandle) -> Self {
        BackLink(Some(handle))
    }

    pub fn handle(&self) -> Option<&LoHandle> {
        self.0.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl PartialEq for BackLink {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Debug for BackLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(handle) => write!(f, "BackLink({:?})", handle.path()),
            None => f.write_str("BackLink(unset)"),
        }
    }
}

/// A learning object: one node of a course content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lo {
    #[serde(rename = "type")]
    pub kind: LoKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub los: Option<Vec<Lo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_matter: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
    #[serde(skip)]
    pub parent_lo: BackLink,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Lo {
    pub fn new(kind: impl Into<LoKind>) -> Self {
        Lo {
            kind: kind.into(),
            title: None,
            route: None,
            img: None,
            video: None,
            pdf: None,
            los: None,
            icon: None,
            front_matter: None,
            properties: None,
            parent_lo: BackLink::default(),
            extra: Map::new(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_route(mut self, route: &str) -> Self {
        self.route = Some(route.to_string());
        self
    }

    pub fn with_img(mut self, img: &str) -> Self {
        self.img = Some(img.to_string());
        self
    }

    pub fn with_video(mut self, video: &str) -> Self {
        self.video = Some(video.to_string());
        self
    }

    pub fn with_pdf(mut self, pdf: &str) -> Self {
        self.pdf = Some(pdf.to_string());
        self
    }

    pub fn with_los(mut self, los: Vec<Lo>) -> Self {
        self.los = Some(los);
        self
    }

    /// Children, or an empty slice for a leaf.
    pub fn children(&self) -> &[Lo] {
        self.los.as_deref().unwrap_or(&[])
    }

    /// The `video` field when it is present and non-empty.
    pub fn video_url(&self) -> Option<&str> {
        self.video.as_deref().filter(|v| !v.is_empty())
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }

    /// Resolves a handle produced by threading this node.
    pub fn node_at(&self, handle: &LoHandle) -> Option<&Lo> {
        let mut node = self;
        for &index in handle.path() {
            node = node.los.as_ref()?.get(index)?;
        }
        Some(node)
    }

    /// The node's parent, looked up in the tree it was threaded from.
    pub fn parent_in<'a>(&self, root: &'a Lo) -> Option<&'a Lo> {
        root.node_at(self.parent_lo.handle()?)
    }
}

/// External aggregate holding the root learning object of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub lo: Lo,
}

impl Course {
    pub fn new(lo: Lo) -> Self {
        Course { lo }
    }

    pub fn title(&self) -> Option<&str> {
        self.lo.title.as_deref()
    }

    /// The `private` property copied as-is when truthy, otherwise `0`.
    pub fn is_private(&self) -> Value {
        match self.lo.property("private") {
            Some(flag) if is_truthy(flag) => flag.clone(),
            _ => Value::from(0),
        }
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
