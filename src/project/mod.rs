//! Project descriptor and scene discovery.
//!
//! A project directory looks like:
//!
//! ```text
//! my-story/
//! ├── project.json
//! └── scenes/
//!     ├── scene-001.md
//!     ├── scene-002.md
//!     └── ...
//! ```

mod scenes;

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::error::{Error, Result};

pub use scenes::{SCENES_DIR, Scene, SceneOrder, discover_scenes, is_scene_file, scene_number};

/// File name of the project descriptor inside a project directory.
pub const PROJECT_FILE: &str = "project.json";

/// Project metadata used for the title page and running header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub title: String,
    pub author: String,
    /// Name printed on the byline; the author's name unless set.
    pub pen_name: String,
    pub contact: Contact,
    pub word_count: u64,
}

/// Contact block printed under the author's name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub address: Vec<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Contact {
    /// Address lines, then phone, then email, skipping anything empty.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.address
            .iter()
            .map(String::as_str)
            .chain(self.phone.as_deref())
            .chain(self.email.as_deref())
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

impl Project {
    /// Create a project with the given title and author and no contact block.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        let author = author.into();
        Self {
            title: title.into(),
            pen_name: author.clone(),
            author,
            contact: Contact::default(),
            word_count: 0,
        }
    }

    pub fn with_pen_name(mut self, pen_name: impl Into<String>) -> Self {
        self.pen_name = pen_name.into();
        self
    }

    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = contact;
        self
    }

    pub fn with_word_count(mut self, word_count: u64) -> Self {
        self.word_count = word_count;
        self
    }

    /// Read `project.json` from a project directory.
    pub fn load<P: AsRef<Path>>(project_dir: P) -> Result<Self> {
        let path = project_dir.as_ref().join(PROJECT_FILE);
        let json = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::MissingProject(path.clone()),
            _ => Error::Io(e),
        })?;
        let project = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), title = %project.title, "loaded project");
        Ok(project)
    }

    /// Parse a project descriptor from JSON text.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio::Project;
    ///
    /// let project = Project::from_json(r#"{"title": "The Last Signal", "author": "Ada Byron"}"#)?;
    /// assert_eq!(project.pen_name, "Ada Byron");
    /// assert_eq!(project.word_count, 0);
    /// # Ok::<(), folio::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptor: ProjectDescriptor = serde_json::from_str(json)?;
        Ok(descriptor.into())
    }
}

/// `project.json` as written by authors. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDescriptor {
    project_name: Option<String>,
    title: Option<String>,
    author: Option<String>,
    pen_name: Option<String>,
    contact: Option<ContactDescriptor>,
    word_count: Option<Number>,
}

#[derive(Debug, Default, Deserialize)]
struct ContactDescriptor {
    address: Option<Value>,
    phone: Option<String>,
    email: Option<String>,
}

impl From<ProjectDescriptor> for Project {
    fn from(d: ProjectDescriptor) -> Self {
        let author = d.author.unwrap_or_else(|| "Unknown Author".to_string());
        let contact = d.contact.map(Contact::from).unwrap_or_default();

        Project {
            title: d
                .project_name
                .or(d.title)
                .unwrap_or_else(|| "Untitled".to_string()),
            pen_name: d.pen_name.unwrap_or_else(|| author.clone()),
            author,
            contact,
            word_count: d.word_count.map(word_count_value).unwrap_or(0),
        }
    }
}

impl From<ContactDescriptor> for Contact {
    fn from(d: ContactDescriptor) -> Self {
        Contact {
            address: d.address.map(address_lines).unwrap_or_default(),
            phone: d.phone,
            email: d.email,
        }
    }
}

/// Whole, non-negative word count from any JSON number.
fn word_count_value(n: Number) -> u64 {
    if let Some(count) = n.as_u64() {
        return count;
    }
    match n.as_f64() {
        Some(count) if count.is_finite() && count >= 0.0 => count.round() as u64,
        _ => {
            tracing::warn!(value = %n, "word count is negative; using 0");
            0
        }
    }
}

/// Flatten an address given either as a list of lines or as one string.
fn address_lines(value: Value) -> Vec<String> {
    match value {
        Value::String(line) => vec![line],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(line) => Some(line),
                Value::Number(n) => Some(n.to_string()),
                other => {
                    tracing::warn!(value = %other, "ignoring address line that is not text");
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(value = %other, "ignoring address that is neither text nor a list");
            Vec::new()
        }
    }
}
