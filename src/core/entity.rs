use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};

/// Deserialize seeAlso from a list, a single string or null
fn deserialize_see_also<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SeeAlsoValue {
        List(Vec<String>),
        Single(String),
        Null,
    }

    match SeeAlsoValue::deserialize(deserializer)? {
        SeeAlsoValue::List(links) => Ok(links),
        SeeAlsoValue::Single(link) => Ok(vec![link]),
        SeeAlsoValue::Null => Ok(Vec::new()),
    }
}

/// Properties resolved for an entity
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityData {
    /// Outbound related-entity links (rdfs:seeAlso)
    #[serde(rename = "seeAlso", default, deserialize_with = "deserialize_see_also")]
    pub see_also: Vec<String>,

    /// Thumbnail URL, passed through untouched
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// English short description (rdfs:comment)
    #[serde(default)]
    pub comment: Option<String>,
}

/// A knowledge-graph entity as exchanged with the explorer frontend
///
/// Serializes as `{"query": ..., "data": {"seeAlso": [...], "thumbnail": ..., "comment": ...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityRecord {
    /// Canonical entity name
    #[serde(rename = "query")]
    pub identifier: String,

    #[serde(default)]
    pub data: EntityData,
}

impl EntityRecord {
    /// Create a record with no resolved properties
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            data: EntityData::default(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.data.comment = Some(comment.into());
        self
    }

    pub fn with_see_also<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.see_also = links.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.data.thumbnail = Some(thumbnail.into());
        self
    }

    /// Description text, `None` when absent or empty
    pub fn comment(&self) -> Option<&str> {
        self.data.comment.as_deref().filter(|c| !c.is_empty())
    }

    pub fn see_also(&self) -> &[String] {
        &self.data.see_also
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.data.thumbnail.as_deref()
    }

    /// Reject records without a usable identifier
    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(ExplorerError::invalid_input("entity identifier is missing"));
        }
        Ok(())
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
