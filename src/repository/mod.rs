//! The content repository collaborator: a document store keyed by
//! collection name.
//!
//! The desktop core only ever talks to [`ContentRepository`]; the CRUD
//! forms, authentication and the real database client live outside this
//! crate.

mod memory;

pub use memory::InMemoryRepository;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::fs::EntryKind;

pub const SIMULATED_FILES: &str = "simulatedFiles";
pub const REPOSITORIES: &str = "repositories";
pub const USER_PROFILE: &str = "userProfile";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("document `{id}` not found in `{collection}`")]
    DocumentNotFound { collection: String, id: String },
    #[error("malformed record in `{collection}`: {source}")]
    Malformed {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One stored document. Fields other than `id` are kept as raw JSON so the
/// repository does not need to know every collection's schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn from_value<T: Serialize>(collection: &str, value: &T) -> Result<Self, RepositoryError> {
        serde_json::to_value(value)
            .and_then(serde_json::from_value)
            .map_err(|source| RepositoryError::Malformed {
                collection: collection.to_string(),
                source,
            })
    }

    pub fn decode<T: DeserializeOwned>(&self, collection: &str) -> Result<T, RepositoryError> {
        serde_json::to_value(self)
            .and_then(serde_json::from_value)
            .map_err(|source| RepositoryError::Malformed {
                collection: collection.to_string(),
                source,
            })
    }
}

#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn list(&self, collection: &str) -> Result<Vec<Record>, RepositoryError>;
    async fn add(&self, collection: &str, record: Record) -> Result<Record, RepositoryError>;
    async fn update(
        &self,
        collection: &str,
        id: &str,
        record: Record,
    ) -> Result<(), RepositoryError>;
    async fn delete(&self, collection: &str, id: &str) -> Result<(), RepositoryError>;
}

/// Fetch a whole collection and decode every record as `T`.
pub async fn fetch_all<T: DeserializeOwned>(
    repository: &dyn ContentRepository,
    collection: &str,
) -> Result<Vec<T>, RepositoryError> {
    repository
        .list(collection)
        .await?
        .iter()
        .map(|record| record.decode(collection))
        .collect()
}

/// A file or folder record backing a dynamic directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Directory the entry lives in, e.g. `/home/developer/portfolio`.
    pub path: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A showcased source repository (the `projects` listing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub is_pinned: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutSection {
    pub name: String,
    pub tagline: String,
    pub location: String,
    pub experience: String,
    pub specialization: String,
    pub passion: String,
    pub education: String,
    pub certifications: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSection {
    pub email: String,
    pub phone: String,
    pub github: String,
    pub linkedin: String,
    pub website: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedinSection {
    pub skills: Vec<String>,
}

/// The single profile document driving the about/skills/contact output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub about: AboutSection,
    pub contact: ContactSection,
    pub linkedin: LinkedinSection,
}
