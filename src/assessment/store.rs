#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::model::{Assessment, AssessmentError, now};

/// On-disk layout of the assessment document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    /// Assessments keyed by title.
    #[serde(default)]
    assessments:  BTreeMap<String, Assessment>,
    /// When the document was last written.
    #[serde(default)]
    last_updated: Option<NaiveDateTime>,
}

/// Assessments keyed by title, backed by a JSON file.
///
/// There is no locking: concurrent writers overwrite each other.
#[derive(Debug)]
pub struct AssessmentStore {
    /// Location of the JSON document.
    path:        PathBuf,
    /// Loaded assessments keyed by title.
    assessments: BTreeMap<String, Assessment>,
}

impl AssessmentStore {
    /// Loads the document at `path`; a missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let assessments = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            let doc: Document = serde_json::from_str(&raw)
                .with_context(|| format!("Could not parse {}", path.display()))?;
            doc.assessments
        } else {
            tracing::debug!("{} does not exist yet; starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self { path, assessments })
    }

    /// Writes every assessment back to disk.
    pub fn save(&self) -> Result<()> {
        let doc = Document {
            assessments:  self.assessments.clone(),
            last_updated: Some(now()),
        };
        let json = serde_json::to_string_pretty(&doc)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Could not write {}", self.path.display()))
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the titles in sorted order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.assessments.keys().map(String::as_str)
    }

    /// Returns every assessment in title order.
    pub fn assessments(&self) -> impl Iterator<Item = &Assessment> {
        self.assessments.values()
    }

    /// Looks up an assessment by title.
    pub fn get(&self, title: &str) -> Result<&Assessment, AssessmentError> {
        let title = title.trim();
        self.assessments
            .get(title)
            .ok_or_else(|| AssessmentError::UnknownAssessment(title.to_string()))
    }

    /// Looks up an assessment by title for editing.
    pub fn get_mut(&mut self, title: &str) -> Result<&mut Assessment, AssessmentError> {
        let title = title.trim();
        self.assessments
            .get_mut(title)
            .ok_or_else(|| AssessmentError::UnknownAssessment(title.to_string()))
    }

    /// Returns the assessment with this title, creating it if needed.
    pub fn get_or_create(&mut self, title: &str) -> Result<&mut Assessment, AssessmentError> {
        let fresh = Assessment::new(title)?;
        Ok(self.assessments.entry(fresh.title.clone()).or_insert(fresh))
    }
}
