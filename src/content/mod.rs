// SPDX-License-Identifier: MPL-2.0
//! Static portfolio content and its per-request localization.
//!
//! Project records are authored once (embedded TOML or a configured file),
//! validated at startup, then projected into [`LocalizedProject`] views for
//! each request.

mod text;

pub use text::LocalizedText;

use crate::error::{DataIntegrityError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use unic_langid::LanguageIdentifier;

const EMBEDDED_PROJECTS: &str = include_str!("../../assets/content/projects.toml");

/// A portfolio item as authored, with per-language text fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: LocalizedText,
    pub short_description: LocalizedText,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub code_link: String,
}

/// A project record collapsed to a single language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedProject<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub short_description: &'a str,
    pub image_urls: &'a [String],
    pub video_url: &'a str,
    pub tags: &'a [String],
    pub code_link: &'a str,
}

/// Projects each record into `language`, taking `fallback` per field when
/// the record has no entry for `language`.
///
/// Output order and length match `records`.
pub fn localize<'a>(
    records: &'a [ProjectRecord],
    language: &LanguageIdentifier,
    fallback: &LanguageIdentifier,
) -> std::result::Result<Vec<LocalizedProject<'a>>, DataIntegrityError> {
    records
        .iter()
        .map(|record| localize_record(record, language, fallback))
        .collect()
}

fn localize_record<'a>(
    record: &'a ProjectRecord,
    language: &LanguageIdentifier,
    fallback: &LanguageIdentifier,
) -> std::result::Result<LocalizedProject<'a>, DataIntegrityError> {
    let field = |text: &'a LocalizedText, name: &'static str| {
        text.resolve(language, fallback)
            .ok_or_else(|| DataIntegrityError::MissingLocalization {
                record_id: record.id.clone(),
                field: name,
                language: language.to_string(),
            })
    };

    Ok(LocalizedProject {
        id: &record.id,
        title: field(&record.title, "title")?,
        short_description: field(&record.short_description, "short_description")?,
        image_urls: &record.image_urls,
        video_url: &record.video_url,
        tags: &record.tags,
        code_link: &record.code_link,
    })
}

#[derive(Debug, Deserialize)]
struct ProjectDocument {
    #[serde(default)]
    projects: Vec<ProjectRecord>,
}

/// Validated, read-only list of project records in display order.
#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    records: Vec<ProjectRecord>,
    fallback: LanguageIdentifier,
}

impl ProjectCatalog {
    /// Validates that ids are unique and that every record can always be
    /// localized through `fallback`.
    pub fn new(
        records: Vec<ProjectRecord>,
        fallback: &LanguageIdentifier,
    ) -> std::result::Result<Self, DataIntegrityError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(DataIntegrityError::DuplicateId(record.id.clone()));
            }
        }

        // Localizing into the fallback itself exercises exactly the
        // entries every other language relies on.
        localize(&records, fallback, fallback)?;

        Ok(Self {
            records,
            fallback: fallback.clone(),
        })
    }

    /// Parses a TOML project document.
    pub fn from_toml(
        source: &str,
        fallback: &LanguageIdentifier,
    ) -> std::result::Result<Self, DataIntegrityError> {
        let document: ProjectDocument =
            toml::from_str(source).map_err(|err| DataIntegrityError::Malformed(err.to_string()))?;
        Self::new(document.projects, fallback)
    }

    /// The project list compiled into the binary.
    pub fn embedded(
        fallback: &LanguageIdentifier,
    ) -> std::result::Result<Self, DataIntegrityError> {
        Self::from_toml(EMBEDDED_PROJECTS, fallback)
    }

    pub fn load_from_path(path: &Path, fallback: &LanguageIdentifier) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml(&content, fallback)?)
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn localize(
        &self,
        language: &LanguageIdentifier,
    ) -> std::result::Result<Vec<LocalizedProject<'_>>, DataIntegrityError> {
        localize(&self.records, language, &self.fallback)
    }
}
