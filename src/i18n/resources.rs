// SPDX-License-Identifier: MPL-2.0
//! Sources of translation resources.
//!
//! A resource definition is the Fluent source for one language. Loaders only
//! fetch text; validation happens when the [`Catalog`](super::Catalog) is built.

use crate::error::Result;
use rust_embed::RustEmbed;
use std::fs;
use std::io;
use std::path::PathBuf;
use unic_langid::LanguageIdentifier;

const RESOURCE_EXTENSION: &str = "ftl";

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Fluent source text for a single language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDefinition {
    pub language: LanguageIdentifier,
    pub source: String,
}

impl ResourceDefinition {
    pub fn new(language: LanguageIdentifier, source: impl Into<String>) -> Self {
        Self {
            language,
            source: source.into(),
        }
    }
}

/// Supplies resource definitions at startup.
///
/// Languages without a resource are simply omitted from the result.
pub trait ResourceLoader {
    fn load(&self, languages: &[LanguageIdentifier]) -> Result<Vec<ResourceDefinition>>;
}

/// Resources compiled into the binary from `assets/i18n/<tag>.ftl`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedResources;

impl EmbeddedResources {
    /// Languages for which an embedded resource exists.
    pub fn available() -> Vec<LanguageIdentifier> {
        Asset::iter()
            .filter_map(|file| {
                file.strip_suffix(".ftl")
                    .and_then(|tag| tag.parse::<LanguageIdentifier>().ok())
            })
            .collect()
    }
}

impl ResourceLoader for EmbeddedResources {
    fn load(&self, languages: &[LanguageIdentifier]) -> Result<Vec<ResourceDefinition>> {
        Ok(languages
            .iter()
            .filter_map(|lang| {
                let file = Asset::get(&format!("{}.{}", lang, RESOURCE_EXTENSION))?;
                let source = String::from_utf8_lossy(file.data.as_ref()).into_owned();
                Some(ResourceDefinition::new(lang.clone(), source))
            })
            .collect())
    }
}

/// Resources read from `<dir>/<tag>.ftl` on disk.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    dir: PathBuf,
}

impl DirectoryResources {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ResourceLoader for DirectoryResources {
    fn load(&self, languages: &[LanguageIdentifier]) -> Result<Vec<ResourceDefinition>> {
        let mut definitions = Vec::with_capacity(languages.len());
        for lang in languages {
            let path = self.dir.join(format!("{}.{}", lang, RESOURCE_EXTENSION));
            match fs::read_to_string(&path) {
                Ok(source) => definitions.push(ResourceDefinition::new(lang.clone(), source)),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "no resource file for language");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn lang(tag: &str) -> LanguageIdentifier {
        tag.parse().unwrap()
    }

    #[test]
    fn embedded_resources_cover_french_and_english() {
        let available = EmbeddedResources::available();
        assert!(available.contains(&lang("fr")));
        assert!(available.contains(&lang("en")));
    }

    #[test]
    fn embedded_loader_skips_unknown_languages() {
        let defs = EmbeddedResources
            .load(&[lang("fr"), lang("de")])
            .expect("embedded load never fails");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].language, lang("fr"));
        assert!(!defs[0].source.is_empty());
    }

    #[test]
    fn directory_loader_reads_present_files_in_order() {
        let dir = tempdir().expect("failed to create temp dir");
        fs::write(dir.path().join("en.ftl"), "greeting = Hello\n").unwrap();
        fs::write(dir.path().join("fr.ftl"), "greeting = Bonjour\n").unwrap();

        let defs = DirectoryResources::new(dir.path())
            .load(&[lang("fr"), lang("de"), lang("en")])
            .expect("failed to load directory resources");

        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].language, lang("fr"));
        assert_eq!(defs[0].source, "greeting = Bonjour\n");
        assert_eq!(defs[1].language, lang("en"));
    }

    #[test]
    fn directory_loader_missing_dir_yields_nothing() {
        let dir = tempdir().expect("failed to create temp dir");
        let defs = DirectoryResources::new(dir.path().join("absent"))
            .load(&[lang("fr")])
            .expect("missing files are not an error");
        assert!(defs.is_empty());
    }
}
