// SPDX-License-Identifier: MPL-2.0
//! Process-wide, read-only state shared by all handlers.

use super::render::{HtmlRenderer, PageContext, Renderer};
use crate::config::Config;
use crate::content::ProjectCatalog;
use crate::error::Result;
use crate::i18n::{
    Catalog, DirectoryResources, EmbeddedResources, LanguageSelector, ResourceLoader,
};
use std::fmt;
use unic_langid::LanguageIdentifier;

/// Built once at startup, then shared behind an `Arc` without locking.
pub struct AppState {
    pub catalog: Catalog,
    pub projects: ProjectCatalog,
    pub renderer: Box<dyn Renderer>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("catalog", &self.catalog)
            .field("projects", &self.projects.len())
            .finish()
    }
}

impl AppState {
    pub fn new(catalog: Catalog, projects: ProjectCatalog) -> Self {
        Self {
            catalog,
            projects,
            renderer: Box::new(HtmlRenderer),
        }
    }

    /// Loads translations and projects as configured.
    ///
    /// Fails when the fallback translations are missing or malformed, or when
    /// the project data is inconsistent.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fallback = config.fallback_language()?;
        let languages = config.languages()?;

        let definitions = match &config.content.locales_dir {
            Some(dir) => DirectoryResources::new(dir).load(&languages)?,
            None => EmbeddedResources.load(&languages)?,
        };
        let catalog = Catalog::load(definitions, &fallback)?;

        for language in languages.iter().filter(|lang| !catalog.supports(lang)) {
            tracing::warn!(language = %language, "no usable translations, language disabled");
        }

        let projects = match &config.content.projects_file {
            Some(path) => ProjectCatalog::load_from_path(path, &fallback)?,
            None => ProjectCatalog::embedded(&fallback)?,
        };

        tracing::info!(
            languages = ?catalog.languages().iter().map(ToString::to_string).collect::<Vec<_>>(),
            fallback = %fallback,
            projects = projects.len(),
            "site content loaded"
        );

        Ok(Self::new(catalog, projects))
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn resolve_language(&self, selector: &LanguageSelector) -> LanguageIdentifier {
        selector.resolve(self.catalog.languages(), self.catalog.fallback())
    }

    pub fn page(&self, language: LanguageIdentifier) -> PageContext<'_> {
        PageContext {
            translator: self.catalog.translator(language),
            languages: self.catalog.languages(),
        }
    }
}
