// SPDX-License-Identifier: MPL-2.0
//! Startup-loaded translation catalog.

use super::resources::ResourceDefinition;
use crate::error::ConfigurationError;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use std::collections::HashMap;
use std::fmt;
use unic_langid::LanguageIdentifier;

/// Read-only mapping from language and message key to translated text.
///
/// Lookups never fail: a missing key falls back to the fallback language,
/// then to the key itself.
pub struct Catalog {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    languages: Vec<LanguageIdentifier>,
    fallback: LanguageIdentifier,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("languages", &self.languages)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Catalog {
    /// Builds the catalog from one or more definitions per language.
    ///
    /// The fallback language must be present and parse cleanly. Other
    /// languages that fail to parse are dropped with a warning. Definitions
    /// for the same language are merged, later messages overriding earlier ones.
    pub fn load(
        definitions: Vec<ResourceDefinition>,
        fallback: &LanguageIdentifier,
    ) -> Result<Self, ConfigurationError> {
        let mut bundles = HashMap::new();
        let mut languages = Vec::new();

        for definition in definitions {
            let ResourceDefinition { language, source } = definition;
            let resource = match FluentResource::try_new(source) {
                Ok(resource) => resource,
                Err((_, errors)) => {
                    let details = errors
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ");
                    if &language == fallback {
                        return Err(ConfigurationError::MalformedResource {
                            language: language.to_string(),
                            details,
                        });
                    }
                    tracing::warn!(
                        language = %language,
                        %details,
                        "dropping malformed translation resource"
                    );
                    continue;
                }
            };

            let bundle = bundles.entry(language.clone()).or_insert_with(|| {
                languages.push(language.clone());
                new_bundle(&language)
            });
            bundle.add_resource_overriding(resource);
        }

        if !bundles.contains_key(fallback) {
            return Err(ConfigurationError::MissingFallback(fallback.to_string()));
        }

        Ok(Self {
            bundles,
            languages,
            fallback: fallback.clone(),
        })
    }

    /// Supported languages, in load order.
    pub fn languages(&self) -> &[LanguageIdentifier] {
        &self.languages
    }

    pub fn fallback(&self) -> &LanguageIdentifier {
        &self.fallback
    }

    pub fn supports(&self, language: &LanguageIdentifier) -> bool {
        self.bundles.contains_key(language)
    }

    /// Translates `key` for `language`, degrading to the fallback language
    /// and finally to the raw key.
    pub fn lookup(&self, language: &LanguageIdentifier, key: &str) -> String {
        if let Some(value) = self.message(language, key) {
            return value;
        }

        if language != &self.fallback {
            if let Some(value) = self.message(&self.fallback, key) {
                tracing::debug!(
                    language = %language,
                    key,
                    "translation missing, using fallback language"
                );
                return value;
            }
        }

        tracing::warn!(language = %language, key, "translation missing in every language");
        key.to_string()
    }

    /// Returns a lookup function bound to one language.
    pub fn translator(&self, language: LanguageIdentifier) -> Translator<'_> {
        Translator {
            catalog: self,
            language,
        }
    }

    fn message(&self, language: &LanguageIdentifier, key: &str) -> Option<String> {
        let bundle = self.bundles.get(language)?;
        let pattern = bundle.get_message(key)?.value()?;

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, None, &mut errors);
        if errors.is_empty() {
            Some(value.into_owned())
        } else {
            tracing::warn!(language = %language, key, ?errors, "failed to format translation");
            None
        }
    }
}

fn new_bundle(language: &LanguageIdentifier) -> FluentBundle<FluentResource> {
    let mut bundle = FluentBundle::new_concurrent(vec![language.clone()]);
    // Values end up in HTML, where bidi isolation marks are just noise.
    bundle.set_use_isolating(false);
    bundle
}

/// Lookup function bound to a resolved language, handed to the renderer.
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    catalog: &'a Catalog,
    language: LanguageIdentifier,
}

impl Translator<'_> {
    pub fn t(&self, key: &str) -> String {
        self.catalog.lookup(&self.language, key)
    }

    pub fn language(&self) -> &LanguageIdentifier {
        &self.language
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(tag: &str) -> LanguageIdentifier {
        tag.parse().unwrap()
    }

    fn greeting_catalog() -> Catalog {
        Catalog::load(
            vec![
                ResourceDefinition::new(lang("fr"), "greeting = Bonjour\nfarewell = Au revoir\n"),
                ResourceDefinition::new(lang("en"), "greeting = Hello\n"),
            ],
            &lang("fr"),
        )
        .expect("catalog should load")
    }

    #[test]
    fn lookup_returns_language_value() {
        let catalog = greeting_catalog();
        assert_eq!(catalog.lookup(&lang("en"), "greeting"), "Hello");
        assert_eq!(catalog.lookup(&lang("fr"), "greeting"), "Bonjour");
    }

    #[test]
    fn lookup_unsupported_language_uses_fallback() {
        let catalog = greeting_catalog();
        assert_eq!(catalog.lookup(&lang("de"), "greeting"), "Bonjour");
    }

    #[test]
    fn lookup_missing_key_in_language_uses_fallback() {
        let catalog = greeting_catalog();
        assert_eq!(catalog.lookup(&lang("en"), "farewell"), "Au revoir");
    }

    #[test]
    fn lookup_missing_everywhere_returns_key() {
        let catalog = greeting_catalog();
        assert_eq!(catalog.lookup(&lang("en"), "missing_key"), "missing_key");
        assert_eq!(catalog.lookup(&lang("fr"), "missing_key"), "missing_key");
    }

    #[test]
    fn lookup_message_needing_arguments_degrades() {
        let catalog = Catalog::load(
            vec![
                ResourceDefinition::new(lang("fr"), "welcome = Bienvenue\n"),
                ResourceDefinition::new(lang("en"), "welcome = Welcome { $name }\n"),
            ],
            &lang("fr"),
        )
        .unwrap();
        assert_eq!(catalog.lookup(&lang("en"), "welcome"), "Bienvenue");
    }

    #[test]
    fn load_without_fallback_fails() {
        let err = Catalog::load(
            vec![ResourceDefinition::new(lang("en"), "greeting = Hello\n")],
            &lang("fr"),
        )
        .unwrap_err();
        assert_eq!(err, ConfigurationError::MissingFallback("fr".into()));
    }

    #[test]
    fn load_with_malformed_fallback_fails() {
        let err = Catalog::load(
            vec![ResourceDefinition::new(lang("fr"), "this is { not fluent\n")],
            &lang("fr"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MalformedResource { ref language, .. } if language == "fr"
        ));
    }

    #[test]
    fn load_drops_malformed_secondary_language() {
        let catalog = Catalog::load(
            vec![
                ResourceDefinition::new(lang("fr"), "greeting = Bonjour\n"),
                ResourceDefinition::new(lang("en"), "greeting = { oops\n"),
            ],
            &lang("fr"),
        )
        .unwrap();
        assert_eq!(catalog.languages(), &[lang("fr")]);
        assert!(!catalog.supports(&lang("en")));
        assert_eq!(catalog.lookup(&lang("en"), "greeting"), "Bonjour");
    }

    #[test]
    fn load_merges_definitions_for_same_language() {
        let catalog = Catalog::load(
            vec![
                ResourceDefinition::new(lang("fr"), "greeting = Salut\ntitle = Accueil\n"),
                ResourceDefinition::new(lang("fr"), "greeting = Bonjour\n"),
            ],
            &lang("fr"),
        )
        .unwrap();
        assert_eq!(catalog.languages(), &[lang("fr")]);
        assert_eq!(catalog.lookup(&lang("fr"), "greeting"), "Bonjour");
        assert_eq!(catalog.lookup(&lang("fr"), "title"), "Accueil");
    }

    #[test]
    fn languages_keep_load_order() {
        let catalog = greeting_catalog();
        assert_eq!(catalog.languages(), &[lang("fr"), lang("en")]);
        assert_eq!(catalog.fallback(), &lang("fr"));
    }

    #[test]
    fn translator_is_bound_to_language() {
        let catalog = greeting_catalog();
        let t = catalog.translator(lang("en"));
        assert_eq!(t.t("greeting"), "Hello");
        assert_eq!(t.t("farewell"), "Au revoir");
        assert_eq!(t.language(), &lang("en"));
    }
}
