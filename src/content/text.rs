// SPDX-License-Identifier: MPL-2.0
//! Per-language text fields.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use unic_langid::LanguageIdentifier;

/// Fixed-key mapping from language to text, e.g. `{ fr = "...", en = "..." }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct LocalizedText(HashMap<LanguageIdentifier, String>);

impl LocalizedText {
    /// Builds from `(tag, text)` pairs, rejecting unparseable tags.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self, InvalidTag> {
        pairs
            .iter()
            .map(|(tag, text)| parse(tag).map(|lang| (lang, (*text).to_string())))
            .collect::<Result<HashMap<_, _>, _>>()
            .map(Self)
    }

    pub fn get(&self, language: &LanguageIdentifier) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    /// Text for `language`, else text for `fallback`.
    pub fn resolve(
        &self,
        language: &LanguageIdentifier,
        fallback: &LanguageIdentifier,
    ) -> Option<&str> {
        self.get(language).or_else(|| self.get(fallback))
    }

    pub fn languages(&self) -> impl Iterator<Item = &LanguageIdentifier> {
        self.0.keys()
    }
}

/// A language key in a localized field that is not a valid tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTag(pub String);

impl fmt::Display for InvalidTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid language tag '{}'", self.0)
    }
}

impl std::error::Error for InvalidTag {}

fn parse(tag: &str) -> Result<LanguageIdentifier, InvalidTag> {
    tag.parse().map_err(|_| InvalidTag(tag.to_string()))
}

impl TryFrom<BTreeMap<String, String>> for LocalizedText {
    type Error = InvalidTag;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .map(|(tag, text)| parse(&tag).map(|lang| (lang, text)))
            .collect::<Result<HashMap<_, _>, _>>()
            .map(Self)
    }
}
