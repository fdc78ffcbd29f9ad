// SPDX-License-Identifier: MPL-2.0
//! Language resolution for incoming requests.
//!
//! Every function here is pure: no transport types, no logging side effects
//! beyond what the caller chooses to do with the result.

use unic_langid::LanguageIdentifier;

/// Name of the query parameter carrying an explicit language choice.
pub const QUERY_PARAM: &str = "lng";

/// Name of the cookie remembering a previous language choice.
pub const COOKIE_NAME: &str = "i18next";

/// Parses a language tag, returning `None` for empty or malformed input.
pub fn parse_tag(raw: &str) -> Option<LanguageIdentifier> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<LanguageIdentifier>().ok()
}

/// Maps an optional hint to exactly one supported language.
///
/// The hint is returned (canonicalized) when it matches a supported tag;
/// absent, malformed or unsupported hints all yield `fallback`.
pub fn resolve(
    hint: Option<&str>,
    supported: &[LanguageIdentifier],
    fallback: &LanguageIdentifier,
) -> LanguageIdentifier {
    match_supported(hint, supported).unwrap_or_else(|| fallback.clone())
}

fn match_supported(
    hint: Option<&str>,
    supported: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    let lang = parse_tag(hint?)?;
    supported.iter().find(|candidate| **candidate == lang).cloned()
}

/// Picks the best supported language from an `Accept-Language` header value.
///
/// Entries are ordered by their `q` weight (ties keep header order). Each
/// entry matches a supported tag exactly, or by primary language when the
/// entry carries a region (`en-US` selects `en`).
pub fn negotiate(
    accept_language: &str,
    supported: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    let mut entries: Vec<(LanguageIdentifier, f32)> = accept_language
        .split(',')
        .filter_map(parse_weighted_entry)
        .filter(|(_, weight)| *weight > 0.0)
        .collect();

    // sort_by is stable, so equal weights keep their header order
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));

    entries.iter().find_map(|(requested, _)| {
        supported
            .iter()
            .find(|candidate| *candidate == requested)
            .or_else(|| {
                supported.iter().find(|candidate| {
                    candidate.language == requested.language
                        && candidate.script.is_none()
                        && candidate.region.is_none()
                })
            })
            .cloned()
    })
}

fn parse_weighted_entry(entry: &str) -> Option<(LanguageIdentifier, f32)> {
    let mut parts = entry.split(';');
    let tag = parts.next()?.trim();
    if tag == "*" {
        return None;
    }
    let lang = parse_tag(tag)?;

    let mut weight = 1.0;
    for param in parts {
        if let Some(value) = param.trim().strip_prefix("q=") {
            weight = value.trim().parse::<f32>().ok()?;
        }
    }
    Some((lang, weight))
}

/// Extracts a named cookie value from a `Cookie` header.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim().trim_matches('"'))
    })
}

/// Language hints collected from one request.
///
/// Sources are consulted in order: explicit query parameter, cookie, then
/// `Accept-Language` negotiation. A source that is present but unsupported
/// is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSelector {
    pub query: Option<String>,
    pub cookie: Option<String>,
    pub accept_language: Option<String>,
}

impl LanguageSelector {
    pub fn resolve(
        &self,
        supported: &[LanguageIdentifier],
        fallback: &LanguageIdentifier,
    ) -> LanguageIdentifier {
        let negotiated = self
            .accept_language
            .as_deref()
            .and_then(|header| negotiate(header, supported))
            .map(|lang| lang.to_string());

        let hint = [self.query.as_deref(), self.cookie.as_deref()]
            .into_iter()
            .flatten()
            .find(|candidate| match_supported(Some(*candidate), supported).is_some())
            .or(negotiated.as_deref());

        resolve(hint, supported, fallback)
    }
}
