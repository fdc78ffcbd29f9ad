// SPDX-License-Identifier: MPL-2.0
//! Rendering sink for the site's pages.
//!
//! Handlers resolve the language and localize data; a [`Renderer`] only
//! turns that into a response body.

use crate::content::LocalizedProject;
use crate::i18n::language::QUERY_PARAM;
use crate::i18n::Translator;
use std::borrow::Cow;
use std::fmt::Write;
use unic_langid::LanguageIdentifier;

/// What every page needs besides its own data.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    /// Lookup function bound to the resolved language.
    pub translator: Translator<'a>,
    /// Supported languages, for the language switcher.
    pub languages: &'a [LanguageIdentifier],
}

impl PageContext<'_> {
    pub fn t(&self, key: &str) -> String {
        self.translator.t(key)
    }

    pub fn language(&self) -> &LanguageIdentifier {
        self.translator.language()
    }
}

pub trait Renderer: Send + Sync {
    fn home(&self, page: &PageContext<'_>) -> String;
    fn projects(&self, page: &PageContext<'_>, projects: &[LocalizedProject<'_>]) -> String;
    fn not_found(&self, page: &PageContext<'_>) -> String;
    fn error(&self, page: &PageContext<'_>) -> String;
}

/// Renders escaped HTML5 documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn layout(&self, page: &PageContext<'_>, heading_key: &str, body: &str) -> String {
        let lang = page.language().to_string();
        let mut html = String::with_capacity(body.len() + 1024);

        // Writing into a String cannot fail.
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n\
             <meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{heading} | {site}</title>\n\
             <link rel=\"stylesheet\" href=\"/css/style.css\">\n\
             </head>\n<body>\n<header>\n<nav>\n\
             <a href=\"{home_href}\">{nav_home}</a>\n\
             <a href=\"{projects_href}\">{nav_projects}</a>\n\
             </nav>\n{switcher}</header>\n<main>\n{body}</main>\n\
             <footer><p>&copy; {site}. {footer}</p></footer>\n</body>\n</html>\n",
            lang = escape(&lang),
            heading = escape(&page.t(heading_key)),
            site = escape(&page.t("site-title")),
            home_href = escape(&with_language("/", &lang)),
            nav_home = escape(&page.t("nav-home")),
            projects_href = escape(&with_language("/projects", &lang)),
            nav_projects = escape(&page.t("nav-projects")),
            switcher = language_switcher(page),
            body = body,
            footer = escape(&page.t("footer-text")),
        );
        html
    }
}

impl Renderer for HtmlRenderer {
    fn home(&self, page: &PageContext<'_>) -> String {
        let lang = page.language().to_string();
        let body = format!(
            "<section class=\"hero\">\n<h1>{heading}</h1>\n<p class=\"tagline\">{tagline}</p>\n\
             <p>{intro}</p>\n<a class=\"cta\" href=\"{href}\">{cta}</a>\n</section>\n",
            heading = escape(&page.t("home-heading")),
            tagline = escape(&page.t("home-tagline")),
            intro = escape(&page.t("home-intro")),
            href = escape(&with_language("/projects", &lang)),
            cta = escape(&page.t("home-cta")),
        );
        self.layout(page, "nav-home", &body)
    }

    fn projects(&self, page: &PageContext<'_>, projects: &[LocalizedProject<'_>]) -> String {
        let mut body = format!(
            "<h1>{}</h1>\n<p>{}</p>\n<div class=\"projects\">\n",
            escape(&page.t("projects-heading")),
            escape(&page.t("projects-intro")),
        );
        for project in projects {
            render_project(&mut body, page, project);
        }
        body.push_str("</div>\n");
        self.layout(page, "projects-heading", &body)
    }

    fn not_found(&self, page: &PageContext<'_>) -> String {
        let body = format!(
            "<h1>{}</h1>\n<p>{}</p>\n<a href=\"{}\">{}</a>\n",
            escape(&page.t("not-found-heading")),
            escape(&page.t("not-found-body")),
            escape(&with_language("/", &page.language().to_string())),
            escape(&page.t("not-found-back")),
        );
        self.layout(page, "not-found-heading", &body)
    }

    fn error(&self, page: &PageContext<'_>) -> String {
        let body = format!(
            "<h1>{}</h1>\n<p>{}</p>\n",
            escape(&page.t("error-heading")),
            escape(&page.t("error-body")),
        );
        self.layout(page, "error-heading", &body)
    }
}

fn render_project(out: &mut String, page: &PageContext<'_>, project: &LocalizedProject<'_>) {
    let _ = writeln!(
        out,
        "<article class=\"project\" id=\"{}\">\n<h2>{}</h2>\n<p>{}</p>",
        escape(project.id),
        escape(project.title),
        escape(project.short_description),
    );

    if !project.image_urls.is_empty() {
        let _ = writeln!(
            out,
            "<div class=\"gallery\" aria-label=\"{}\">",
            escape(&page.t("project-gallery"))
        );
        for url in project.image_urls {
            let _ = writeln!(
                out,
                "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                escape(url),
                escape(project.title)
            );
        }
        out.push_str("</div>\n");
    }

    if !project.video_url.is_empty() {
        let _ = writeln!(
            out,
            "<iframe src=\"{}\" title=\"{}\" allowfullscreen></iframe>",
            escape(project.video_url),
            escape(&page.t("project-watch-video")),
        );
    }

    if !project.tags.is_empty() {
        let _ = writeln!(
            out,
            "<ul class=\"tags\" aria-label=\"{}\">",
            escape(&page.t("project-technologies"))
        );
        for tag in project.tags {
            let _ = writeln!(out, "<li>{}</li>", escape(tag));
        }
        out.push_str("</ul>\n");
    }

    if !project.code_link.is_empty() {
        let _ = writeln!(
            out,
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            escape(project.code_link),
            escape(&page.t("project-view-code")),
        );
    }

    out.push_str("</article>\n");
}

fn language_switcher(page: &PageContext<'_>) -> String {
    let current = page.language();
    let mut html = format!(
        "<div class=\"languages\" aria-label=\"{}\">",
        escape(&page.t("language-switcher"))
    );
    for language in page.languages {
        let tag = language.to_string();
        let _ = write!(
            html,
            "<a href=\"{}\" hreflang=\"{}\" aria-current=\"{}\">{}</a>",
            escape(&with_language("", &tag)),
            escape(&tag),
            language == current,
            escape(&tag.to_uppercase()),
        );
    }
    html.push_str("</div>\n");
    html
}

/// An empty `path` gives a query-only link that stays on the current page.
fn with_language(path: &str, tag: &str) -> String {
    format!("{}?{}={}", path, QUERY_PARAM, tag)
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape(raw: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Catalog, ResourceDefinition};

    fn lang(tag: &str) -> LanguageIdentifier {
        tag.parse().unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::load(
            vec![
                ResourceDefinition::new(
                    lang("fr"),
                    concat!(
                        "home-heading = Bienvenue\nnav-home = Accueil\n",
                        "project-view-code = Voir le code\n",
                    ),
                ),
                ResourceDefinition::new(lang("en"), "home-heading = Welcome <friends>\n"),
            ],
            &lang("fr"),
        )
        .unwrap()
    }

    #[test]
    fn escape_replaces_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; 'Jerry'&lt;/a&gt;"
        );
    }

    #[test]
    fn home_uses_bound_language_and_escapes() {
        let catalog = catalog();
        let languages = [lang("fr"), lang("en")];
        let page = PageContext {
            translator: catalog.translator(lang("en")),
            languages: &languages,
        };
        let html = HtmlRenderer.home(&page);

        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("Welcome &lt;friends&gt;"));
        // falls back to French for keys English lacks
        assert!(html.contains("Accueil"));
        // raw keys for keys missing everywhere
        assert!(html.contains("home-tagline"));
        assert!(html.contains("href=\"/?lng=en\""));
        assert!(html.contains("href=\"?lng=fr\""));
    }

    #[test]
    fn projects_render_in_given_order() {
        let catalog = catalog();
        let languages = [lang("fr")];
        let page = PageContext {
            translator: catalog.translator(lang("fr")),
            languages: &languages,
        };
        let images = vec!["/images/a.png".to_string()];
        let tags = vec!["Rust".to_string()];
        let first = LocalizedProject {
            id: "first",
            title: "Premier",
            short_description: "Un",
            image_urls: &images,
            video_url: "",
            tags: &tags,
            code_link: "https://github.com",
        };
        let second = LocalizedProject {
            id: "second",
            title: "Second",
            ..first
        };

        let html = HtmlRenderer.projects(&page, &[first, second]);
        let first_at = html.find("Premier").unwrap();
        let second_at = html.find("id=\"second\"").unwrap();
        assert!(first_at < second_at);
        assert!(html.contains("<li>Rust</li>"));
        assert!(html.contains("Voir le code"));
        assert!(!html.contains("<iframe"));
    }
}
