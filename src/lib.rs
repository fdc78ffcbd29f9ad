// SPDX-License-Identifier: MPL-2.0
//! `vitrine` is a small localized portfolio website.
//!
//! It serves a home page and a projects listing in French (default) or
//! English, translating static strings with Fluent and collapsing per-language
//! project fields into the visitor's language.

pub mod config;
pub mod content;
pub mod error;
pub mod i18n;
pub mod paths;
pub mod web;
