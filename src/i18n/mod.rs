// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the site.
//!
//! This module provides localization using the Fluent localization system.
//! It handles request language resolution, translation resource loading,
//! and string lookup with fallback.
//!
//! # Features
//!
//! - Language resolution from query parameter, cookie or `Accept-Language`
//! - Embedded or on-disk `.ftl` translation files
//! - Fallback to the default language, then to the raw key, when
//!   translations are missing

pub mod catalog;
pub mod language;
pub mod resources;

pub use catalog::{Catalog, Translator};
pub use language::{negotiate, resolve, LanguageSelector};
pub use resources::{DirectoryResources, EmbeddedResources, ResourceDefinition, ResourceLoader};
