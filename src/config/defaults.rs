// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Languages**: Fallback and preloaded languages
//! - **Server**: Listen address

// ==========================================================================
// Language Defaults
// ==========================================================================

/// Language used when a request gives no usable hint, and for missing
/// translations.
pub const DEFAULT_FALLBACK_LANGUAGE: &str = "fr";

/// Languages loaded at startup, in switcher order.
pub const DEFAULT_LANGUAGES: &[&str] = &["fr", "en"];

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Default listen host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable overriding the listen port.
pub const ENV_PORT: &str = "PORT";
