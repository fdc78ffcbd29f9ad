// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Configuration(ConfigurationError),
    DataIntegrity(DataIntegrityError),
    Server(String),
}

/// Startup failures that prevent the catalog from being built.
/// The server must not start serving requests after one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No resource definition was supplied for the fallback language.
    MissingFallback(String),

    /// A resource definition could not be read as a flat key/string mapping.
    MalformedResource { language: String, details: String },

    /// A language tag in the configuration could not be parsed.
    InvalidLanguageTag(String),

    /// The fallback language is not part of the supported language list.
    FallbackNotSupported(String),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::MissingFallback(lang) => {
                write!(f, "missing resource definition for fallback language '{}'", lang)
            }
            ConfigurationError::MalformedResource { language, details } => {
                write!(f, "malformed resource definition for '{}': {}", language, details)
            }
            ConfigurationError::InvalidLanguageTag(tag) => {
                write!(f, "invalid language tag '{}'", tag)
            }
            ConfigurationError::FallbackNotSupported(lang) => {
                write!(f, "fallback language '{}' is not in the supported list", lang)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Static project data authoring bugs, detected when the project list is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataIntegrityError {
    /// A localized field has neither the requested nor the fallback entry.
    MissingLocalization {
        record_id: String,
        field: &'static str,
        language: String,
    },

    /// Two records share the same id.
    DuplicateId(String),

    /// The project document could not be parsed.
    Malformed(String),
}

impl fmt::Display for DataIntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIntegrityError::MissingLocalization {
                record_id,
                field,
                language,
            } => write!(
                f,
                "project '{}' has no '{}' entry for '{}' nor for the fallback language",
                record_id, field, language
            ),
            DataIntegrityError::DuplicateId(id) => write!(f, "duplicate project id '{}'", id),
            DataIntegrityError::Malformed(details) => {
                write!(f, "malformed project data: {}", details)
            }
        }
    }
}

impl std::error::Error for DataIntegrityError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Configuration(e) => write!(f, "Configuration Error: {}", e),
            Error::DataIntegrity(e) => write!(f, "Data Integrity Error: {}", e),
            Error::Server(e) => write!(f, "Server Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigurationError> for Error {
    fn from(err: ConfigurationError) -> Self {
        Error::Configuration(err)
    }
}

impl From<DataIntegrityError> for Error {
    fn from(err: DataIntegrityError) -> Self {
        Error::DataIntegrity(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
