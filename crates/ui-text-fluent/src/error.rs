use thiserror::Error;
use ui_text::ResourceId;
use ui_text_toml::I18nConfigError;
use unic_langid::LanguageIdentifier;

/// Failure while loading resources or selecting a language.
#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("Language '{0}' is not supported by this table")]
    LanguageNotSupported(LanguageIdentifier),
    #[error("Failed to parse fluent resource for '{language}': {details}")]
    InvalidResource {
        language: LanguageIdentifier,
        details: String,
    },
    #[error("Invalid UTF-8 in embedded file '{path}'")]
    InvalidUtf8 {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error(transparent)]
    Config(#[from] I18nConfigError),
    #[error("Failed to read resource file: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single string lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("No message key is registered for resource id {0}")]
    UnknownResource(ResourceId),
    #[error("No language has been selected")]
    NoLanguageSelected,
    #[error("Message '{key}' (resource id {id}) is missing from every selected language")]
    MissingMessage { id: ResourceId, key: String },
    #[error("Message '{key}' has no value")]
    MissingValue { key: String },
    #[error("Failed to format message '{key}': {details}")]
    Format { key: String, details: String },
}
