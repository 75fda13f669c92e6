#![doc = include_str!("../README.md")]

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{env, io};
use thiserror::Error;
use ui_text::ResourceId;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

/// The file name looked up in manifest directories.
pub const CONFIG_FILE_NAME: &str = "i18n.toml";

#[derive(Debug, Error)]
pub enum I18nConfigError {
    /// Configuration file not found.
    #[error("i18n.toml configuration file not found")]
    NotFound,
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Encountered an invalid language identifier while reading assets directory.
    #[error("Invalid language identifier '{name}' found in assets directory")]
    InvalidLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// Encountered a language identifier that uses an unsupported subtag combination.
    #[error("Language identifier '{name}' is not supported: {reason}")]
    UnsupportedLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// Explanation of why it is not supported.
        reason: String,
    },
    /// Encountered an invalid fallback language identifier.
    #[error("Invalid fallback language identifier '{name}'")]
    InvalidFallbackLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// A key of the `[resources]` table is not a usable resource id.
    #[error("Invalid resource id '{key}': {reason}")]
    InvalidResourceId {
        /// The offending key.
        key: String,
        /// Why it was rejected.
        reason: String,
    },
}

fn default_domain() -> String {
    "app".to_string()
}

/// The configuration for a ui-text resource table.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct I18nConfig {
    /// The fallback language identifier (e.g., "en-US").
    pub fallback_language: String,
    /// Path to the assets directory containing translation files.
    /// Expected structure: {assets_dir}/{language}/{domain}.ftl
    pub assets_dir: PathBuf,
    /// File stem of the FTL file loaded for each language.
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Resource ids and the message keys they refer to.
    ///
    /// ```toml
    /// [resources]
    /// 42 = "items-count"
    /// ```
    #[serde(default)]
    pub resources: BTreeMap<String, String>,
}

impl I18nConfig {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, I18nConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(I18nConfigError::NotFound);
        }

        let content = fs::read_to_string(path)?;

        let config: I18nConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// Reads the configuration from the manifest directory.
    pub fn read_from_manifest_dir() -> Result<Self, I18nConfigError> {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| I18nConfigError::NotFound)?;
        Self::from_manifest_dir(Path::new(&manifest_dir))
    }

    /// Reads `i18n.toml` from the given manifest directory.
    pub fn from_manifest_dir(manifest_dir: &Path) -> Result<Self, I18nConfigError> {
        Self::read_from_path(manifest_dir.join(CONFIG_FILE_NAME))
    }

    /// Returns the path to the assets directory from a base directory.
    /// If `base_dir` is `None`, uses `CARGO_MANIFEST_DIR` environment variable.
    pub fn assets_dir_from_base(
        &self,
        base_dir: Option<&Path>,
    ) -> Result<PathBuf, I18nConfigError> {
        let base = match base_dir {
            Some(dir) => dir.to_path_buf(),
            None => {
                let manifest_dir =
                    env::var("CARGO_MANIFEST_DIR").map_err(|_| I18nConfigError::NotFound)?;
                PathBuf::from(manifest_dir)
            },
        };

        Ok(base.join(&self.assets_dir))
    }

    /// Returns the FTL file name loaded for each language.
    pub fn resource_file_name(&self) -> String {
        format!("{}.ftl", self.domain)
    }

    /// Returns the configured fallback language as a `LanguageIdentifier`.
    pub fn fallback_language_identifier(&self) -> Result<LanguageIdentifier, I18nConfigError> {
        let lang = self
            .fallback_language
            .parse::<LanguageIdentifier>()
            .map_err(
                |source| I18nConfigError::InvalidFallbackLanguageIdentifier {
                    name: self.fallback_language.clone(),
                    source,
                },
            )?;

        ensure_supported_language_identifier(&lang, &self.fallback_language)?;

        Ok(lang)
    }

    /// Returns the languages available under the assets directory from a base directory.
    /// If `base_dir` is `None`, uses `CARGO_MANIFEST_DIR` environment variable.
    pub fn available_languages_from_base(
        &self,
        base_dir: Option<&Path>,
    ) -> Result<Vec<LanguageIdentifier>, I18nConfigError> {
        let assets_path = self.assets_dir_from_base(base_dir)?;
        let entries = fs::read_dir(&assets_path)?;

        let mut languages: Vec<(String, LanguageIdentifier)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| parse_language_entry(entry).transpose())
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|lang| (lang.to_string(), lang))
            .collect();

        languages.sort_by(|a, b| a.0.cmp(&b.0));
        languages.dedup_by(|a, b| a.0 == b.0);

        Ok(languages.into_iter().map(|(_, lang)| lang).collect())
    }

    /// Parses the `[resources]` table into `(id, message key)` pairs, ordered by id.
    ///
    /// Keys must be non-zero 32-bit integers; `0` never names a resource.
    pub fn resource_entries(&self) -> Result<Vec<(ResourceId, String)>, I18nConfigError> {
        let mut entries = self
            .resources
            .iter()
            .map(|(key, message)| {
                let id = key.trim().parse::<i32>().map_err(|err| {
                    I18nConfigError::InvalidResourceId {
                        key: key.clone(),
                        reason: err.to_string(),
                    }
                })?;
                if id == 0 {
                    return Err(I18nConfigError::InvalidResourceId {
                        key: key.clone(),
                        reason: "0 is reserved as the invalid id".to_string(),
                    });
                }
                Ok((ResourceId(id), message.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        entries.sort_by_key(|(id, _)| *id);
        Ok(entries)
    }
}

/// Parse a directory entry as a language identifier.
///
/// Returns `Ok(None)` if the entry is not a directory.
fn parse_language_entry(
    entry: fs::DirEntry,
) -> Result<Option<LanguageIdentifier>, I18nConfigError> {
    if !entry.file_type()?.is_dir() {
        return Ok(None);
    }

    let raw_name = entry.file_name();
    let name = raw_name.into_string().map_err(|raw| {
        I18nConfigError::ReadError(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Assets directory contains a non UTF-8 entry: {:?}", raw),
        ))
    })?;

    let lang = name.parse::<LanguageIdentifier>().map_err(|source| {
        I18nConfigError::InvalidLanguageIdentifier {
            name: name.clone(),
            source,
        }
    })?;

    ensure_supported_language_identifier(&lang, &name)?;
    Ok(Some(lang))
}

fn ensure_supported_language_identifier(
    lang: &LanguageIdentifier,
    original: &str,
) -> Result<(), I18nConfigError> {
    if lang.variants().next().is_some() {
        return Err(I18nConfigError::UnsupportedLanguageIdentifier {
            name: original.to_string(),
            reason: "variants are not supported".to_string(),
        });
    }

    Ok(())
}
