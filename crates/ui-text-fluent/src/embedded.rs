//! Loading tables from files embedded with `rust-embed`.

use crate::error::LocalizationError;
use crate::keys::ResourceKeys;
use crate::table::FluentResourceTable;
use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

/// Embedded translation files laid out as `{language}/{domain}.ftl`.
pub trait EmbeddedAssets: RustEmbed + Send + Sync + 'static {
    fn domain() -> &'static str;
}

/// Lists the languages that ship a `{domain}.ftl` file, sorted by tag.
pub fn discover_languages<T: EmbeddedAssets>() -> Vec<LanguageIdentifier> {
    let file_name = format!("{}.ftl", T::domain());
    let suffix = format!("/{}", file_name);
    let mut languages = Vec::new();

    for file_path in T::iter() {
        if let Some(lang_part) = file_path.strip_suffix(&suffix)
            && let Ok(lang_id) = lang_part.parse::<LanguageIdentifier>()
        {
            languages.push(lang_id);
        }
    }

    languages.sort_by_key(|a| a.to_string());
    languages
}

impl FluentResourceTable {
    /// Builds a table from embedded assets and selects `fallback_language`.
    pub fn from_embedded<T: EmbeddedAssets>(
        fallback_language: LanguageIdentifier,
        keys: ResourceKeys,
    ) -> Result<Self, LocalizationError> {
        let mut table = Self::new(fallback_language.clone(), keys);

        for lang in discover_languages::<T>() {
            let file_path = format!("{}/{}.ftl", lang, T::domain());
            let Some(file) = T::get(&file_path) else {
                continue;
            };
            let source = String::from_utf8(file.data.into_owned()).map_err(|source| {
                LocalizationError::InvalidUtf8 {
                    path: file_path.clone(),
                    source,
                }
            })?;
            table.add_resource(lang, source)?;
        }

        table.select_language(&fallback_language)?;
        Ok(table)
    }
}
