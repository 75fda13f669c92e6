//! Loading tables from an `i18n.toml`-described assets directory.

use crate::error::LocalizationError;
use crate::keys::ResourceKeys;
use crate::table::FluentResourceTable;
use fs_err as fs;
use std::path::Path;
use ui_text_toml::I18nConfig;

impl FluentResourceTable {
    /// Builds a table from `config`, resolving `assets_dir` against `base_dir`.
    ///
    /// Ids come from [`ResourceKeys::discovered`], overridden by the config's `[resources]`
    /// table. Language directories without a `{domain}.ftl` file are skipped. The fallback
    /// language is selected before returning.
    pub fn from_config(config: &I18nConfig, base_dir: &Path) -> Result<Self, LocalizationError> {
        let fallback_language = config.fallback_language_identifier()?;

        let mut keys = ResourceKeys::discovered();
        keys.extend(config.resource_entries()?);

        let mut table = Self::new(fallback_language.clone(), keys);
        let assets_dir = config.assets_dir_from_base(Some(base_dir))?;
        let file_name = config.resource_file_name();

        for lang in config.available_languages_from_base(Some(base_dir))? {
            let path = assets_dir.join(lang.to_string()).join(&file_name);
            if !path.is_file() {
                tracing::warn!("Skipping language '{}': '{}' not found", lang, path.display());
                continue;
            }
            let source = fs::read_to_string(&path)?;
            table.add_resource(lang, source)?;
        }

        table.select_language(&fallback_language)?;
        Ok(table)
    }

    /// Reads `i18n.toml` from `manifest_dir` and builds a table from it.
    pub fn from_manifest_dir(manifest_dir: &Path) -> Result<Self, LocalizationError> {
        let config = I18nConfig::from_manifest_dir(manifest_dir)?;
        Self::from_config(&config, manifest_dir)
    }
}
