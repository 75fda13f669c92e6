use crate::error::{LocalizationError, LookupError};
use crate::fallback::resolve_chain;
use crate::keys::ResourceKeys;
use crate::markup;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use ui_text::{FormatArg, RenderContext, ResourceId, ResourceTable, RichText};
use unic_langid::LanguageIdentifier;

type Bundle = FluentBundle<Arc<FluentResource>>;

/// Variable name under which the plural quantity is passed to messages.
pub const QUANTITY_VARIABLE: &str = "quantity";

/// Fluent-backed string resources for a set of languages.
///
/// Lookups go through the currently selected language chain. Selecting a language swaps in a new
/// [`LocaleSnapshot`]; snapshots taken earlier keep resolving against the chain they captured.
pub struct FluentResourceTable {
    keys: Arc<ResourceKeys>,
    fallback_language: LanguageIdentifier,
    resources: FxHashMap<LanguageIdentifier, Vec<Arc<FluentResource>>>,
    active: RwLock<LocaleSnapshot>,
}

impl FluentResourceTable {
    /// Creates an empty table. Add resources, then call [`Self::select_language`].
    pub fn new(fallback_language: LanguageIdentifier, keys: ResourceKeys) -> Self {
        let keys = Arc::new(keys);
        Self {
            active: RwLock::new(LocaleSnapshot::empty(keys.clone())),
            keys,
            fallback_language,
            resources: FxHashMap::default(),
        }
    }

    /// Parses `source` as FTL and adds it to `language`.
    ///
    /// When a language is already selected the selection is rebuilt, so the new messages are
    /// visible to subsequent snapshots.
    pub fn add_resource(
        &mut self,
        language: LanguageIdentifier,
        source: impl Into<String>,
    ) -> Result<(), LocalizationError> {
        let resource = FluentResource::try_new(source.into()).map_err(|(_, errors)| {
            LocalizationError::InvalidResource {
                language: language.clone(),
                details: join_errors(&errors),
            }
        })?;

        self.resources
            .entry(language)
            .or_default()
            .push(Arc::new(resource));

        if let Some(selected) = self.selected_language() {
            self.select_language(&selected)?;
        }
        Ok(())
    }

    /// Selects the language used by subsequent lookups.
    ///
    /// # Errors
    ///
    /// Returns [`LocalizationError::LanguageNotSupported`] when neither `lang`, its primary
    /// language, nor a locale matching it has resources. The previous selection stays active.
    pub fn select_language(&self, lang: &LanguageIdentifier) -> Result<(), LocalizationError> {
        let available = self.available_languages();
        let chain = resolve_chain(lang, &self.fallback_language, &available);
        if chain.is_empty() {
            return Err(LocalizationError::LanguageNotSupported(lang.clone()));
        }

        tracing::debug!(
            "Selecting language '{}' with fallback chain {:?}",
            lang,
            chain.iter().map(ToString::to_string).collect::<Vec<_>>()
        );

        let bundles = chain
            .into_iter()
            .map(|language| {
                let bundle = self.build_bundle(&language);
                (language, bundle)
            })
            .collect();

        *self.active.write() = LocaleSnapshot {
            inner: Arc::new(SnapshotInner {
                selected: Some(lang.clone()),
                keys: self.keys.clone(),
                bundles,
            }),
        };
        Ok(())
    }

    /// Returns the language passed to the last successful [`Self::select_language`].
    pub fn selected_language(&self) -> Option<LanguageIdentifier> {
        self.active.read().selected_language().cloned()
    }

    /// Returns every language that has at least one resource, sorted by tag.
    pub fn available_languages(&self) -> Vec<LanguageIdentifier> {
        let mut languages: Vec<_> = self.resources.keys().cloned().collect();
        languages.sort_by_key(|lang| lang.to_string());
        languages
    }

    pub fn fallback_language(&self) -> &LanguageIdentifier {
        &self.fallback_language
    }

    pub fn keys(&self) -> &ResourceKeys {
        &self.keys
    }

    /// Captures the active language chain.
    pub fn snapshot(&self) -> LocaleSnapshot {
        self.active.read().clone()
    }

    fn build_bundle(&self, language: &LanguageIdentifier) -> Bundle {
        let mut bundle = Bundle::new_concurrent(vec![language.clone()]);
        bundle.set_use_isolating(false);

        for resource in self.resources.get(language).into_iter().flatten() {
            if let Err(errors) = bundle.add_resource(resource.clone()) {
                tracing::warn!(
                    "Overlapping messages in resources for '{}': {}",
                    language,
                    join_errors(&errors)
                );
            }
        }
        bundle
    }
}

impl fmt::Debug for FluentResourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluentResourceTable")
            .field("fallback_language", &self.fallback_language)
            .field("available_languages", &self.available_languages())
            .field("keys", &self.keys.len())
            .field("active", &*self.active.read())
            .finish()
    }
}

struct SnapshotInner {
    selected: Option<LanguageIdentifier>,
    keys: Arc<ResourceKeys>,
    bundles: Vec<(LanguageIdentifier, Bundle)>,
}

/// An immutable view of a table's language chain at one point in time.
///
/// Cheap to clone. Resolving the same descriptor against the same snapshot always yields the
/// same text.
#[derive(Clone)]
pub struct LocaleSnapshot {
    inner: Arc<SnapshotInner>,
}

impl LocaleSnapshot {
    fn empty(keys: Arc<ResourceKeys>) -> Self {
        Self {
            inner: Arc::new(SnapshotInner {
                selected: None,
                keys,
                bundles: Vec::new(),
            }),
        }
    }

    pub fn selected_language(&self) -> Option<&LanguageIdentifier> {
        self.inner.selected.as_ref()
    }

    /// Languages consulted for each lookup, most specific first.
    pub fn languages(&self) -> Vec<LanguageIdentifier> {
        self.inner
            .bundles
            .iter()
            .map(|(language, _)| language.clone())
            .collect()
    }

    fn format(&self, id: ResourceId, args: Option<&FluentArgs<'_>>) -> Result<String, LookupError> {
        let key = self
            .inner
            .keys
            .get(id)
            .ok_or(LookupError::UnknownResource(id))?;

        if self.inner.bundles.is_empty() {
            return Err(LookupError::NoLanguageSelected);
        }

        // a message with attributes only defers to the next language, like a missing one
        let mut value_missing = false;
        for (_, bundle) in &self.inner.bundles {
            let Some(message) = bundle.get_message(key) else {
                continue;
            };
            let Some(pattern) = message.value() else {
                value_missing = true;
                continue;
            };

            let mut errors = Vec::new();
            let value = bundle.format_pattern(pattern, args, &mut errors);
            if !errors.is_empty() {
                tracing::error!("Fluent formatting errors for id '{}': {:?}", key, errors);
                return Err(LookupError::Format {
                    key: key.to_string(),
                    details: join_errors(&errors),
                });
            }
            return Ok(value.into_owned());
        }

        if value_missing {
            return Err(LookupError::MissingValue {
                key: key.to_string(),
            });
        }
        Err(LookupError::MissingMessage {
            id,
            key: key.to_string(),
        })
    }
}

impl fmt::Debug for LocaleSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleSnapshot")
            .field("selected", &self.inner.selected)
            .field("languages", &self.languages())
            .finish()
    }
}

fn join_errors<E: fmt::Debug>(errors: &[E]) -> String {
    errors
        .iter()
        .map(|err| format!("{:?}", err))
        .collect::<Vec<_>>()
        .join("; ")
}

fn fluent_value(arg: &FormatArg) -> FluentValue<'_> {
    match arg {
        FormatArg::Str(value) => FluentValue::from(value.as_str()),
        FormatArg::Int(value) => FluentValue::from(*value),
        FormatArg::Float(value) => FluentValue::from(*value),
    }
}

/// Exposes positional arguments as `$arg1`, `$arg2`, ... and the quantity as `$quantity`.
fn fluent_args(quantity: Option<i64>, args: &[FormatArg]) -> FluentArgs<'_> {
    let mut fluent_args = FluentArgs::with_capacity(args.len() + 1);
    for (index, arg) in args.iter().enumerate() {
        fluent_args.set(format!("arg{}", index + 1), fluent_value(arg));
    }
    if let Some(quantity) = quantity {
        fluent_args.set(QUANTITY_VARIABLE, quantity);
    }
    fluent_args
}

impl ResourceTable for LocaleSnapshot {
    type Error = LookupError;

    fn get_string(&self, id: ResourceId) -> Result<String, Self::Error> {
        self.format(id, None)
    }

    fn get_string_with_args(
        &self,
        id: ResourceId,
        args: &[FormatArg],
    ) -> Result<String, Self::Error> {
        self.format(id, Some(&fluent_args(None, args)))
    }

    fn get_quantity_string(&self, id: ResourceId, quantity: i64) -> Result<String, Self::Error> {
        self.format(id, Some(&fluent_args(Some(quantity), &[])))
    }

    fn get_quantity_string_with_args(
        &self,
        id: ResourceId,
        quantity: i64,
        args: &[FormatArg],
    ) -> Result<String, Self::Error> {
        self.format(id, Some(&fluent_args(Some(quantity), args)))
    }
}

impl RenderContext for LocaleSnapshot {
    fn parse_html(&self, source: &str) -> RichText {
        markup::parse_html(source)
    }
}

impl ResourceTable for FluentResourceTable {
    type Error = LookupError;

    fn get_string(&self, id: ResourceId) -> Result<String, Self::Error> {
        self.snapshot().get_string(id)
    }

    fn get_string_with_args(
        &self,
        id: ResourceId,
        args: &[FormatArg],
    ) -> Result<String, Self::Error> {
        self.snapshot().get_string_with_args(id, args)
    }

    fn get_quantity_string(&self, id: ResourceId, quantity: i64) -> Result<String, Self::Error> {
        self.snapshot().get_quantity_string(id, quantity)
    }

    fn get_quantity_string_with_args(
        &self,
        id: ResourceId,
        quantity: i64,
        args: &[FormatArg],
    ) -> Result<String, Self::Error> {
        self.snapshot()
            .get_quantity_string_with_args(id, quantity, args)
    }
}

impl RenderContext for FluentResourceTable {
    fn parse_html(&self, source: &str) -> RichText {
        markup::parse_html(source)
    }
}
