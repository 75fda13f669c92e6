//! Locale fallback chains.

use fluent_fallback::env::LocalesProvider;
use unic_langid::LanguageIdentifier;

/// Returns a Fluent-style fallback locale list for the requested language.
///
/// This yields the requested locale first, then falls back to the primary
/// language subtag when region/script/variant subtags are present.
pub fn fallback_locales(requested: &LanguageIdentifier) -> impl LocalesProvider {
    let mut locales = vec![requested.clone()];

    let needs_primary_fallback = requested.script.is_some()
        || requested.region.is_some()
        || requested.variants().next().is_some();

    if needs_primary_fallback
        && let Ok(primary) = requested.language.as_str().parse::<LanguageIdentifier>()
        && !locales.iter().any(|lang| lang == &primary)
    {
        locales.push(primary);
    }

    locales
}

/// Builds the ordered list of available languages consulted for `requested`.
///
/// The chain holds the requested locale and its primary language when available, otherwise the
/// first available locale that `requested` matches as a range (`en` picks `en-US`). The default
/// language closes the chain. An empty result means nothing derived from `requested` is
/// available, even if the default is.
pub fn resolve_chain(
    requested: &LanguageIdentifier,
    default: &LanguageIdentifier,
    available: &[LanguageIdentifier],
) -> Vec<LanguageIdentifier> {
    let mut chain: Vec<LanguageIdentifier> = fallback_locales(requested)
        .locales()
        .filter(|candidate| available.contains(candidate))
        .collect();

    if chain.is_empty()
        && let Some(lang) = available
            .iter()
            .find(|lang| lang.matches(requested, false, true))
    {
        chain.push(lang.clone());
    }

    if chain.is_empty() {
        return chain;
    }

    if available.contains(default) && !chain.contains(default) {
        chain.push(default.clone());
    }

    chain
}
