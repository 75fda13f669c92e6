//! The deferred text model.

use crate::format_arg::FormatArg;
use crate::rich_text::RichText;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An opaque key into an externally-owned string table.
///
/// The id is not validated; `ResourceId(0)` is representable even though no resource system hands
/// it out. Lookups with an unknown id fail at resolution time.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, derive_more::Display, derive_more::From,
)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(transparent))]
pub struct ResourceId(pub i32);

/// Describes how to obtain a piece of user-facing text, without resolving it.
///
/// Descriptors are plain immutable values: they can be built where no resource system is
/// available, compared, hashed and moved across threads, and resolved later with
/// [`TextDescriptor::render`] or [`TextDescriptor::resolve`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum TextDescriptor {
    /// Text that is already resolved.
    Literal(RichText),
    /// A plain localized string.
    StringRef { id: ResourceId },
    /// A localized string with positional substitution.
    StringRefArgs { id: ResourceId, args: Vec<FormatArg> },
    /// A localized string whose content is markup.
    HtmlRef { id: ResourceId },
    /// A quantity-sensitive localized string.
    PluralRef { id: ResourceId, quantity: i64 },
    /// A quantity-sensitive localized string with positional substitution.
    PluralRefArgs {
        id: ResourceId,
        quantity: i64,
        args: Vec<FormatArg>,
    },
}

/// The unresolved payload of a [`TextDescriptor`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RawKey<'a> {
    Text(&'a RichText),
    Id(ResourceId),
}

impl TextDescriptor {
    pub fn from_literal(value: impl Into<RichText>) -> Self {
        Self::Literal(value.into())
    }

    pub fn from_string_resource(id: impl Into<ResourceId>) -> Self {
        Self::StringRef { id: id.into() }
    }

    pub fn from_string_resource_with_args<I>(id: impl Into<ResourceId>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FormatArg>,
    {
        Self::StringRefArgs {
            id: id.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_html_resource(id: impl Into<ResourceId>) -> Self {
        Self::HtmlRef { id: id.into() }
    }

    pub fn from_plural_resource(id: impl Into<ResourceId>, quantity: i64) -> Self {
        Self::PluralRef {
            id: id.into(),
            quantity,
        }
    }

    pub fn from_plural_resource_with_args<I>(
        id: impl Into<ResourceId>,
        quantity: i64,
        args: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FormatArg>,
    {
        Self::PluralRefArgs {
            id: id.into(),
            quantity,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the literal text or the resource id, without resolving anything.
    pub fn raw_key(&self) -> RawKey<'_> {
        match self {
            Self::Literal(text) => RawKey::Text(text),
            Self::StringRef { id }
            | Self::StringRefArgs { id, .. }
            | Self::HtmlRef { id }
            | Self::PluralRef { id, .. }
            | Self::PluralRefArgs { id, .. } => RawKey::Id(*id),
        }
    }

    /// Name of the active variant, used in diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Literal(_) => "Literal",
            Self::StringRef { .. } => "StringRef",
            Self::StringRefArgs { .. } => "StringRefArgs",
            Self::HtmlRef { .. } => "HtmlRef",
            Self::PluralRef { .. } => "PluralRef",
            Self::PluralRefArgs { .. } => "PluralRefArgs",
        }
    }
}

impl From<RichText> for TextDescriptor {
    fn from(value: RichText) -> Self {
        Self::Literal(value)
    }
}

impl From<String> for TextDescriptor {
    fn from(value: String) -> Self {
        Self::Literal(value.into())
    }
}

impl From<&str> for TextDescriptor {
    fn from(value: &str) -> Self {
        Self::Literal(value.into())
    }
}

impl std::fmt::Display for RawKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pick_the_matching_variant() {
        assert!(matches!(
            TextDescriptor::from_literal("hi"),
            TextDescriptor::Literal(_)
        ));
        assert!(matches!(
            TextDescriptor::from_string_resource(1),
            TextDescriptor::StringRef { id: ResourceId(1) }
        ));
        assert!(matches!(
            TextDescriptor::from_html_resource(2),
            TextDescriptor::HtmlRef { id: ResourceId(2) }
        ));
        assert!(matches!(
            TextDescriptor::from_plural_resource(3, 7),
            TextDescriptor::PluralRef {
                id: ResourceId(3),
                quantity: 7
            }
        ));
    }

    #[test]
    fn argument_constructors_keep_order() {
        let descriptor = TextDescriptor::from_plural_resource_with_args(
            5,
            2,
            [FormatArg::from("a"), FormatArg::from(1)],
        );

        let TextDescriptor::PluralRefArgs { args, .. } = descriptor else {
            panic!("expected PluralRefArgs");
        };
        assert_eq!(args, vec![FormatArg::from("a"), FormatArg::Int(1)]);
    }

    #[test]
    fn zero_id_is_not_rejected() {
        assert_eq!(
            TextDescriptor::from_string_resource(0).raw_key(),
            RawKey::Id(ResourceId(0))
        );
    }

    #[test]
    fn raw_key_display() {
        assert_eq!(TextDescriptor::from_string_resource(12).raw_key().to_string(), "12");
        assert_eq!(TextDescriptor::from_literal("x").raw_key().to_string(), "x");
    }
}
