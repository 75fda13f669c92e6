//! Resolution of [`TextDescriptor`]s against a resource system.

use crate::descriptor::{ResourceId, TextDescriptor};
use crate::error::ResolveError;
use crate::format_arg::FormatArg;
use crate::rich_text::RichText;
use std::fmt;

/// Read access to a localized string table.
///
/// Implementations own locale selection and plural rules; callers only pass ids, quantities and
/// positional arguments. Lookups are synchronous and must not block on I/O.
pub trait ResourceTable {
    /// The error reported for a failed lookup (unknown id, malformed pattern, ...).
    type Error: std::error::Error + Send + Sync + 'static;

    fn get_string(&self, id: ResourceId) -> Result<String, Self::Error>;

    fn get_string_with_args(
        &self,
        id: ResourceId,
        args: &[FormatArg],
    ) -> Result<String, Self::Error>;

    fn get_quantity_string(&self, id: ResourceId, quantity: i64) -> Result<String, Self::Error>;

    fn get_quantity_string_with_args(
        &self,
        id: ResourceId,
        quantity: i64,
        args: &[FormatArg],
    ) -> Result<String, Self::Error>;
}

/// A [`ResourceTable`] available while rendering, which can also interpret markup.
pub trait RenderContext: ResourceTable {
    /// Parses a markup string into rich text.
    ///
    /// String arguments are passed through [`FormatArg::escaped_for_markup`] before they reach
    /// the source, so an implementation must decode standard HTML character references.
    fn parse_html(&self, source: &str) -> RichText;
}

impl<T: ResourceTable + ?Sized> ResourceTable for &T {
    type Error = T::Error;

    fn get_string(&self, id: ResourceId) -> Result<String, Self::Error> {
        (**self).get_string(id)
    }

    fn get_string_with_args(
        &self,
        id: ResourceId,
        args: &[FormatArg],
    ) -> Result<String, Self::Error> {
        (**self).get_string_with_args(id, args)
    }

    fn get_quantity_string(&self, id: ResourceId, quantity: i64) -> Result<String, Self::Error> {
        (**self).get_quantity_string(id, quantity)
    }

    fn get_quantity_string_with_args(
        &self,
        id: ResourceId,
        quantity: i64,
        args: &[FormatArg],
    ) -> Result<String, Self::Error> {
        (**self).get_quantity_string_with_args(id, quantity, args)
    }
}

impl<C: RenderContext + ?Sized> RenderContext for &C {
    fn parse_html(&self, source: &str) -> RichText {
        (**self).parse_html(source)
    }
}

impl TextDescriptor {
    /// Resolves the descriptor inside a render context.
    ///
    /// Markup is honoured for `HtmlRef` and `PluralRefArgs`; string arguments of the latter are
    /// escaped first so they are always shown literally. `PluralRef` output carries no styling.
    pub fn render<C>(&self, ctx: &C) -> Result<RichText, ResolveError<C::Error>>
    where
        C: RenderContext + ?Sized,
    {
        let text = match self {
            Self::Literal(text) => text.clone(),
            Self::StringRef { id } => ctx.get_string(*id).map_err(ResolveError::Lookup)?.into(),
            Self::StringRefArgs { id, args } => ctx
                .get_string_with_args(*id, args)
                .map_err(ResolveError::Lookup)?
                .into(),
            Self::HtmlRef { id } => {
                let source = ctx.get_string(*id).map_err(ResolveError::Lookup)?;
                ctx.parse_html(&source)
            },
            Self::PluralRef { id, quantity } => ctx
                .get_quantity_string(*id, *quantity)
                .map_err(ResolveError::Lookup)?
                .into(),
            Self::PluralRefArgs { id, quantity, args } => {
                let escaped: Vec<FormatArg> =
                    args.iter().map(FormatArg::escaped_for_markup).collect();
                let source = ctx
                    .get_quantity_string_with_args(*id, *quantity, &escaped)
                    .map_err(ResolveError::Lookup)?;
                ctx.parse_html(&source)
            },
        };
        Ok(text)
    }

    /// Resolves the descriptor against a bare resource table.
    ///
    /// # Errors
    ///
    /// `HtmlRef` always fails with [`ResolveError::UnsupportedVariant`], since markup parsing is
    /// only available through a [`RenderContext`]. Lookup failures are returned unchanged.
    pub fn resolve<T>(&self, table: &T) -> Result<RichText, ResolveError<T::Error>>
    where
        T: ResourceTable + ?Sized,
    {
        let text = match self {
            Self::Literal(text) => return Ok(text.clone()),
            Self::StringRef { id } => table.get_string(*id),
            Self::StringRefArgs { id, args } => table.get_string_with_args(*id, args),
            Self::PluralRef { id, quantity } => table.get_quantity_string(*id, *quantity),
            Self::PluralRefArgs { id, quantity, args } => {
                table.get_quantity_string_with_args(*id, *quantity, args)
            },
            Self::HtmlRef { .. } => {
                return Err(ResolveError::UnsupportedVariant {
                    variant: self.variant_name(),
                });
            },
        };
        text.map(RichText::from).map_err(ResolveError::Lookup)
    }

    /// Returns a [`fmt::Display`] adapter that renders the descriptor when formatted.
    pub fn display<'a, C>(&'a self, ctx: &'a C) -> DisplayText<'a, C>
    where
        C: RenderContext + ?Sized,
    {
        DisplayText {
            descriptor: self,
            ctx,
        }
    }
}

/// Resolves an optional descriptor; `None` yields `Ok(None)` without touching `table`.
pub fn resolve_optional<T>(
    descriptor: Option<&TextDescriptor>,
    table: &T,
) -> Result<Option<RichText>, ResolveError<T::Error>>
where
    T: ResourceTable + ?Sized,
{
    descriptor.map(|descriptor| descriptor.resolve(table)).transpose()
}

/// Formats a descriptor by rendering it; see [`TextDescriptor::display`].
///
/// When rendering fails a warning is logged and the raw key is written instead, so a missing
/// translation shows up as its id rather than aborting the surrounding format.
pub struct DisplayText<'a, C: ?Sized> {
    descriptor: &'a TextDescriptor,
    ctx: &'a C,
}

impl<C: RenderContext + ?Sized> fmt::Display for DisplayText<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.descriptor.render(self.ctx) {
            Ok(text) => f.write_str(text.as_str()),
            Err(err) => {
                let key = self.descriptor.raw_key();
                tracing::warn!("Failed to render text '{}': {}", key, err);
                write!(f, "{}", key)
            },
        }
    }
}
