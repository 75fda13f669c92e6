use thiserror::Error;

/// Failure while turning a [`TextDescriptor`](crate::TextDescriptor) into text.
///
/// `E` is the resource system's own error type; it is carried as-is.
#[derive(Debug, Error)]
pub enum ResolveError<E> {
    /// The resolver has no way to produce this variant.
    #[error("Text variant '{variant}' cannot be resolved without a render context")]
    UnsupportedVariant { variant: &'static str },
    /// The resource system failed the lookup.
    #[error(transparent)]
    Lookup(E),
}

impl<E> ResolveError<E> {
    /// Returns the resource system error, if that is what failed.
    pub fn lookup(&self) -> Option<&E> {
        match self {
            Self::Lookup(err) => Some(err),
            Self::UnsupportedVariant { .. } => None,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedVariant { .. })
    }
}
