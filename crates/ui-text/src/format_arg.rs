use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A positional argument substituted into a localized string.
///
/// Equality and hashing are structural. Floats compare by bit pattern, which keeps `Eq` and `Hash`
/// lawful (`NaN == NaN`, `0.0 != -0.0`).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum FormatArg {
    Str(String),
    Int(i64),
    Float(f64),
}

impl FormatArg {
    /// Returns a copy safe to splice into markup: string arguments are escaped, numbers are kept.
    pub fn escaped_for_markup(&self) -> Self {
        match self {
            Self::Str(value) => Self::Str(v_htmlescape::escape(value).to_string()),
            other => other.clone(),
        }
    }
}

impl PartialEq for FormatArg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for FormatArg {}

impl Hash for FormatArg {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Str(value) => value.hash(state),
            Self::Int(value) => value.hash(state),
            Self::Float(value) => value.to_bits().hash(state),
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
        }
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<char> for FormatArg {
    fn from(value: char) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<bool> for FormatArg {
    fn from(value: bool) -> Self {
        Self::Str(value.to_string())
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FormatArg {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Wider than `i64` on some targets: out-of-range values saturate.
macro_rules! impl_from_unsigned_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FormatArg {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

impl_from_unsigned_wide_int!(u64, usize);

impl From<isize> for FormatArg {
    fn from(value: isize) -> Self {
        let saturated = if value < 0 { i64::MIN } else { i64::MAX };
        Self::Int(i64::try_from(value).unwrap_or(saturated))
    }
}

impl From<f32> for FormatArg {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
