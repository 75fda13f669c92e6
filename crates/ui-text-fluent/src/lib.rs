#![doc = include_str!("../README.md")]

mod config;
mod embedded;
mod error;
pub mod fallback;
mod keys;
pub mod markup;
mod table;

pub use embedded::{EmbeddedAssets, discover_languages};
pub use error::{LocalizationError, LookupError};
pub use keys::{ResourceDecl, ResourceKeys};
pub use table::{FluentResourceTable, LocaleSnapshot};

#[doc(hidden)]
pub use inventory as __inventory;

#[doc(hidden)]
pub use ui_text as __ui_text;
