#![doc = include_str!("../README.md")]

mod descriptor;
mod error;
mod format_arg;
mod resolve;
mod rich_text;

pub use descriptor::{RawKey, ResourceId, TextDescriptor};
pub use error::ResolveError;
pub use format_arg::FormatArg;
pub use resolve::{DisplayText, RenderContext, ResourceTable, resolve_optional};
pub use rich_text::{RichText, Span, Style};
