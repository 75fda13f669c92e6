use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A style annotation carried by a [`Span`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Style {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    /// A hyperlink pointing at `url`.
    Link { url: String },
}

/// A styled byte range of a [`RichText`].
///
/// `start..end` always lies on `char` boundaries of the owning text.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub style: Style,
}

impl Span {
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Returns the byte range covered by this span.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Text with positional style annotations.
///
/// Plain strings convert into span-free rich text, so any resolved string can be handed to the
/// renderer through the same type.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(from = "RawRichText")
)]
pub struct RichText {
    text: String,
    spans: Vec<Span>,
}

/// Unchecked wire form of [`RichText`]; deserialized spans go through [`RichText::with_spans`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawRichText {
    text: String,
    #[serde(default)]
    spans: Vec<Span>,
}

#[cfg(feature = "serde")]
impl From<RawRichText> for RichText {
    fn from(raw: RawRichText) -> Self {
        Self::with_spans(raw.text, raw.spans)
    }
}

impl RichText {
    /// Wraps `text` without any styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Builds rich text from already computed spans.
    ///
    /// Spans that fall outside `text` or split a `char` are dropped.
    pub fn with_spans(text: impl Into<String>, spans: impl IntoIterator<Item = Span>) -> Self {
        let text = text.into();
        let spans = spans
            .into_iter()
            .filter(|span| {
                span.start < span.end
                    && span.end <= text.len()
                    && text.is_char_boundary(span.start)
                    && text.is_char_boundary(span.end)
            })
            .collect();
        Self { text, spans }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns `true` when no styling is applied.
    pub fn is_plain(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Iterates over the text covered by each span, paired with its style.
    pub fn styled_segments(&self) -> impl Iterator<Item = (&str, &Style)> {
        self.spans
            .iter()
            .map(|span| (&self.text[span.range()], &span.style))
    }

    /// Drops all styling and returns the underlying string.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<String> for RichText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl PartialEq<str> for RichText {
    fn eq(&self, other: &str) -> bool {
        self.is_plain() && self.text == other
    }
}

impl PartialEq<&str> for RichText {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for RichText {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}
