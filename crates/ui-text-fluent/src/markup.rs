//! The HTML subset used by styled resource strings, tokenized with `pulldown-cmark`.
//!
//! Supported tags: `b`/`strong`, `i`/`em`/`cite`/`dfn`, `u`, `s`/`strike`/`del`, `a href`, `br`,
//! and `p`/`div` as line breaks. Unknown tags are dropped and their content kept. Character
//! references are decoded by the parser with CommonMark rules; anything it does not recognise as
//! a reference stays literal.
//!
//! Resource strings are HTML, not Markdown, so Markdown syntax is neutralised before the source
//! reaches the parser.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ui_text::{RichText, Span, Style};

/// Prefixed to the source so no line can open a Markdown block (heading, list, HTML block, ...).
const LINE_START: char = '\u{E000}';

/// Stack name for `<https://...>` autolinks, which the parser reports as links.
const AUTOLINK: &str = ":autolink";

/// Parses `source` into rich text.
///
/// Malformed input never fails: unclosed tags extend to the end and stray closing tags are
/// ignored. Line breaks in the source collapse to spaces; use `<br>` for a hard break.
pub fn parse_html(source: &str) -> RichText {
    let prepared = prepare(source);
    let mut state = MarkupState::default();
    state.process(Parser::new_ext(&prepared, Options::empty()));
    state.finish()
}

/// Escapes Markdown punctuation outside of tags and folds the source onto one line.
fn prepare(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 8);
    out.push(LINE_START);

    let mut in_tag = false;
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => out.push(' '),
            LINE_START => {},
            '<' if !in_tag => {
                in_tag = chars
                    .peek()
                    .is_some_and(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!'));
                out.push(c);
            },
            '>' if in_tag => {
                in_tag = false;
                out.push(c);
            },
            '\\' | '`' | '*' | '_' | '[' | ']' | '!' if !in_tag => {
                out.push('\\');
                out.push(c);
            },
            _ => out.push(c),
        }
    }
    out
}

struct OpenTag {
    name: String,
    start: usize,
    style: Option<Style>,
}

#[derive(Default)]
struct MarkupState {
    text: String,
    open: Vec<OpenTag>,
    spans: Vec<Span>,
}

impl MarkupState {
    fn process<'a>(&mut self, parser: impl Iterator<Item = Event<'a>>) {
        for event in parser {
            match event {
                Event::Text(text) => self.push_text(&text),
                Event::InlineHtml(html) => self.tag(&html),
                Event::SoftBreak => self.push_text(" "),
                Event::HardBreak => self.text.push('\n'),
                Event::Start(Tag::Link { dest_url, .. }) => self.open.push(OpenTag {
                    name: AUTOLINK.to_string(),
                    start: self.text.len(),
                    style: Some(Style::Link {
                        url: dest_url.to_string(),
                    }),
                }),
                Event::End(TagEnd::Link) => self.close(AUTOLINK),
                // Paragraph boundaries, and Markdown constructs `prepare` already escaped
                _ => {},
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        let text = if self.text.ends_with('\n') {
            text.trim_start_matches([' ', LINE_START])
        } else {
            text
        };
        self.text.extend(text.chars().filter(|c| *c != LINE_START));
    }

    fn tag(&mut self, raw: &str) {
        let Some(inner) = raw.strip_prefix('<').and_then(|tag| tag.strip_suffix('>')) else {
            return;
        };
        if let Some(name) = inner.strip_prefix('/') {
            self.close(&tag_name(name));
            return;
        }

        let name = tag_name(inner);
        if name == "br" {
            self.text.push('\n');
        } else if is_block(&name) {
            self.line_break();
        } else if !inner.ends_with('/')
            && let Some(style) = tag_style(&name, inner)
        {
            self.open.push(OpenTag {
                name,
                start: self.text.len(),
                style,
            });
        }
    }

    fn close(&mut self, name: &str) {
        if is_block(name) {
            self.line_break();
        } else if let Some(index) = self.open.iter().rposition(|tag| tag.name == name) {
            let tag = self.open.remove(index);
            self.push_span(tag, self.text.len());
        }
    }

    fn line_break(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
    }

    fn push_span(&mut self, tag: OpenTag, end: usize) {
        if let Some(style) = tag.style
            && tag.start < end
        {
            self.spans.push(Span::new(tag.start, end, style));
        }
    }

    fn finish(mut self) -> RichText {
        let end = self.text.len();
        for tag in std::mem::take(&mut self.open) {
            self.push_span(tag, end);
        }
        self.spans.sort_by_key(|span| span.start);
        RichText::with_spans(self.text, self.spans)
    }
}

fn tag_name(tag: &str) -> String {
    tag.trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn is_block(name: &str) -> bool {
    matches!(name, "p" | "div")
}

/// Returns `None` for tags that are not tracked at all, `Some(None)` for tracked tags that carry no
/// style (an `a` without `href`).
fn tag_style(name: &str, tag: &str) -> Option<Option<Style>> {
    let style = match name {
        "b" | "strong" => Style::Bold,
        "i" | "em" | "cite" | "dfn" => Style::Italic,
        "u" => Style::Underline,
        "s" | "strike" | "del" => Style::Strikethrough,
        "a" => {
            return Some(attribute(tag, "href").map(|url| Style::Link { url }));
        },
        _ => return None,
    };
    Some(Some(style))
}

/// Reads attribute `name` from a tag the parser already validated as well-formed.
fn attribute(tag: &str, name: &str) -> Option<String> {
    let lower = tag.to_ascii_lowercase();
    let mut search = 0;
    while let Some(found) = lower[search..].find(name) {
        let at = search + found;
        search = at + name.len();

        let preceded_by_space = lower[..at].ends_with(char::is_whitespace);
        let after = lower[search..].trim_start();
        if !preceded_by_space || !after.starts_with('=') {
            continue;
        }

        let value = tag[tag.len() - after.len() + 1..].trim_start();
        let raw = match value.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let inner = &value[1..];
                &inner[..inner.find(quote).unwrap_or(inner.len())]
            },
            _ => {
                let end = value
                    .find(|c: char| c.is_whitespace() || c == '/')
                    .unwrap_or(value.len());
                &value[..end]
            },
        };
        // attribute values carry no tags, so parsing only decodes their references
        return Some(parse_html(raw).into_string());
    }
    None
}
