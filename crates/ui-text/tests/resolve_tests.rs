use rstest::{fixture, rstest};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash as _, Hasher as _};
use ui_text::{
    FormatArg, RawKey, RenderContext, ResolveError, ResourceId, ResourceTable, RichText, Span,
    Style, TextDescriptor, resolve_optional,
};

#[derive(Debug, thiserror::Error)]
#[error("no resource with id {0}")]
struct MissingResource(ResourceId);

/// An in-memory table where `{1}`, `{2}`, ... are replaced by the positional arguments.
///
/// Its markup "parser" records every source and styles the whole of it bold.
#[derive(Default)]
struct MemoryTable {
    strings: HashMap<ResourceId, String>,
    plurals: HashMap<(ResourceId, i64), String>,
    lookups: Cell<usize>,
    parsed: RefCell<Vec<String>>,
}

impl MemoryTable {
    fn with_string(mut self, id: i32, value: &str) -> Self {
        self.strings.insert(ResourceId(id), value.to_string());
        self
    }

    fn with_plural(mut self, id: i32, quantity: i64, value: &str) -> Self {
        self.plurals
            .insert((ResourceId(id), quantity), value.to_string());
        self
    }

    fn lookup(&self, value: Option<&String>, id: ResourceId) -> Result<String, MissingResource> {
        self.lookups.set(self.lookups.get() + 1);
        value.cloned().ok_or(MissingResource(id))
    }
}

fn substitute(pattern: String, args: &[FormatArg]) -> String {
    args.iter()
        .enumerate()
        .fold(pattern, |acc, (i, arg)| {
            acc.replace(&format!("{{{}}}", i + 1), &arg.to_string())
        })
}

impl ResourceTable for MemoryTable {
    type Error = MissingResource;

    fn get_string(&self, id: ResourceId) -> Result<String, Self::Error> {
        self.lookup(self.strings.get(&id), id)
    }

    fn get_string_with_args(
        &self,
        id: ResourceId,
        args: &[FormatArg],
    ) -> Result<String, Self::Error> {
        Ok(substitute(self.get_string(id)?, args))
    }

    fn get_quantity_string(&self, id: ResourceId, quantity: i64) -> Result<String, Self::Error> {
        self.lookup(self.plurals.get(&(id, quantity)), id)
    }

    fn get_quantity_string_with_args(
        &self,
        id: ResourceId,
        quantity: i64,
        args: &[FormatArg],
    ) -> Result<String, Self::Error> {
        Ok(substitute(self.get_quantity_string(id, quantity)?, args))
    }
}

impl RenderContext for MemoryTable {
    fn parse_html(&self, source: &str) -> RichText {
        self.parsed.borrow_mut().push(source.to_string());
        RichText::with_spans(source, [Span::new(0, source.len(), Style::Bold)])
    }
}

#[fixture]
fn table() -> MemoryTable {
    MemoryTable::default()
        .with_string(1, "Settings")
        .with_string(2, "Hello, {1}! You have {2} messages.")
        .with_string(3, "<b>Warning</b>: disk full")
        .with_plural(42, 1, "1 item")
        .with_plural(42, 3, "3 items")
        .with_plural(43, 2, "<i>{1}</i> has {2} files")
}

fn hash_of(descriptor: &TextDescriptor) -> u64 {
    let mut hasher = DefaultHasher::new();
    descriptor.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn raw_key_never_resolves() {
    let literal = TextDescriptor::from_literal("hello");
    assert_eq!(literal.raw_key(), RawKey::Text(&RichText::plain("hello")));

    let ids = [
        TextDescriptor::from_string_resource(7),
        TextDescriptor::from_string_resource_with_args(7, ["a"]),
        TextDescriptor::from_html_resource(7),
        TextDescriptor::from_plural_resource(7, 2),
        TextDescriptor::from_plural_resource_with_args(7, 2, [1]),
    ];
    for descriptor in &ids {
        assert_eq!(descriptor.raw_key(), RawKey::Id(ResourceId(7)));
    }
}

#[rstest]
fn literal_ignores_the_table(table: MemoryTable) {
    let descriptor = TextDescriptor::from_literal("hello");

    assert_eq!(descriptor.resolve(&table).unwrap(), "hello");
    assert_eq!(descriptor.render(&table).unwrap(), "hello");
    assert_eq!(table.lookups.get(), 0);
}

#[rstest]
fn literal_keeps_its_styling(table: MemoryTable) {
    let styled = RichText::with_spans("hey", [Span::new(0, 3, Style::Bold)]);
    let descriptor = TextDescriptor::from_literal(styled.clone());

    assert_eq!(descriptor.resolve(&table).unwrap(), styled);
    assert_eq!(descriptor.render(&table).unwrap(), styled);
}

#[rstest]
#[case(TextDescriptor::from_string_resource(1), "Settings")]
#[case(
    TextDescriptor::from_string_resource_with_args(2, [FormatArg::from("Ada"), FormatArg::from(5)]),
    "Hello, Ada! You have 5 messages."
)]
#[case(TextDescriptor::from_plural_resource(42, 3), "3 items")]
#[case(TextDescriptor::from_plural_resource(42, 1), "1 item")]
#[case(
    TextDescriptor::from_plural_resource_with_args(43, 2, [FormatArg::from("docs"), FormatArg::from(2)]),
    "<i>docs</i> has 2 files"
)]
fn resolve_against_table(
    table: MemoryTable,
    #[case] descriptor: TextDescriptor,
    #[case] expected: &str,
) {
    assert_eq!(descriptor.resolve(&table).unwrap(), expected);
}

#[rstest]
fn html_is_unsupported_without_render_context(table: MemoryTable) {
    let err = TextDescriptor::from_html_resource(3)
        .resolve(&table)
        .unwrap_err();

    assert!(matches!(
        err,
        ResolveError::UnsupportedVariant { variant: "HtmlRef" }
    ));
    assert_eq!(table.lookups.get(), 0);
    assert!(table.parsed.borrow().is_empty());
}

#[test]
fn html_is_unsupported_even_for_unknown_ids() {
    let err = TextDescriptor::from_html_resource(999)
        .resolve(&MemoryTable::default())
        .unwrap_err();

    assert!(err.is_unsupported());
    assert!(err.lookup().is_none());
}

#[rstest]
fn render_hands_html_to_the_context(table: MemoryTable) {
    let text = TextDescriptor::from_html_resource(3).render(&table).unwrap();

    assert_eq!(text.as_str(), "<b>Warning</b>: disk full");
    assert_eq!(text.spans(), &[Span::new(0, 25, Style::Bold)]);
    assert_eq!(*table.parsed.borrow(), ["<b>Warning</b>: disk full"]);
}

#[rstest]
fn render_plural_without_args_is_unstyled(table: MemoryTable) {
    let text = TextDescriptor::from_plural_resource(42, 3)
        .render(&table)
        .unwrap();

    assert_eq!(text, "3 items");
    assert!(text.is_plain());
    assert!(table.parsed.borrow().is_empty());
}

#[rstest]
fn render_plural_with_args_escapes_args_before_parsing(table: MemoryTable) {
    let text = TextDescriptor::from_plural_resource_with_args(
        43,
        2,
        [FormatArg::from("<b>x</b>"), FormatArg::from(2)],
    )
    .render(&table)
    .unwrap();

    let parsed = table.parsed.borrow();
    assert_eq!(parsed.len(), 1);
    let source = &parsed[0];
    assert!(source.starts_with("<i>&lt;b&gt;x&lt;"));
    assert!(source.ends_with("</i> has 2 files"));
    assert!(!source.contains("<b>"));
    assert_eq!(text.as_str(), source.as_str());
}

#[rstest]
fn render_string_with_args_is_not_parsed(table: MemoryTable) {
    let text = TextDescriptor::from_string_resource_with_args(2, ["<u>Ada</u>", "1"])
        .render(&table)
        .unwrap();

    assert_eq!(text, "Hello, <u>Ada</u>! You have 1 messages.");
    assert!(table.parsed.borrow().is_empty());
}

#[rstest]
fn lookup_errors_pass_through(table: MemoryTable) {
    let err = TextDescriptor::from_string_resource(404)
        .resolve(&table)
        .unwrap_err();

    assert!(matches!(err, ResolveError::Lookup(MissingResource(ResourceId(404)))));
    assert_eq!(err.to_string(), "no resource with id 404");

    let err = TextDescriptor::from_plural_resource(42, 9)
        .render(&table)
        .unwrap_err();
    assert!(matches!(err.lookup(), Some(MissingResource(ResourceId(42)))));
}

#[rstest]
fn optional_none_skips_the_table(table: MemoryTable) {
    assert_eq!(resolve_optional(None, &table).unwrap(), None);
    assert_eq!(table.lookups.get(), 0);
}

#[rstest]
fn optional_some_resolves(table: MemoryTable) {
    let descriptor = TextDescriptor::from_string_resource(1);
    let resolved = resolve_optional(Some(&descriptor), &table).unwrap();

    assert_eq!(resolved, Some(RichText::plain("Settings")));
}

#[test]
fn optional_some_still_reports_unsupported() {
    let descriptor = TextDescriptor::from_html_resource(1);
    let result = resolve_optional(Some(&descriptor), &MemoryTable::default());

    assert!(matches!(result, Err(ResolveError::UnsupportedVariant { .. })));
}

#[test]
fn argument_sequences_compare_element_wise() {
    let a = TextDescriptor::from_string_resource_with_args(5, [FormatArg::from("x"), 2.into()]);
    let b = TextDescriptor::from_string_resource_with_args(
        5,
        vec![FormatArg::Str("x".to_string()), FormatArg::Int(2)],
    );

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[rstest]
#[case(TextDescriptor::from_string_resource_with_args(5, [FormatArg::from("y"), 2.into()]))]
#[case(TextDescriptor::from_string_resource_with_args(5, [FormatArg::from("x"), 3.into()]))]
#[case(TextDescriptor::from_string_resource_with_args(5, [FormatArg::from("x")]))]
#[case(TextDescriptor::from_string_resource_with_args(6, [FormatArg::from("x"), 2.into()]))]
#[case(TextDescriptor::from_plural_resource_with_args(5, 1, [FormatArg::from("x"), 2.into()]))]
fn any_difference_breaks_equality(#[case] other: TextDescriptor) {
    let base = TextDescriptor::from_string_resource_with_args(5, [FormatArg::from("x"), 2.into()]);
    assert_ne!(base, other);
}

#[test]
fn plural_args_compare_quantity_too() {
    let a = TextDescriptor::from_plural_resource_with_args(5, 1, ["x"]);
    let b = TextDescriptor::from_plural_resource_with_args(5, 2, ["x"]);

    assert_ne!(a, b);
    assert_eq!(a, a.clone());
}

#[rstest]
fn display_renders_or_falls_back_to_key(table: MemoryTable) {
    let found = TextDescriptor::from_html_resource(3);
    let missing = TextDescriptor::from_string_resource(404);

    assert_eq!(
        format!("[{}]", found.display(&table)),
        "[<b>Warning</b>: disk full]"
    );
    assert_eq!(missing.display(&table).to_string(), "404");
}

#[cfg(feature = "serde")]
#[test]
fn descriptors_survive_serde() {
    let descriptor =
        TextDescriptor::from_plural_resource_with_args(42, 3, [FormatArg::from("a"), 1.5.into()]);

    let json = serde_json::to_string(&descriptor).unwrap();
    let back: TextDescriptor = serde_json::from_str(&json).unwrap();

    assert_eq!(back, descriptor);
}
