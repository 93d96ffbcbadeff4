use pretty_assertions::assert_eq;
use scoped_select::block::resolve_block_scope;
use scoped_select::delimiter::resolve_delimiter_scope;
use scoped_select::marked_scope::write_marked_scope;
use scoped_select::memory::MemoryBuffer;
use scoped_select::{
    BufferId, DelimiterPair, QuickSelectConfig, Region, ScopeError, ScopeKind, ScopeResolver,
};
use scoped_select_lang::LanguageConfig;

fn plain(text: &str) -> MemoryBuffer {
    MemoryBuffer::new(BufferId::new(1), text, LanguageConfig::plain_text())
}

fn rust(text: &str) -> MemoryBuffer {
    MemoryBuffer::new(BufferId::new(1), text, LanguageConfig::rust())
}

const NESTED_BLOCKS: &str = "foo { bar { foo } baz } foo";

#[test]
fn test_block_scope_inner_and_outer() {
    let buffer = plain(NESTED_BLOCKS);

    // Caret between the two opening braces: the outer block.
    assert_eq!(
        resolve_block_scope(&buffer, Region::caret(9), 0),
        Region::new(4, 22)
    );
    // Caret inside the inner block.
    assert_eq!(
        resolve_block_scope(&buffer, Region::caret(13), 0),
        Region::new(10, 16)
    );
    assert_eq!(
        resolve_block_scope(&buffer, Region::caret(13), 1),
        Region::new(4, 22)
    );
}

#[test]
fn test_block_scope_past_outermost_is_whole_buffer() {
    let buffer = plain(NESTED_BLOCKS);
    assert_eq!(
        resolve_block_scope(&buffer, Region::caret(13), 2),
        Region::new(0, 27)
    );
    assert_eq!(
        resolve_block_scope(&buffer, Region::caret(13), 9),
        Region::new(0, 27)
    );
}

#[test]
fn test_block_scope_caret_on_open_brace_selects_that_block() {
    let buffer = plain(NESTED_BLOCKS);
    assert_eq!(
        resolve_block_scope(&buffer, Region::caret(10), 0),
        Region::new(4, 22)
    );
}

#[test]
fn test_block_scope_ignores_braces_in_comments() {
    let buffer = rust("{ a // }\n b }");
    assert_eq!(
        resolve_block_scope(&buffer, Region::caret(2), 0),
        Region::new(0, 12)
    );
}

#[test]
fn test_delimiter_scope_innermost_and_repeat() {
    let buffer = plain("f(a, g(b, c), d)");

    let inner = resolve_delimiter_scope(&buffer, Region::caret(7), 0, DelimiterPair::PARENTHESES)
        .unwrap();
    assert_eq!(inner, Region::new(7, 11));

    let outer = resolve_delimiter_scope(&buffer, Region::caret(7), 1, DelimiterPair::PARENTHESES)
        .unwrap();
    assert_eq!(outer, Region::new(2, 15));
    assert!(outer.contains(inner));
    assert_ne!(outer, inner);
}

#[test]
fn test_delimiter_scope_skips_closed_sibling_pairs() {
    let buffer = plain("f(a, g(b, c), d)");
    let region = resolve_delimiter_scope(&buffer, Region::caret(13), 0, DelimiterPair::PARENTHESES)
        .unwrap();
    assert_eq!(region, Region::new(2, 15));
}

#[test]
fn test_delimiter_scope_runs_out_of_levels() {
    let buffer = plain("f(a, g(b, c), d)");
    let err = resolve_delimiter_scope(&buffer, Region::caret(7), 2, DelimiterPair::PARENTHESES)
        .unwrap_err();
    assert_eq!(err, ScopeError::NoMatchingOpen("parentheses"));
    assert_eq!(err.to_string(), "no matching open parentheses");
}

#[test]
fn test_delimiter_scope_transparent_inside_strings() {
    let buffer = MemoryBuffer::new(
        BufferId::new(1),
        r#"call("(", x)"#,
        LanguageConfig::javascript(),
    );
    let region = resolve_delimiter_scope(&buffer, Region::caret(10), 0, DelimiterPair::PARENTHESES)
        .unwrap();
    assert_eq!(region, Region::new(5, 11));

    let buffer = rust(r#"say "(" then x)"#);
    let err = resolve_delimiter_scope(&buffer, Region::caret(13), 0, DelimiterPair::PARENTHESES)
        .unwrap_err();
    assert_eq!(err, ScopeError::NoMatchingOpen("parentheses"));
}

#[test]
fn test_delimiter_scope_missing_close() {
    let buffer = plain("[a, [b]");
    let err = resolve_delimiter_scope(&buffer, Region::caret(2), 0, DelimiterPair::SQUARE_BRACKETS)
        .unwrap_err();
    assert_eq!(err, ScopeError::NoMatchingClose("square brackets"));
    assert_eq!(err.sentinel(7), Region::caret(7));
}

#[test]
fn test_resolver_all_and_selection() {
    let config = QuickSelectConfig::default();
    let resolver = ScopeResolver::new(&config);
    let mut buffer = plain("one two three");

    assert_eq!(
        resolver
            .resolve(&mut buffer, Region::caret(5), ScopeKind::All, 3)
            .unwrap(),
        Region::new(0, 13)
    );
    assert_eq!(
        resolver
            .resolve(&mut buffer, Region::new(4, 7), ScopeKind::Selection, 0)
            .unwrap(),
        Region::new(4, 7)
    );
}

#[test]
fn test_resolver_enclosing_function() {
    let config = QuickSelectConfig::default();
    let resolver = ScopeResolver::new(&config);
    let mut buffer = rust("fn outer() {\n    fn inner() { x }\n}");

    let resolve = |buffer: &mut MemoryBuffer, repeat| {
        resolver.resolve(buffer, Region::caret(30), ScopeKind::Function, repeat)
    };
    assert_eq!(resolve(&mut buffer, 0), Ok(Region::new(17, 33)));
    assert_eq!(resolve(&mut buffer, 1), Ok(Region::new(0, 35)));
    assert_eq!(resolve(&mut buffer, 5), Ok(Region::new(0, 35)));
}

#[test]
fn test_resolver_no_enclosing_function() {
    let config = QuickSelectConfig::default();
    let resolver = ScopeResolver::new(&config);
    let mut buffer = rust("let a = 1; fn f() {}");

    assert_eq!(
        resolver.resolve(&mut buffer, Region::caret(0), ScopeKind::Function, 0),
        Err(ScopeError::NoEnclosingFunction)
    );
    let region = resolver.resolve_or_report(&mut buffer, Region::caret(0), ScopeKind::Function, 0);
    assert!(region.is_empty());
    assert_eq!(buffer.last_status(), Some("no enclosing function"));
}

#[test]
fn test_resolver_marked_scope() {
    let config = QuickSelectConfig::default();
    let resolver = ScopeResolver::new(&config);
    let mut buffer = plain("alpha beta gamma");

    assert_eq!(
        resolver
            .resolve(&mut buffer, Region::caret(0), ScopeKind::CurrentMarkedScope, 0)
            .unwrap(),
        Region::caret(0)
    );

    write_marked_scope(&mut buffer, &config.marker_key, Region::new(6, 10));
    assert_eq!(
        resolver
            .resolve(&mut buffer, Region::caret(0), ScopeKind::CurrentMarkedScope, 0)
            .unwrap(),
        Region::new(6, 10)
    );
}

#[test]
fn test_resolver_quote_kinds_are_not_reported_to_the_user() {
    let config = QuickSelectConfig::default();
    let resolver = ScopeResolver::new(&config);
    let mut buffer = rust(r#"let s = "a b";"#);

    for kind in [
        ScopeKind::SingleQuotes,
        ScopeKind::DoubleQuotes,
        ScopeKind::Backticks,
    ] {
        assert_eq!(
            resolver.resolve(&mut buffer, Region::caret(10), kind, 0),
            Err(ScopeError::Unimplemented(kind))
        );
        assert_eq!(
            resolver.resolve_or_report(&mut buffer, Region::caret(10), kind, 0),
            Region::caret(0)
        );
    }
    assert!(buffer.status_messages().is_empty());
}

#[test]
fn test_resolver_reports_failures_as_status() {
    let config = QuickSelectConfig::default();
    let resolver = ScopeResolver::new(&config);
    let mut buffer = plain("a) b");

    let region =
        resolver.resolve_or_report(&mut buffer, Region::caret(0), ScopeKind::Parentheses, 0);
    assert_eq!(region, Region::caret(0));
    assert_eq!(buffer.last_status(), Some("no matching open parentheses"));

    let quiet = QuickSelectConfig {
        status_messages: false,
        ..QuickSelectConfig::default()
    };
    let mut buffer = plain("a) b");
    ScopeResolver::new(&quiet).resolve_or_report(
        &mut buffer,
        Region::caret(0),
        ScopeKind::Parentheses,
        0,
    );
    assert!(buffer.status_messages().is_empty());
}
