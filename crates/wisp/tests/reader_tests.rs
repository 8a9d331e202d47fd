//! Reader/printer tests (spec.md §4.1/§4.2), covering tokenization edge
//! cases and the `{`/`^`/`^@` reader macros spec.md adds beyond the
//! original C++ reader.

use wisp::{printer, reader::read_str, value::ValueKind};

#[test]
fn whitespace_includes_commas() {
    let v = read_str(b"(1, 2,\t3)").unwrap();
    assert_eq!(printer::print_readable(&v), "(1 2 3)");
}

#[test]
fn semicolon_comments_extend_to_newline() {
    let v = read_str(b"1 ; this is a comment\n").unwrap();
    assert_eq!(printer::print_readable(&v), "1");
}

#[test]
fn string_escapes() {
    let v = read_str(br#""a\\b\"c\nd\te""#).unwrap();
    let ValueKind::String(bytes) = &v.kind else { panic!("not a string") };
    assert_eq!(&**bytes, b"a\\b\"c\nd\te");
}

#[test]
fn unterminated_string_is_a_syntax_error() {
    assert!(read_str(br#""abc"#).is_err());
}

#[test]
fn underscores_in_numbers_are_ignored() {
    let v = read_str(b"1_000_000").unwrap();
    assert_eq!(printer::print_readable(&v), "1000000");
}

#[test]
fn invalid_number_run_is_an_error() {
    assert!(read_str(b"1a2").is_err());
}

#[test]
fn keyword_strips_leading_colon() {
    let v = read_str(b":foo").unwrap();
    let ValueKind::Keyword(bytes) = &v.kind else { panic!("not a keyword") };
    assert_eq!(&**bytes, b"foo");
}

#[test]
fn curly_braces_desugar_to_hash_map_call() {
    let v = read_str(b"{:a 1 :b 2}").unwrap();
    assert_eq!(printer::print_readable(&v), "(hash-map :a 1 :b 2)");
}

#[test]
fn quote_family_reader_macros() {
    assert_eq!(printer::print_readable(&read_str(b"'x").unwrap()), "(quote x)");
    assert_eq!(printer::print_readable(&read_str(b"`x").unwrap()), "(quasiquote x)");
    assert_eq!(printer::print_readable(&read_str(b"~x").unwrap()), "(unquote x)");
    assert_eq!(printer::print_readable(&read_str(b"~@x").unwrap()), "(splice-unquote x)");
    assert_eq!(printer::print_readable(&read_str(b"@x").unwrap()), "(deref x)");
}

#[test]
fn caret_wraps_in_with_meta_with_swapped_order() {
    let v = read_str(b"^{:a 1} x").unwrap();
    assert_eq!(printer::print_readable(&v), "(with-meta x (hash-map :a 1))");
}

#[test]
fn caret_at_attaches_literal_metadata_directly() {
    let v = read_str(b"^@{:a 1} x").unwrap();
    assert!(v.is_symbol());
    assert_eq!(printer::print_readable(&v.meta()), "{:a 1}");
}

#[test]
fn unmatched_closing_delimiter_is_an_error() {
    assert!(read_str(b")").is_err());
    assert!(read_str(b"(1 2").is_err());
}

#[test]
fn raw_vs_readable_string_printing() {
    let v = read_str(br#""a\nb""#).unwrap();
    assert_eq!(printer::print_readable(&v), "\"a\\nb\"");
    assert_eq!(printer::print_raw(&v), "a\nb");
}

#[test]
fn vectors_print_with_brackets_lists_with_parens() {
    assert_eq!(printer::print_readable(&read_str(b"[1 2]").unwrap()), "[1 2]");
    assert_eq!(printer::print_readable(&read_str(b"(1 2)").unwrap()), "(1 2)");
}
