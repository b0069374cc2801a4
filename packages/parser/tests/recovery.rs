//! Mid-edit recovery scenarios: the parser must always produce a tree, and
//! every unterminated bracket must be marked rather than dropped.

use windlass_parser::ast::{Expression, Span};
use windlass_parser::parser::parse;

fn flags(expr: &Expression) -> (bool, Span) {
    (expr.closed(), expr.span())
}

#[test]
fn test_every_unclosed_form_is_kept_and_marked() {
    let cases: &[(&str, usize)] = &[
        ("(flex", 1),
        ("hover:(flex", 1),
        ("text-[", 1),
        ("text-[red", 1),
        ("color[red", 1),
        ("[&>p", 1),
        ("text-[red]/[", 1),
    ];

    for (text, count) in cases {
        let program = parse(text);
        assert_eq!(
            program.expressions.len(),
            *count,
            "expected {count} node(s) for {text:?}"
        );
        let node = match &program.expressions[0] {
            Expression::VariantSpan(v) if v.child.is_some() => v.child.as_deref().unwrap(),
            other => other,
        };
        let (closed, span) = flags(node);
        assert!(!closed, "node for {text:?} must be marked unclosed");
        assert_eq!(span.end, text.len(), "range for {text:?} extends to end");
    }
}

#[test]
fn test_text_after_an_unclosed_group_stays_inside_it() {
    let program = parse("(a b hover:c");
    let Expression::Group(g) = &program.expressions[0] else {
        panic!("expected group");
    };
    assert!(!g.closed);
    assert_eq!(g.expressions.len(), 3);
}

#[test]
fn test_edit_in_progress_keeps_earlier_siblings_intact() {
    let program = parse("flex text-[ grid");
    assert_eq!(program.expressions.len(), 2);
    assert!(matches!(&program.expressions[0], Expression::ClassName(c) if c.value == "flex"));
    // the unterminated bracket swallows the rest of the region
    assert!(!program.expressions[1].closed());
}
