use crate::hover::{hover, CssPart};
use crate::locate::Target;
use crate::suggest::suggest;

#[test]
fn test_hover_cursor_boundary_is_inclusive() {
    let text = "bg-red-500";
    // immediately after the last character still hits the token
    let hit = hover(text, 10).unwrap();
    match &hit.target {
        Target::Class(c) => assert_eq!(c.value, "bg-red-500"),
        other => panic!("expected class target, got {:?}", other),
    }
    assert_eq!(hit.value, "bg-red-500");

    // one past that is outside every range
    assert!(hover(text, 11).is_none());
}

#[test]
fn test_hover_resolves_variant_and_important_context() {
    let text = "hover:(bg-red-500)!";
    let hit = hover(text, 10).unwrap();
    assert_eq!(hit.value, "bg-red-500");
    assert_eq!(hit.variants, vec!["hover"]);
    assert!(hit.important);
}

#[test]
fn test_hover_on_the_variant_itself() {
    let hit = hover("hover:flex", 2).unwrap();
    match &hit.target {
        Target::Variant(v) => assert_eq!(v.name(), "hover"),
        other => panic!("expected variant target, got {:?}", other),
    }
    assert_eq!(hit.value, "hover");
    assert!(hit.variants.is_empty());
}

#[test]
fn test_hover_css_declaration_parts() {
    let text = "color[red]";
    let on_prop = hover(text, 2).unwrap();
    assert_eq!(on_prop.css_part, Some(CssPart::Property));

    let on_value = hover(text, 8).unwrap();
    assert_eq!(on_value.css_part, Some(CssPart::Value));
    assert_eq!(on_value.value, "color[red]");
}

#[test]
fn test_hover_arbitrary_classname_value_is_source_text() {
    let hit = hover("text-[14px]", 4).unwrap();
    assert_eq!(hit.value, "text-[14px]");
    assert!(matches!(hit.target, Target::Arbitrary(_)));
}

#[test]
fn test_hover_outside_any_node() {
    assert!(hover("a  b", 1).is_some());
    assert!(hover("", 0).is_none());
}

#[test]
fn test_suggest_after_variant_separator() {
    let s = suggest("hover:", 6);
    assert!(s.target.is_none());
    assert_eq!(s.variants, vec!["hover"]);
    assert!(!s.in_comment);
}

#[test]
fn test_suggest_mid_token_with_variant_chain() {
    let s = suggest("sm:hover:bg-", 12);
    assert_eq!(s.variants, vec!["sm", "hover"]);
    match s.target {
        Some(Target::Class(c)) => assert_eq!(c.value, "bg-"),
        other => panic!("expected class target, got {:?}", other),
    }
}

#[test]
fn test_suggest_in_group_whitespace_keeps_variant_context() {
    let s = suggest("hover:(flex )", 12);
    assert!(s.target.is_none());
    assert_eq!(s.variants, vec!["hover"]);
}

#[test]
fn test_suggest_inside_comment() {
    let s = suggest("flex /* no */ grid", 9);
    assert!(s.in_comment);
    assert!(s.target.is_none());

    // comment state is known even though the parse stops at the cursor
    let s = suggest("flex /* tail comment", 12);
    assert!(s.in_comment);
}

#[test]
fn test_suggest_arbitrary_variant_context() {
    let s = suggest("[&>p]:under", 11);
    assert_eq!(s.variants, vec!["&>p"]);
    match s.target {
        Some(Target::Class(c)) => assert_eq!(c.value, "under"),
        other => panic!("expected class target, got {:?}", other),
    }
}
