use std::cell::Cell;

use windlass_parser::ast::Span;

use crate::conflict::*;
use crate::diagnostic::{Diagnostic, DiagnosticCode, DiagnosticLevel};
use crate::lint::*;
use crate::spread::*;

/// Resolver over a tiny fixed utility set, counting how often it is asked.
struct FakeResolver {
    calls: Cell<usize>,
}

impl FakeResolver {
    fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

impl DeclarationResolver for FakeResolver {
    fn resolve(&self, _variants: &[&str], class_name: &str) -> Option<Vec<ResolvedRule>> {
        self.calls.set(self.calls.get() + 1);
        let decl = |property: &str, value: &str| Declaration {
            property: property.to_string(),
            value: value.to_string(),
        };
        match class_name {
            "text-red-500" => Some(vec![ResolvedRule::utility(vec![decl("color", "#ef4444")])]),
            "text-blue-500" => Some(vec![ResolvedRule::utility(vec![decl("color", "#3b82f6")])]),
            "underline" => Some(vec![ResolvedRule::utility(vec![decl(
                "text-decoration-line",
                "underline",
            )])]),
            // carries framework-internal custom properties next to the real one
            "shadow" => Some(vec![ResolvedRule::utility(vec![
                decl("--tw-shadow", "0 1px 3px"),
                decl("box-shadow", "var(--tw-shadow)"),
            ])]),
            "shadow-lg" => Some(vec![ResolvedRule::utility(vec![
                decl("--tw-shadow", "0 10px 15px"),
                decl("box-shadow", "var(--tw-shadow)"),
            ])]),
            // a component: its color is terminal, the trailing utility rule
            // must not be accumulated
            "btn" => Some(vec![
                ResolvedRule {
                    source: RuleSource::Components,
                    context: Vec::new(),
                    pseudo: Vec::new(),
                    declarations: vec![decl("color", "white")],
                },
                ResolvedRule::utility(vec![decl("color", "red")]),
            ]),
            _ => None,
        }
    }
}

#[test]
fn test_spread_variant_chain_order() {
    let spread = spread("a:b:c-1");
    assert_eq!(spread.items.len(), 1);
    let item = &spread.items[0];
    assert_eq!(item.variant_names(), vec!["a", "b"]);
    assert_eq!(item.text, "c-1");
}

#[test]
fn test_spread_propagates_group_important() {
    let spread = spread("(bg-red-500)!");
    assert_eq!(spread.items.len(), 1);
    let item = &spread.items[0];
    assert!(item.important);
    // the leaf itself carries no flag
    match &item.target {
        SpreadTarget::Class(c) => assert!(!c.important),
        other => panic!("expected class target, got {:?}", other),
    }
}

#[test]
fn test_spread_detects_empty_variant() {
    let spread = spread("hover: ");
    assert!(spread.items.is_empty());
    assert_eq!(spread.empty_variants.len(), 1);
    assert_eq!(spread.empty_variants[0].variant.name(), "hover");
}

#[test]
fn test_spread_detects_empty_group_and_unclosed() {
    let spread = spread("() (a text-[red");
    assert_eq!(spread.empty_groups.len(), 1);
    // the unclosed group is recorded and not descended into
    assert_eq!(spread.unclosed.len(), 1);
    assert!(spread.items.is_empty());
}

#[test]
fn test_spread_preserves_source_order() {
    let spread = spread("a b (c d) e");
    assert_eq!(spread.class_names(), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_spread_variant_context_inside_groups() {
    let spread = spread("hover:(a focus:b)");
    assert_eq!(spread.items.len(), 2);
    assert_eq!(spread.items[0].variant_names(), vec!["hover"]);
    assert_eq!(spread.items[1].variant_names(), vec!["hover", "focus"]);
}

#[test]
fn test_spread_strips_important_from_item_text() {
    let spread = spread("color[red]!");
    assert_eq!(spread.items[0].text, "color[red]");
    assert!(spread.items[0].important);
}

#[test]
fn test_conflict_same_property_same_variants() {
    let resolver = FakeResolver::new();
    let spread = spread("hover:text-red-500 hover:text-blue-500 focus:text-red-500");
    let conflicts = detect_conflicts(&spread, &resolver, &ConflictOptions::default());

    // exactly one group: the two hover colors; the focus one has a different
    // variant set and must not join
    assert_eq!(conflicts.len(), 1);
    let conflict = &conflicts[0];
    assert_eq!(conflict.properties, vec!["color"]);
    assert_eq!(conflict.variants, vec!["hover"]);
    assert_eq!(conflict.spans.len(), 2);
    assert_eq!(conflict.spans[0], spread.items[0].span());
    assert_eq!(conflict.spans[1], spread.items[1].span());
}

#[test]
fn test_conflict_different_properties_do_not_group() {
    let resolver = FakeResolver::new();
    let spread = spread("text-red-500 underline");
    let conflicts = detect_conflicts(&spread, &resolver, &ConflictOptions::default());
    assert!(conflicts.is_empty());
}

#[test]
fn test_strict_skips_important_items() {
    let resolver = FakeResolver::new();
    let spread = spread("text-red-500 !text-blue-500");
    let conflicts = detect_conflicts(&spread, &resolver, &ConflictOptions::default());
    assert!(conflicts.is_empty());
}

#[test]
fn test_strict_skips_internal_custom_properties() {
    let resolver = FakeResolver::new();
    let spread = spread("shadow shadow-lg");
    let conflicts = detect_conflicts(&spread, &resolver, &ConflictOptions::default());

    // only box-shadow conflicts; the --tw-shadow carrier is framework noise
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].properties, vec!["box-shadow"]);
}

#[test]
fn test_strict_stops_at_components_rule() {
    let resolver = FakeResolver::new();
    let spread = spread("btn text-red-500");
    let conflicts = detect_conflicts(&spread, &resolver, &ConflictOptions::default());
    // btn's color comes from a components rule, so it never enters a group
    assert!(conflicts.is_empty());
}

#[test]
fn test_css_declarations_conflict_without_resolver_knowledge() {
    let resolver = FakeResolver::new();
    let spread = spread("color[red] color[blue]");
    let conflicts = detect_conflicts(&spread, &resolver, &ConflictOptions::default());
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].properties, vec!["color"]);
    // shorthand declarations never hit the resolver
    assert_eq!(resolver.calls.get(), 0);
}

#[test]
fn test_loose_groups_by_property_set() {
    let resolver = FakeResolver::new();
    let options = ConflictOptions {
        policy: ConflictPolicy::Loose,
        ..ConflictOptions::default()
    };

    // identical property sets conflict, even with the internal carrier
    let spread = spread("shadow shadow-lg");
    let conflicts = detect_conflicts(&spread, &resolver, &options);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(
        conflicts[0].properties,
        vec!["--tw-shadow".to_string(), "box-shadow".to_string()]
    );

    // loose does not skip important items
    let spread = crate::spread::spread("text-red-500 !text-blue-500");
    let conflicts = detect_conflicts(&spread, &resolver, &options);
    assert_eq!(conflicts.len(), 1);
}

#[test]
fn test_caching_resolver_memoizes_lookups() {
    let resolver = CachingResolver::new(FakeResolver::new());

    let first = resolver.resolve(&["hover"], "text-red-500");
    let second = resolver.resolve(&["hover"], "text-red-500");
    assert_eq!(first, second);
    assert_eq!(resolver.cached_lookups(), 1);

    // different variants are a different lookup
    resolver.resolve(&["focus"], "text-red-500");
    assert_eq!(resolver.cached_lookups(), 2);

    // misses are cached too
    resolver.resolve(&[], "no-such-class");
    assert_eq!(resolver.resolve(&[], "no-such-class"), None);
    assert_eq!(resolver.cached_lookups(), 3);
}

#[test]
fn test_lint_reports_structural_problems() {
    let diagnostics = lint("hover: () text-[red");
    let codes: Vec<DiagnosticCode> = diagnostics.iter().map(|d| d.code).collect();
    assert!(codes.contains(&DiagnosticCode::EmptyVariant));
    assert!(codes.contains(&DiagnosticCode::EmptyGroup));
    assert!(codes.contains(&DiagnosticCode::UnclosedBracket));
}

#[test]
fn test_diagnostic_codes_carry_their_levels() {
    let diagnostics = lint("hover: () text-[red");
    assert_eq!(diagnostics.len(), 3);
    for d in &diagnostics {
        let expected = match d.code {
            DiagnosticCode::UnclosedBracket => DiagnosticLevel::Error,
            _ => DiagnosticLevel::Warning,
        };
        assert_eq!(d.level, expected, "level mismatch for {:?}", d.code);
    }
}

#[test]
fn test_lint_with_resolver_reports_unknown_and_conflicts() {
    let parser = windlass_parser::Parser::new(":");
    let resolver = FakeResolver::new();
    let diagnostics = lint_with_resolver(
        &parser,
        "text-red-500 text-blue-500 no-such-class",
        &resolver,
        &ConflictOptions::default(),
    );

    let unknown: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::UnknownClass)
        .collect();
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].span, Span::new(27, 40));

    let conflicts = diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::ConflictingProperties)
        .count();
    assert_eq!(conflicts, 2);
}
