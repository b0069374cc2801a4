//! Turns spread output into diagnostics.

use tracing::debug;
use windlass_parser::parser::Parser;

use crate::conflict::{detect_conflicts, ConflictOptions, DeclarationResolver};
use crate::diagnostic::{Diagnostic, DiagnosticCode, DiagnosticLevel};
use crate::spread::{spread_with, Spread};

/// Structural problems only: unclosed brackets, empty groups, empty
/// variants.
pub fn lint(text: &str) -> Vec<Diagnostic> {
    lint_with(&Parser::new(windlass_parser::parser::DEFAULT_SEPARATOR), text)
}

pub fn lint_with(parser: &Parser, text: &str) -> Vec<Diagnostic> {
    let spread = spread_with(parser, text);
    let diagnostics = structural_diagnostics(&spread);
    debug!(count = diagnostics.len(), "structural lint finished");
    diagnostics
}

/// Structural problems plus unknown utilities and property conflicts,
/// resolved through the caller's CSS engine seam.
pub fn lint_with_resolver(
    parser: &Parser,
    text: &str,
    resolver: &dyn DeclarationResolver,
    options: &ConflictOptions,
) -> Vec<Diagnostic> {
    let spread = spread_with(parser, text);
    let mut diagnostics = structural_diagnostics(&spread);
    diagnostics.extend(unknown_class_diagnostics(&spread, resolver));
    diagnostics.extend(conflict_diagnostics(&spread, resolver, options));
    diagnostics
}

pub fn structural_diagnostics(spread: &Spread) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for expr in &spread.unclosed {
        diagnostics.push(Diagnostic::error(
            DiagnosticCode::UnclosedBracket,
            "Bracket is never closed",
            expr.span(),
        ));
    }
    for group in &spread.empty_groups {
        diagnostics.push(
            Diagnostic::warning(DiagnosticCode::EmptyGroup, "Group has no content", group.span)
                .with_suggestion("Remove the empty parentheses"),
        );
    }
    for variant in &spread.empty_variants {
        diagnostics.push(
            Diagnostic::warning(
                DiagnosticCode::EmptyVariant,
                format!("Variant '{}' applies to nothing", variant.variant.name()),
                variant.span,
            )
            .with_suggestion("Add a class right after the separator, or remove the variant"),
        );
    }

    diagnostics
}

/// Items the resolver does not recognize as utilities.
pub fn unknown_class_diagnostics(
    spread: &Spread,
    resolver: &dyn DeclarationResolver,
) -> Vec<Diagnostic> {
    spread
        .items
        .iter()
        .filter(|item| {
            !matches!(item.target, crate::spread::SpreadTarget::Declaration(_))
                && resolver.resolve(&item.variant_names(), &item.text).is_none()
        })
        .map(|item| {
            Diagnostic::warning(
                DiagnosticCode::UnknownClass,
                format!("'{}' is not a known utility", item.text),
                item.span(),
            )
        })
        .collect()
}

pub fn conflict_diagnostics(
    spread: &Spread,
    resolver: &dyn DeclarationResolver,
    options: &ConflictOptions,
) -> Vec<Diagnostic> {
    detect_conflicts(spread, resolver, options)
        .into_iter()
        .flat_map(|conflict| {
            let message = if conflict.variants.is_empty() {
                format!(
                    "Multiple classes set the same property: {}",
                    conflict.properties.join(", ")
                )
            } else {
                format!(
                    "Multiple classes set the same property under '{}': {}",
                    conflict.variants.join(" "),
                    conflict.properties.join(", ")
                )
            };
            conflict
                .spans
                .into_iter()
                .map(move |span| Diagnostic {
                    level: DiagnosticLevel::Warning,
                    code: DiagnosticCode::ConflictingProperties,
                    message: message.clone(),
                    span,
                    suggestion: None,
                })
        })
        .collect()
}
