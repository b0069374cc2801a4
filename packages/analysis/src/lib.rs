//! Analysis passes over parsed class strings: the flattening spread
//! traversal, structural diagnostics, and cross-declaration conflict
//! detection against a caller-supplied CSS resolver.

pub mod cache;
pub mod conflict;
pub mod diagnostic;
pub mod lint;
pub mod spread;

#[cfg(test)]
mod tests;

pub use cache::{BoundedCache, DEFAULT_CAPACITY};
pub use conflict::{
    detect_conflicts, CachingResolver, Conflict, ConflictOptions, ConflictPolicy, Declaration,
    DeclarationResolver, ResolvedRule, RuleSource,
};
pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticLevel};
pub use lint::{lint, lint_with, lint_with_resolver};
pub use spread::{spread, spread_program, spread_with, Spread, SpreadItem, SpreadTarget};
