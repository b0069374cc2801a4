//! Cross-declaration conflict detection.
//!
//! Consumes the flattened spread output plus a caller-supplied resolver (the
//! seam to the CSS rule-generation engine) and groups declarations by a
//! canonical (context, variant-set, property) key. Any key fed by more than
//! one source item is a conflict.

use std::cell::RefCell;
use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use windlass_parser::ast::Span;

use crate::cache::BoundedCache;
use crate::spread::{Spread, SpreadItem, SpreadTarget};

/// Which layer of the framework produced a rule. Components rules are
/// terminal: a utility overriding a property a component set is intentional
/// layering, not a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleSource {
    Utilities,
    Components,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// One CSS rule a class name resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRule {
    pub source: RuleSource,
    /// Enclosing at-rule parameters (media queries and the like), outermost
    /// first.
    pub context: Vec<String>,
    /// Pseudo selectors applied to the rule.
    pub pseudo: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl ResolvedRule {
    pub fn utility(declarations: Vec<Declaration>) -> Self {
        Self {
            source: RuleSource::Utilities,
            context: Vec::new(),
            pseudo: Vec::new(),
            declarations,
        }
    }
}

/// Seam to the out-of-scope CSS rule-generation engine. `None` means the
/// class name is not a known utility under the given variants.
pub trait DeclarationResolver {
    fn resolve(&self, variants: &[&str], class_name: &str) -> Option<Vec<ResolvedRule>>;
}

/// Wraps a resolver with a [`BoundedCache`] keyed by variants and class
/// name, so the expensive rule generation runs once per distinct lookup.
pub struct CachingResolver<R> {
    inner: R,
    cache: RefCell<BoundedCache<(Vec<String>, String), Option<Vec<ResolvedRule>>>>,
}

impl<R> CachingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RefCell::new(BoundedCache::default()),
        }
    }

    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            cache: RefCell::new(BoundedCache::new(capacity)),
        }
    }

    pub fn cached_lookups(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<R: DeclarationResolver> DeclarationResolver for CachingResolver<R> {
    fn resolve(&self, variants: &[&str], class_name: &str) -> Option<Vec<ResolvedRule>> {
        let key = (
            variants.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
            class_name.to_string(),
        );
        if let Some(hit) = self.cache.borrow_mut().get(&key) {
            return hit.clone();
        }
        let resolved = self.inner.resolve(variants, class_name);
        self.cache.borrow_mut().insert(key, resolved.clone());
        resolved
    }
}

/// How aggressively to group declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictPolicy {
    /// One key per CSS property a utility actually produces. Important items
    /// are skipped entirely: `!important` wins unconditionally, so a
    /// duplicate property is not a mistake.
    Strict,
    /// One key per item, combining the variant set with the set of all
    /// property names the utility touches.
    Loose,
}

#[derive(Debug, Clone)]
pub struct ConflictOptions {
    pub policy: ConflictPolicy,
    /// Properties carrying framework-internal intermediate values start with
    /// this prefix and are duplicated by the framework itself, so they never
    /// count as conflicting.
    pub internal_prefix: String,
}

impl Default for ConflictOptions {
    fn default() -> Self {
        Self {
            policy: ConflictPolicy::Strict,
            internal_prefix: "--tw-".to_string(),
        }
    }
}

/// A set of items that collide on the same property (or property set) under
/// equivalent conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub properties: Vec<String>,
    pub variants: Vec<String>,
    /// Ranges of every contributing item, in source order.
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ConflictKey {
    context: Vec<String>,
    pseudo: Vec<String>,
    variants: Vec<String>,
    properties: Vec<String>,
}

/// Group the spread items by canonical key and report every key with more
/// than one contributor.
pub fn detect_conflicts(
    spread: &Spread,
    resolver: &dyn DeclarationResolver,
    options: &ConflictOptions,
) -> Vec<Conflict> {
    let mut groups: IndexMap<ConflictKey, Vec<Span>> = IndexMap::new();

    for item in &spread.items {
        match options.policy {
            ConflictPolicy::Strict => collect_strict(item, resolver, options, &mut groups),
            ConflictPolicy::Loose => collect_loose(item, resolver, &mut groups),
        }
    }

    let conflicts: Vec<Conflict> = groups
        .into_iter()
        .filter(|(_, spans)| spans.len() > 1)
        .map(|(key, spans)| Conflict {
            properties: key.properties,
            variants: key.variants,
            spans,
        })
        .collect();

    debug!(
        items = spread.items.len(),
        conflicts = conflicts.len(),
        "conflict detection finished"
    );
    conflicts
}

fn collect_strict(
    item: &SpreadItem,
    resolver: &dyn DeclarationResolver,
    options: &ConflictOptions,
    groups: &mut IndexMap<ConflictKey, Vec<Span>>,
) {
    if item.important {
        return;
    }
    let Some(rules) = rules_for(item, resolver) else {
        return;
    };
    let variants = sorted_variant_names(item);

    // one span contribution per distinct key, even if the utility repeats a
    // property across rules
    let mut seen: HashSet<ConflictKey> = HashSet::new();
    for rule in &rules {
        if rule.source == RuleSource::Components {
            break;
        }
        for decl in &rule.declarations {
            if decl.property.starts_with(&options.internal_prefix) {
                continue;
            }
            let key = ConflictKey {
                context: rule.context.clone(),
                pseudo: rule.pseudo.clone(),
                variants: variants.clone(),
                properties: vec![decl.property.clone()],
            };
            if seen.insert(key.clone()) {
                groups.entry(key).or_default().push(item.span());
            }
        }
    }
}

fn collect_loose(
    item: &SpreadItem,
    resolver: &dyn DeclarationResolver,
    groups: &mut IndexMap<ConflictKey, Vec<Span>>,
) {
    let Some(rules) = rules_for(item, resolver) else {
        return;
    };
    let mut properties: Vec<String> = rules
        .iter()
        .flat_map(|rule| rule.declarations.iter().map(|d| d.property.clone()))
        .collect();
    properties.sort();
    properties.dedup();
    if properties.is_empty() {
        return;
    }
    let key = ConflictKey {
        context: Vec::new(),
        pseudo: Vec::new(),
        variants: sorted_variant_names(item),
        properties,
    };
    groups.entry(key).or_default().push(item.span());
}

/// Shorthand CSS declarations carry their property directly; everything else
/// goes through the resolver.
fn rules_for(item: &SpreadItem, resolver: &dyn DeclarationResolver) -> Option<Vec<ResolvedRule>> {
    match &item.target {
        SpreadTarget::Declaration(decl) => Some(vec![ResolvedRule::utility(vec![Declaration {
            property: decl.prop.value.clone(),
            value: decl.expr.value.clone(),
        }])]),
        SpreadTarget::Class(_) | SpreadTarget::Arbitrary(_) => {
            resolver.resolve(&item.variant_names(), &item.text)
        }
    }
}

fn sorted_variant_names(item: &SpreadItem) -> Vec<String> {
    let mut names: Vec<String> = item.variants.iter().map(|v| v.name().to_string()).collect();
    names.sort();
    names
}
