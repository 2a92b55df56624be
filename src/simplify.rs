//! Removal of style properties that do not affect rendering.

use std::fmt;

use crate::Options;
use crate::properties::{self, PropertyRule};
use crate::style::StyleMap;

/// Values of inheriting properties declared by ancestors.
///
/// Each container derives its own copy for its children; a context is never
/// mutated once handed to a subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inherited {
    values: StyleMap,
}

impl Inherited {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.values.get(property)
    }

    /// The context seen by children of an element whose (already simplified)
    /// style is `style`.
    pub fn overlay(&self, style: &StyleMap) -> Inherited {
        let mut values = self.values.clone();
        for (property, value) in style.iter() {
            if properties::does_inherit(property) {
                values.insert(property, value);
            }
        }
        Inherited { values }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalReason {
    /// The property has no effect on this element type.
    Inapplicable,
    /// An ancestor already declares the same value.
    Inherited,
    /// The value is the property's default.
    Default,
}

impl fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RemovalReason::Inapplicable => "does not apply to the tag",
            RemovalReason::Inherited => "has the same value as inherited",
            RemovalReason::Default => "has the default value",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub property: String,
    pub value: String,
    pub reason: RemovalReason,
}

/// Result of simplifying one element's style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Simplified {
    pub style: StyleMap,
    pub removals: Vec<Removal>,
}

/// Reduce `style` on an element named `tag`, given what its ancestors declare.
///
/// Unknown properties are always kept. With both passes disabled this is the
/// identity.
pub fn simplify(tag: &str, style: &StyleMap, inherited: &Inherited, options: &Options) -> Simplified {
    let mut result = Simplified::default();

    for (property, value) in style.iter() {
        let reason = properties::lookup(property)
            .and_then(|rule| removal_reason(rule, tag, value, inherited, options));

        match reason {
            Some(reason) => result.removals.push(Removal {
                property: property.to_string(),
                value: value.to_string(),
                reason,
            }),
            None => result.style.insert(property, value),
        }
    }

    result
}

fn removal_reason(
    rule: &PropertyRule,
    tag: &str,
    value: &str,
    inherited: &Inherited,
    options: &Options,
) -> Option<RemovalReason> {
    if options.remove_inapplicable && !rule.applies_to.contains(tag) {
        return Some(RemovalReason::Inapplicable);
    }

    if !options.remove_redundant {
        return None;
    }

    // declared-value identity, not numeric equivalence
    if rule.inherits && inherited.get(rule.name) == Some(value) {
        return Some(RemovalReason::Inherited);
    }

    match rule.default {
        Some(default) if default.matches(value) => Some(RemovalReason::Default),
        _ => None,
    }
}
