// src/adapters/locator.rs
//! Heuristics shared by the platform locators: label-text lookup, structural
//! attribute rules and consent checkbox matching.

use tracing::debug;

use super::LocatedFieldMap;
use crate::fields::SemanticField;
use crate::page::{DomElement, DomSnapshot, ElementHandle, ElementKind};

const CONTAINER_TAGS: &[&str] = &["div", "fieldset"];

#[derive(Debug, Clone, Copy)]
pub enum Attr {
    Name,
    Type,
    Placeholder,
    Accept,
}

impl Attr {
    fn key(&self) -> &'static str {
        match self {
            Attr::Name => "name",
            Attr::Type => "type",
            Attr::Placeholder => "placeholder",
            Attr::Accept => "accept",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Test {
    Contains(&'static str),
    Equals(&'static str),
}

/// One structural alternative, e.g. `input[name*="first" i]`. All conditions
/// must hold; attribute comparisons ignore case.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    tags: &'static [&'static str],
    conditions: &'static [(Attr, Test)],
}

impl Rule {
    pub const fn new(tags: &'static [&'static str], conditions: &'static [(Attr, Test)]) -> Self {
        Self { tags, conditions }
    }

    pub fn matches(&self, el: &DomElement) -> bool {
        self.tags.contains(&el.tag.as_str())
            && self.conditions.iter().all(|(attr, test)| {
                let Some(value) = el.attr(attr.key()) else {
                    return false;
                };
                let value = value.to_lowercase();
                match test {
                    Test::Contains(needle) => value.contains(&needle.to_lowercase()),
                    Test::Equals(expected) => value == expected.to_lowercase(),
                }
            })
    }
}

/// How one field is found on a platform's form.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    /// Ranked label keywords, then structural rules.
    Labelled {
        labels: &'static [&'static str],
        rules: &'static [Rule],
    },
    /// Checkbox whose label contains `phrase`, then structural rules.
    Checkbox {
        phrase: &'static str,
        rules: &'static [Rule],
    },
    Structural(&'static [Rule]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: SemanticField,
    pub strategy: Strategy,
}

/// Resolve every field spec in order. Fields that cannot be found are recorded as
/// missing, never reported as errors.
pub fn locate_fields(
    dom: &DomSnapshot,
    scope: Option<ElementHandle>,
    specs: &[FieldSpec],
) -> LocatedFieldMap {
    let mut located = LocatedFieldMap::default();

    for spec in specs {
        let element = match spec.strategy {
            Strategy::Labelled { labels, rules } => {
                find_by_label(dom, labels).or_else(|| find_by_rules(dom, scope, rules))
            }
            Strategy::Checkbox { phrase, rules } => find_checkbox_by_label(dom, scope, phrase)
                .or_else(|| find_by_rules(dom, scope, rules)),
            Strategy::Structural(rules) => find_by_rules(dom, scope, rules),
        };

        match element {
            Some(handle) => debug!("Located {} at {}", spec.field, handle),
            None => debug!("Field {} not located", spec.field),
        }
        located.insert(spec.field, element);
    }

    located
}

/// First label (document-wide) whose text contains a keyword, trying the
/// keywords in rank order. A label with a `for` attribute decides the
/// outcome on its own; otherwise the first control inside its nearest
/// `div`/`fieldset` is used and the search continues if there is none.
pub fn find_by_label(dom: &DomSnapshot, keywords: &[&str]) -> Option<ElementHandle> {
    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        let Some((label, el)) = dom
            .by_tag("label")
            .find(|(_, el)| el.text().trim().to_lowercase().contains(&keyword))
        else {
            continue;
        };

        if let Some(target) = el.attr("for").filter(|f| !f.is_empty()) {
            return dom
                .by_id(target)
                .filter(|h| dom.get(*h).is_some_and(DomElement::is_form_control));
        }

        if let Some(container) = dom.closest_ancestor(label, CONTAINER_TAGS) {
            if let Some((input, _)) = dom
                .descendants(container)
                .find(|(_, el)| el.is_form_control())
            {
                return Some(input);
            }
        }
    }
    None
}

/// First element in scope, in document order, matching any rule.
pub fn find_by_rules(
    dom: &DomSnapshot,
    scope: Option<ElementHandle>,
    rules: &[Rule],
) -> Option<ElementHandle> {
    if rules.is_empty() {
        return None;
    }
    scoped(dom, scope)
        .into_iter()
        .find(|(_, el)| rules.iter().any(|rule| rule.matches(el)))
        .map(|(h, _)| h)
}

/// Checkbox in scope whose associated label mentions `phrase`.
pub fn find_checkbox_by_label(
    dom: &DomSnapshot,
    scope: Option<ElementHandle>,
    phrase: &str,
) -> Option<ElementHandle> {
    let phrase = phrase.to_lowercase();
    scoped(dom, scope)
        .into_iter()
        .filter(|(_, el)| el.kind() == ElementKind::Checkbox)
        .find(|(handle, el)| {
            associated_label(dom, *handle, el)
                .is_some_and(|label| label.text().to_lowercase().contains(&phrase))
        })
        .map(|(h, _)| h)
}

/// Enclosing `<label>`, else the label pointing at the element's id.
fn associated_label<'a>(
    dom: &'a DomSnapshot,
    handle: ElementHandle,
    el: &DomElement,
) -> Option<&'a DomElement> {
    if let Some(label) = dom.closest_ancestor(handle, &["label"]) {
        return dom.get(label);
    }
    let id = el.id()?;
    dom.by_tag("label")
        .find(|(_, label)| label.attr("for") == Some(id))
        .map(|(_, label)| label)
}

fn scoped(dom: &DomSnapshot, scope: Option<ElementHandle>) -> Vec<(ElementHandle, &DomElement)> {
    match scope {
        Some(form) => dom.descendants(form).collect(),
        None => dom.iter().collect(),
    }
}

/// First `<form>` on the page.
pub fn first_form(dom: &DomSnapshot) -> Option<ElementHandle> {
    dom.by_tag("form").next().map(|(h, _)| h)
}
