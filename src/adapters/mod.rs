// src/adapters/mod.rs
//! Platform adapters: one detector + locator pair per recruiting site family

pub mod erecruiter;
pub mod locator;
pub mod solid_jobs;
pub mod traffit;

pub use erecruiter::ERecruiterAdapter;
pub use solid_jobs::SolidJobsAdapter;
pub use traffit::TraffitAdapter;

use crate::fields::SemanticField;
use crate::mapper::FieldMapper;
use crate::page::{DomSnapshot, ElementHandle};
use crate::types::FormType;

/// Fields bound to elements for one attempt, in the platform's declared
/// order. Built from a fresh snapshot every time and never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatedFieldMap {
    found: Vec<(SemanticField, ElementHandle)>,
    missing: Vec<SemanticField>,
}

impl LocatedFieldMap {
    pub fn insert(&mut self, field: SemanticField, element: Option<ElementHandle>) {
        self.found.retain(|(f, _)| *f != field);
        self.missing.retain(|f| *f != field);
        match element {
            Some(handle) => self.found.push((field, handle)),
            None => self.missing.push(field),
        }
    }

    pub fn get(&self, field: SemanticField) -> Option<ElementHandle> {
        self.found
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, h)| *h)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SemanticField, ElementHandle)> + '_ {
        self.found.iter().copied()
    }

    pub fn missing(&self) -> &[SemanticField] {
        &self.missing
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}

impl FromIterator<(SemanticField, ElementHandle)> for LocatedFieldMap {
    fn from_iter<I: IntoIterator<Item = (SemanticField, ElementHandle)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (field, handle) in iter {
            map.insert(field, Some(handle));
        }
        map
    }
}

/// Detector + locator for one site family, paired with its value mapper.
pub trait PlatformAdapter: Send + Sync {
    fn form_type(&self) -> FormType;

    /// Lower runs first; equal priorities keep registration order.
    fn priority(&self) -> u8;

    /// Cheap, side-effect-free check on the current page.
    fn detect(&self, dom: &DomSnapshot) -> bool;

    /// Best-effort binding of this platform's fields. Never fails.
    fn locate(&self, dom: &DomSnapshot) -> LocatedFieldMap;

    fn mapper(&self) -> FieldMapper;
}

/// The supported platforms, in detection priority order.
pub fn default_adapters() -> Vec<Box<dyn PlatformAdapter>> {
    vec![
        Box::new(SolidJobsAdapter),
        Box::new(TraffitAdapter),
        Box::new(ERecruiterAdapter),
    ]
}
