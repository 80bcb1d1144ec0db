// src/page/mod.rs
//! Page abstraction the engine reads from and writes to

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub mod document;
pub mod html_page;

pub use document::{DomElement, DomSnapshot};
pub use html_page::{HtmlPage, PageEvent};

use crate::error::PageError;

/// Opaque reference to an element, valid for a single fill attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementHandle(usize);

impl ElementHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Text,
    TextArea,
    Select,
    Checkbox,
    Radio,
    File,
    Other,
}

impl ElementKind {
    pub fn accepts_text(&self) -> bool {
        matches!(self, ElementKind::Text | ElementKind::TextArea | ElementKind::Select)
    }
}

/// Synthetic DOM events the orchestrator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomEvent {
    Focus,
    Input,
    Change,
    Blur,
    Click,
}

/// Transient on-page notice shown when a supported form is detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub display_for: Duration,
    pub fade_out: Duration,
}

/// A live page: a DOM snapshot for locating plus element-level operations
/// for writing. Implementations share the DOM with the host page's own
/// scripts, so state reads must reflect the page at call time.
pub trait Page {
    fn url(&self) -> &str;

    /// Fresh view of the element tree for one attempt.
    fn snapshot(&self) -> Result<DomSnapshot, PageError>;

    fn kind(&self, element: ElementHandle) -> Result<ElementKind, PageError>;

    fn focus(&mut self, element: ElementHandle) -> Result<(), PageError>;

    /// Assign the element's value without emitting any event.
    fn set_value(&mut self, element: ElementHandle, value: &str) -> Result<(), PageError>;

    fn value(&self, element: ElementHandle) -> Result<String, PageError>;

    fn dispatch(&mut self, element: ElementHandle, event: DomEvent) -> Result<(), PageError>;

    fn is_checked(&self, element: ElementHandle) -> Result<bool, PageError>;

    /// User-style activation; toggles checkboxes.
    fn click(&mut self, element: ElementHandle) -> Result<(), PageError>;

    fn show_banner(&mut self, banner: Banner);
}
