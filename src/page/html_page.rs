// src/page/html_page.rs
//! In-memory page backed by parsed HTML, with live element state

use std::collections::{HashMap, HashSet};

use super::{Banner, DomEvent, DomSnapshot, ElementHandle, ElementKind, Page};
use crate::error::PageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEvent {
    pub element: ElementHandle,
    pub event: DomEvent,
    /// Element value at the moment the event fired.
    pub value: String,
}

/// A page parsed from static HTML. Values and checked flags start from the
/// markup and change as the page is driven; every synthetic event is
/// journaled so callers can inspect what a real page would have received.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    dom: DomSnapshot,
    values: HashMap<ElementHandle, String>,
    checked: HashMap<ElementHandle, bool>,
    detached: HashSet<ElementHandle>,
    focused: Option<ElementHandle>,
    events: Vec<PageEvent>,
    banners: Vec<Banner>,
    not_ready: Option<String>,
}

impl HtmlPage {
    pub fn parse(url: &str, html: &str) -> Self {
        let dom = DomSnapshot::parse(url, html);
        let mut values = HashMap::new();
        let mut checked = HashMap::new();

        for (handle, el) in dom.iter() {
            match el.kind() {
                ElementKind::Checkbox | ElementKind::Radio => {
                    checked.insert(handle, el.attr("checked").is_some());
                }
                ElementKind::TextArea => {
                    values.insert(handle, el.text().to_string());
                }
                ElementKind::Select => {
                    let options = select_options(&dom, handle);
                    let selected = options
                        .iter()
                        .find(|o| o.selected)
                        .or_else(|| options.first())
                        .map(|o| o.value.clone())
                        .unwrap_or_default();
                    values.insert(handle, selected);
                }
                ElementKind::Text | ElementKind::File | ElementKind::Other => {
                    if el.is_form_control() {
                        values.insert(handle, el.attr("value").unwrap_or("").to_string());
                    }
                }
            }
        }

        Self {
            dom,
            values,
            checked,
            detached: HashSet::new(),
            focused: None,
            events: Vec::new(),
            banners: Vec::new(),
            not_ready: None,
        }
    }

    pub fn events(&self) -> &[PageEvent] {
        &self.events
    }

    pub fn events_for(&self, element: ElementHandle) -> Vec<DomEvent> {
        self.events
            .iter()
            .filter(|e| e.element == element)
            .map(|e| e.event)
            .collect()
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn focused(&self) -> Option<ElementHandle> {
        self.focused
    }

    /// Simulate the host page removing an element mid-attempt.
    pub fn detach(&mut self, element: ElementHandle) {
        self.detached.insert(element);
    }

    /// Simulate a host script changing a checkbox without user activation.
    pub fn set_checked(&mut self, element: ElementHandle, checked: bool) {
        self.checked.insert(element, checked);
    }

    pub fn mark_not_ready(&mut self, reason: &str) {
        self.not_ready = Some(reason.to_string());
    }

    fn live(&self, element: ElementHandle) -> Result<ElementKind, PageError> {
        if self.detached.contains(&element) {
            return Err(PageError::Detached(element));
        }
        self.dom
            .get(element)
            .map(|el| el.kind())
            .ok_or(PageError::UnknownElement(element))
    }

    fn record(&mut self, element: ElementHandle, event: DomEvent) {
        let value = self.values.get(&element).cloned().unwrap_or_default();
        self.events.push(PageEvent {
            element,
            event,
            value,
        });
    }
}

struct SelectOption {
    value: String,
    label: String,
    selected: bool,
}

fn select_options(dom: &DomSnapshot, select: ElementHandle) -> Vec<SelectOption> {
    dom.descendants(select)
        .filter(|(_, el)| el.tag == "option")
        .map(|(_, el)| {
            let label = el.text().trim().to_string();
            SelectOption {
                value: el.attr("value").map(str::to_string).unwrap_or_else(|| label.clone()),
                label,
                selected: el.attr("selected").is_some(),
            }
        })
        .collect()
}

impl Page for HtmlPage {
    fn url(&self) -> &str {
        self.dom.url()
    }

    fn snapshot(&self) -> Result<DomSnapshot, PageError> {
        match &self.not_ready {
            Some(reason) => Err(PageError::NotReady(reason.clone())),
            None => Ok(self.dom.clone()),
        }
    }

    fn kind(&self, element: ElementHandle) -> Result<ElementKind, PageError> {
        self.live(element)
    }

    fn focus(&mut self, element: ElementHandle) -> Result<(), PageError> {
        self.live(element)?;
        self.focused = Some(element);
        self.record(element, DomEvent::Focus);
        Ok(())
    }

    fn set_value(&mut self, element: ElementHandle, value: &str) -> Result<(), PageError> {
        let kind = self.live(element)?;
        if !kind.accepts_text() {
            return Err(PageError::Unsupported {
                handle: element,
                kind,
                operation: "value assignment",
            });
        }

        let stored = if kind == ElementKind::Select && !value.is_empty() {
            let wanted = value.trim().to_lowercase();
            select_options(&self.dom, element)
                .into_iter()
                .find(|o| o.value.to_lowercase() == wanted || o.label.to_lowercase() == wanted)
                .map(|o| o.value)
                .ok_or_else(|| PageError::NoSuchOption {
                    handle: element,
                    value: value.to_string(),
                })?
        } else {
            value.to_string()
        };

        self.values.insert(element, stored);
        Ok(())
    }

    fn value(&self, element: ElementHandle) -> Result<String, PageError> {
        self.live(element)?;
        Ok(self.values.get(&element).cloned().unwrap_or_default())
    }

    fn dispatch(&mut self, element: ElementHandle, event: DomEvent) -> Result<(), PageError> {
        self.live(element)?;
        if event == DomEvent::Blur && self.focused == Some(element) {
            self.focused = None;
        }
        self.record(element, event);
        Ok(())
    }

    fn is_checked(&self, element: ElementHandle) -> Result<bool, PageError> {
        let kind = self.live(element)?;
        match kind {
            ElementKind::Checkbox | ElementKind::Radio => {
                Ok(self.checked.get(&element).copied().unwrap_or(false))
            }
            _ => Err(PageError::Unsupported {
                handle: element,
                kind,
                operation: "checked state",
            }),
        }
    }

    fn click(&mut self, element: ElementHandle) -> Result<(), PageError> {
        let kind = self.live(element)?;
        self.record(element, DomEvent::Click);
        match kind {
            ElementKind::Checkbox => {
                let state = self.checked.entry(element).or_insert(false);
                *state = !*state;
                self.record(element, DomEvent::Input);
                self.record(element, DomEvent::Change);
            }
            ElementKind::Radio => {
                self.checked.insert(element, true);
                self.record(element, DomEvent::Change);
            }
            _ => {}
        }
        Ok(())
    }

    fn show_banner(&mut self, banner: Banner) {
        self.banners.push(banner);
    }
}
