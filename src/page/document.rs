// src/page/document.rs
//! Read-only element tree captured from a page at the start of an attempt

use scraper::{ElementRef, Html};

use super::{ElementHandle, ElementKind};

#[derive(Debug, Clone)]
pub struct DomElement {
    pub tag: String,
    attrs: Vec<(String, String)>,
    pub parent: Option<ElementHandle>,
    /// One past the last descendant, in document order.
    subtree_end: usize,
    text: String,
}

impl DomElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_class_containing(&self, needle: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.to_lowercase().contains(needle))
    }

    pub fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }

    pub fn kind(&self) -> ElementKind {
        match self.tag.as_str() {
            "textarea" => ElementKind::TextArea,
            "select" => ElementKind::Select,
            "input" => {
                let input_type = self.attr("type").unwrap_or("text").to_ascii_lowercase();
                match input_type.as_str() {
                    "checkbox" => ElementKind::Checkbox,
                    "radio" => ElementKind::Radio,
                    "file" => ElementKind::File,
                    "submit" | "button" | "reset" | "image" | "hidden" => ElementKind::Other,
                    _ => ElementKind::Text,
                }
            }
            _ => ElementKind::Other,
        }
    }
}

/// Elements of a parsed page in document order. A handle is the element's
/// position in that order and is only meaningful for the snapshot that
/// produced it.
#[derive(Debug, Clone)]
pub struct DomSnapshot {
    url: String,
    elements: Vec<DomElement>,
}

impl DomSnapshot {
    pub fn parse(url: &str, html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut elements = Vec::new();
        collect(document.root_element(), None, &mut elements);
        Self {
            url: url.to_string(),
            elements,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Lower-cased host of the page URL, empty when the URL has none.
    pub fn hostname(&self) -> String {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, handle: ElementHandle) -> Option<&DomElement> {
        self.elements.get(handle.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementHandle, &DomElement)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, el)| (ElementHandle::new(i), el))
    }

    pub fn by_tag<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = (ElementHandle, &'a DomElement)> + 'a {
        self.iter().filter(move |(_, el)| el.tag == tag)
    }

    pub fn by_id(&self, id: &str) -> Option<ElementHandle> {
        self.iter()
            .find(|(_, el)| el.id() == Some(id))
            .map(|(h, _)| h)
    }

    /// Descendants of `handle` in document order, excluding itself.
    pub fn descendants(
        &self,
        handle: ElementHandle,
    ) -> impl Iterator<Item = (ElementHandle, &DomElement)> {
        let (start, end) = match self.get(handle) {
            Some(el) => (handle.index() + 1, el.subtree_end),
            None => (0, 0),
        };
        self.elements[start..end]
            .iter()
            .enumerate()
            .map(move |(i, el)| (ElementHandle::new(start + i), el))
    }

    /// Nearest ancestor (or the element itself) whose tag is one of `tags`.
    pub fn closest(&self, handle: ElementHandle, tags: &[&str]) -> Option<ElementHandle> {
        let mut current = Some(handle);
        while let Some(h) = current {
            let el = self.get(h)?;
            if tags.contains(&el.tag.as_str()) {
                return Some(h);
            }
            current = el.parent;
        }
        None
    }

    /// Strict ancestor variant of [`DomSnapshot::closest`].
    pub fn closest_ancestor(&self, handle: ElementHandle, tags: &[&str]) -> Option<ElementHandle> {
        let parent = self.get(handle)?.parent?;
        self.closest(parent, tags)
    }
}

fn collect(element: ElementRef<'_>, parent: Option<ElementHandle>, out: &mut Vec<DomElement>) {
    let index = out.len();
    let value = element.value();
    out.push(DomElement {
        tag: value.name().to_ascii_lowercase(),
        attrs: value
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        parent,
        subtree_end: index + 1,
        text: element.text().collect::<String>(),
    });

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            collect(child_element, Some(ElementHandle::new(index)), out);
        }
    }

    out[index].subtree_end = out.len();
}
