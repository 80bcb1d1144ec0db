// src/error.rs
use thiserror::Error;

use crate::page::{DomEvent, ElementHandle, ElementKind};
use crate::types::FormType;

/// Faults raised by a [`crate::page::Page`] while reading or driving an element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Element {0} is no longer attached to the page")]
    Detached(ElementHandle),

    #[error("Element {0} does not exist on this page")]
    UnknownElement(ElementHandle),

    #[error("Element {handle} ({kind:?}) does not accept {operation}")]
    Unsupported {
        handle: ElementHandle,
        kind: ElementKind,
        operation: &'static str,
    },

    #[error("Select {handle} has no option matching '{value}'")]
    NoSuchOption { handle: ElementHandle, value: String },

    #[error("Dispatching {event:?} on {handle} failed: {reason}")]
    EventRejected {
        handle: ElementHandle,
        event: DomEvent,
        reason: String,
    },

    #[error("Page is not ready: {0}")]
    NotReady(String),
}

/// Conditions met during one fill attempt. None of them is fatal; they are
/// collected into reports and summarised in the outcome message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutofillError {
    #[error("No supported form detected on {url}")]
    NoFormDetected { url: String },

    #[error("Field {field} not found on the {form_type} form")]
    FieldNotFound { field: String, form_type: FormType },

    #[error("No value for field {field}")]
    EmptyValue { field: String },

    #[error("Writing field {field} failed: {source}")]
    WriteFailure {
        field: String,
        #[source]
        source: PageError,
    },

    #[error("Control channel error: {0}")]
    TransportFailure(String),
}
