// src/fill/mod.rs
//! Fill orchestrator: drives located elements through the event sequence
//! client-side frameworks expect, one field at a time.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

pub mod settle;

pub use settle::{FixedDelay, Settle};

use crate::adapters::LocatedFieldMap;
use crate::error::{AutofillError, PageError};
use crate::fields::{FieldValue, SemanticField, ValueMap};
use crate::page::{DomEvent, ElementHandle, ElementKind, Page};

/// Settle steps in one full text write.
const TEXT_WRITE_SETTLES: u32 = 5;

/// States of the text write sequence. A settle follows every state except
/// `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStep {
    Focus,
    Clear,
    Input,
    Commit,
    Blur,
    Done,
}

impl WriteStep {
    pub fn next(self) -> Self {
        match self {
            WriteStep::Focus => WriteStep::Clear,
            WriteStep::Clear => WriteStep::Input,
            WriteStep::Input => WriteStep::Commit,
            WriteStep::Commit => WriteStep::Blur,
            WriteStep::Blur | WriteStep::Done => WriteStep::Done,
        }
    }
}

/// What happened to each field of one attempt.
#[derive(Debug, Clone, Default)]
pub struct FillReport {
    pub filled: Vec<SemanticField>,
    /// Checkboxes already in the desired state.
    pub unchanged: Vec<SemanticField>,
    /// File inputs present on the form; uploads stay manual.
    pub file_fields: Vec<SemanticField>,
    pub skipped: Vec<AutofillError>,
}

impl FillReport {
    pub fn filled_count(&self) -> usize {
        self.filled.len()
    }

    /// Partial fills count as success so the user can finish by hand.
    pub fn success(&self) -> bool {
        !self.filled.is_empty()
    }

    pub fn write_failures(&self) -> impl Iterator<Item = &AutofillError> {
        self.skipped
            .iter()
            .filter(|e| matches!(e, AutofillError::WriteFailure { .. }))
    }
}

pub struct FillOrchestrator {
    settle: Arc<dyn Settle>,
}

impl FillOrchestrator {
    pub fn new(settle: Arc<dyn Settle>) -> Self {
        Self { settle }
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self::new(Arc::new(FixedDelay::new(interval)))
    }

    /// Upper bound on the time one attempt over `located` can take.
    pub fn worst_case_duration(&self, located: &LocatedFieldMap) -> Duration {
        let settles = TEXT_WRITE_SETTLES.saturating_mul(located.len() as u32);
        self.settle.max_wait().saturating_mul(settles)
    }

    /// Write every located field that has a value, in located order. Each
    /// field's sequence completes before the next field starts, and a
    /// failing field never stops the remaining ones.
    pub async fn fill<P: Page + ?Sized>(
        &self,
        page: &mut P,
        located: &LocatedFieldMap,
        values: &ValueMap,
    ) -> FillReport {
        let mut report = FillReport::default();

        for (field, element) in located.iter() {
            let Some(value) = values.get(&field) else {
                debug!("No value for {}", field);
                report.skipped.push(AutofillError::EmptyValue {
                    field: field.to_string(),
                });
                continue;
            };

            let kind = match page.kind(element) {
                Ok(kind) => kind,
                Err(e) => {
                    warn!("Cannot inspect {} ({}): {}", field, element, e);
                    report.skipped.push(write_failure(field, e));
                    continue;
                }
            };

            if kind == ElementKind::File {
                info!("Note: {} upload field detected but must be filled manually", field);
                report.file_fields.push(field);
                continue;
            }

            if value.is_empty() {
                debug!("No value for {}", field);
                report.skipped.push(AutofillError::EmptyValue {
                    field: field.to_string(),
                });
                continue;
            }

            let result = match (kind, value) {
                (ElementKind::Checkbox, FieldValue::Flag(desired)) => {
                    self.set_checkbox(page, element, *desired).await
                }
                (kind, FieldValue::Text(text)) if kind.accepts_text() => {
                    debug!("Setting {} to: {}", field, text);
                    self.write_text(page, element, text).await.map(|_| true)
                }
                (kind, value) => Err(PageError::Unsupported {
                    handle: element,
                    kind,
                    operation: match value {
                        FieldValue::Flag(_) => "a flag value",
                        FieldValue::Text(_) => "a text value",
                    },
                }),
            };

            match result {
                Ok(true) => report.filled.push(field),
                Ok(false) => {
                    debug!("{} already in the desired state", field);
                    report.unchanged.push(field);
                }
                Err(e) => {
                    warn!("Failed to fill {}: {}", field, e);
                    report.skipped.push(write_failure(field, e));
                }
            }
        }

        info!(
            "Form filled - {} fields updated, {} skipped",
            report.filled_count(),
            report.skipped.len()
        );
        report
    }

    /// Full write sequence. When a step fails the element gets its previous
    /// value back and loses focus, so no field is left blanked.
    async fn write_text<P: Page + ?Sized>(
        &self,
        page: &mut P,
        element: ElementHandle,
        value: &str,
    ) -> Result<(), PageError> {
        let previous = page.value(element)?;
        let result = self.write_sequence(page, element, value).await;
        if result.is_err() {
            restore(page, element, &previous);
        }
        result
    }

    async fn write_sequence<P: Page + ?Sized>(
        &self,
        page: &mut P,
        element: ElementHandle,
        value: &str,
    ) -> Result<(), PageError> {
        let mut step = WriteStep::Focus;
        loop {
            match step {
                WriteStep::Focus => page.focus(element)?,
                WriteStep::Clear => {
                    page.set_value(element, "")?;
                    page.dispatch(element, DomEvent::Input)?;
                }
                WriteStep::Input => {
                    page.set_value(element, value)?;
                    page.dispatch(element, DomEvent::Input)?;
                }
                WriteStep::Commit => page.dispatch(element, DomEvent::Change)?,
                WriteStep::Blur => page.dispatch(element, DomEvent::Blur)?,
                WriteStep::Done => return Ok(()),
            }
            self.settle.settle(step).await;
            step = step.next();
        }
    }

    /// Returns whether the box was toggled. The live state is read right
    /// before deciding since host scripts may have changed it.
    async fn set_checkbox<P: Page + ?Sized>(
        &self,
        page: &mut P,
        element: ElementHandle,
        desired: bool,
    ) -> Result<bool, PageError> {
        if page.is_checked(element)? == desired {
            return Ok(false);
        }
        page.click(element)?;
        self.settle.settle(WriteStep::Commit).await;
        Ok(true)
    }
}

/// Best effort: the element may already be gone.
fn restore<P: Page + ?Sized>(page: &mut P, element: ElementHandle, previous: &str) {
    if page.set_value(element, previous).is_ok() {
        let _ = page.dispatch(element, DomEvent::Input);
    }
    let _ = page.dispatch(element, DomEvent::Blur);
}

fn write_failure(field: SemanticField, source: PageError) -> AutofillError {
    AutofillError::WriteFailure {
        field: field.to_string(),
        source,
    }
}
