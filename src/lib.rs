// src/lib.rs
//! Autofill engine for Polish recruiting application forms (SOLID.jobs,
//! Traffit, eRecruiter): detects the platform on a page, maps a JSON Resume
//! profile onto its fields and drives the form the way a user would.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod fields;
pub mod fill;
pub mod mapper;
pub mod page;
pub mod types;

pub use adapters::{default_adapters, LocatedFieldMap, PlatformAdapter};
pub use config::AutofillConfig;
pub use dispatcher::Dispatcher;
pub use error::{AutofillError, PageError};
pub use fields::{FieldValue, SemanticField, ValueMap};
pub use fill::{FillOrchestrator, FillReport, FixedDelay, Settle};
pub use page::{HtmlPage, Page};
pub use types::{Action, ActionOutcome, ApplicationOptions, FillContext, FormType, Profile};
