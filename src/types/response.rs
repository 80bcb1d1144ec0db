// src/types/response.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::options::ApplicationOptions;
use crate::types::profile::Profile;

// ===== Platform Identity =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    #[serde(rename = "SOLID.jobs")]
    SolidJobs,
    #[serde(rename = "Traffit")]
    Traffit,
    #[serde(rename = "eRecruiter")]
    ERecruiter,
    #[serde(rename = "unknown")]
    Unknown,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::SolidJobs => "SOLID.jobs",
            FormType::Traffit => "Traffit",
            FormType::ERecruiter => "eRecruiter",
            FormType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Control Messages =====

/// Profile and options for one fill attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FillContext {
    #[serde(rename = "cvData")]
    pub profile: Profile,
    #[serde(default)]
    pub options: ApplicationOptions,
}

impl FillContext {
    pub fn new(profile: Profile, options: ApplicationOptions) -> Self {
        Self { profile, options }
    }
}

/// Inbound request from the control surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    DetectForm,
    FillForm(FillContext),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectOutcome {
    pub detected: bool,
    pub form_type: FormType,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillOutcome {
    pub success: bool,
    pub filled_count: usize,
    pub form_type: FormType,
    pub message: String,
}

/// Reply for a request that could not be carried out at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReply {
    pub success: bool,
    pub message: String,
}

impl FailureReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionOutcome {
    Detect(DetectOutcome),
    Fill(FillOutcome),
    Failed(FailureReply),
}

/// Sent to the control surface when a page with a supported form loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDetectedNotice {
    pub action: String,
    pub form_type: FormType,
    pub url: String,
}

impl FormDetectedNotice {
    pub fn new(form_type: FormType, url: &str) -> Self {
        Self {
            action: "formDetected".to_string(),
            form_type,
            url: url.to_string(),
        }
    }
}
