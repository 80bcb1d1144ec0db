// src/fields.rs
//! Shared field vocabulary and the value map produced by the mappers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Logical form concepts. Each platform declares the subset its form exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticField {
    FullName,
    FirstName,
    LastName,
    Email,
    Phone,
    Location,
    LinkedInUrl,
    PortfolioUrl,
    EmploymentType,
    ExpectedSalary,
    SalaryCurrency,
    SalaryExpectations,
    AvailabilityDate,
    Availability,
    NoticePeriod,
    RemoteWork,
    Skills,
    ExperienceYears,
    CvText,
    CoverLetter,
    AdditionalInfo,
    CvFile,
    CookiesConsent,
    DataProcessingConsent,
    FutureRecruitmentConsent,
}

impl SemanticField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticField::FullName => "fullName",
            SemanticField::FirstName => "firstName",
            SemanticField::LastName => "lastName",
            SemanticField::Email => "email",
            SemanticField::Phone => "phone",
            SemanticField::Location => "location",
            SemanticField::LinkedInUrl => "linkedInUrl",
            SemanticField::PortfolioUrl => "portfolioUrl",
            SemanticField::EmploymentType => "employmentType",
            SemanticField::ExpectedSalary => "expectedSalary",
            SemanticField::SalaryCurrency => "salaryCurrency",
            SemanticField::SalaryExpectations => "salaryExpectations",
            SemanticField::AvailabilityDate => "availabilityDate",
            SemanticField::Availability => "availability",
            SemanticField::NoticePeriod => "noticePeriod",
            SemanticField::RemoteWork => "remoteWork",
            SemanticField::Skills => "skills",
            SemanticField::ExperienceYears => "experienceYears",
            SemanticField::CvText => "cvText",
            SemanticField::CoverLetter => "coverLetter",
            SemanticField::AdditionalInfo => "additionalInfo",
            SemanticField::CvFile => "cvFile",
            SemanticField::CookiesConsent => "cookiesConsent",
            SemanticField::DataProcessingConsent => "dataProcessingConsent",
            SemanticField::FutureRecruitmentConsent => "futureRecruitmentConsent",
        }
    }
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }

    /// Empty text carries nothing to write. Flags always do.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }
}

/// Values to write, keyed by field. Built without looking at the page.
pub type ValueMap = BTreeMap<SemanticField, FieldValue>;
