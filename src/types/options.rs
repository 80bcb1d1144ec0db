// src/types/options.rs
//! Per-submission application options and their defaults

use serde::{Deserialize, Serialize};

pub const DEFAULT_EMPLOYMENT_TYPE: &str = "B2B";
pub const DEFAULT_SALARY_CURRENCY: &str = "PLN netto";
pub const DEFAULT_AVAILABILITY: &str = "Natychmiast";
pub const DEFAULT_NOTICE_PERIOD: &str = "1 miesiąc";

/// User-supplied overrides for one fill attempt.
///
/// Unset and empty values fall back to the defaults exposed by the
/// accessor methods. Consent flags default to `true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationOptions {
    pub employment_type: Option<String>,
    pub expected_salary: Option<String>,
    pub salary_currency: Option<String>,
    pub availability_date: Option<String>,
    pub notice_period: Option<String>,
    pub remote_work: Option<bool>,
    pub cover_letter: Option<String>,
    pub additional_info: Option<String>,
    pub accept_cookies_policy: Option<bool>,
    pub agree_to_data_processing: Option<bool>,
    pub agree_to_future_recruitment: Option<bool>,
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

impl ApplicationOptions {
    pub fn employment_type(&self) -> &str {
        or_default(&self.employment_type, DEFAULT_EMPLOYMENT_TYPE)
    }

    pub fn expected_salary(&self) -> &str {
        or_default(&self.expected_salary, "")
    }

    pub fn salary_currency(&self) -> &str {
        or_default(&self.salary_currency, DEFAULT_SALARY_CURRENCY)
    }

    pub fn availability_date(&self) -> &str {
        or_default(&self.availability_date, DEFAULT_AVAILABILITY)
    }

    pub fn notice_period(&self) -> &str {
        or_default(&self.notice_period, DEFAULT_NOTICE_PERIOD)
    }

    pub fn remote_work(&self) -> bool {
        self.remote_work.unwrap_or(true)
    }

    pub fn cover_letter(&self) -> &str {
        or_default(&self.cover_letter, "")
    }

    pub fn additional_info(&self) -> &str {
        or_default(&self.additional_info, "")
    }

    pub fn accept_cookies_policy(&self) -> bool {
        self.accept_cookies_policy.unwrap_or(true)
    }

    pub fn agree_to_data_processing(&self) -> bool {
        self.agree_to_data_processing.unwrap_or(true)
    }

    pub fn agree_to_future_recruitment(&self) -> bool {
        self.agree_to_future_recruitment.unwrap_or(true)
    }
}
