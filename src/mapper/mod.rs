// src/mapper/mod.rs
//! Profile + options → values, one mapper per platform. Nothing here touches
//! the page.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod cv_text;
pub mod erecruiter;
pub mod solid_jobs;
pub mod traffit;

pub use cv_text::render_cv_text;

use crate::fields::ValueMap;
use crate::types::profile::{Skill, Work};
use crate::types::{ApplicationOptions, Profile};

/// Start date assumed for a job without one when estimating experience.
const UNDATED_START: (i32, u32, u32) = (2000, 1, 1);
const DAYS_PER_YEAR: f64 = 365.25;

pub type FieldMapper = fn(&Profile, &ApplicationOptions, &MapSettings) -> ValueMap;

/// Month-name language used when rendering CV dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CvLocale {
    #[default]
    Pl,
    En,
}

/// Inputs a mapper needs besides the profile and options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSettings {
    pub locale: CvLocale,
    pub today: NaiveDate,
}

impl MapSettings {
    pub fn current(locale: CvLocale) -> Self {
        Self {
            locale,
            today: Utc::now().date_naive(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self::current(CvLocale::default())
    }
}

// ===== Shared Helpers =====

/// First whitespace-separated token, then the remainder joined by spaces.
pub fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or("").to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Parse `YYYY-MM-DD`, `YYYY-MM` or `YYYY`, ignoring any time suffix.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{}-01-01", raw), "%Y-%m-%d").ok())
}

/// Whole years since the earliest job start, using 365.25-day years.
/// Zero without work history.
pub fn experience_years(work: &[Work], today: NaiveDate) -> u32 {
    let undated = NaiveDate::from_ymd_opt(UNDATED_START.0, UNDATED_START.1, UNDATED_START.2)
        .unwrap_or(NaiveDate::MIN);

    let Some(first_start) = work
        .iter()
        .map(|job| {
            job.start_date
                .as_deref()
                .and_then(parse_date)
                .unwrap_or(undated)
        })
        .min()
    else {
        return 0;
    };

    let days = (today - first_start).num_days();
    if days <= 0 {
        return 0;
    }
    (days as f64 / DAYS_PER_YEAR).floor() as u32
}

pub fn skill_names(skills: &[Skill]) -> String {
    skills
        .iter()
        .filter_map(|s| s.name.as_deref().filter(|n| !n.is_empty()))
        .collect::<Vec<_>>()
        .join(", ")
}
