// src/mapper/cv_text.rs
//! Plain-text CV for forms that take a pasted CV instead of (or next to) an
//! uploaded file.

use chrono::Datelike;

use super::{parse_date, CvLocale};
use crate::types::profile::{text, text_or, Education, Profile, Work};

const MONTHS_PL: [&str; 12] = [
    "styczeń",
    "luty",
    "marzec",
    "kwiecień",
    "maj",
    "czerwiec",
    "lipiec",
    "sierpień",
    "wrzesień",
    "październik",
    "listopad",
    "grudzień",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const OPEN_RANGE_END: &str = "Present";

/// Render the profile as text. Section order is fixed and sections without
/// source data are left out entirely, so the same profile always renders to
/// the same bytes.
pub fn render_cv_text(profile: &Profile, locale: CvLocale) -> String {
    let mut out = String::new();
    let basics = &profile.basics;

    // Header
    let mut header = String::new();
    if !basics.name().is_empty() {
        header.push_str(&format!("{}\n", basics.name()));
    }
    if let Some(label) = basics.label.as_deref().filter(|l| !l.is_empty()) {
        header.push_str(&format!("{}\n", label));
    }
    if !header.is_empty() {
        out.push_str(&header);
        out.push('\n');
    }

    // Contact
    let mut contact = String::new();
    if !basics.email().is_empty() {
        contact.push_str(&format!("Email: {}\n", basics.email()));
    }
    if !basics.phone().is_empty() {
        contact.push_str(&format!("Phone: {}\n", basics.phone()));
    }
    if !basics.url().is_empty() {
        contact.push_str(&format!("Website: {}\n", basics.url()));
    }
    if !basics.linkedin_url().is_empty() {
        contact.push_str(&format!("LinkedIn: {}\n", basics.linkedin_url()));
    }
    if !contact.is_empty() {
        out.push_str(&contact);
        out.push('\n');
    }

    if let Some(summary) = basics.summary.as_deref().filter(|s| !s.is_empty()) {
        out.push_str("SUMMARY\n");
        out.push_str(&format!("{}\n\n", summary));
    }

    if !profile.work.is_empty() {
        out.push_str("WORK EXPERIENCE\n");
        for job in &profile.work {
            render_job(&mut out, job, locale);
        }
        out.push('\n');
    }

    if !profile.education.is_empty() {
        out.push_str("EDUCATION\n");
        for edu in &profile.education {
            render_education(&mut out, edu);
        }
        out.push('\n');
    }

    let named_skills: Vec<_> = profile
        .skills
        .iter()
        .filter(|s| s.name.as_deref().is_some_and(|n| !n.is_empty()))
        .collect();
    if !named_skills.is_empty() {
        out.push_str("SKILLS\n");
        for group in named_skills {
            out.push_str(&format!("{}: {}\n", text(&group.name), group.keywords.join(", ")));
        }
        out.push('\n');
    }

    if !profile.languages.is_empty() {
        out.push_str("LANGUAGES\n");
        for lang in &profile.languages {
            out.push_str(&format!("{} - {}\n", text(&lang.language), text(&lang.fluency)));
        }
    }

    out
}

fn render_job(out: &mut String, job: &Work, locale: CvLocale) {
    out.push_str(&format!(
        "\n{} at {}\n",
        text_or(&job.position, "Position"),
        text_or(&job.name, "Company")
    ));

    let start = job
        .start_date
        .as_deref()
        .map(|d| month_year(d, locale))
        .unwrap_or_default();
    let end = job
        .end_date
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| month_year(d, locale))
        .unwrap_or_else(|| OPEN_RANGE_END.to_string());
    out.push_str(&format!("{} - {}\n", start, end));

    if let Some(location) = job.location.as_deref().filter(|l| !l.is_empty()) {
        out.push_str(&format!("{}\n", location));
    }
    if let Some(summary) = job.summary.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("{}\n", summary));
    }
    for highlight in &job.highlights {
        out.push_str(&format!("• {}\n", highlight));
    }
}

fn render_education(out: &mut String, edu: &Education) {
    out.push_str(&format!(
        "\n{} in {}\n",
        text_or(&edu.study_type, "Degree"),
        text_or(&edu.area, "Field")
    ));
    out.push_str(&format!("{}\n", text_or(&edu.institution, "Institution")));

    let start_year = year_of(&edu.start_date);
    let end_year = year_of(&edu.end_date);
    if !start_year.is_empty() || !end_year.is_empty() {
        out.push_str(&format!("{} - {}\n", start_year, end_year));
    }
}

/// "<month> <year>" in the given locale; unparseable dates are kept verbatim.
fn month_year(raw: &str, locale: CvLocale) -> String {
    match parse_date(raw) {
        Some(date) => {
            let months = match locale {
                CvLocale::Pl => &MONTHS_PL,
                CvLocale::En => &MONTHS_EN,
            };
            format!("{} {}", months[date.month0() as usize], date.year())
        }
        None => raw.to_string(),
    }
}

fn year_of(raw: &Option<String>) -> String {
    raw.as_deref()
        .and_then(parse_date)
        .map(|d| d.year().to_string())
        .unwrap_or_default()
}
