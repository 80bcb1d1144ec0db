// src/mapper/solid_jobs.rs
use super::{experience_years, render_cv_text, skill_names, MapSettings};
use crate::fields::{FieldValue, SemanticField as F, ValueMap};
use crate::types::{ApplicationOptions, Profile};

pub fn map(profile: &Profile, options: &ApplicationOptions, settings: &MapSettings) -> ValueMap {
    let basics = &profile.basics;

    ValueMap::from([
        // Personal information
        (F::FullName, FieldValue::text(basics.name())),
        (F::Email, FieldValue::text(basics.email())),
        (F::Phone, FieldValue::text(basics.phone())),
        (F::Location, FieldValue::text(basics.location_line())),
        // Employment preferences
        (F::EmploymentType, FieldValue::text(options.employment_type())),
        (F::ExpectedSalary, FieldValue::text(options.expected_salary())),
        (F::SalaryCurrency, FieldValue::text(options.salary_currency())),
        (F::AvailabilityDate, FieldValue::text(options.availability_date())),
        (F::NoticePeriod, FieldValue::text(options.notice_period())),
        (F::RemoteWork, FieldValue::Flag(options.remote_work())),
        // CV content
        (F::CvText, FieldValue::text(render_cv_text(profile, settings.locale))),
        (F::CvFile, FieldValue::text("")),
        (F::CoverLetter, FieldValue::text(options.cover_letter())),
        (F::LinkedInUrl, FieldValue::text(basics.linkedin_url())),
        (F::PortfolioUrl, FieldValue::text(basics.url())),
        (F::Skills, FieldValue::text(skill_names(&profile.skills))),
        (
            F::ExperienceYears,
            FieldValue::text(experience_years(&profile.work, settings.today).to_string()),
        ),
        (F::AdditionalInfo, FieldValue::text(options.additional_info())),
        // Consents
        (F::CookiesConsent, FieldValue::Flag(options.accept_cookies_policy())),
        (
            F::DataProcessingConsent,
            FieldValue::Flag(options.agree_to_data_processing()),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::CvLocale;
    use chrono::NaiveDate;

    fn settings() -> MapSettings {
        MapSettings {
            locale: CvLocale::Pl,
            today: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_empty_basics_maps_to_empty_profile_fields() {
        let profile = Profile::from_json(r#"{"basics": {}}"#).unwrap();
        let values = map(&profile, &ApplicationOptions::default(), &settings());

        for field in [
            F::FullName,
            F::Email,
            F::Phone,
            F::Location,
            F::LinkedInUrl,
            F::PortfolioUrl,
            F::Skills,
            F::CvText,
        ] {
            assert_eq!(values[&field], FieldValue::text(""), "{}", field);
        }
        assert_eq!(values[&F::ExperienceYears], FieldValue::text("0"));
    }

    #[test]
    fn test_options_and_defaults() {
        let options: ApplicationOptions = serde_json::from_str(
            r#"{"expectedSalary": "20000", "acceptCookiesPolicy": false, "remoteWork": false}"#,
        )
        .unwrap();
        let values = map(&Profile::default(), &options, &settings());

        assert_eq!(values[&F::ExpectedSalary], FieldValue::text("20000"));
        assert_eq!(values[&F::EmploymentType], FieldValue::text("B2B"));
        assert_eq!(values[&F::SalaryCurrency], FieldValue::text("PLN netto"));
        assert_eq!(values[&F::CookiesConsent], FieldValue::Flag(false));
        assert_eq!(values[&F::DataProcessingConsent], FieldValue::Flag(true));
        assert_eq!(values[&F::RemoteWork], FieldValue::Flag(false));
    }

    #[test]
    fn test_profile_fields() {
        let profile = Profile::from_json(
            r#"{
                "basics": {
                    "name": "Anna Maria Nowak",
                    "url": "https://nowak.dev",
                    "profiles": [{"network": "linkedin", "url": "https://x"}]
                },
                "work": [{"startDate": "2019-06-01"}],
                "skills": [{"name": "Rust"}, {"name": "Kubernetes"}]
            }"#,
        )
        .unwrap();
        let values = map(&profile, &ApplicationOptions::default(), &settings());

        assert_eq!(values[&F::FullName], FieldValue::text("Anna Maria Nowak"));
        assert_eq!(values[&F::LinkedInUrl], FieldValue::text("https://x"));
        assert_eq!(values[&F::PortfolioUrl], FieldValue::text("https://nowak.dev"));
        assert_eq!(values[&F::Skills], FieldValue::text("Rust, Kubernetes"));
        assert_eq!(values[&F::ExperienceYears], FieldValue::text("5"));
    }
}
