// src/mapper/erecruiter.rs
use super::{split_name, MapSettings};
use crate::fields::{FieldValue, SemanticField as F, ValueMap};
use crate::types::{ApplicationOptions, Profile};

pub fn map(profile: &Profile, options: &ApplicationOptions, _settings: &MapSettings) -> ValueMap {
    let basics = &profile.basics;
    let (first_name, last_name) = split_name(basics.name());

    ValueMap::from([
        (F::FirstName, FieldValue::Text(first_name)),
        (F::LastName, FieldValue::Text(last_name)),
        (F::Email, FieldValue::text(basics.email())),
        (F::Phone, FieldValue::text(basics.phone())),
        (F::Location, FieldValue::text(basics.location_line())),
        (F::LinkedInUrl, FieldValue::text(basics.linkedin_url())),
        (F::SalaryExpectations, FieldValue::text(options.expected_salary())),
        (F::NoticePeriod, FieldValue::text(options.notice_period())),
        (F::CoverLetter, FieldValue::text(options.cover_letter())),
        (F::AdditionalInfo, FieldValue::text(options.additional_info())),
        (F::CvFile, FieldValue::text("")),
        (
            F::DataProcessingConsent,
            FieldValue::Flag(options.agree_to_data_processing()),
        ),
        (
            F::FutureRecruitmentConsent,
            FieldValue::Flag(options.agree_to_future_recruitment()),
        ),
    ])
}
