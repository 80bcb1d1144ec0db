// src/adapters/traffit.rs
//! Traffit hosted application forms (`*.traffit.com`)

use super::locator::{first_form, locate_fields, Attr, FieldSpec, Rule, Strategy, Test};
use super::{LocatedFieldMap, PlatformAdapter};
use crate::fields::SemanticField as F;
use crate::mapper::{self, FieldMapper};
use crate::page::DomSnapshot;
use crate::types::FormType;

const HOST_MARKER: &str = "traffit.com";

const INPUT: &[&str] = &["input"];

// Consent labels are matched on the English legal text Traffit renders even
// on Polish-language forms.
const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        field: F::FirstName,
        strategy: Strategy::Labelled {
            labels: &["imię", "first name", "name"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("first"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("imie"))]),
            ],
        },
    },
    FieldSpec {
        field: F::LastName,
        strategy: Strategy::Labelled {
            labels: &["nazwisko", "last name", "surname"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("last"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("nazwisko"))]),
            ],
        },
    },
    FieldSpec {
        field: F::Email,
        strategy: Strategy::Labelled {
            labels: &["email", "e-mail"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Type, Test::Equals("email"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("email"))]),
            ],
        },
    },
    FieldSpec {
        field: F::Phone,
        strategy: Strategy::Labelled {
            labels: &["telefon", "phone", "numer"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Type, Test::Equals("tel"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("phone"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("telefon"))]),
            ],
        },
    },
    FieldSpec {
        field: F::LinkedInUrl,
        strategy: Strategy::Labelled {
            labels: &["linkedin", "linked in", "profil"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("linkedin"))]),
                Rule::new(INPUT, &[(Attr::Placeholder, Test::Contains("linkedin"))]),
            ],
        },
    },
    FieldSpec {
        field: F::SalaryExpectations,
        strategy: Strategy::Labelled {
            labels: &["salary", "wynagrodzeni", "expectations"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("salary"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("expectations"))]),
            ],
        },
    },
    FieldSpec {
        field: F::Availability,
        strategy: Strategy::Labelled {
            labels: &["availability", "dostępn", "available"],
            rules: &[
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("availability"))]),
                Rule::new(INPUT, &[(Attr::Name, Test::Contains("available"))]),
            ],
        },
    },
    FieldSpec {
        field: F::CvFile,
        strategy: Strategy::Structural(&[Rule::new(INPUT, &[(Attr::Type, Test::Equals("file"))])]),
    },
    FieldSpec {
        field: F::DataProcessingConsent,
        strategy: Strategy::Checkbox {
            phrase: "personal data",
            rules: &[],
        },
    },
    FieldSpec {
        field: F::FutureRecruitmentConsent,
        strategy: Strategy::Checkbox {
            phrase: "further recruitment",
            rules: &[],
        },
    },
];

pub struct TraffitAdapter;

impl PlatformAdapter for TraffitAdapter {
    fn form_type(&self) -> FormType {
        FormType::Traffit
    }

    fn priority(&self) -> u8 {
        20
    }

    fn detect(&self, dom: &DomSnapshot) -> bool {
        dom.hostname().contains(HOST_MARKER) && first_form(dom).is_some()
    }

    fn locate(&self, dom: &DomSnapshot) -> LocatedFieldMap {
        locate_fields(dom, first_form(dom), FIELDS)
    }

    fn mapper(&self) -> FieldMapper {
        mapper::traffit::map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://billennium.traffit.com/public/an/abc";

    const PAGE: &str = r#"
        <form>
          <div class="form-group"><label>Imię *</label><input type="text" id="first"></div>
          <div class="form-group"><label>Nazwisko *</label><input type="text" id="last"></div>
          <div class="form-group"><label for="mail">E-mail</label><input id="mail"></div>
          <input type="tel" name="candidate_phone" id="phone">
          <input name="linkedin_profile" id="li">
          <input name="salary_expectations" id="salary">
          <input type="file" id="cv">
          <label><input type="checkbox" id="gdpr"> I consent to the processing of my personal data</label>
          <input type="checkbox" id="future"><label for="future">I agree to further recruitment processes</label>
        </form>"#;

    #[test]
    fn test_detect_requires_host_and_form() {
        assert!(TraffitAdapter.detect(&DomSnapshot::parse(URL, PAGE)));
        assert!(!TraffitAdapter.detect(&DomSnapshot::parse(URL, "<div></div>")));
        assert!(!TraffitAdapter.detect(&DomSnapshot::parse("https://example.com/jobs", PAGE)));
    }

    #[test]
    fn test_locate() {
        let dom = DomSnapshot::parse(URL, PAGE);
        let located = TraffitAdapter.locate(&dom);

        for (field, id) in [
            (F::FirstName, "first"),
            (F::LastName, "last"),
            (F::Email, "mail"),
            (F::Phone, "phone"),
            (F::LinkedInUrl, "li"),
            (F::SalaryExpectations, "salary"),
            (F::CvFile, "cv"),
            (F::DataProcessingConsent, "gdpr"),
            (F::FutureRecruitmentConsent, "future"),
        ] {
            assert_eq!(located.get(field), dom.by_id(id), "{}", field);
        }
        assert_eq!(located.missing(), &[F::Availability]);
    }
}
